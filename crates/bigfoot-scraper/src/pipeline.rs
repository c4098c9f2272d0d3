//! Two-stage scrape pipeline: listing fetch, then detail fetch,
//! geocode, merge, and atomic dataset write.
//!
//! Per-report failures are logged and counted; only run-level failures
//! (listing fetch, dataset write) abort the job. There are no retries:
//! a report that fails this run is picked up again next run as long as
//! the listing still carries it.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use bigfoot_geocode::Geocoder;
use bigfoot_types::SightingReport;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::parse::{self, ReportPage};

/// Summary of a scrape run.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// Report ids found on the listing page.
    pub listed: usize,
    /// Detail pages fetched and parsed.
    pub parsed: usize,
    /// Reports successfully geocoded into dataset records.
    pub geocoded: usize,
    /// Reports dropped for any reason (fetch, parse, fields, geocode).
    pub failures: usize,
    /// Total records in the dataset file after the merge.
    pub total_written: usize,
}

/// Run the full scrape pipeline.
///
/// # Errors
///
/// Returns a [`ScrapeError`] when the listing page cannot be fetched
/// or the merged dataset cannot be written. Individual report failures
/// are counted in the outcome instead.
pub async fn run(
    config: &ScraperConfig,
    geocoder: &Geocoder,
) -> Result<ScrapeOutcome, ScrapeError> {
    let client = reqwest::Client::builder()
        .user_agent(&config.source.user_agent)
        .timeout(Duration::from_secs(config.source.timeout_secs))
        .build()?;

    // Stage 1: listing page -> report ids.
    let listing_html = fetch_text(&client, &config.source.listing_url).await?;
    let ids = parse::extract_report_ids(&listing_html)?;
    let mut outcome = ScrapeOutcome {
        listed: ids.len(),
        ..ScrapeOutcome::default()
    };
    info!(listed = ids.len(), "listing page scanned");

    // Stage 2: detail pages, bounded concurrency with a polite delay.
    let delay = Duration::from_millis(config.source.request_delay_ms);
    let concurrency = config.source.max_concurrent.max(1);

    let mut pages: Vec<ReportPage> = Vec::new();
    let mut detail_stream = stream::iter(ids)
        .map(|id| {
            let client = client.clone();
            let url = format!("{}?id={id}", config.source.report_url);
            async move {
                let result = fetch_text(&client, &url).await;
                (id, result)
            }
        })
        .buffer_unordered(concurrency);

    while let Some((id, result)) = detail_stream.next().await {
        match result.and_then(|html| parse::parse_report_page(&html)) {
            Ok(Some(page)) => pages.push(page),
            Ok(None) => {
                outcome.failures = outcome.failures.saturating_add(1);
                warn!(id, "detail page carries no report header");
            }
            Err(error) => {
                outcome.failures = outcome.failures.saturating_add(1);
                warn!(id, %error, "failed to fetch or parse detail page");
            }
        }

        if delay.as_millis() > 0 {
            tokio::time::sleep(delay).await;
        }
    }
    outcome.parsed = pages.len();

    // Stage 3: geocode each page into a dataset record. Sequential --
    // the provider round-trip is the natural pace limiter.
    let mut fresh = Vec::new();
    for page in &pages {
        match build_report(page, geocoder).await {
            Ok(Some(report)) => {
                outcome.geocoded = outcome.geocoded.saturating_add(1);
                fresh.push(report);
            }
            Ok(None) => {
                outcome.failures = outcome.failures.saturating_add(1);
                warn!(
                    report_number = page.report_number,
                    "report skipped: missing fields or unresolvable location"
                );
            }
            Err(error) => {
                outcome.failures = outcome.failures.saturating_add(1);
                warn!(report_number = page.report_number, %error, "geocoding failed");
            }
        }
    }

    // Stage 4: merge with the existing dataset and write atomically.
    let output_path = Path::new(&config.output.path);
    let merged = merge_reports(load_existing(output_path)?, fresh);
    outcome.total_written = merged.len();
    write_atomic(output_path, &merged)?;

    Ok(outcome)
}

/// Fetch a page and return its body text, treating non-success status
/// codes as errors.
async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_owned(),
            status: status.to_string(),
        });
    }
    Ok(response.text().await?)
}

/// Geocode a parsed page and convert it into a dataset record.
///
/// `Ok(None)` covers both an unresolvable location and a page missing
/// required fields; the caller logs and counts it.
async fn build_report(
    page: &ReportPage,
    geocoder: &Geocoder,
) -> Result<Option<SightingReport>, ScrapeError> {
    let Some(location) = page.location_query() else {
        return Ok(None);
    };
    let Some(coordinates) = geocoder.geocode(&location).await? else {
        return Ok(None);
    };
    Ok(page.to_report(coordinates))
}

/// Read the existing dataset file, tolerating a missing file (first
/// run) as an empty dataset.
fn load_existing(path: &Path) -> Result<Vec<SightingReport>, ScrapeError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ScrapeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Merge freshly scraped records into the existing dataset, keyed by
/// report number. A re-scraped report replaces its older version, so
/// the dataset's report-number uniqueness holds across runs.
fn merge_reports(
    existing: Vec<SightingReport>,
    fresh: Vec<SightingReport>,
) -> Vec<SightingReport> {
    let mut by_number: BTreeMap<u64, SightingReport> = BTreeMap::new();
    for report in existing.into_iter().chain(fresh) {
        by_number.insert(report.report_number, report);
    }
    by_number.into_values().collect()
}

/// Serialize the dataset to a temp file and rename it into place, so
/// the query service never observes a half-written file.
fn write_atomic(path: &Path, reports: &[SightingReport]) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ScrapeError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(reports)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|source| ScrapeError::Io {
        path: tmp.display().to_string(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| ScrapeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}
