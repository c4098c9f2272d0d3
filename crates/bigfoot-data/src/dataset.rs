//! Dataset load, validation, and the per-endpoint query helpers.
//!
//! The dataset is loaded once at process startup and shared read-only
//! for the process lifetime. Every query helper is a linear scan that
//! allocates its own result vector; nothing writes back into the
//! shared records, so concurrent requests cannot interfere.

use std::collections::BTreeSet;
use std::path::Path;

use bigfoot_types::{Coordinates, LocatedReport, SightingReport};
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::geo;
use crate::normalize;

/// Columns every dataset file must provide.
///
/// The required set is the only contract between the offline scraper
/// and the query service: a file missing any of these refuses to load.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "observed",
    "county",
    "state",
    "report_number",
    "latitude",
    "longitude",
    "year",
];

/// The immutable, in-memory collection of sighting reports.
#[derive(Debug, Clone)]
pub struct Dataset {
    reports: Vec<SightingReport>,
}

impl Dataset {
    /// Load and validate the dataset file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Io`] when the file cannot be read and
    /// any of the [`Self::from_json`] errors for invalid content. All
    /// of these are fatal: the serving process must not start.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_json(&contents)?;
        info!(path = %path.display(), count = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Parse and validate a dataset from a JSON array string.
    ///
    /// The column check mirrors the source data's tabular semantics:
    /// the column set is the union of keys across all rows, so a
    /// failure here means the whole file lacks the column rather than
    /// a single sparse row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Parse`] for non-array content,
    /// [`DatasetError::MissingColumns`] naming every absent required
    /// column, or [`DatasetError::Row`] when a row cannot be typed.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)?;

        let present: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !present.contains(**column))
            .map(|column| (*column).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns { columns: missing });
        }

        let mut reports = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let report: SightingReport =
                serde_json::from_value(serde_json::Value::Object(row))
                    .map_err(|source| DatasetError::Row { index, source })?;
            reports.push(report);
        }

        let mut seen = BTreeSet::new();
        for report in &reports {
            if !seen.insert(report.report_number) {
                warn!(
                    report_number = report.report_number,
                    "duplicate report number in dataset"
                );
            }
        }

        Ok(Self { reports })
    }

    /// All reports in load order.
    pub fn reports(&self) -> &[SightingReport] {
        &self.reports
    }

    /// Number of reports in the dataset.
    pub const fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the dataset holds no reports.
    pub const fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Linear-scan filter returning every report matching `predicate`.
    ///
    /// An empty result is not an error; callers decide whether empty
    /// means "not found".
    pub fn filter<P>(&self, predicate: P) -> Vec<&SightingReport>
    where
        P: Fn(&SightingReport) -> bool,
    {
        self.reports.iter().filter(|r| predicate(r)).collect()
    }

    /// Reports whose `report_number` equals `report_number`.
    pub fn by_report_number(&self, report_number: u64) -> Vec<&SightingReport> {
        self.filter(|r| r.report_number == report_number)
    }

    /// Reports in `state`, matched case-insensitively.
    pub fn by_state(&self, state: &str) -> Vec<&SightingReport> {
        self.filter(|r| normalize::fold_eq(&r.state, state))
    }

    /// Reports whose stored county equals `county_name`, optionally
    /// narrowed to `state`. Both comparisons are case-insensitive.
    ///
    /// `county_name` is expected to already carry whatever suffix the
    /// calling endpoint's normalization rule produces (see
    /// [`crate::normalize`]).
    pub fn by_county_name(&self, county_name: &str, state: Option<&str>) -> Vec<&SightingReport> {
        self.filter(|r| {
            normalize::fold_eq(&r.county, county_name)
                && state.is_none_or(|s| normalize::fold_eq(&r.state, s))
        })
    }

    /// Reports with `year` in the inclusive range between the two
    /// bounds, in either order.
    pub fn by_year_range(&self, start_year: i32, end_year: i32) -> Vec<&SightingReport> {
        let (lo, hi) = if start_year <= end_year {
            (start_year, end_year)
        } else {
            (end_year, start_year)
        };
        self.filter(|r| (lo..=hi).contains(&r.year))
    }

    /// Reports whose `observed` text contains `keyword`,
    /// case-insensitively. Reports without a description never match.
    pub fn by_keyword(&self, keyword: &str) -> Vec<&SightingReport> {
        self.filter(|r| {
            r.observed
                .as_deref()
                .is_some_and(|text| normalize::contains_fold(text, keyword))
        })
    }

    /// Reports within `radius_km` of `center`, each paired with its
    /// great-circle distance.
    ///
    /// The distance column lives only in the returned vector. The
    /// shared records are never annotated in place, so concurrent
    /// radius queries see independent results.
    pub fn within_radius(&self, center: Coordinates, radius_km: f64) -> Vec<LocatedReport> {
        self.reports
            .iter()
            .filter_map(|report| {
                let distance = geo::distance_km(
                    center,
                    Coordinates::new(report.latitude, report.longitude),
                );
                (distance <= radius_km).then(|| LocatedReport {
                    report: report.clone(),
                    distance_km: distance,
                })
            })
            .collect()
    }
}
