//! HTML parsing for the listing and report detail pages.
//!
//! The source site renders each report as a header span plus a flat
//! run of `span.field` labels whose parent elements carry
//! `"Name: value"` text. Parsing is kept as pure functions over HTML
//! strings so it can be tested against canned pages.

use std::collections::BTreeMap;

use bigfoot_data::normalize;
use bigfoot_types::{Coordinates, SightingReport};
use scraper::{Html, Selector};

use crate::error::ScrapeError;

/// Link substring identifying report detail pages in the listing.
const REPORT_LINK_MARKER: &str = "show_report.asp?id=";

/// Extract report ids from the recently-added listing page.
///
/// Duplicate links collapse to one id; order of first appearance is
/// preserved.
///
/// # Errors
///
/// Returns [`ScrapeError::Selector`] only if the anchor selector fails
/// to parse, which would be a programming error.
pub fn extract_report_ids(html: &str) -> Result<Vec<u64>, ScrapeError> {
    let document = Html::parse_document(html);
    let anchor = parse_selector("a")?;

    let mut seen = std::collections::BTreeSet::new();
    let mut ids = Vec::new();
    for link in document.select(&anchor) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some((_, raw_id)) = href.split_once(REPORT_LINK_MARKER) else {
            continue;
        };
        // The id runs up to the next query parameter, if any.
        let digits: String = raw_id
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if let Ok(id) = digits.parse::<u64>()
            && seen.insert(id)
        {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Labeled content scraped from one report detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPage {
    /// Report number taken from the page header.
    pub report_number: u64,
    /// Report classification (e.g. `"Class A"`), when present.
    pub classification: Option<String>,
    /// Lower-cased field names mapped to their single-line values.
    pub fields: BTreeMap<String, String>,
}

impl ReportPage {
    /// Look up a field value by its lower-cased name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The sighting year, parsed from the first four digits of the
    /// `year` field (`"Late 1990s"` parses as 1990).
    pub fn year(&self) -> Option<i32> {
        let raw = self.field("year")?;
        let digits: String = raw.chars().filter(char::is_ascii_digit).take(4).collect();
        if digits.len() == 4 {
            digits.parse().ok()
        } else {
            None
        }
    }

    /// Free-text location handed to the geocoder: the most specific
    /// `"town, county, state"` description the page offers.
    pub fn location_query(&self) -> Option<String> {
        let county = self.field("county")?;
        let state = self.field("state")?;

        let mut parts = Vec::new();
        if let Some(town) = self.field("nearest town") {
            parts.push(town.to_owned());
        }
        parts.push(normalize::county_range_name(county));
        parts.push(state.to_owned());
        Some(parts.join(", "))
    }

    /// Convert the page into a dataset record at the given coordinates.
    ///
    /// Returns `None` when a required field is absent. The stored
    /// county always carries the `" County"` suffix, matching the
    /// serving side's normalization contract.
    pub fn to_report(&self, coordinates: Coordinates) -> Option<SightingReport> {
        Some(SightingReport {
            report_number: self.report_number,
            observed: self.field("observed").map(ToOwned::to_owned),
            county: normalize::county_range_name(self.field("county")?),
            state: self.field("state")?.to_owned(),
            latitude: coordinates.lat,
            longitude: coordinates.lng,
            year: self.year()?,
        })
    }
}

/// Parse one report detail page.
///
/// Returns `Ok(None)` when the page carries no report header (removed
/// or malformed reports render a plain error page).
///
/// # Errors
///
/// Returns [`ScrapeError::Selector`] only on selector parse failure.
pub fn parse_report_page(html: &str) -> Result<Option<ReportPage>, ScrapeError> {
    let document = Html::parse_document(html);
    let header = parse_selector("span.reportheader")?;
    let classification = parse_selector("span.reportclassification")?;
    let field = parse_selector("span.field")?;

    let header_text = document
        .select(&header)
        .next()
        .map(|el| el.text().collect::<String>());
    let Some(report_number) = header_text.as_deref().and_then(parse_report_number) else {
        return Ok(None);
    };

    let classification = document
        .select(&classification)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned());

    let mut fields = BTreeMap::new();
    for label in document.select(&field) {
        // The label and its value live together in the parent's text,
        // in the form "Name: value".
        let Some(parent) = label.parent().and_then(scraper::ElementRef::wrap) else {
            continue;
        };
        let text = parent.text().collect::<String>();
        let Some((name, value)) = text.split_once(':') else {
            continue;
        };
        let name = name.trim().to_lowercase();
        let value = value.trim();
        // A value spanning lines is page layout, not field content.
        if value.is_empty() || value.lines().count() > 1 {
            continue;
        }
        fields.insert(name, value.to_owned());
    }

    Ok(Some(ReportPage {
        report_number,
        classification,
        fields,
    }))
}

/// Pull the report number out of header text like `"Report # 52094"`.
fn parse_report_number(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_HTML: &str = r#"
        <html><body>
            <a href="/GDB/show_report.asp?id=52094">Report 52094</a>
            <a href="show_report.asp?id=52095">Report 52095</a>
            <a href="show_report.asp?id=52094">Report 52094 again</a>
            <a href="/GDB/state_listing.asp?state=wa">Washington</a>
            <a>no href</a>
        </body></html>
    "#;

    const REPORT_HTML: &str = r#"
        <html><body>
            <span class="reportheader">Report # 52094</span>
            <span class="reportclassification">(Class A)</span>
            <p><span class="field">Year</span>: 2010</p>
            <p><span class="field">State</span>: Washington</p>
            <p><span class="field">County</span>: King</p>
            <p><span class="field">Nearest town</span>: North Bend</p>
            <p><span class="field">Observed</span>: Saw a tall hairy figure</p>
            <p><span class="field">Also noticed</span>: first line
second line</p>
        </body></html>
    "#;

    #[test]
    fn extract_report_ids_dedups_and_keeps_order() {
        let ids = extract_report_ids(LISTING_HTML);
        assert!(ids.is_ok_and(|ids| ids == vec![52094, 52095]));
    }

    #[test]
    fn extract_report_ids_empty_page() {
        let ids = extract_report_ids("<html><body></body></html>");
        assert!(ids.is_ok_and(|ids| ids.is_empty()));
    }

    #[test]
    fn parse_report_page_collects_labeled_fields() {
        let page = parse_report_page(REPORT_HTML).ok().flatten();
        let Some(page) = page else {
            assert!(false, "expected a parsed page");
            return;
        };
        assert_eq!(page.report_number, 52094);
        assert_eq!(page.classification.as_deref(), Some("(Class A)"));
        assert_eq!(page.field("state"), Some("Washington"));
        assert_eq!(page.field("county"), Some("King"));
        assert_eq!(page.field("observed"), Some("Saw a tall hairy figure"));
        // Multi-line values are layout artifacts and are dropped.
        assert_eq!(page.field("also noticed"), None);
    }

    #[test]
    fn parse_report_page_without_header_is_none() {
        let html = "<html><body><p>Report removed.</p></body></html>";
        let page = parse_report_page(html).ok().flatten();
        assert!(page.is_none());
    }

    #[test]
    fn year_parses_leading_digits() {
        let page = parse_report_page(REPORT_HTML).ok().flatten();
        assert_eq!(page.and_then(|p| p.year()), Some(2010));
    }

    #[test]
    fn year_handles_approximate_values() {
        let mut fields = BTreeMap::new();
        fields.insert("year".to_owned(), "Late 1990s".to_owned());
        let page = ReportPage {
            report_number: 1,
            classification: None,
            fields,
        };
        assert_eq!(page.year(), Some(1990));
    }

    #[test]
    fn location_query_composes_town_county_state() {
        let page = parse_report_page(REPORT_HTML).ok().flatten();
        assert_eq!(
            page.and_then(|p| p.location_query()).as_deref(),
            Some("North Bend, King County, Washington")
        );
    }

    #[test]
    fn to_report_applies_county_suffix_and_coordinates() {
        let page = parse_report_page(REPORT_HTML).ok().flatten();
        let report = page.and_then(|p| p.to_report(Coordinates::new(47.5, -121.8)));
        let Some(report) = report else {
            assert!(false, "expected a report");
            return;
        };
        assert_eq!(report.report_number, 52094);
        assert_eq!(report.county, "King County");
        assert_eq!(report.state, "Washington");
        assert_eq!(report.year, 2010);
        assert!((report.latitude - 47.5).abs() < f64::EPSILON);
    }

    #[test]
    fn to_report_without_state_is_none() {
        let mut fields = BTreeMap::new();
        fields.insert("county".to_owned(), "King".to_owned());
        fields.insert("year".to_owned(), "2010".to_owned());
        let page = ReportPage {
            report_number: 2,
            classification: None,
            fields,
        };
        assert!(page.to_report(Coordinates::new(0.0, 0.0)).is_none());
    }
}
