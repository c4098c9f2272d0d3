//! REST API endpoint handlers for the query server.
//!
//! All handlers read from the shared immutable [`Dataset`] via
//! [`AppState`]. Success responses are a JSON array of report objects;
//! failures map through [`ApiError`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/info/:report_number` | Single report by identifier |
//! | `GET` | `/state-reports` | All reports in a state |
//! | `GET` | `/county-reports` | Reports in a county, optionally narrowed by state |
//! | `GET` | `/nearby-sightings` | Reports within a radius of a geocoded location |
//! | `GET` | `/time-period-search` | Reports in a year range, optionally narrowed |
//! | `GET` | `/word-search` | Keyword search over witness descriptions |
//!
//! Whether an empty match is a 404 or a valid `[]` differs per
//! endpoint. That asymmetry is long-observed API behavior and is kept
//! exactly as each handler documents it.
//!
//! [`Dataset`]: bigfoot_data::Dataset

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use bigfoot_data::normalize;
use bigfoot_types::SightingReport;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /state-reports` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct StateQuery {
    /// Full state name, matched case-insensitively.
    pub state: Option<String>,
}

/// Query parameters for the `GET /county-reports` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct CountyQuery {
    /// County name without the `" County"` suffix (it is appended).
    pub county: Option<String>,
    /// Optional state to narrow the search.
    pub state: Option<String>,
}

/// Query parameters for the `GET /nearby-sightings` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct NearbyQuery {
    /// Free-text location to geocode into a search center.
    pub location: Option<String>,
    /// Search radius in kilometers (default 50).
    pub radius: Option<String>,
}

/// Query parameters for the `GET /time-period-search` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct TimePeriodQuery {
    /// First year of the inclusive range.
    pub start_year: Option<String>,
    /// Last year of the inclusive range.
    pub end_year: Option<String>,
    /// State filter; `"all"` (the default) disables it.
    pub state: Option<String>,
    /// County filter; `"all"` (the default) disables it.
    pub county: Option<String>,
}

/// Query parameters for the `GET /word-search` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WordSearchQuery {
    /// Substring to look for in witness descriptions.
    pub keyword: Option<String>,
}

/// Clone borrowed matches into an owned, serializable vector.
fn owned(reports: Vec<&SightingReport>) -> Vec<SightingReport> {
    reports.into_iter().cloned().collect()
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing dataset size and API links.
pub async fn index(State(app): State<Arc<AppState>>) -> impl IntoResponse {
    let report_count = app.dataset.len();
    let geocoder = app.geocoder.name();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Bigfoot Atlas</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #7ee787; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Bigfoot Atlas</h1>
    <p class="subtitle">{report_count} sighting reports loaded -- geocoder: {geocoder}</p>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/info/1">/info/:report_number</a> -- Single report by identifier</li>
        <li><a href="/state-reports?state=Washington">/state-reports?state=...</a> -- Reports in a state</li>
        <li><a href="/county-reports?county=King">/county-reports?county=...&amp;state=...</a> -- Reports in a county</li>
        <li><a href="/nearby-sightings?location=Seattle">/nearby-sightings?location=...&amp;radius=...</a> -- Reports near a place</li>
        <li><a href="/time-period-search?start_year=2000&amp;end_year=2010">/time-period-search?start_year=...&amp;end_year=...</a> -- Reports in a year range</li>
        <li><a href="/word-search?keyword=howl">/word-search?keyword=...</a> -- Keyword search</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /info/:report_number -- single report by identifier
// ---------------------------------------------------------------------------

/// Return the report(s) matching a report number.
///
/// Zero matches is a 404 (`"Report not found"`), never an empty array.
pub async fn report_info(
    State(app): State<Arc<AppState>>,
    Path(report_number): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let matches = owned(app.dataset.by_report_number(report_number));
    if matches.is_empty() {
        return Err(ApiError::NotFound("Report not found".to_owned()));
    }
    Ok(Json(matches))
}

// ---------------------------------------------------------------------------
// GET /state-reports -- all reports in a state
// ---------------------------------------------------------------------------

/// Return every report in the given state, matched case-insensitively.
///
/// Zero matches is a 404 (`"State parameter not found"`).
pub async fn state_reports(
    State(app): State<Arc<AppState>>,
    Query(params): Query<StateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(state_name) = params.state.filter(|s| !s.is_empty()) else {
        return Err(ApiError::BadRequest("State parameter is required".to_owned()));
    };

    let matches = owned(app.dataset.by_state(&state_name));
    if matches.is_empty() {
        return Err(ApiError::NotFound("State parameter not found".to_owned()));
    }
    Ok(Json(matches))
}

// ---------------------------------------------------------------------------
// GET /county-reports -- reports in a county
// ---------------------------------------------------------------------------

/// Return every report in the given county, optionally narrowed by
/// state.
///
/// The query string always gets `" County"` appended before matching,
/// because the source data stores counties with that suffix
/// (`county=King` matches `"King County"`). Zero matches is a 404
/// naming the county, and the state when one was given.
pub async fn county_reports(
    State(app): State<Arc<AppState>>,
    Query(params): Query<CountyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(county) = params.county.filter(|c| !c.is_empty()) else {
        return Err(ApiError::BadRequest(
            "County parameter is required".to_owned(),
        ));
    };
    let state_name = params.state.filter(|s| !s.is_empty());

    let county_name = normalize::county_query_name(&county);
    let matches = owned(app.dataset.by_county_name(&county_name, state_name.as_deref()));

    if matches.is_empty() {
        let message = state_name.map_or_else(
            || format!("No reports found for {county} County"),
            |s| format!("No reports found for {county} County, {s}"),
        );
        return Err(ApiError::NotFound(message));
    }
    Ok(Json(matches))
}

// ---------------------------------------------------------------------------
// GET /nearby-sightings -- reports within a radius of a location
// ---------------------------------------------------------------------------

/// Return the reports within `radius` kilometers of a geocoded
/// location, each annotated with its `distance_km`.
///
/// An empty result is a valid `[]`, not a 404; only a location the
/// provider cannot resolve is a 404 (`"Location not found"`). A
/// provider failure surfaces as an upstream error with the timeout
/// case distinguished.
pub async fn nearby_sightings(
    State(app): State<Arc<AppState>>,
    Query(params): Query<NearbyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(location) = params.location.filter(|l| !l.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Location parameter is required".to_owned(),
        ));
    };

    let radius_km = match params.radius.as_deref().map(str::trim) {
        None | Some("") => app.default_radius_km,
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                return Err(ApiError::BadRequest(
                    "Invalid radius format. Please provide a numeric value.".to_owned(),
                ));
            }
        },
    };

    let resolved = app.geocoder.geocode(&location).await?;
    let Some(center) = resolved else {
        return Err(ApiError::NotFound("Location not found".to_owned()));
    };

    Ok(Json(app.dataset.within_radius(center, radius_km)))
}

// ---------------------------------------------------------------------------
// GET /time-period-search -- reports in a year range
// ---------------------------------------------------------------------------

/// Return the reports whose year falls in the inclusive range,
/// optionally narrowed by state and county.
///
/// Reversed bounds are swapped rather than rejected. The county filter
/// appends `" County"` only when the query does not already mention a
/// county. Each narrowing step that empties the result is its own 404
/// naming the filter; an empty final result is a generic 404.
pub async fn time_period_search(
    State(app): State<Arc<AppState>>,
    Query(params): Query<TimePeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let start = params
        .start_year
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<i32>().ok());
    let end = params
        .end_year
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<i32>().ok());
    let (Some(start_year), Some(end_year)) = (start, end) else {
        return Err(ApiError::BadRequest(
            "Invalid year format. Please provide numeric values.".to_owned(),
        ));
    };

    let state_name = params.state.unwrap_or_else(|| "all".to_owned());
    let county = params.county.unwrap_or_else(|| "all".to_owned());

    let mut matches = app.dataset.by_year_range(start_year, end_year);

    if state_name != "all" {
        matches.retain(|r| normalize::fold_eq(&r.state, &state_name));
        if matches.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No reports found for {state_name}"
            )));
        }
    }

    if county != "all" {
        let county_name = normalize::county_range_name(&county);
        matches.retain(|r| normalize::fold_eq(&r.county, &county_name));
        if matches.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No reports found for {county_name}"
            )));
        }
    }

    if matches.is_empty() {
        return Err(ApiError::NotFound(
            "No reports found matching the criteria.".to_owned(),
        ));
    }

    Ok(Json(owned(matches)))
}

// ---------------------------------------------------------------------------
// GET /word-search -- keyword search over descriptions
// ---------------------------------------------------------------------------

/// Return the reports whose witness description contains the keyword,
/// case-insensitively. Reports without a description never match.
///
/// An empty result is a valid `[]`; only a missing keyword is an
/// error (400, `"Keyword parameter is missing."`).
pub async fn word_search(
    State(app): State<Arc<AppState>>,
    Query(params): Query<WordSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(keyword) = params.keyword.filter(|k| !k.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Keyword parameter is missing.".to_owned(),
        ));
    };

    Ok(Json(owned(app.dataset.by_keyword(&keyword))))
}
