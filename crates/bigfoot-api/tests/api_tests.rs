//! Integration tests for the query API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, and the fixed geocoding backend so the
//! radius path runs without network access.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use bigfoot_api::router::build_router;
use bigfoot_api::state::AppState;
use bigfoot_data::Dataset;
use bigfoot_geocode::{FixedGeocoder, Geocoder};
use bigfoot_types::Coordinates;
use serde_json::Value;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    let dataset_json = serde_json::json!([
        {
            "report_number": 12,
            "observed": "Saw a tall hairy figure",
            "county": "King County",
            "state": "Washington",
            "latitude": 47.6,
            "longitude": -122.3,
            "year": 2010
        },
        {
            "report_number": 34,
            "observed": "Heard wood knocks near the Forest Ridge trail",
            "county": "Skamania County",
            "state": "Washington",
            "latitude": 45.9,
            "longitude": -122.0,
            "year": 2001
        },
        {
            "report_number": 56,
            "observed": null,
            "county": "Lane County",
            "state": "Oregon",
            "latitude": 43.9,
            "longitude": -122.8,
            "year": 2005
        }
    ])
    .to_string();

    let dataset = Dataset::from_json(&dataset_json).unwrap();

    let geocoder = Geocoder::Fixed(
        FixedGeocoder::new()
            .with_place("Seattle", Coordinates::new(47.6, -122.3))
            .with_place("Eugene", Coordinates::new(43.95, -122.9))
            .with_place("Denver", Coordinates::new(39.74, -104.99)),
    );

    Arc::new(AppState::new(dataset, geocoder, 50.0))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(path: &str) -> (StatusCode, Value) {
    let state = make_test_state();
    let router = build_router(state);
    let response = router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let json = body_to_json(response.into_body()).await;
    (status, json)
}

// =========================================================================
// Status page
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

// =========================================================================
// GET /info/:report_number
// =========================================================================

#[tokio::test]
async fn test_report_info_returns_exactly_one_record() {
    let (status, json) = get("/info/12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["report_number"], 12);
    assert_eq!(json[0]["state"], "Washington");
}

#[tokio::test]
async fn test_report_info_absent_id_is_404_not_empty_200() {
    let (status, json) = get("/info/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Report not found");
}

// =========================================================================
// GET /state-reports
// =========================================================================

#[tokio::test]
async fn test_state_reports_folds_case() {
    let (status, lower) = get("/state-reports?state=washington").await;
    assert_eq!(status, StatusCode::OK);
    let (_, title) = get("/state-reports?state=Washington").await;
    assert_eq!(lower, title);
    assert_eq!(lower.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_state_reports_unknown_state_is_404() {
    let (status, json) = get("/state-reports?state=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "State parameter not found");
}

#[tokio::test]
async fn test_state_reports_missing_param_is_400() {
    let (status, _) = get("/state-reports").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =========================================================================
// GET /county-reports
// =========================================================================

#[tokio::test]
async fn test_county_reports_appends_county_suffix() {
    // Stored value is "King County"; the query says only "King".
    let (status, json) = get("/county-reports?county=King").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["report_number"], 12);
}

#[tokio::test]
async fn test_county_reports_narrows_by_state() {
    let (status, json) = get("/county-reports?county=King&state=Washington").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["report_number"], 12);

    let (status, json) = get("/county-reports?county=King&state=Oregon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No reports found for King County, Oregon");
}

#[tokio::test]
async fn test_county_reports_unknown_county_names_it() {
    let (status, json) = get("/county-reports?county=Nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No reports found for Nowhere County");
}

#[tokio::test]
async fn test_county_reports_missing_param_is_400() {
    let (status, json) = get("/county-reports").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "County parameter is required");
}

// =========================================================================
// GET /nearby-sightings
// =========================================================================

#[tokio::test]
async fn test_nearby_sightings_returns_distance_annotated_records() {
    let (status, json) = get("/nearby-sightings?location=Seattle&radius=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["report_number"], 12);
    assert!(json[0]["distance_km"].as_f64().unwrap() < 1.0);
}

#[tokio::test]
async fn test_nearby_sightings_default_radius_is_applied() {
    // No radius parameter: the configured 50 km default applies.
    let (status, json) = get("/nearby-sightings?location=Eugene").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["report_number"], 56);
}

#[tokio::test]
async fn test_nearby_sightings_empty_result_is_valid_not_404() {
    let (status, json) = get("/nearby-sightings?location=Denver&radius=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_nearby_sightings_radius_zero_exact_match_only() {
    // The fixture geocodes Seattle to report 12's exact coordinates.
    let (status, json) = get("/nearby-sightings?location=Seattle&radius=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert!(json[0]["distance_km"].as_f64().unwrap().abs() < 1e-9);
}

#[tokio::test]
async fn test_nearby_sightings_unresolvable_location_is_404() {
    let (status, json) = get("/nearby-sightings?location=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Location not found");
}

#[tokio::test]
async fn test_nearby_sightings_bad_radius_is_400() {
    let (status, _) = get("/nearby-sightings?location=Seattle&radius=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_radius_queries_do_not_interfere() {
    let state = make_test_state();
    let router_a = build_router(Arc::clone(&state));
    let router_b = build_router(state);

    let (response_a, response_b) = tokio::join!(
        router_a.oneshot(
            Request::get("/nearby-sightings?location=Seattle&radius=50")
                .body(Body::empty())
                .unwrap()
        ),
        router_b.oneshot(
            Request::get("/nearby-sightings?location=Eugene&radius=50")
                .body(Body::empty())
                .unwrap()
        ),
    );

    let json_a = body_to_json(response_a.unwrap().into_body()).await;
    let json_b = body_to_json(response_b.unwrap().into_body()).await;

    // Each query sees only its own distance column.
    assert_eq!(json_a.as_array().map(Vec::len), Some(1));
    assert_eq!(json_a[0]["report_number"], 12);
    assert!(json_a[0]["distance_km"].as_f64().unwrap() < 1.0);

    assert_eq!(json_b.as_array().map(Vec::len), Some(1));
    assert_eq!(json_b[0]["report_number"], 56);
    assert!(json_b[0]["distance_km"].as_f64().unwrap() < 15.0);
}

// =========================================================================
// GET /time-period-search
// =========================================================================

#[tokio::test]
async fn test_time_period_search_includes_range() {
    let (status, json) = get("/time-period-search?start_year=2008&end_year=2012").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["report_number"], 12);
}

#[tokio::test]
async fn test_time_period_search_swaps_reversed_bounds() {
    let (status, forward) = get("/time-period-search?start_year=2000&end_year=2005").await;
    assert_eq!(status, StatusCode::OK);
    let (status, backward) = get("/time-period-search?start_year=2005&end_year=2000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(forward, backward);
    assert_eq!(forward.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_time_period_search_non_numeric_year_is_400() {
    let (status, json) = get("/time-period-search?start_year=abc&end_year=2005").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Invalid year format. Please provide numeric values."
    );
}

#[tokio::test]
async fn test_time_period_search_missing_years_is_400() {
    let (status, _) = get("/time-period-search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_time_period_search_state_filter() {
    let (status, json) =
        get("/time-period-search?start_year=2000&end_year=2012&state=washington").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(2));

    let (status, json) =
        get("/time-period-search?start_year=2000&end_year=2012&state=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No reports found for Atlantis");
}

#[tokio::test]
async fn test_time_period_search_county_suffix_is_conditional() {
    // Both spellings reach the same stored "King County" value.
    let (_, bare) =
        get("/time-period-search?start_year=2000&end_year=2012&county=King").await;
    let (_, suffixed) =
        get("/time-period-search?start_year=2000&end_year=2012&county=King%20County").await;
    assert_eq!(bare, suffixed);
    assert_eq!(bare.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_time_period_search_unknown_county_names_it() {
    let (status, json) =
        get("/time-period-search?start_year=2000&end_year=2012&county=Nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No reports found for Nowhere County");
}

#[tokio::test]
async fn test_time_period_search_empty_range_is_404() {
    let (status, json) = get("/time-period-search?start_year=1800&end_year=1810").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No reports found matching the criteria.");
}

// =========================================================================
// GET /word-search
// =========================================================================

#[tokio::test]
async fn test_word_search_is_substring_and_case_insensitive() {
    let (status, json) = get("/word-search?keyword=forest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["report_number"], 34);

    let (_, upper) = get("/word-search?keyword=FOREST").await;
    assert_eq!(json, upper);
}

#[tokio::test]
async fn test_word_search_no_match_is_valid_empty() {
    let (status, json) = get("/word-search?keyword=zeppelin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_word_search_missing_keyword_is_400() {
    let (status, json) = get("/word-search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Keyword parameter is missing.");
}

// =========================================================================
// Scenario: report 12 flows through every tabular endpoint
// =========================================================================

#[tokio::test]
async fn test_report_12_is_reachable_from_every_endpoint() {
    let contains_12 = |json: &Value| {
        json.as_array()
            .is_some_and(|rows| rows.iter().any(|r| r["report_number"] == 12))
    };

    let (_, info) = get("/info/12").await;
    assert!(contains_12(&info));

    let (_, by_state) = get("/state-reports?state=washington").await;
    assert!(contains_12(&by_state));

    let (_, by_county) = get("/county-reports?county=King&state=Washington").await;
    assert!(contains_12(&by_county));

    let (_, by_years) = get("/time-period-search?start_year=2008&end_year=2012").await;
    assert!(contains_12(&by_years));

    let (_, by_word) = get("/word-search?keyword=hairy").await;
    assert!(contains_12(&by_word));
}

// =========================================================================
// Routing
// =========================================================================

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
