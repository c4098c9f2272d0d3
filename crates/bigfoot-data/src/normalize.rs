//! Normalization rules for query parameters.
//!
//! Each endpoint applies its own normalization before matching against
//! the dataset. The rules are deliberately kept as small named
//! functions so each endpoint's contract can be tested on its own:
//! the county endpoint always appends `" County"`, while the
//! time-period search appends it only when the query does not already
//! mention a county.

/// Case-insensitive string equality.
pub fn fold_eq(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test.
pub fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// County name as matched by the county endpoint.
///
/// Source data always stores counties with a trailing `" County"`, so
/// the query string unconditionally gets the suffix appended:
/// `"King"` becomes `"King County"` (and `"King County"` would become
/// `"King County County"` -- the endpoint has always behaved this way).
pub fn county_query_name(county: &str) -> String {
    format!("{county} County")
}

/// County name as matched by the time-period search.
///
/// Appends `" County"` only when the query does not already contain
/// `"county"` (case-insensitive), so both `"King"` and `"King County"`
/// match the stored value.
pub fn county_range_name(county: &str) -> String {
    if contains_fold(county, "county") {
        county.to_owned()
    } else {
        format!("{county} County")
    }
}
