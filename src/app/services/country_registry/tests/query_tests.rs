//! Tests for registry lookup behaviour

use super::build_test_registry;
use crate::constants::EUROZONE_AGGREGATE_CODE;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_resolve_iso2_through_conversion_map() {
    let registry = build_test_registry();

    assert_eq!(registry.resolve_iso3("DE"), Some("DEU"));
    assert_eq!(registry.resolve_iso3("FR"), Some("FRA"));
}

#[test]
fn test_resolve_known_iso3_passes_through() {
    let registry = build_test_registry();

    assert_eq!(registry.resolve_iso3("DEU"), Some("DEU"));
}

#[test]
fn test_resolve_unknown_code_fails() {
    let registry = build_test_registry();

    assert_eq!(registry.resolve_iso3("ZZ"), None);
    assert_eq!(registry.resolve_iso3("ZZZ"), None);
    // The aggregate code never resolves; the joiner drops it
    assert_eq!(registry.resolve_iso3(EUROZONE_AGGREGATE_CODE), None);
}

#[test]
fn test_display_name_lookup() {
    let registry = build_test_registry();

    assert_eq!(registry.display_name("DEU"), Some("Germany"));
    assert_eq!(registry.display_name("XXX"), None);
    assert!(registry.contains_iso3("FRA"));
    assert!(!registry.contains_iso3("XXX"));
}

#[test]
fn test_members_adopted_by_respects_accession() {
    let registry = build_test_registry();

    // Before Lithuania's 2015 accession only the founders qualify
    let early: Vec<&str> = registry
        .members_adopted_by(date(2014, 6, 1))
        .map(|m| m.iso3.as_str())
        .collect();
    assert_eq!(early, vec!["DEU", "FRA"]);

    let late: Vec<&str> = registry
        .members_adopted_by(date(2015, 1, 1))
        .map(|m| m.iso3.as_str())
        .collect();
    assert_eq!(late, vec!["DEU", "FRA", "LTU"]);
}

#[test]
fn test_metadata_counts() {
    let registry = build_test_registry();
    let metadata = registry.metadata();

    assert_eq!(metadata.country_count, 3);
    assert_eq!(metadata.conversion_count, 3);
    assert_eq!(metadata.eurozone_member_count, 3);
}
