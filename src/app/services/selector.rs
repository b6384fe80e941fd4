//! Interactive filter over the joined table
//!
//! Each widget interaction reduces to a pure function from the joined
//! table and the selected (year, month, countries) to the subset the
//! chart renders. The table itself is never mutated; the UI's own widget
//! state lives outside this crate.

use crate::app::models::JoinedRecord;
use chrono::Datelike;
use std::collections::HashSet;
use tracing::debug;

/// Rows matching the selected year, month, and country set
///
/// # Arguments
/// * `records` - The joined table
/// * `year` - Selected calendar year
/// * `month` - Selected calendar month (1-12)
/// * `countries` - Selected ISO3 codes; an empty set selects nothing
pub fn filter_period(
    records: &[JoinedRecord],
    year: i32,
    month: u32,
    countries: &HashSet<String>,
) -> Vec<JoinedRecord> {
    let filtered: Vec<JoinedRecord> = records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .filter(|r| countries.contains(&r.iso3))
        .cloned()
        .collect();

    debug!(
        "Filtered {} of {} rows for {}-{:02} across {} countries",
        filtered.len(),
        records.len(),
        year,
        month,
        countries.len()
    );

    filtered
}

/// Build a selection set from ISO3 codes
pub fn selection(codes: &[impl AsRef<str>]) -> HashSet<String> {
    codes.iter().map(|c| c.as_ref().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(iso3: &str, y: i32, m: u32) -> JoinedRecord {
        JoinedRecord {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            iso3: iso3.to_string(),
            name: iso3.to_string(),
            interest_rate: Some(1.0),
            cpi: None,
            interest_rate_text: None,
            cpi_text: None,
        }
    }

    fn sample() -> Vec<JoinedRecord> {
        vec![
            row("DEU", 2020, 6),
            row("FRA", 2020, 6),
            row("USA", 2020, 6),
            row("DEU", 2020, 5),
            row("DEU", 2019, 6),
        ]
    }

    #[test]
    fn test_filter_by_year_month_and_countries() {
        let records = sample();
        let selected = selection(&["DEU", "FRA"]);

        let filtered = filter_period(&records, 2020, 6, &selected);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date.year() == 2020));
        assert!(filtered.iter().all(|r| r.date.month() == 6));
        let codes: Vec<&str> = filtered.iter().map(|r| r.iso3.as_str()).collect();
        assert_eq!(codes, vec!["DEU", "FRA"]);
    }

    #[test]
    fn test_filter_excludes_other_periods() {
        let records = sample();
        let selected = selection(&["DEU"]);

        let filtered = filter_period(&records, 2020, 5, &selected);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, NaiveDate::from_ymd_opt(2020, 5, 1).unwrap());
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let records = sample();
        let filtered = filter_period(&records, 2020, 6, &HashSet::new());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_input_is_untouched() {
        let records = sample();
        let before = records.clone();
        let _ = filter_period(&records, 2020, 6, &selection(&["DEU"]));
        assert_eq!(records, before);
    }
}
