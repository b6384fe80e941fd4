//! Tests for the reshaping pipeline

pub mod fill_tests;
pub mod melt_tests;

use crate::app::models::WideSeriesTable;
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Monthly dates starting at the given month
pub fn monthly_dates(start: &str, count: usize) -> Vec<NaiveDate> {
    let first = date(start);
    (0..count)
        .map(|offset| {
            let month0 = first.month0() as usize + offset;
            NaiveDate::from_ymd_opt(
                first.year() + (month0 / 12) as i32,
                (month0 % 12) as u32 + 1,
                1,
            )
            .unwrap()
        })
        .collect()
}

/// Build a wide table from (area, series) pairs over the given dates
pub fn wide_table(dates: Vec<NaiveDate>, rows: Vec<(&str, Vec<Option<f64>>)>) -> WideSeriesTable {
    let areas = rows.iter().map(|(code, _)| code.to_string()).collect();
    let values = rows.into_iter().map(|(_, series)| series).collect();
    WideSeriesTable::new(PathBuf::from("test.csv"), areas, dates, values).unwrap()
}
