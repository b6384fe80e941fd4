//! Tests for the join stage


use crate::app::models::{Indicator, TidyRecord};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a tidy record in one line
pub fn tidy(code: &str, date: NaiveDate, indicator: Indicator, value: Option<f64>) -> TidyRecord {
    TidyRecord {
        date,
        code: code.to_string(),
        indicator,
        value,
    }
}
