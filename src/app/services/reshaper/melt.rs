//! Cutoff window resolution and per-area series extraction
//!
//! The wide-to-long transposition works on a mutable set of per-area
//! series columns sliced at the cutoff. Insertion order is preserved so
//! the emitted tidy table is deterministic: source areas first, then any
//! members added by the aggregate expansion.

use crate::app::models::{Indicator, TidyRecord, WideSeriesTable};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// The date columns kept by a cutoff lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffWindow<'a> {
    /// Index of the cutoff column in the source table
    pub start: usize,

    /// Dates at/after the cutoff, in column order
    pub dates: &'a [NaiveDate],
}

/// Resolve the cutoff date against a table's date columns
///
/// # Errors
/// * `Error::CutoffNotFound` if the cutoff is not itself a date column;
///   the caller must surface this as a lookup failure, not guess a
///   neighbouring column
pub fn cutoff_window(table: &WideSeriesTable, cutoff: NaiveDate) -> Result<CutoffWindow<'_>> {
    let start = table.date_index(cutoff).ok_or_else(|| {
        Error::cutoff_not_found(cutoff, table.source.to_string_lossy().to_string())
    })?;

    Ok(CutoffWindow {
        start,
        dates: &table.dates[start..],
    })
}

/// Mutable per-area series columns, in insertion order
#[derive(Debug, Clone, Default)]
pub struct SeriesColumns {
    order: Vec<String>,
    series: HashMap<String, Vec<Option<f64>>>,
}

impl SeriesColumns {
    /// Extract the cutoff window of every area of a wide table
    pub fn from_window(table: &WideSeriesTable, start: usize) -> Self {
        let mut columns = Self::default();
        for (area, row) in table.areas.iter().zip(table.rows.iter()) {
            columns.order.push(area.clone());
            columns.series.insert(area.clone(), row[start..].to_vec());
        }
        columns
    }

    /// Number of area columns
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no columns are present
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether an area column exists
    pub fn contains(&self, code: &str) -> bool {
        self.series.contains_key(code)
    }

    /// Series of an area, if present
    pub fn get(&self, code: &str) -> Option<&[Option<f64>]> {
        self.series.get(code).map(Vec::as_slice)
    }

    /// Mutable series of an area, created empty (all missing) if absent
    pub fn get_or_insert(&mut self, code: &str, len: usize) -> &mut Vec<Option<f64>> {
        match self.series.entry(code.to_string()) {
            Entry::Vacant(entry) => {
                self.order.push(code.to_string());
                entry.insert(vec![None; len])
            }
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Apply a mutation to every series
    pub fn for_each_series<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut [Option<f64>]),
    {
        for code in &self.order {
            if let Some(series) = self.series.get_mut(code) {
                f(series);
            }
        }
    }

    /// Emit one tidy record per (area, date), areas in insertion order
    ///
    /// (date, code) is unique in the result by construction: each area
    /// appears once and each date column appears once.
    pub fn emit_tidy(&self, dates: &[NaiveDate], indicator: Indicator) -> Vec<TidyRecord> {
        let mut records = Vec::with_capacity(self.order.len() * dates.len());

        for code in &self.order {
            let Some(series) = self.series.get(code) else {
                continue;
            };
            for (date, value) in dates.iter().zip(series.iter()) {
                records.push(TidyRecord {
                    date: *date,
                    code: code.clone(),
                    indicator,
                    value: *value,
                });
            }
        }

        records
    }
}
