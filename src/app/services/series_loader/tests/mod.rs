//! Tests for the wide-format series loader

pub mod parser_tests;

use std::fs;
use std::path::{Path, PathBuf};

/// Write a wide CSV export fixture and return its path
pub fn write_wide_csv(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// A small well-formed export: two areas, three months, one gap
pub const SAMPLE_WIDE_CSV: &str = "\
REF_AREA,Series,1999-01-01,1999-02-01,1999-03-01
DE,Policy rate,3.0,,3.5
XM,Policy rate,2.5,2.75,3.0
";
