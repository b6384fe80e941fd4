//! Application constants for the ratesmap pipeline
//!
//! This module contains all configuration constants, default values,
//! and column-name mappings used throughout the dashboard pipeline.

// =============================================================================
// Input File Names
// =============================================================================

/// Default file name of the wide-format policy-rate export
pub const DEFAULT_RATES_FILENAME: &str = "central_bank_policy_rates.csv";

/// Default file name of the wide-format CPI export
pub const DEFAULT_CPI_FILENAME: &str = "consumer_price_index.csv";

/// Default file name of the flat ISO2 -> ISO3 JSON map
pub const DEFAULT_ISO_CONVERSIONS_FILENAME: &str = "iso2_to_iso3.json";

/// Default file name of the ISO3 -> display-name CSV (Latin-1 tolerant)
pub const DEFAULT_COUNTRY_NAMES_FILENAME: &str = "iso3_to_country_name.csv";

/// Default file name of the Eurozone membership CSV
pub const DEFAULT_EUROZONE_FILENAME: &str = "eurozone_members.csv";

/// Directory name used under the platform data dir when none is given
pub const DEFAULT_DATA_DIR_NAME: &str = "ratesmap";

// =============================================================================
// Date Handling
// =============================================================================

/// Date format used by BIS column labels and all reference tables
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pattern a wide-table column label must match to count as a date column
pub const DATE_LABEL_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Default cutoff: euro introduction, the start of the BIS euro-area series
pub const DEFAULT_CUTOFF_DATE: &str = "1999-01-01";

// =============================================================================
// Country Codes
// =============================================================================

/// BIS reference-area code of the Eurozone aggregate series
pub const EUROZONE_AGGREGATE_CODE: &str = "XM";

/// Length of an ISO 3166-1 alpha-3 code
pub const ISO3_CODE_LEN: usize = 3;

/// Length of an ISO 3166-1 alpha-2 code
pub const ISO2_CODE_LEN: usize = 2;

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names in input and output tables
pub mod columns {
    /// Country-code column of the wide BIS exports
    pub const REF_AREA: &str = "REF_AREA";

    // Reference table columns
    pub const ISO2: &str = "ISO2";
    pub const ISO3: &str = "ISO3";
    pub const NAME: &str = "name";
    pub const ADOPTION: &str = "Adoption";

    // Joined/tidy table columns
    pub const DATE: &str = "date";
    pub const INTEREST_RATE: &str = "interest rate";
    pub const CPI: &str = "CPI";
    pub const INTEREST_RATE_TEXT: &str = "text";
    pub const CPI_TEXT: &str = "CPI text";
}

// =============================================================================
// Hover Text
// =============================================================================

/// Line separator understood by the charting library's hover templates
pub const HOVER_LINE_BREAK: &str = "<br>";

/// Unit suffix appended to hover values (both indicators are percentages)
pub const HOVER_UNIT_SUFFIX: &str = "%";

/// Render one hover-text line: `"{name}<br>{value:.2f}%"`
pub fn hover_text(name: &str, value: f64) -> String {
    format!(
        "{}{}{:.2}{}",
        name, HOVER_LINE_BREAK, value, HOVER_UNIT_SUFFIX
    )
}
