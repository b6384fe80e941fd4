//! Tests for the country reference registry

pub mod query_tests;

use crate::app::models::{Country, EurozoneMember};
use crate::app::services::country_registry::CountryRegistry;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the three reference tables with realistic content and return the dir
pub fn write_reference_tables(dir: &Path) -> PathBuf {
    fs::write(
        dir.join("iso2_to_iso3.json"),
        r#"{"DE": "DEU", "FR": "FRA", "LT": "LTU", "US": "USA"}"#,
    )
    .unwrap();

    // Latin-1 encoded name table: Türkiye carries 0xFC for 'ü'
    let mut names: Vec<u8> = b"ISO3,name\nDEU,Germany\nFRA,France\nLTU,Lithuania\nUSA,United States\nTUR,T".to_vec();
    names.push(0xFC);
    names.extend_from_slice(b"rkiye\n");
    fs::write(dir.join("iso3_to_country_name.csv"), names).unwrap();

    fs::write(
        dir.join("eurozone_members.csv"),
        "ISO2,ISO3,Adoption\nDE,DEU,1999-01-01\nFR,FRA,1999-01-01\nLT,LTU,2015-01-01\n",
    )
    .unwrap();

    dir.to_path_buf()
}

/// Build a small registry in memory, bypassing file loading
pub fn build_test_registry() -> CountryRegistry {
    let mut registry = CountryRegistry::new(PathBuf::from("/tmp/reference"));

    for (iso2, iso3) in [("DE", "DEU"), ("FR", "FRA"), ("LT", "LTU")] {
        registry
            .iso2_to_iso3
            .insert(iso2.to_string(), iso3.to_string());
    }

    for (iso3, name) in [("DEU", "Germany"), ("FRA", "France"), ("LTU", "Lithuania")] {
        registry.countries.insert(
            iso3.to_string(),
            Country {
                iso3: iso3.to_string(),
                name: name.to_string(),
            },
        );
    }

    registry.eurozone = vec![
        EurozoneMember {
            iso2: "DE".to_string(),
            iso3: "DEU".to_string(),
            adoption: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
        },
        EurozoneMember {
            iso2: "FR".to_string(),
            iso3: "FRA".to_string(),
            adoption: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
        },
        EurozoneMember {
            iso2: "LT".to_string(),
            iso3: "LTU".to_string(),
            adoption: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        },
    ];

    registry
}
