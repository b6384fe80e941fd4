//! Eurozone aggregate expansion
//!
//! The statistics body reports one "XM" series for the euro area. The
//! dashboards need one row per member country, so the aggregate value is
//! substituted into each member's own series for every date at/after that
//! member's euro adoption date. Dates before accession keep the member's
//! own national series; a member with no national series gains rows only
//! from accession onward. An existing national value at/after accession is
//! overwritten by the aggregate.

use super::melt::SeriesColumns;
use crate::app::models::EurozoneMember;
use crate::app::services::country_registry::CountryRegistry;
use crate::constants::EUROZONE_AGGREGATE_CODE;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Outcome of the aggregate expansion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionOutcome {
    /// Members that received at least one aggregate value
    pub members_expanded: usize,

    /// National values replaced by a differing aggregate value
    pub values_overwritten: usize,
}

/// Expand the aggregate series into per-member series
///
/// A table without an aggregate column is left unchanged (some exports
/// carry only national series); this is logged, not an error.
pub fn expand_aggregate(
    columns: &mut SeriesColumns,
    dates: &[NaiveDate],
    registry: &CountryRegistry,
) -> ExpansionOutcome {
    let Some(aggregate) = columns.get(EUROZONE_AGGREGATE_CODE).map(|s| s.to_vec()) else {
        debug!(
            "No '{}' aggregate series present, skipping Eurozone expansion",
            EUROZONE_AGGREGATE_CODE
        );
        return ExpansionOutcome::default();
    };

    let mut outcome = ExpansionOutcome::default();

    for member in registry.eurozone_members() {
        // Dates are ascending, so adoption holds from the first match on
        let first_adopted = dates.iter().position(|date| member.adopted_by(*date));
        let key = member_column_key(columns, member);

        let Some(start) = first_adopted else {
            debug!(
                "Member {} adopts the euro after the window ends, nothing to expand",
                member.iso3
            );
            continue;
        };

        let series = columns.get_or_insert(&key, dates.len());
        for index in start..dates.len() {
            let aggregate_value = aggregate[index];
            if series[index].is_some() && series[index] != aggregate_value {
                outcome.values_overwritten += 1;
            }
            series[index] = aggregate_value;
        }

        outcome.members_expanded += 1;
    }

    if outcome.values_overwritten > 0 {
        warn!(
            "Eurozone expansion overwrote {} national values with the aggregate",
            outcome.values_overwritten
        );
    }

    debug!(
        "Eurozone expansion: {} members received aggregate values",
        outcome.members_expanded
    );

    outcome
}

/// Column key the member's series lives under
///
/// The wide exports key rows by ISO2, so substitution targets the ISO2
/// code; a table that already carries the member under ISO3 keeps that
/// key instead.
fn member_column_key(columns: &SeriesColumns, member: &EurozoneMember) -> String {
    if columns.contains(&member.iso3) && !columns.contains(&member.iso2) {
        member.iso3.clone()
    } else {
        member.iso2.clone()
    }
}
