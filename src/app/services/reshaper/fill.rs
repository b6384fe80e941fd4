//! Missing-value policies along the date axis
//!
//! Both policies work per country. Forward-fill carries the most recent
//! prior observation into a gap; interpolation draws a straight line
//! between the known neighbours of an interior gap and carries the last
//! observation into a trailing gap. Leading gaps stay missing under both
//! policies.

use crate::app::models::FillStrategy;

/// Apply the configured missing-value policy to one series
///
/// Returns the number of cells that changed from missing to present.
pub fn apply_fill(series: &mut [Option<f64>], strategy: FillStrategy) -> usize {
    match strategy {
        FillStrategy::ForwardFill => forward_fill(series),
        FillStrategy::Interpolate => interpolate(series),
    }
}

/// Forward-fill gaps with the most recent prior observation
pub fn forward_fill(series: &mut [Option<f64>]) -> usize {
    let mut last = None;
    let mut filled = 0;

    for value in series.iter_mut() {
        match value {
            Some(v) => last = Some(*v),
            None => {
                if last.is_some() {
                    *value = last;
                    filled += 1;
                }
            }
        }
    }

    filled
}

/// Linearly interpolate interior gaps; carry the last observation forward
/// into a trailing gap
pub fn interpolate(series: &mut [Option<f64>]) -> usize {
    let mut filled = 0;
    let mut prev_known: Option<usize> = None;
    let mut index = 0;

    while index < series.len() {
        if series[index].is_some() {
            prev_known = Some(index);
            index += 1;
            continue;
        }

        // Start of a gap: find its right edge
        let gap_start = index;
        let mut next_known = None;
        for (offset, value) in series[gap_start..].iter().enumerate() {
            if value.is_some() {
                next_known = Some(gap_start + offset);
                break;
            }
        }

        match (prev_known, next_known) {
            (Some(left), Some(right)) => {
                let left_value = series[left].unwrap_or_default();
                let right_value = series[right].unwrap_or_default();
                let span = (right - left) as f64;

                for position in gap_start..right {
                    let fraction = (position - left) as f64 / span;
                    series[position] = Some(left_value + (right_value - left_value) * fraction);
                    filled += 1;
                }
                index = right;
            }
            (Some(left), None) => {
                // Trailing gap: carry the last observation forward
                let carried = series[left];
                for value in series[gap_start..].iter_mut() {
                    *value = carried;
                    filled += 1;
                }
                index = series.len();
            }
            (None, Some(right)) => {
                // Leading gap stays missing
                index = right;
            }
            (None, None) => {
                // All-missing series stays missing
                index = series.len();
            }
        }
    }

    filled
}
