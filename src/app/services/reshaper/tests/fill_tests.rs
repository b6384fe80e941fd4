//! Tests for the missing-value policies

use crate::app::models::FillStrategy;
use crate::app::services::reshaper::fill::{apply_fill, forward_fill, interpolate};

#[test]
fn test_forward_fill_carries_last_observation() {
    let mut series = vec![Some(1.0), None, None, Some(2.0)];
    let filled = forward_fill(&mut series);

    assert_eq!(series, vec![Some(1.0), Some(1.0), Some(1.0), Some(2.0)]);
    assert_eq!(filled, 2);
}

#[test]
fn test_forward_fill_leaves_leading_gap() {
    let mut series = vec![None, None, Some(3.5), None];
    let filled = forward_fill(&mut series);

    assert_eq!(series, vec![None, None, Some(3.5), Some(3.5)]);
    assert_eq!(filled, 1);
}

#[test]
fn test_forward_fill_all_missing() {
    let mut series: Vec<Option<f64>> = vec![None, None, None];
    let filled = forward_fill(&mut series);

    assert_eq!(series, vec![None, None, None]);
    assert_eq!(filled, 0);
}

#[test]
fn test_interpolate_midpoint() {
    let mut series = vec![Some(1.0), None, Some(3.0)];
    let filled = interpolate(&mut series);

    assert_eq!(series, vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(filled, 1);
}

#[test]
fn test_interpolate_longer_gap() {
    let mut series = vec![Some(0.0), None, None, None, Some(4.0)];
    interpolate(&mut series);

    assert_eq!(
        series,
        vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
    );
}

#[test]
fn test_interpolate_descending_gap() {
    let mut series = vec![Some(3.0), None, Some(2.0)];
    interpolate(&mut series);

    assert_eq!(series, vec![Some(3.0), Some(2.5), Some(2.0)]);
}

#[test]
fn test_interpolate_trailing_gap_carries_forward() {
    let mut series = vec![Some(1.0), None, Some(3.0), None, None];
    interpolate(&mut series);

    assert_eq!(
        series,
        vec![Some(1.0), Some(2.0), Some(3.0), Some(3.0), Some(3.0)]
    );
}

#[test]
fn test_interpolate_leading_gap_stays_missing() {
    let mut series = vec![None, Some(2.0), None, Some(4.0)];
    interpolate(&mut series);

    assert_eq!(series, vec![None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_apply_fill_dispatches_on_strategy() {
    let mut forward = vec![Some(1.0), None, Some(3.0)];
    apply_fill(&mut forward, FillStrategy::ForwardFill);
    assert_eq!(forward, vec![Some(1.0), Some(1.0), Some(3.0)]);

    let mut linear = vec![Some(1.0), None, Some(3.0)];
    apply_fill(&mut linear, FillStrategy::Interpolate);
    assert_eq!(linear, vec![Some(1.0), Some(2.0), Some(3.0)]);
}
