//! Date/value transposition for chart input.

use chrono::NaiveDate;

use crate::domain::{Series, TransposedSeries};

/// Split a series into parallel date and value vectors, in iteration order.
///
/// No sorting happens; dates come out sorted only if they went in sorted.
pub fn transpose(series: &Series) -> TransposedSeries {
    TransposedSeries::from(series)
}

/// Re-pair two parallel slices and transpose the result.
///
/// Pairing stops at the shorter slice. The pairs pass through a `Series`
/// first, so a repeated date collapses exactly as in extraction (last value
/// wins, first position kept).
pub fn transpose_parallel(dates: &[NaiveDate], values: &[f64]) -> TransposedSeries {
    if dates.len() != values.len() {
        tracing::debug!(
            dates = dates.len(),
            values = values.len(),
            "parallel inputs differ in length; pairing the common prefix"
        );
    }
    let series: Series = dates.iter().copied().zip(values.iter().copied()).collect();
    transpose(&series)
}
