//! Series extraction by unit tag.

use crate::domain::{RawRecord, Series, SeriesKind};

/// Keep records whose `unit` exactly equals `unit`, in input order.
///
/// A later record with an already-seen date overwrites the earlier value.
pub fn extract_by_unit(records: &[RawRecord], unit: &str) -> Series {
    let series: Series = records
        .iter()
        .filter(|r| r.unit == unit)
        .map(|r| (r.date, r.value))
        .collect();
    tracing::debug!(unit, points = series.len(), "extracted series");
    series
}

/// Extract one of the two known series.
pub fn extract_series(records: &[RawRecord], kind: SeriesKind) -> Series {
    extract_by_unit(records, kind.unit_tag())
}

/// Concentration readings (parts per million).
pub fn ppm_series(records: &[RawRecord]) -> Series {
    extract_series(records, SeriesKind::Ppm)
}

/// Year-over-year percentage changes.
pub fn yoy_series(records: &[RawRecord]) -> Series {
    extract_series(records, SeriesKind::Yoy)
}
