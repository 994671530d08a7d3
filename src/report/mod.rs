//! Terminal output for the `co2` commands.
//!
//! Formatting lives here so the pipeline returns data and the front-ends
//! decide how to print it.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::RawRecord;
use crate::io::WrittenFile;

/// Per-unit record count and date span.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSummary {
    pub unit: String,
    pub count: usize,
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Group records by unit, sorted by unit name.
pub fn summarize_units(records: &[RawRecord]) -> Vec<UnitSummary> {
    let mut by_unit: BTreeMap<&str, UnitSummary> = BTreeMap::new();
    for r in records {
        by_unit
            .entry(r.unit.as_str())
            .and_modify(|s| {
                s.count += 1;
                s.first = s.first.min(r.date);
                s.last = s.last.max(r.date);
            })
            .or_insert_with(|| UnitSummary {
                unit: r.unit.clone(),
                count: 1,
                first: r.date,
                last: r.date,
            });
    }
    by_unit.into_values().collect()
}

/// Summary printed by `co2 fetch`.
pub fn format_fetch_summary(records: &[RawRecord]) -> String {
    let mut out = format!("Records: {}\n", records.len());
    for s in summarize_units(records) {
        out.push_str(&format!("  {:<20} {:>5}  {} .. {}\n", s.unit, s.count, s.first, s.last));
    }
    out
}

/// One line per written file: path and character count.
pub fn format_written(files: &[WrittenFile]) -> String {
    files
        .iter()
        .map(|f| format!("{} ({} chars)", f.path.display(), f.chars))
        .collect::<Vec<_>>()
        .join("\n")
}
