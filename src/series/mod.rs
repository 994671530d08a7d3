//! Reshaping fetched records into chart input.
//!
//! `extract` filters records into a date → value `Series` by unit tag;
//! `transpose` turns a `Series` (or two parallel slices) into the aligned
//! date/value vectors the chart renderer consumes.

pub mod extract;
pub mod transpose;

pub use extract::*;
pub use transpose::*;
