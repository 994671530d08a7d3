//! Output helpers.
//!
//! - HTML plot files (`html`)

pub mod html;

pub use html::*;
