//! Data acquisition: the feature-service client and its date tokens.

pub mod arcgis;
pub mod date;

pub use arcgis::{FeatureClient, RawResponse, parse_features};
pub use date::parse_year_month;
