//! Data source implementations

pub mod features_csv;

pub use features_csv::FeaturesCsvSource;
