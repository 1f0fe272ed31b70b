//! Feature descriptor reader.
//!
//! Reads the JSON feature format into a [`FeatureDescriptor`](crate::model::FeatureDescriptor),
//! keeping only what region resolution needs: the feature id, its bundles and
//! the `api-regions` extension.

pub mod parser;

pub use parser::{parse_feature_str, read_feature_file, API_REGIONS_EXTENSION};
