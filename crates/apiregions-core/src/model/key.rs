use serde::{Deserialize, Serialize};
use std::fmt;

/// The unit of overlap comparison: one region of one feature
///
/// Equality, hashing and ordering are structural. Ordering is lexicographic by
/// feature id, then region name, which fixes the pair iteration order of the
/// overlap detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureRegionKey {
    pub feature_id: String,
    pub region: String,
}

impl FeatureRegionKey {
    pub fn new(feature_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            feature_id: feature_id.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for FeatureRegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feature: {}, Region: {}", self.feature_id, self.region)
    }
}
