use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::model::FeatureRegionKey;

/// Two feature regions exporting at least one common package
///
/// `first` always orders before `second`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub first: FeatureRegionKey,
    pub second: FeatureRegionKey,
    pub shared: BTreeSet<String>,
}

/// Every overlap found by one check, in key-pair order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapReport {
    /// Keys that took part in the comparison
    pub compared: Vec<FeatureRegionKey>,
    pub overlaps: Vec<Overlap>,
}

impl OverlapReport {
    pub fn is_empty(&self) -> bool {
        self.overlaps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.overlaps.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlap> {
        self.overlaps.iter()
    }

    /// Hex SHA256 over the canonical JSON form
    ///
    /// Identical inputs always yield the same digest.
    pub fn digest(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

impl<'a> IntoIterator for &'a OverlapReport {
    type Item = &'a Overlap;
    type IntoIter = std::slice::Iter<'a, Overlap>;

    fn into_iter(self) -> Self::IntoIter {
        self.overlaps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlap(a: &str, b: &str, shared: &[&str]) -> Overlap {
        Overlap {
            first: FeatureRegionKey::new(a, "global"),
            second: FeatureRegionKey::new(b, "global"),
            shared: shared.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = OverlapReport::default();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_digest_is_stable_and_content_sensitive() {
        let a = OverlapReport {
            compared: vec![],
            overlaps: vec![overlap("f1", "f2", &["com.a"])],
        };
        let b = a.clone();
        let c = OverlapReport {
            compared: vec![],
            overlaps: vec![overlap("f1", "f2", &["com.b"])],
        };

        let digest = a.digest().unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, b.digest().unwrap());
        assert_ne!(digest, c.digest().unwrap());
    }
}
