use std::collections::{BTreeMap, BTreeSet};

use crate::model::FeatureRegionKey;
use crate::overlap::model::{Overlap, OverlapReport};

/// Find every pair of feature regions sharing at least one export
///
/// Keys whose region is not in `allowed_regions` are dropped first. With fewer
/// than two keys left the report is empty. Otherwise each unordered pair of
/// distinct keys is compared once, in key order, and every non-empty
/// intersection is recorded and logged.
pub fn detect_overlaps(
    exports_by_key: &BTreeMap<FeatureRegionKey, BTreeSet<String>>,
    allowed_regions: &BTreeSet<String>,
) -> OverlapReport {
    let candidates: Vec<(&FeatureRegionKey, &BTreeSet<String>)> = exports_by_key
        .iter()
        .filter(|(key, _)| allowed_regions.contains(&key.region))
        .collect();

    let mut report = OverlapReport {
        compared: candidates.iter().map(|(k, _)| (*k).clone()).collect(),
        overlaps: Vec::new(),
    };

    if candidates.len() < 2 {
        tracing::debug!(
            key_count = candidates.len(),
            "fewer than two feature regions to compare"
        );
        return report;
    }

    for (i, (first, first_exports)) in candidates.iter().enumerate() {
        for (second, second_exports) in &candidates[i + 1..] {
            let shared: BTreeSet<String> = first_exports
                .intersection(second_exports)
                .cloned()
                .collect();
            if shared.is_empty() {
                continue;
            }

            tracing::error!(
                overlap_count = shared.len(),
                "Overlap found between {} and {}. Both export: [{}]",
                first,
                second,
                join(&shared)
            );
            report.overlaps.push(Overlap {
                first: (*first).clone(),
                second: (*second).clone(),
                shared,
            });
        }
    }

    report
}

pub(crate) fn join(exports: &BTreeSet<String>) -> String {
    exports
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
