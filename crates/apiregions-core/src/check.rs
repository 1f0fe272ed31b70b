//! The overlap check workflow.
//!
//! Validates the region allow-list, resolves every selected feature with the
//! shared resolver, collects the allowed regions' export sets and runs the
//! overlap detector over them.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use apiregions_core_types::RunContext;
use serde::{Deserialize, Serialize};

use crate::errors::{ApiRegionsError, Result};
use crate::exports::BundleManifestSource;
use crate::model::{FeatureDescriptor, FeatureRegionKey};
use crate::overlap::{detect_overlaps, render_human_summary, OverlapReport};
use crate::resolve::{resolve, Resolution, ResolveConfig};
use crate::{log_op_end, log_op_error, log_op_start};

/// Input of one overlap check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Region names whose exports must not overlap; must not be empty
    pub regions: BTreeSet<String>,
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl CheckConfig {
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            resolve: ResolveConfig::default(),
        }
    }

    pub fn with_resolve(mut self, resolve: ResolveConfig) -> Self {
        self.resolve = resolve;
        self
    }
}

/// Check the selected features for exports shared between allowed regions
///
/// `features` maps feature id to descriptor; the map order fixes the order of
/// resolution and of the reported pairs. A clean check returns an empty report.
///
/// # Errors
/// * `NoRegionsSpecified` - `config.regions` is empty; nothing is resolved
/// * `NoFeaturesSelected` - `features` is empty
/// * Any resolution error of a feature, which aborts the whole check
pub fn check_overlaps(
    features: &BTreeMap<String, FeatureDescriptor>,
    config: &CheckConfig,
    manifests: &dyn BundleManifestSource,
    ctx: &RunContext,
) -> Result<OverlapReport> {
    let span = tracing::info_span!(
        "check_overlaps",
        run_id = %ctx.run_id,
        origin = ctx.origin.as_deref()
    );
    let _guard = span.enter();

    log_op_start!("check_overlaps", feature_count = features.len());
    let start = Instant::now();

    let report = check_overlaps_impl(features, config, manifests).map_err(|e| {
        log_op_error!(
            "check_overlaps",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "check_overlaps",
        duration_ms = start.elapsed().as_millis() as u64,
        key_count = report.compared.len(),
        overlap_count = report.len()
    );

    Ok(report)
}

fn check_overlaps_impl(
    features: &BTreeMap<String, FeatureDescriptor>,
    config: &CheckConfig,
    manifests: &dyn BundleManifestSource,
) -> Result<OverlapReport> {
    if config.regions.is_empty() {
        return Err(ApiRegionsError::NoRegionsSpecified);
    }
    if features.is_empty() {
        return Err(ApiRegionsError::NoFeaturesSelected {
            selection: "empty feature set".to_string(),
        });
    }

    let mut exports_by_key: BTreeMap<FeatureRegionKey, BTreeSet<String>> = BTreeMap::new();
    for (feature_id, feature) in features {
        let regions = match resolve(feature_id, feature, &config.resolve, manifests)? {
            Resolution::Resolved(regions) => regions,
            Resolution::OptedOut | Resolution::NoRegionsIncluded => continue,
        };

        for region in &regions {
            if !config.regions.contains(&region.name) {
                continue;
            }
            exports_by_key.insert(
                FeatureRegionKey::new(feature_id.as_str(), region.name.as_str()),
                region.export_names(),
            );
        }
    }

    Ok(detect_overlaps(&exports_by_key, &config.regions))
}

/// Map a non-empty report to [`ApiRegionsError::OverlapFound`]
pub fn fail_on_overlap(report: OverlapReport) -> Result<OverlapReport> {
    if report.is_empty() {
        return Ok(report);
    }
    Err(ApiRegionsError::OverlapFound {
        count: report.len(),
        summary: render_human_summary(&report),
    })
}
