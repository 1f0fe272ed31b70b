use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Instant;

use crate::errors::{ApiRegionsError, Result};
use crate::exports::{populate_global_region, BundleManifestSource};
use crate::model::{
    ApiExport, DeclaredRegion, FeatureDescriptor, Region, RegionExtension, RegionSet,
    PROPERTY_FILTER,
};
use crate::resolve::config::{package_to_scanner_filter, ResolveConfig};
use crate::{log_op_end, log_op_error, log_op_start};

/// Outcome of resolving one feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Regions resolved normally; the only outcome that feeds overlap detection
    Resolved(RegionSet),
    /// The feature carries an empty region extension
    OptedOut,
    /// Regions were declared but none survived include/exclude filtering
    NoRegionsIncluded,
}

impl Resolution {
    pub fn regions(&self) -> Option<&RegionSet> {
        match self {
            Resolution::Resolved(set) => Some(set),
            Resolution::OptedOut | Resolution::NoRegionsIncluded => None,
        }
    }

    pub fn into_regions(self) -> Option<RegionSet> {
        match self {
            Resolution::Resolved(set) => Some(set),
            Resolution::OptedOut | Resolution::NoRegionsIncluded => None,
        }
    }
}

/// Resolve the regions of a feature
///
/// 1. No region extension: a single synthetic `global` region filled from the
///    bundle manifests supplied by `manifests`.
/// 2. Empty extension: [`Resolution::OptedOut`].
/// 3. Declared regions: parents are resolved before children and, with
///    inheritance enabled, children receive every parent export. Regions are
///    then filtered by `config`, and each export of a kept region gets the
///    [`PROPERTY_FILTER`] glob.
/// 4. Nothing kept: [`Resolution::NoRegionsIncluded`].
///
/// `feature_id` only labels diagnostics.
///
/// # Errors
/// * `MalformedExtension` - empty region or export names
/// * `DuplicateRegion` - two regions share a name
/// * `UnknownParentRegion` - a parent is not declared by the feature
/// * `RegionParentCycle` - parents form a cycle
/// * Any error of `manifests` or the export header parser on the fallback path
pub fn resolve(
    feature_id: &str,
    feature: &FeatureDescriptor,
    config: &ResolveConfig,
    manifests: &dyn BundleManifestSource,
) -> Result<Resolution> {
    log_op_start!("resolve_regions", feature_id = feature_id);
    let start = Instant::now();

    let resolution = resolve_impl(feature_id, feature, config, manifests).map_err(|e| {
        log_op_error!(
            "resolve_regions",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            feature_id = feature_id
        );
        e
    })?;

    log_op_end!(
        "resolve_regions",
        duration_ms = start.elapsed().as_millis() as u64,
        feature_id = feature_id,
        region_count = resolution.regions().map_or(0, RegionSet::len)
    );

    Ok(resolution)
}

fn resolve_impl(
    feature_id: &str,
    feature: &FeatureDescriptor,
    config: &ResolveConfig,
    manifests: &dyn BundleManifestSource,
) -> Result<Resolution> {
    let declared = match &feature.regions {
        RegionExtension::Absent => {
            let mut global = Region::synthetic_global();
            populate_global_region(&mut global, &feature.bundles, manifests)?;

            let mut set = RegionSet::new();
            set.insert(global).map_err(|r| ApiRegionsError::Internal {
                message: format!("fresh region set already holds {}", r.name),
            })?;
            return Ok(Resolution::Resolved(set));
        }
        RegionExtension::Empty => {
            tracing::info!(
                feature_id = feature_id,
                "feature declares an empty api-regions extension, nothing to check"
            );
            return Ok(Resolution::OptedOut);
        }
        RegionExtension::Declared(declared) => declared,
    };

    let by_name = index_regions(feature_id, declared)?;
    let order = dependency_order(feature_id, declared, &by_name)?;

    // Resolve exports parents-first so every parent is final before its children read it
    let mut resolved: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for name in order {
        let region = by_name[name];
        let mut exports: BTreeSet<&str> = region.exports.iter().map(String::as_str).collect();
        if config.inheritance_enabled {
            if let Some(parent) = region.parent.as_deref() {
                exports.extend(resolved[parent].iter().copied());
            }
        }
        resolved.insert(name, exports);
    }

    let mut set = RegionSet::new();
    for declared_region in declared {
        let name = declared_region.name.as_str();
        if !config.is_region_included(name) {
            tracing::debug!(
                feature_id = feature_id,
                region = name,
                "region not processed due to the configured include/exclude list"
            );
            continue;
        }

        let mut region = Region::new(name);
        region.parent = declared_region.parent.clone();
        for export in &resolved[name] {
            region.add_export(ApiExport::new(*export));
        }
        for export in region.exports_mut() {
            let filter = package_to_scanner_filter(&export.name, true);
            export.properties.insert(PROPERTY_FILTER.to_string(), filter);
        }

        // index_regions rejected duplicates already
        set.insert(region).map_err(|r| ApiRegionsError::DuplicateRegion {
            feature_id: feature_id.to_string(),
            region: r.name,
        })?;
    }

    if set.is_empty() {
        tracing::info!(
            feature_id = feature_id,
            "feature has no included api regions"
        );
        return Ok(Resolution::NoRegionsIncluded);
    }

    Ok(Resolution::Resolved(set))
}

/// Index declared regions by name, validating names
fn index_regions<'a>(
    feature_id: &str,
    declared: &'a [DeclaredRegion],
) -> Result<BTreeMap<&'a str, &'a DeclaredRegion>> {
    let mut by_name = BTreeMap::new();
    for region in declared {
        if region.name.trim().is_empty() {
            return Err(ApiRegionsError::MalformedExtension {
                feature_id: feature_id.to_string(),
                reason: "region without a name".to_string(),
            });
        }
        if let Some(empty) = region.exports.iter().find(|e| e.trim().is_empty()) {
            return Err(ApiRegionsError::MalformedExtension {
                feature_id: feature_id.to_string(),
                reason: format!(
                    "region {} has an empty export name '{}'",
                    region.name, empty
                ),
            });
        }
        if by_name.insert(region.name.as_str(), region).is_some() {
            return Err(ApiRegionsError::DuplicateRegion {
                feature_id: feature_id.to_string(),
                region: region.name.clone(),
            });
        }
    }
    Ok(by_name)
}

/// Order region names so that every parent precedes its children
///
/// Walks each region's parent chain, rejecting unknown parents and cycles, and
/// places the chain root-first. Regions without a parent keep declaration order.
fn dependency_order<'a>(
    feature_id: &str,
    declared: &'a [DeclaredRegion],
    by_name: &BTreeMap<&'a str, &'a DeclaredRegion>,
) -> Result<Vec<&'a str>> {
    let mut order: Vec<&'a str> = Vec::with_capacity(declared.len());
    let mut placed: HashSet<&'a str> = HashSet::new();

    for region in declared {
        let mut chain: Vec<&'a str> = Vec::new();
        let mut current: Option<&'a str> = Some(region.name.as_str());

        while let Some(name) = current {
            if placed.contains(name) {
                break;
            }
            if let Some(pos) = chain.iter().position(|n| *n == name) {
                return Err(ApiRegionsError::RegionParentCycle {
                    feature_id: feature_id.to_string(),
                    cycle: chain[pos..].iter().map(|n| n.to_string()).collect(),
                });
            }
            chain.push(name);

            let parent = by_name[name].parent.as_deref();
            if let Some(parent) = parent {
                if !by_name.contains_key(parent) {
                    return Err(ApiRegionsError::UnknownParentRegion {
                        feature_id: feature_id.to_string(),
                        region: name.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
            current = parent;
        }

        for name in chain.into_iter().rev() {
            placed.insert(name);
            order.push(name);
        }
    }

    Ok(order)
}
