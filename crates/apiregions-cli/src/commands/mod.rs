pub mod overlap;
pub mod regions;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use apiregions_core::descriptor::read_feature_file;
use apiregions_core::errors::{ApiRegionsError, Result};
use apiregions_core::exports::{BundleManifestSource, DirectoryManifestSource};
use apiregions_core::resolve::RegionPattern;
use apiregions_core::{ArtifactId, FeatureDescriptor};
use clap::{Args, ValueEnum};

/// Region filtering and bundle lookup shared by all commands
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Maven-layout bundle repository for features that declare no regions
    #[arg(long, value_name = "DIR")]
    pub repository: Option<PathBuf>,

    /// Region name to process, or `*` for all (repeatable)
    #[arg(long = "include-region", value_name = "REGION")]
    pub include_regions: Vec<RegionPattern>,

    /// Region name to skip (repeatable)
    #[arg(long = "exclude-region", value_name = "REGION")]
    pub exclude_regions: Vec<RegionPattern>,

    /// Do not copy parent region exports into child regions
    #[arg(long)]
    pub no_inheritance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Manifest source used when no repository is configured
struct NoRepository;

impl BundleManifestSource for NoRepository {
    fn export_header(&self, bundle: &ArtifactId) -> Result<Option<String>> {
        Err(ApiRegionsError::InvalidConfig {
            reason: format!(
                "bundle {} needs its manifest but no --repository was given",
                bundle
            ),
        })
    }
}

pub(crate) fn manifest_source(repository: Option<&Path>) -> Box<dyn BundleManifestSource> {
    match repository {
        Some(root) => Box::new(DirectoryManifestSource::new(root)),
        None => Box::new(NoRepository),
    }
}

/// Read feature files into a map keyed by feature id
///
/// The id is the feature's coordinate, or the file path when it has none.
pub(crate) fn load_features(paths: &[PathBuf]) -> Result<BTreeMap<String, FeatureDescriptor>> {
    let mut features = BTreeMap::new();
    for path in paths {
        let feature = read_feature_file(path)?;
        let id = feature
            .label()
            .unwrap_or_else(|| path.display().to_string());
        if features.insert(id.clone(), feature).is_some() {
            return Err(ApiRegionsError::InvalidConfig {
                reason: format!("feature {} is selected more than once", id),
            });
        }
    }
    Ok(features)
}
