use serde::{Deserialize, Serialize};

use super::artifact::ArtifactId;

/// A region as written in a feature's region extension, before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredRegion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub exports: Vec<String>,
}

impl DeclaredRegion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            exports: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_exports<I, S>(mut self, exports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports.extend(exports.into_iter().map(Into::into));
        self
    }
}

/// State of a feature's region extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "regions", rename_all = "snake_case")]
pub enum RegionExtension {
    /// The feature has no region extension; regions come from bundle manifests
    #[default]
    Absent,
    /// The extension is present without structure; the feature opts out
    Empty,
    /// Regions declared by the feature, in declaration order
    Declared(Vec<DeclaredRegion>),
}

/// The parts of a feature descriptor the region engine consumes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    /// The feature's own coordinate, if the descriptor carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArtifactId>,
    #[serde(default)]
    pub bundles: Vec<ArtifactId>,
    #[serde(default)]
    pub regions: RegionExtension,
}

impl FeatureDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ArtifactId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_bundle(mut self, bundle: ArtifactId) -> Self {
        self.bundles.push(bundle);
        self
    }

    pub fn with_regions(mut self, regions: Vec<DeclaredRegion>) -> Self {
        self.regions = RegionExtension::Declared(regions);
        self
    }

    /// Mark the region extension as present but empty
    pub fn with_empty_region_extension(mut self) -> Self {
        self.regions = RegionExtension::Empty;
        self
    }

    /// Human-facing label: the coordinate if known
    pub fn label(&self) -> Option<String> {
        self.id.as_ref().map(ToString::to_string)
    }
}
