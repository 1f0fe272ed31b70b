use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Name of the synthetic region used when a feature declares no regions
pub const GLOBAL_REGION: &str = "global";

/// Export property holding the classpath filter glob used by API jar tooling
pub const PROPERTY_FILTER: &str = "apis-jar.filter";

/// One exported package of a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiExport {
    /// Dot-separated package name
    pub name: String,

    /// Per-export properties for downstream tooling
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl ApiExport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }
}

/// How a region came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Declared in the feature's region extension
    Declared,
    /// Built on the fly from bundle manifests because the feature declares no regions
    SyntheticGlobal,
}

/// A named group of exported packages
///
/// Exports are keyed by package name, so a region never holds the same
/// package twice. Iteration is in package-name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub kind: RegionKind,
    exports: BTreeMap<String, ApiExport>,
}

impl Region {
    /// Create an empty declared region
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            kind: RegionKind::Declared,
            exports: BTreeMap::new(),
        }
    }

    /// Create the empty synthetic `global` region
    pub fn synthetic_global() -> Self {
        Self {
            name: GLOBAL_REGION.to_string(),
            parent: None,
            kind: RegionKind::SyntheticGlobal,
            exports: BTreeMap::new(),
        }
    }

    /// Set the parent region name
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add an export; an existing export of the same name keeps its properties
    ///
    /// Returns `true` if the export was not present before.
    pub fn add_export(&mut self, export: ApiExport) -> bool {
        if self.exports.contains_key(&export.name) {
            return false;
        }
        self.exports.insert(export.name.clone(), export);
        true
    }

    /// Look up an export by package name (never mutates)
    pub fn export(&self, name: &str) -> Option<&ApiExport> {
        self.exports.get(name)
    }

    /// Look up an export by package name, creating an empty entry when absent
    pub fn export_or_insert(&mut self, name: &str) -> &mut ApiExport {
        self.exports
            .entry(name.to_string())
            .or_insert_with(|| ApiExport::new(name))
    }

    pub(crate) fn exports_mut(&mut self) -> impl Iterator<Item = &mut ApiExport> {
        self.exports.values_mut()
    }

    /// Iterate exports in package-name order
    pub fn exports(&self) -> impl Iterator<Item = &ApiExport> {
        self.exports.values()
    }

    /// The set of exported package names
    pub fn export_names(&self) -> BTreeSet<String> {
        self.exports.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

/// The resolved regions of one feature, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region
    ///
    /// Returns the region back if one with the same name already exists.
    pub fn insert(&mut self, region: Region) -> Result<(), Region> {
        if self.get(&region.name).is_some() {
            return Err(region);
        }
        self.regions.push(region);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
