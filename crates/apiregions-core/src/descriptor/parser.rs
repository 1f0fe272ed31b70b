use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{ApiRegionsError, Result};
use crate::model::{ArtifactId, DeclaredRegion, FeatureDescriptor, RegionExtension};

/// Name of the extension holding region declarations
pub const API_REGIONS_EXTENSION: &str = "api-regions";

const KEY_ID: &str = "id";
const KEY_BUNDLES: &str = "bundles";

/// Read and parse a feature file
///
/// The file path is used as the source name in errors.
pub fn read_feature_file(path: &Path) -> Result<FeatureDescriptor> {
    let content = fs::read_to_string(path).map_err(|e| ApiRegionsError::io(path, &e))?;
    parse_feature_str(&path.display().to_string(), &content)
}

/// Parse a feature from its JSON text
///
/// `source_name` labels errors only.
pub fn parse_feature_str(source_name: &str, content: &str) -> Result<FeatureDescriptor> {
    let value: Value = serde_json::from_str(content).map_err(|e| invalid(source_name, e))?;
    let object = value
        .as_object()
        .ok_or_else(|| invalid(source_name, "top level must be a JSON object"))?;

    let mut feature = FeatureDescriptor::new();

    if let Some(id) = object.get(KEY_ID) {
        let id = id
            .as_str()
            .ok_or_else(|| invalid(source_name, "'id' must be a string"))?;
        feature.id = Some(ArtifactId::parse(id)?);
    }

    if let Some(bundles) = object.get(KEY_BUNDLES) {
        feature.bundles = parse_bundles(source_name, bundles)?;
    }

    let label = feature
        .label()
        .unwrap_or_else(|| source_name.to_string());
    if let Some(extension) = find_extension(object, API_REGIONS_EXTENSION) {
        feature.regions = parse_region_extension(&label, extension)?;
    }

    Ok(feature)
}

fn invalid(source_name: &str, reason: impl ToString) -> ApiRegionsError {
    ApiRegionsError::InvalidDescriptor {
        source_name: source_name.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bundles(source_name: &str, bundles: &Value) -> Result<Vec<ArtifactId>> {
    let entries = bundles
        .as_array()
        .ok_or_else(|| invalid(source_name, "'bundles' must be an array"))?;

    entries
        .iter()
        .map(|entry| {
            let id = match entry {
                Value::String(id) => id.as_str(),
                Value::Object(bundle) => bundle
                    .get(KEY_ID)
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid(source_name, "bundle object without a string 'id'"))?,
                _ => return Err(invalid(source_name, "bundle must be a string or an object")),
            };
            ArtifactId::parse(id)
        })
        .collect()
}

/// Find an extension by name; keys may carry a `:TYPE|optional` suffix
fn find_extension<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.iter().find_map(|(key, value)| {
        let base = key.split(':').next().unwrap_or(key);
        (base == name).then_some(value)
    })
}

fn parse_region_extension(feature_id: &str, extension: &Value) -> Result<RegionExtension> {
    let malformed = |reason: &str| ApiRegionsError::MalformedExtension {
        feature_id: feature_id.to_string(),
        reason: reason.to_string(),
    };

    let entries = match extension {
        Value::Null => return Ok(RegionExtension::Empty),
        Value::Array(entries) => entries,
        _ => return Err(malformed("api-regions must be an array of regions")),
    };

    let mut regions: Vec<DeclaredRegion> = Vec::with_capacity(entries.len());
    for entry in entries {
        let region = entry
            .as_object()
            .ok_or_else(|| malformed("region must be a JSON object"))?;
        let name = region
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("region without a string 'name'"))?;

        let mut declared = DeclaredRegion::new(name);
        // regions inherit from the one declared before them unless told otherwise
        match region.get("parent") {
            None => declared.parent = regions.last().map(|r| r.name.clone()),
            Some(Value::Null) => {}
            Some(Value::String(parent)) => declared.parent = Some(parent.clone()),
            Some(_) => return Err(malformed("region 'parent' must be a string")),
        }

        if let Some(exports) = region.get("exports") {
            let exports = exports
                .as_array()
                .ok_or_else(|| malformed("region 'exports' must be an array"))?;
            for export in exports {
                let name = match export {
                    Value::String(name) => name.as_str(),
                    Value::Object(export) => export
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or_else(|| malformed("export object without a string 'name'"))?,
                    _ => return Err(malformed("export must be a string or an object")),
                };
                // comment entries
                if name.starts_with('#') {
                    continue;
                }
                declared.exports.push(name.to_string());
            }
        }

        regions.push(declared);
    }

    Ok(RegionExtension::Declared(regions))
}
