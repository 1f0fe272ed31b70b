//! Feature files and bundles (JARs and exploded) on disk, checked end to end.

mod common;

use std::collections::BTreeMap;
use std::fs;

use apiregions_core::descriptor::read_feature_file;
use apiregions_core::exports::DirectoryManifestSource;
use apiregions_core::model::{GLOBAL_REGION, PROPERTY_FILTER};
use apiregions_core::{
    check_overlaps, resolve, ApiRegionsError, ArtifactId, CheckConfig, ResolveConfig,
};
use apiregions_core_types::RunContext;
use common::{write_bundle, write_bundle_jar};
use tempfile::TempDir;

const MANIFEST_WITH_EXPORTS: &str = "Manifest-Version: 1.0\r\n\
Bundle-SymbolicName: org.example.api\r\n\
Export-Package: org.example.api;version=\"1.2.0\";uses:=\"org.exam\r\n ple.spi\",org.example.spi;version=\"1.0\"\r\n\
\r\n";

#[test]
fn test_fallback_region_from_exploded_bundle() {
    let repo = TempDir::new().unwrap();
    let bundle = ArtifactId::new("org.example", "api", "1.2.0");
    write_bundle(repo.path(), &bundle, MANIFEST_WITH_EXPORTS);

    let features_dir = TempDir::new().unwrap();
    let feature_path = features_dir.path().join("api.json");
    fs::write(
        &feature_path,
        r#"{"id": "org.example:api-feature:1", "bundles": [{"id": "org.example:api:1.2.0"}]}"#,
    )
    .unwrap();

    let feature = read_feature_file(&feature_path).unwrap();
    let resolution = resolve(
        "api",
        &feature,
        &ResolveConfig::default(),
        &DirectoryManifestSource::new(repo.path()),
    )
    .unwrap();

    let global = resolution.regions().unwrap().get(GLOBAL_REGION).unwrap();
    assert_eq!(
        global.export_names().into_iter().collect::<Vec<_>>(),
        vec!["org.example.api".to_string(), "org.example.spi".to_string()]
    );
    // the synthetic region gets no filter property
    assert!(global
        .exports()
        .all(|e| !e.properties.contains_key(PROPERTY_FILTER)));
}

#[test]
fn test_fallback_region_from_bundle_jar() {
    let repo = TempDir::new().unwrap();
    let bundle = ArtifactId::new("org.example", "api", "1.2.0");
    write_bundle_jar(repo.path(), &bundle, MANIFEST_WITH_EXPORTS);

    let feature = apiregions_core::FeatureDescriptor::new().with_bundle(bundle);
    let resolution = resolve(
        "api",
        &feature,
        &ResolveConfig::default(),
        &DirectoryManifestSource::new(repo.path()),
    )
    .unwrap();

    let global = resolution.regions().unwrap().get(GLOBAL_REGION).unwrap();
    assert_eq!(
        global.export_names().into_iter().collect::<Vec<_>>(),
        vec!["org.example.api".to_string(), "org.example.spi".to_string()]
    );
}

#[test]
fn test_corrupt_bundle_jar_aborts_resolve() {
    let repo = TempDir::new().unwrap();
    let bundle = ArtifactId::new("org.example", "broken", "1");
    let jar = repo.path().join(bundle.repository_path());
    fs::create_dir_all(jar.parent().unwrap()).unwrap();
    fs::write(&jar, "PK but not really").unwrap();

    let feature = apiregions_core::FeatureDescriptor::new().with_bundle(bundle);
    let err = resolve(
        "broken",
        &feature,
        &ResolveConfig::default(),
        &DirectoryManifestSource::new(repo.path()),
    )
    .unwrap_err();

    assert!(matches!(err, ApiRegionsError::Io { .. }));
}

#[test]
fn test_bundle_without_manifest_exports_nothing() {
    let repo = TempDir::new().unwrap();
    let bundle = ArtifactId::new("org.example", "empty", "1");
    fs::create_dir_all(repo.path().join(bundle.repository_path())).unwrap();

    let feature = apiregions_core::FeatureDescriptor::new().with_bundle(bundle);
    let resolution = resolve(
        "empty",
        &feature,
        &ResolveConfig::default(),
        &DirectoryManifestSource::new(repo.path()),
    )
    .unwrap();

    assert!(resolution.regions().unwrap().get(GLOBAL_REGION).unwrap().is_empty());
}

#[test]
fn test_missing_bundle_aborts_check() {
    let repo = TempDir::new().unwrap();
    let feature = apiregions_core::FeatureDescriptor::new()
        .with_bundle(ArtifactId::new("org.example", "absent", "1"));
    let mut features = BTreeMap::new();
    features.insert("absent".to_string(), feature);

    let err = check_overlaps(
        &features,
        &CheckConfig::new([GLOBAL_REGION]),
        &DirectoryManifestSource::new(repo.path()),
        &RunContext::new(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiRegionsError::BundleNotFound { .. }));
}

#[test]
fn test_declared_and_fallback_features_overlap() {
    let repo = TempDir::new().unwrap();
    let bundle = ArtifactId::new("org.example", "api", "1.2.0");
    write_bundle(repo.path(), &bundle, MANIFEST_WITH_EXPORTS);

    let dir = TempDir::new().unwrap();
    let fallback_path = dir.path().join("fallback.json");
    let declared_path = dir.path().join("declared.json");
    fs::write(
        &fallback_path,
        r#"{"id": "org.example:fallback:1", "bundles": ["org.example:api:1.2.0"]}"#,
    )
    .unwrap();
    fs::write(
        &declared_path,
        r#"{
            "id": "org.example:declared:1",
            "api-regions:JSON|false": [
                {"name": "global", "exports": ["org.example.spi", "org.other"]}
            ]
        }"#,
    )
    .unwrap();

    let mut features = BTreeMap::new();
    features.insert("declared".to_string(), read_feature_file(&declared_path).unwrap());
    features.insert("fallback".to_string(), read_feature_file(&fallback_path).unwrap());

    let report = check_overlaps(
        &features,
        &CheckConfig::new([GLOBAL_REGION]),
        &DirectoryManifestSource::new(repo.path()),
        &RunContext::new(),
    )
    .unwrap();

    assert_eq!(report.len(), 1);
    let overlap = &report.overlaps[0];
    assert_eq!(overlap.first.feature_id, "declared");
    assert_eq!(overlap.second.feature_id, "fallback");
    assert_eq!(
        overlap.shared.iter().cloned().collect::<Vec<_>>(),
        vec!["org.example.spi".to_string()]
    );
}
