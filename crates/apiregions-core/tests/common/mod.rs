use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use apiregions_core::exports::InMemoryManifestSource;
use apiregions_core::{ArtifactId, DeclaredRegion, FeatureDescriptor};

/// Feature declaring a single region with the given exports
#[allow(dead_code)]
pub fn single_region_feature(region: &str, exports: &[&str]) -> FeatureDescriptor {
    FeatureDescriptor::new().with_regions(vec![
        DeclaredRegion::new(region).with_exports(exports.iter().copied())
    ])
}

/// Feature map from (id, descriptor) pairs
#[allow(dead_code)]
pub fn features(entries: Vec<(&str, FeatureDescriptor)>) -> BTreeMap<String, FeatureDescriptor> {
    entries
        .into_iter()
        .map(|(id, feature)| (id.to_string(), feature))
        .collect()
}

/// Manifest source with no bundles
#[allow(dead_code)]
pub fn no_manifests() -> InMemoryManifestSource {
    InMemoryManifestSource::new()
}

/// Write an exploded bundle with the given manifest text into a repository root
#[allow(dead_code)]
pub fn write_bundle(root: &Path, bundle: &ArtifactId, manifest: &str) {
    let meta_inf = root.join(bundle.repository_path()).join("META-INF");
    fs::create_dir_all(&meta_inf).unwrap();
    fs::write(meta_inf.join("MANIFEST.MF"), manifest).unwrap();
}

/// Write a bundle JAR holding only the given manifest into a repository root
#[allow(dead_code)]
pub fn write_bundle_jar(root: &Path, bundle: &ArtifactId, manifest: &str) {
    let jar = root.join(bundle.repository_path());
    fs::create_dir_all(jar.parent().unwrap()).unwrap();
    let mut writer = zip::ZipWriter::new(File::create(&jar).unwrap());
    writer
        .start_file("META-INF/MANIFEST.MF", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(manifest.as_bytes()).unwrap();
    writer.finish().unwrap();
}
