//! Where bundle `Export-Package` headers come from.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::errors::{ApiRegionsError, Result};
use crate::exports::manifest::Manifest;
use crate::model::ArtifactId;

/// Supplies the raw `Export-Package` header of a bundle
///
/// `Ok(None)` means the bundle exists but exports nothing. Errors are fatal for
/// the feature being resolved.
pub trait BundleManifestSource {
    /// # Errors
    /// Implementation-specific: missing bundles, unreadable or malformed manifests
    fn export_header(&self, bundle: &ArtifactId) -> Result<Option<String>>;
}

impl<T: BundleManifestSource + ?Sized> BundleManifestSource for &T {
    fn export_header(&self, bundle: &ArtifactId) -> Result<Option<String>> {
        (**self).export_header(bundle)
    }
}

/// Headers held in memory, keyed by coordinate
#[derive(Debug, Clone, Default)]
pub struct InMemoryManifestSource {
    headers: BTreeMap<ArtifactId, Option<String>>,
}

impl InMemoryManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle and its header (`None` for a bundle exporting nothing)
    pub fn insert(&mut self, bundle: ArtifactId, header: Option<&str>) {
        self.headers.insert(bundle, header.map(str::to_string));
    }

    pub fn with_bundle(mut self, bundle: ArtifactId, header: Option<&str>) -> Self {
        self.insert(bundle, header);
        self
    }
}

impl BundleManifestSource for InMemoryManifestSource {
    fn export_header(&self, bundle: &ArtifactId) -> Result<Option<String>> {
        self.headers
            .get(bundle)
            .cloned()
            .ok_or_else(|| ApiRegionsError::BundleNotFound {
                bundle_id: bundle.to_string(),
                location: "in-memory manifest source".to_string(),
            })
    }
}

/// Bundles laid out like a Maven repository
///
/// The manifest of `g.h:a:1` is `META-INF/MANIFEST.MF` inside
/// `<root>/g/h/a/1/a-1.jar`, which is either a JAR archive or an exploded
/// directory of the same name.
#[derive(Debug, Clone)]
pub struct DirectoryManifestSource {
    root: PathBuf,
}

const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

impl DirectoryManifestSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the bundle archive or exploded bundle directory
    pub fn bundle_path(&self, bundle: &ArtifactId) -> PathBuf {
        self.root.join(bundle.repository_path())
    }
}

impl BundleManifestSource for DirectoryManifestSource {
    /// # Errors
    /// * `BundleNotFound` - neither an archive nor a directory exists for the bundle
    /// * `Io` - the archive or manifest cannot be read
    /// * `MalformedManifest` - the manifest does not parse
    fn export_header(&self, bundle: &ArtifactId) -> Result<Option<String>> {
        let bundle_path = self.bundle_path(bundle);
        let (text, origin) = if bundle_path.is_file() {
            let text = read_jar_manifest(&bundle_path)?;
            (text, format!("{}!/{}", bundle_path.display(), MANIFEST_ENTRY))
        } else if bundle_path.is_dir() {
            let manifest_path = bundle_path.join("META-INF").join("MANIFEST.MF");
            let text = match fs::read_to_string(&manifest_path) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => return Err(ApiRegionsError::io(&manifest_path, &e)),
            };
            (text, manifest_path.display().to_string())
        } else {
            return Err(ApiRegionsError::BundleNotFound {
                bundle_id: bundle.to_string(),
                location: bundle_path.display().to_string(),
            });
        };

        let Some(text) = text else {
            return Ok(None);
        };
        let manifest = Manifest::parse(&text, &origin)?;
        Ok(manifest.export_package().map(str::to_string))
    }
}

/// Manifest text of a JAR archive, `None` when the archive has no manifest
fn read_jar_manifest(jar: &Path) -> Result<Option<String>> {
    let file = File::open(jar).map_err(|e| ApiRegionsError::io(jar, &e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| zip_error(jar, e))?;
    let mut entry = match archive.by_name(MANIFEST_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(zip_error(jar, e)),
    };

    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| ApiRegionsError::io(jar, &e))?;
    Ok(Some(text))
}

fn zip_error(jar: &Path, err: ZipError) -> ApiRegionsError {
    ApiRegionsError::Io {
        path: jar.display().to_string(),
        message: err.to_string(),
    }
}
