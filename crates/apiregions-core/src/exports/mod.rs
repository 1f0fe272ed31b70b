//! Export aggregation from bundle manifests.
//!
//! Used when a feature declares no regions: every bundle's `Export-Package`
//! header is parsed and the package names land in the synthetic `global`
//! region.
//!
//! - [`header`] parses OSGi-style clause headers
//! - [`manifest`] reads the main section of a JAR manifest
//! - [`source`] defines where headers come from ([`BundleManifestSource`])
//! - [`aggregator`] folds headers into an export set

pub mod aggregator;
pub mod header;
pub mod manifest;
pub mod source;

pub use aggregator::{aggregate_from_bundles, populate_global_region};
pub use header::{parse_header, Clause};
pub use manifest::{Manifest, EXPORT_PACKAGE};
pub use source::{BundleManifestSource, DirectoryManifestSource, InMemoryManifestSource};
