//! apiregions core - API region resolution and overlap detection
//!
//! This crate resolves the API regions of feature descriptors and finds
//! packages exported by more than one feature region:
//! - Feature, region and artifact models
//! - Region resolution with parent inheritance and include/exclude filtering
//! - Export aggregation from bundle manifests for features without regions
//! - Pairwise overlap detection with deterministic reports
//! - JSON feature descriptor reading
//!
//! All work is synchronous and in memory; a run builds its data, reports and
//! discards it.

pub mod check;
pub mod descriptor;
pub mod errors;
pub mod exports;
pub mod logging_facility;
pub mod model;
pub mod overlap;
pub mod resolve;

// Used by the logging macros
pub use apiregions_core_types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use check::{check_overlaps, fail_on_overlap, CheckConfig};
pub use errors::{ApiRegionsError, ExError, ExErrorKind, Result};
pub use model::{
    ArtifactId, DeclaredRegion, FeatureDescriptor, FeatureRegionKey, Region, RegionExtension,
    RegionKind, RegionSet,
};
pub use overlap::{detect_overlaps, Overlap, OverlapReport};
pub use resolve::{resolve, Resolution, ResolveConfig};
