pub mod artifact;
pub mod feature;
pub mod key;
pub mod region;

pub use artifact::ArtifactId;
pub use feature::{DeclaredRegion, FeatureDescriptor, RegionExtension};
pub use key::FeatureRegionKey;
pub use region::{ApiExport, Region, RegionKind, RegionSet, GLOBAL_REGION, PROPERTY_FILTER};
