//! Region resolution.
//!
//! Turns a feature descriptor into its final, inheritance-applied and
//! include/exclude-filtered [`RegionSet`](crate::model::RegionSet). This is the
//! one shared resolver used by the overlap check and by the `regions` report.

pub mod config;
pub mod resolver;

pub use config::{package_to_scanner_filter, RegionPattern, ResolveConfig};
pub use resolver::{resolve, Resolution};
