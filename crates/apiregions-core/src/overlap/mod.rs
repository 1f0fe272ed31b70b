//! Overlap detection across feature regions.
//!
//! - [`model`] holds the report types
//! - [`detector`] finds shared exports between pairs of feature regions
//! - [`human_summary`] renders a report for terminals and failure messages

pub mod detector;
pub mod human_summary;
pub mod model;

pub use detector::detect_overlaps;
pub use human_summary::render_human_summary;
pub use model::{Overlap, OverlapReport};
