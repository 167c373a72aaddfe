//! Spatial layout of detected text regions.
//!
//! This module contains:
//! - The detected-region type and its overlap predicates (TextRegion)
//! - Reading-order sorting for right-to-left columnar pages

pub mod region;
pub mod sort;

pub use region::TextRegion;
pub use sort::{merge_column, sort_into_columns, sort_reading_order};
