//! zonemap-region - Region extraction and segmentation
//!
//! This crate partitions rasters into labeled regions:
//!
//! - **Zone labeling** - 4-connected zones of both polarities of a binary mask
//! - **Watershed growth** - Intensity-ordered basin growth from local minima
//! - **Region registry** - Per-label regions with bounds, masks and statistics
//! - **Region merging** - Joining basins across shallow boundaries
//! - **Rendering** - Painting regions onto an RGB raster
//!
//! # Examples
//!
//! ## Labeling zones
//!
//! ```
//! use zonemap_core::Pix;
//! use zonemap_region::label_zones;
//!
//! let mask = Pix::from_packed_bits(4, 4, &[0xff, 0x00]).unwrap();
//! let zones = label_zones(&mask).unwrap();
//! assert_eq!(zones.counts.positive, 1);
//! assert_eq!(zones.counts.negative, 1);
//! ```
//!
//! ## Watershed and merge
//!
//! ```
//! use zonemap_core::{ImageKind, Pix};
//! use zonemap_region::{MergeOptions, RegionRegistry, WatershedOptions, watershed};
//!
//! let pix = Pix::from_samples(5, 1, ImageKind::Grey, &[0, 2, 3, 2, 0]).unwrap();
//! let registry = RegionRegistry::from_watershed(watershed(&pix, &WatershedOptions::new()).unwrap());
//! assert_eq!(registry.len(), 2);
//!
//! let merged = registry.merged(&MergeOptions::new(3)).unwrap();
//! assert_eq!(merged.len(), 1);
//! ```

pub mod boundary;
pub mod error;
pub mod join;
pub mod label;
pub mod registry;
pub mod render;
mod seedfill;
pub mod watershed;

// Re-export core types
pub use zonemap_core;

pub use boundary::{Boundary, BoundaryGraph, RidgePixel};
pub use error::{RegionError, RegionResult};
pub use join::{JoinRule, MergeOptions, join_regions};
pub use label::{Counts, LabelMap, ZoneMap, count_zones, label_zones};
pub use registry::{Region, RegionRegistry};
pub use render::{paint_regions, region_palette};
pub use watershed::{RidgePolicy, WatershedMap, WatershedOptions, find_local_minima, watershed};
