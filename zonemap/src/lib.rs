//! Zonemap - Zone labeling and region segmentation for Rust
//!
//! # Overview
//!
//! Zonemap partitions rasters into labeled regions:
//!
//! - Packed rasters with typed sample access (1, 8 and 16 bpp, grey and RGB)
//! - 4-connected zone labeling of both polarities of a binary mask
//! - Watershed basin growth over 8 and 16 bpp grey rasters
//! - Region registries with per-region bounds, masks and statistics
//! - Merging of basins across shallow boundaries
//! - Painting of points, masks and regions onto RGB rasters
//!
//! # Example
//!
//! ```
//! use zonemap::{ImageKind, Pix};
//! use zonemap::region::{MergeOptions, RegionRegistry, WatershedOptions, watershed};
//!
//! let pix = Pix::from_samples(5, 1, ImageKind::Grey, &[0, 2, 3, 2, 0]).unwrap();
//! let ws = watershed(&pix, &WatershedOptions::new()).unwrap();
//! let registry = RegionRegistry::from_watershed(ws);
//! assert_eq!(registry.len(), 2);
//!
//! let merged = registry.merged(&MergeOptions::new(3)).unwrap();
//! assert_eq!(merged.map().labels(), &[1, 1, 1, 1, 1]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use zonemap_core::*;

// Re-export the region crate as a module to avoid name conflicts
pub use zonemap_region as region;
