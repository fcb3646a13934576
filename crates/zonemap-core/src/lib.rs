//! zonemap-core - Raster container and paint operators
//!
//! This crate provides the data structures the segmentation engine runs on:
//!
//! - [`Pix`] / [`PixMut`] - The raster container (immutable / mutable)
//! - [`ImageKind`] - The closed set of raster layouts
//! - [`Box`] - Rectangle regions
//! - [`Shape`] - Stamp offsets for point painting
//! - [`PaintOptions`] - Color and shape for the paint operators
//!
//! Region labeling, watershed growth and merging live in `zonemap-region`.

pub mod box_;
pub mod error;
pub mod pix;
pub mod shape;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::{ColorModel, ImageKind, PaintOptions, Pix, PixMut, PixelDepth};
pub use shape::{Shape, ShapeKind};
