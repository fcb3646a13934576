//! Error types for zonemap-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal storage details.
//!
//! Every precondition is checked before a raster is touched, so an `Err`
//! always means the target was left unmodified.

use thiserror::Error;

/// zonemap-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid pixel depth
    #[error("invalid pixel depth: {0} bpp")]
    InvalidDepth(u32),

    /// Raster has the wrong depth, channel count or color model
    #[error("{operation}: invalid raster kind: expected {expected}, got {actual}")]
    InvalidRasterKind {
        operation: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A coordinate escapes the raster extent
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} raster")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for zonemap-core operations
pub type Result<T> = std::result::Result<T, Error>;
