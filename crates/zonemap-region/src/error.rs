//! Error types for zonemap-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] zonemap_core::Error),

    /// Input raster has the wrong depth, channel count or color model
    #[error("{operation}: invalid raster kind: expected {expected}, got {actual}")]
    InvalidRasterKind {
        operation: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A coordinate escapes the label map
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
}

impl RegionError {
    pub(crate) fn raster_kind(
        operation: &'static str,
        expected: &'static str,
        pix: &zonemap_core::Pix,
    ) -> Self {
        RegionError::InvalidRasterKind {
            operation,
            expected,
            actual: pix.kind().to_string(),
        }
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
