//! Error types for the test framework

use thiserror::Error;

/// A single failed comparison
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TestError {
    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Label grids differ in length
    #[error("label comparison failed at index {index}: expected {expected} labels, got {actual}")]
    LabelCountMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Label grids differ at a pixel
    #[error(
        "label comparison failed at index {index}: pixel ({x}, {y}) expected {expected}, got {actual}"
    )]
    LabelMismatch {
        index: usize,
        x: usize,
        y: usize,
        expected: i32,
        actual: i32,
    },

    /// Raster dimensions or kinds differ
    #[error("pix comparison failed at index {index}: {expected} vs {actual}")]
    PixLayoutMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Raster samples differ
    #[error("pix comparison failed at index {index}: sample mismatch at ({x}, {y}) channel {channel}")]
    PixMismatch {
        index: usize,
        x: u32,
        y: u32,
        channel: u32,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
