//! zonemap-test - Regression test framework for zonemap
//!
//! Regression tests build synthetic fixtures, run an operation and compare
//! the result against known values, label grids or rasters. All comparisons
//! of one test are collected and reported together by [`RegParams::cleanup`].
//!
//! Two modes are supported:
//!
//! - **Compare**: Record and report mismatches (default)
//! - **Display**: Same as compare, and print every compared label grid
//!
//! # Usage
//!
//! ```ignore
//! use zonemap_test::RegParams;
//!
//! let mut rp = RegParams::new("label");
//! rp.compare_values(3.0, counts.total as f64, 0.0);
//! rp.compare_labels(&expected, map.labels(), 4);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Render a label grid as text, one row per line.
///
/// Each label is right-aligned to the widest label in the grid.
pub fn format_labels(labels: &[i32], width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let cell = labels
        .iter()
        .map(|l| l.to_string().len())
        .max()
        .unwrap_or(1);
    let mut out = String::new();
    for row in labels.chunks(width) {
        let line: Vec<String> = row.iter().map(|l| format!("{:>cell$}", l)).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
