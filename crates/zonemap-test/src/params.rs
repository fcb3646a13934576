//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::format_labels;
use zonemap_core::Pix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and record mismatches (default)
    #[default]
    Compare,
    /// Compare, and also print every compared grid
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything but "display" means compare
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and recorded failures.
pub struct RegParams {
    /// Name of the test (e.g., "label")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, err: TestError) -> bool {
        eprintln!("Failure in {}_reg: {}", self.test_name, err);
        self.failures.push(err);
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let index = self.index;
            self.fail(TestError::ValueMismatch {
                index,
                expected,
                actual,
                delta,
            })
        } else {
            true
        }
    }

    /// Compare two row-major label grids for exact equality
    ///
    /// `width` is only used to report the first mismatch as `(x, y)` and to
    /// lay out the grid in display mode.
    pub fn compare_labels(&mut self, expected: &[i32], actual: &[i32], width: usize) -> bool {
        self.index += 1;
        let index = self.index;

        if self.display() {
            eprintln!("{}_reg index {}:", self.test_name, index);
            eprint!("{}", format_labels(actual, width));
        }

        if expected.len() != actual.len() {
            return self.fail(TestError::LabelCountMismatch {
                index,
                expected: expected.len(),
                actual: actual.len(),
            });
        }

        let width = width.max(1);
        match expected.iter().zip(actual).position(|(e, a)| e != a) {
            Some(i) => self.fail(TestError::LabelMismatch {
                index,
                x: i % width,
                y: i / width,
                expected: expected[i],
                actual: actual[i],
            }),
            None => true,
        }
    }

    /// Compare two Pix images for exact equality
    ///
    /// Dimensions, kind and every sample of every channel must match.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        let index = self.index;

        if !pix1.sizes_equal(pix2) {
            return self.fail(TestError::PixLayoutMismatch {
                index,
                expected: format!("{}x{} {}", pix1.width(), pix1.height(), pix1.kind()),
                actual: format!("{}x{} {}", pix2.width(), pix2.height(), pix2.kind()),
            });
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                for channel in 0..pix1.channels() {
                    if pix1.get_value(x, y, channel) != pix2.get_value(x, y, channel) {
                        return self.fail(TestError::PixMismatch {
                            index,
                            x,
                            y,
                            channel,
                        });
                    }
                }
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.is_success() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.is_success()
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get the first recorded failure, if any
    pub fn check(&self) -> TestResult<()> {
        match self.failures.first() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}
