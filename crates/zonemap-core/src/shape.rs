//! Stamp shapes for point painting
//!
//! A [`Shape`] is a set of pixel offsets relative to an anchor point.
//! [`PixMut::paint_pixels`](crate::PixMut::paint_pixels) stamps the shape at
//! every point it is given.

/// Geometric family of a generated shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    /// Horizontal and vertical bars through the center
    Cross,
    /// Axis-aligned square
    #[default]
    Square,
    /// Disc (or ring when not filled)
    Circle,
}

/// A set of pixel offsets centered on `(0, 0)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    offsets: Vec<(i32, i32)>,
}

impl Default for Shape {
    /// A single pixel at the anchor.
    fn default() -> Self {
        Self {
            offsets: vec![(0, 0)],
        }
    }
}

impl Shape {
    /// Generate a shape of the given family.
    ///
    /// The shape spans `2 * (size / 2) + 1` pixels on each side, so even
    /// sizes round up to the next odd side. `filled` selects a solid shape
    /// or its one-pixel outline; a cross is always solid.
    pub fn new(kind: ShapeKind, size: u32, filled: bool) -> Self {
        let half = (size / 2) as i32;
        let mut offsets = Vec::new();

        match kind {
            ShapeKind::Cross => {
                for dy in -half..=half {
                    for dx in -half..=half {
                        if dx == 0 || dy == 0 {
                            offsets.push((dx, dy));
                        }
                    }
                }
            }
            ShapeKind::Square => {
                for dy in -half..=half {
                    for dx in -half..=half {
                        let edge = dx.abs() == half || dy.abs() == half;
                        if filled || edge {
                            offsets.push((dx, dy));
                        }
                    }
                }
            }
            ShapeKind::Circle => {
                let outer = (half as f32 + 0.5).powi(2);
                let inner = (half as f32 - 0.5).max(0.0).powi(2);
                for dy in -half..=half {
                    for dx in -half..=half {
                        let dist_sq = (dx * dx + dy * dy) as f32;
                        if dist_sq <= outer && (filled || half == 0 || dist_sq > inner) {
                            offsets.push((dx, dy));
                        }
                    }
                }
            }
        }

        Self { offsets }
    }

    /// Build a shape from explicit offsets.
    pub fn from_offsets(offsets: Vec<(i32, i32)>) -> Self {
        Self { offsets }
    }

    /// Get the offsets of this shape.
    pub fn pixels(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
