//! Region adjacency recorded during watershed growth
//!
//! For every pair of distinct positive labels that touch, the graph keeps
//! the boundary level: the lowest intensity seen on either side of any
//! 4-connected contact between them. Ridge pixels, where two or more basins
//! meet, are listed separately.

use std::collections::BTreeMap;

/// Contact between two regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Lower label of the pair
    pub a: i32,
    /// Higher label of the pair
    pub b: i32,
    /// Lowest intensity at any contact between `a` and `b`
    pub level: u32,
}

/// A pixel where two or more basins met during growth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RidgePixel {
    pub x: u32,
    pub y: u32,
    /// Intensity of the pixel
    pub level: u32,
    /// Distinct labels around the pixel (its own included), ascending
    pub labels: Vec<i32>,
}

/// Boundary levels between touching regions plus the ridge pixels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryGraph {
    edges: BTreeMap<(i32, i32), u32>,
    ridges: Vec<RidgePixel>,
}

impl BoundaryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contact between `a` and `b` at `level`.
    ///
    /// The lower level wins when the pair is already known. Pairs with a
    /// non-positive label or `a == b` are ignored.
    pub fn record(&mut self, a: i32, b: i32, level: u32) {
        if a == b || a <= 0 || b <= 0 {
            return;
        }
        let key = (a.min(b), a.max(b));
        self.edges
            .entry(key)
            .and_modify(|l| *l = (*l).min(level))
            .or_insert(level);
    }

    pub fn add_ridge(&mut self, ridge: RidgePixel) {
        self.ridges.push(ridge);
    }

    /// Get all edges, sorted by `(a, b)`.
    pub fn edges(&self) -> Vec<Boundary> {
        self.edges
            .iter()
            .map(|(&(a, b), &level)| Boundary { a, b, level })
            .collect()
    }

    /// Get the boundary level between two labels, in either order.
    pub fn level(&self, a: i32, b: i32) -> Option<u32> {
        self.edges.get(&(a.min(b), a.max(b))).copied()
    }

    /// Get the ridge pixels in the order they were met.
    pub fn ridges(&self) -> &[RidgePixel] {
        &self.ridges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.ridges.is_empty()
    }

    /// Rewrite every label through `relabel`, merging parallel edges.
    ///
    /// Edges whose endpoints map to the same label disappear; of several
    /// edges between the same pair of new labels the lowest level is kept.
    /// Ridge pixels that end up bordering a single label are dropped.
    pub fn collapse(&self, mut relabel: impl FnMut(i32) -> i32) -> BoundaryGraph {
        let mut out = BoundaryGraph::new();
        for (&(a, b), &level) in &self.edges {
            out.record(relabel(a), relabel(b), level);
        }
        for ridge in &self.ridges {
            let mut labels: Vec<i32> = ridge.labels.iter().map(|&l| relabel(l)).collect();
            labels.sort_unstable();
            labels.dedup();
            if labels.len() > 1 {
                out.add_ridge(RidgePixel {
                    labels,
                    ..ridge.clone()
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_lowest_level() {
        let mut graph = BoundaryGraph::new();
        graph.record(3, 1, 7);
        graph.record(1, 3, 4);
        graph.record(1, 3, 9);
        graph.record(2, 2, 0);
        graph.record(0, 2, 0);
        assert_eq!(graph.level(3, 1), Some(4));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.level(2, 0), None);
    }

    #[test]
    fn test_edges_sorted() {
        let mut graph = BoundaryGraph::new();
        graph.record(2, 3, 5);
        graph.record(1, 3, 6);
        graph.record(1, 2, 8);
        let pairs: Vec<(i32, i32)> = graph.edges().iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_collapse() {
        let mut graph = BoundaryGraph::new();
        graph.record(1, 2, 2);
        graph.record(2, 3, 3);
        graph.record(1, 3, 5);
        graph.add_ridge(RidgePixel {
            x: 0,
            y: 0,
            level: 2,
            labels: vec![1, 2],
        });
        let merged = graph.collapse(|l| if l == 2 { 1 } else { l });
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.level(1, 3), Some(3));
        assert!(merged.ridges().is_empty());
    }
}
