//! Region merging
//!
//! Joins watershed basins whose boundary level is low enough, using the
//! boundary graph recorded during growth. Regions are nodes, boundaries are
//! weighted edges, and every edge accepted by the [`JoinRule`] is unioned.
//! Each resulting cluster is relabeled with its lowest member label.

use crate::error::{RegionError, RegionResult};
use crate::label::LabelMap;
use crate::registry::RegionRegistry;

/// When a boundary joins its two regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinRule {
    /// Join when the boundary level is strictly below the value
    #[default]
    BelowValue,
    /// Join when the boundary level is at or below the value
    AtOrBelowValue,
}

impl JoinRule {
    /// Whether a boundary at `level` joins under this rule.
    pub fn accepts(self, level: u32, value: u32) -> bool {
        match self {
            JoinRule::BelowValue => level < value,
            JoinRule::AtOrBelowValue => level <= value,
        }
    }
}

/// Options for [`join_regions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Threshold compared against boundary levels
    pub value: u32,
    pub rule: JoinRule,
}

impl MergeOptions {
    /// Create options joining boundaries below `value`
    pub fn new(value: u32) -> Self {
        Self {
            value,
            rule: JoinRule::default(),
        }
    }

    /// Set the join rule
    pub fn with_rule(mut self, rule: JoinRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Union-find over a sorted list of labels.
///
/// Labels are addressed by their index in the sorted list, so the smaller
/// index of a pair is also the smaller label and becomes the root.
#[derive(Debug)]
struct UnionFind {
    labels: Vec<i32>,
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(labels: Vec<i32>) -> Self {
        let parent = (0..labels.len()).collect();
        Self { labels, parent }
    }

    fn index(&self, label: i32) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Find root with iterative path compression (two-pass).
    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Join two sets; returns `false` if they were already one.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        let (smaller, larger) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[larger] = smaller;
        true
    }

    /// Cluster label of `label`, or `label` itself if it is unknown.
    fn resolve(&mut self, label: i32) -> i32 {
        match self.index(label) {
            Some(i) => {
                let root = self.find(i);
                self.labels[root]
            }
            None => label,
        }
    }
}

/// Merge the regions of a registry across shallow boundaries.
///
/// Every boundary accepted by `options.rule` against `options.value` joins
/// its two regions. Each cluster is relabeled with its lowest member label;
/// regions that join nothing keep theirs. Output labels are always ids of
/// the input regions, never `options.value`. Unlabeled pixels stay `0`, except
/// ridge pixels left unresolved by the watershed whose bordering labels all
/// fall into one cluster: they take that cluster's label. Negative zones, and
/// registries without boundary data, pass through unchanged.
///
/// Merging is idempotent: boundaries that survive between distinct clusters
/// all fail the rule.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameter`] if `options.value` is 0.
pub fn join_regions(registry: &RegionRegistry, options: &MergeOptions) -> RegionResult<LabelMap> {
    if options.value == 0 {
        return Err(RegionError::InvalidParameter(
            "join_regions: value must be positive".to_string(),
        ));
    }

    let map = registry.map();
    let graph = registry.boundaries();
    let positives: Vec<i32> = registry.positive().iter().map(|r| r.id()).collect();
    let mut uf = UnionFind::new(positives);

    let mut joins = 0usize;
    for edge in graph.edges() {
        if !options.rule.accepts(edge.level, options.value) {
            continue;
        }
        if let (Some(a), Some(b)) = (uf.index(edge.a), uf.index(edge.b)) {
            if uf.union(a, b) {
                log::trace!(
                    "join_regions: {} and {} joined at level {}",
                    edge.a,
                    edge.b,
                    edge.level
                );
                joins += 1;
            }
        }
    }

    let mut labels = map.labels().to_vec();
    for label in labels.iter_mut() {
        if *label > 0 {
            *label = uf.resolve(*label);
        }
    }

    let width = map.width() as usize;
    let mut resolved_ridges = 0usize;
    for ridge in graph.ridges() {
        let i = ridge.y as usize * width + ridge.x as usize;
        if labels.get(i) != Some(&0) {
            continue;
        }
        let mut clusters: Vec<i32> = ridge.labels.iter().map(|&l| uf.resolve(l)).collect();
        clusters.sort_unstable();
        clusters.dedup();
        if clusters.len() == 1 {
            labels[i] = clusters[0];
            resolved_ridges += 1;
        }
    }

    log::debug!(
        "join_regions: {} regions, {} joins ({:?}, value {}), {} ridge pixels resolved",
        uf.labels.len(),
        joins,
        options.rule,
        options.value,
        resolved_ridges
    );

    LabelMap::from_labels(map.width(), map.height(), labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watershed::{RidgePolicy, WatershedOptions, watershed};
    use zonemap_core::{ImageKind, Pix};

    fn registry(values: &[u32], options: &WatershedOptions) -> RegionRegistry {
        let pix = Pix::from_samples(values.len() as u32, 1, ImageKind::Grey, values).unwrap();
        RegionRegistry::from_watershed(watershed(&pix, options).unwrap())
    }

    #[test]
    fn test_join_rule() {
        assert!(JoinRule::BelowValue.accepts(2, 3));
        assert!(!JoinRule::BelowValue.accepts(3, 3));
        assert!(JoinRule::AtOrBelowValue.accepts(3, 3));
    }

    #[test]
    fn test_union_find_lowest_root() {
        let mut uf = UnionFind::new(vec![2, 5, 9]);
        assert!(uf.union(2, 1));
        assert!(uf.union(1, 0));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.resolve(9), 2);
        assert_eq!(uf.resolve(5), 2);
        assert_eq!(uf.resolve(7), 7);
    }

    #[test]
    fn test_join_by_level() {
        // Basins 1 and 2 meet at level 2, basins 2 and 3 at level 5
        let reg = registry(&[0, 2, 3, 2, 0, 5, 6, 5, 0], &WatershedOptions::new());
        assert_eq!(reg.map().labels(), &[1, 1, 1, 2, 2, 2, 2, 3, 3]);
        assert_eq!(reg.boundaries().level(1, 2), Some(2));
        assert_eq!(reg.boundaries().level(2, 3), Some(5));

        let merged = join_regions(&reg, &MergeOptions::new(3)).unwrap();
        assert_eq!(merged.distinct_labels(), vec![1, 3]);
        assert_eq!(merged.get(4, 0), Some(1));

        // Labels stay member ids whatever the threshold
        let wide = join_regions(&reg, &MergeOptions::new(4)).unwrap();
        assert_eq!(wide.labels(), &[1, 1, 1, 1, 1, 1, 1, 3, 3]);

        let strict = join_regions(&reg, &MergeOptions::new(5)).unwrap();
        assert_eq!(strict.distinct_labels(), vec![1, 3]);
        let inclusive = MergeOptions::new(5).with_rule(JoinRule::AtOrBelowValue);
        let all = join_regions(&reg, &inclusive).unwrap();
        assert_eq!(all.distinct_labels(), vec![1]);
    }

    #[test]
    fn test_unresolved_ridge_takes_cluster() {
        let options = WatershedOptions::new().with_ridge_policy(RidgePolicy::Unresolved);
        let reg = registry(&[0, 1, 9, 1, 0], &options);
        assert_eq!(reg.map().labels(), &[1, 1, 0, 2, 2]);

        let apart = join_regions(&reg, &MergeOptions::new(1)).unwrap();
        assert_eq!(apart.labels(), &[1, 1, 0, 2, 2]);
        let joined = join_regions(&reg, &MergeOptions::new(2)).unwrap();
        assert_eq!(joined.labels(), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_without_boundaries_is_identity() {
        let map = LabelMap::from_labels(3, 1, vec![1, -1, 2]).unwrap();
        let reg = RegionRegistry::from_label_map(map.clone());
        assert_eq!(join_regions(&reg, &MergeOptions::new(100)).unwrap(), map);
        assert!(matches!(
            join_regions(&reg, &MergeOptions::new(0)),
            Err(RegionError::InvalidParameter(_))
        ));
    }
}
