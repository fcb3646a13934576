//! Watershed segmentation
//!
//! The grey raster is treated as a topographic surface. Every local-minimum
//! plateau seeds a basin, and basins are grown outward in order of rising
//! intensity through a queue of level bands. Growth stops at
//! `fill_max_value`; pixels above it, or outside the optional mask, stay
//! unlabeled.
//!
//! While flooding, the lowest intensity at each contact between two basins
//! is recorded in a [`BoundaryGraph`], which the region merger later uses to
//! join shallow neighbors.

use crate::boundary::{BoundaryGraph, RidgePixel};
use crate::error::{RegionError, RegionResult};
use crate::label::{LabelMap, read_mask_bits};
use crate::seedfill::{fill_component, for_each_neighbor};
use std::collections::VecDeque;
use zonemap_core::Pix;

/// How a pixel reached by two or more basins is labeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RidgePolicy {
    /// Keep the label the pixel was queued with
    #[default]
    FloodOrder,
    /// Take the lowest label around the pixel
    LowestLabel,
    /// Leave the pixel at 0 and stop growth through it
    Unresolved,
}

/// Options for watershed segmentation
#[derive(Debug, Clone)]
pub struct WatershedOptions {
    /// 1-bit mask of the same size as the source; clear pixels are excluded
    pub mask: Option<Pix>,
    /// Highest intensity that is flooded; `None` floods up to the source
    /// depth's maximum
    pub fill_max_value: Option<u32>,
    /// Width of each level band of the growth queue
    pub interval: u32,
    /// Labeling of ridge pixels
    pub ridge_policy: RidgePolicy,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self {
            mask: None,
            fill_max_value: None,
            interval: 1,
            ridge_policy: RidgePolicy::FloodOrder,
        }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict segmentation to the set pixels of `mask`
    pub fn with_mask(mut self, mask: Pix) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set the highest flooded intensity
    pub fn with_fill_max_value(mut self, value: u32) -> Self {
        self.fill_max_value = Some(value);
        self
    }

    /// Set the level band width
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Set the ridge policy
    pub fn with_ridge_policy(mut self, policy: RidgePolicy) -> Self {
        self.ridge_policy = policy;
        self
    }
}

/// Result of [`watershed`]
#[derive(Debug, Clone)]
pub struct WatershedMap {
    /// Basin labels `1..=n`, `0` for excluded, unflooded and unresolved pixels
    pub map: LabelMap,
    /// Boundary levels between touching basins
    pub boundaries: BoundaryGraph,
}

/// Intensities and inclusion flags of a validated source.
struct Surface {
    width: usize,
    height: usize,
    values: Vec<u32>,
    included: Vec<bool>,
}

impl Surface {
    fn read(source: &Pix, mask: Option<&Pix>, operation: &'static str) -> RegionResult<Self> {
        if !source.kind().is_grey() {
            return Err(RegionError::raster_kind(
                operation,
                "grey (8 or 16 bpp)",
                source,
            ));
        }

        let included = match mask {
            Some(mask) => {
                let bits = read_mask_bits(mask, operation)?;
                if mask.width() != source.width() || mask.height() != source.height() {
                    return Err(RegionError::InvalidParameter(format!(
                        "{}: mask is {}x{}, source is {}x{}",
                        operation,
                        mask.width(),
                        mask.height(),
                        source.width(),
                        source.height()
                    )));
                }
                bits
            }
            None => vec![true; source.size()],
        };

        let mut values = Vec::with_capacity(source.size());
        for y in 0..source.height() {
            for x in 0..source.width() {
                values.push(source.get_value_unchecked(x, y, 0));
            }
        }

        Ok(Self {
            width: source.width() as usize,
            height: source.height() as usize,
            values,
            included,
        })
    }

    /// Local-minimum plateaus in raster discovery order.
    fn minima(&self) -> Vec<Vec<usize>> {
        let values = &self.values;
        let included = &self.included;
        let mut visited = vec![false; values.len()];
        let mut plateaus = Vec::new();

        for seed in 0..values.len() {
            if !included[seed] || visited[seed] {
                continue;
            }
            let v = values[seed];
            let members = fill_component(seed, self.width, self.height, &mut visited, |n| {
                included[n] && values[n] == v
            });

            let mut is_minimum = true;
            for &p in &members {
                for_each_neighbor(p, self.width, self.height, |n| {
                    if included[n] && values[n] < v {
                        is_minimum = false;
                    }
                });
                if !is_minimum {
                    break;
                }
            }
            if is_minimum {
                plateaus.push(members);
            }
        }

        plateaus
    }
}

/// Find the local-minimum plateaus of a grey raster.
///
/// A plateau is a 4-connected set of included pixels of equal intensity. It
/// is a local minimum when no included pixel next to it is lower. Plateaus
/// are listed in the raster order of their first pixel, each as the `(x, y)`
/// coordinates of its members.
///
/// # Errors
///
/// Same preconditions as [`watershed`].
pub fn find_local_minima(source: &Pix, mask: Option<&Pix>) -> RegionResult<Vec<Vec<(u32, u32)>>> {
    let surface = Surface::read(source, mask, "find_local_minima")?;
    let width = surface.width;
    Ok(surface
        .minima()
        .into_iter()
        .map(|plateau| {
            plateau
                .into_iter()
                .map(|p| ((p % width) as u32, (p / width) as u32))
                .collect()
        })
        .collect())
}

/// Level-band queue: one FIFO per band, drained in ascending band order.
struct BandQueue {
    bands: Vec<VecDeque<usize>>,
    current: usize,
}

impl BandQueue {
    fn new(nbands: usize) -> Self {
        Self {
            bands: vec![VecDeque::new(); nbands],
            current: 0,
        }
    }

    /// Queue `p` in `band`, or in the current band if `band` is already
    /// drained.
    fn push(&mut self, band: usize, p: usize) {
        let band = band.max(self.current).min(self.bands.len() - 1);
        self.bands[band].push_back(p);
    }

    fn pop(&mut self) -> Option<usize> {
        while self.current < self.bands.len() {
            if let Some(p) = self.bands[self.current].pop_front() {
                return Some(p);
            }
            self.current += 1;
        }
        None
    }
}

/// Distinct labels of a pixel and its 4-neighbors, kept sorted.
struct Around {
    labels: [i32; 5],
    len: usize,
}

impl Around {
    fn new(label: i32) -> Self {
        Self {
            labels: [label, 0, 0, 0, 0],
            len: 1,
        }
    }

    fn insert(&mut self, label: i32) {
        let held = &self.labels[..self.len];
        if let Err(at) = held.binary_search(&label) {
            self.labels.copy_within(at..self.len, at + 1);
            self.labels[at] = label;
            self.len += 1;
        }
    }

    fn labels(&self) -> &[i32] {
        &self.labels[..self.len]
    }
}

/// Segment a grey raster into watershed basins.
///
/// Each local-minimum plateau at or below the fill limit becomes a basin,
/// numbered `1, 2, ...` in raster discovery order. Basins grow through a
/// queue of level bands `interval` wide, starting at the lowest seed; within
/// a band pixels are taken first in, first out. A popped pixel hands its
/// label to every included, not yet queued 4-neighbor whose intensity does
/// not exceed the fill limit.
///
/// A popped pixel whose already popped neighbors carry two or more labels
/// is a ridge pixel. It is labeled according to [`RidgePolicy`] and listed in the boundary graph
/// together with the labels it borders.
///
/// # Errors
///
/// - [`RegionError::InvalidRasterKind`] if `source` is not single-channel
///   grey at 8 or 16 bpp, or the mask is not 1 bpp
/// - [`RegionError::InvalidParameter`] if the mask size differs from the
///   source, `interval == 0`, or the fill limit is below `interval`
///
/// # Examples
///
/// ```
/// use zonemap_core::{ImageKind, Pix};
/// use zonemap_region::{WatershedOptions, watershed};
///
/// // Two valleys separated by a ridge at x = 2
/// let pix = Pix::from_samples(5, 1, ImageKind::Grey, &[0, 1, 9, 1, 0]).unwrap();
/// let ws = watershed(&pix, &WatershedOptions::new()).unwrap();
/// assert_eq!(ws.map.labels(), &[1, 1, 1, 2, 2]);
/// assert_eq!(ws.boundaries.level(1, 2), Some(1));
/// ```
pub fn watershed(source: &Pix, options: &WatershedOptions) -> RegionResult<WatershedMap> {
    let fill_max = options.fill_max_value.unwrap_or_else(|| source.max_value());
    let interval = options.interval;
    if interval == 0 {
        return Err(RegionError::InvalidParameter(
            "watershed: interval must be positive".to_string(),
        ));
    }
    if fill_max < interval {
        return Err(RegionError::InvalidParameter(format!(
            "watershed: fill_max_value {} is below interval {}",
            fill_max, interval
        )));
    }
    let surface = Surface::read(source, options.mask.as_ref(), "watershed")?;
    let (width, height) = (surface.width, surface.height);
    let values = &surface.values;
    let included = &surface.included;

    let seeds: Vec<Vec<usize>> = surface
        .minima()
        .into_iter()
        .filter(|plateau| values[plateau[0]] <= fill_max)
        .collect();

    let mut map = LabelMap::new(source.width(), source.height());
    let mut boundaries = BoundaryGraph::new();

    let Some(base) = seeds.iter().map(|plateau| values[plateau[0]]).min() else {
        log::debug!("watershed: {}x{} source, no seeds", width, height);
        return Ok(WatershedMap { map, boundaries });
    };
    let band_of = |v: u32| (v.saturating_sub(base) / interval) as usize;

    // No sample exceeds the depth maximum, so bands above it stay empty
    let top = fill_max.min(source.max_value());
    let mut queue = BandQueue::new(band_of(top) + 1);
    let mut queued = vec![false; values.len()];
    let mut done = vec![false; values.len()];
    let labels = map.labels_mut();

    for (i, plateau) in seeds.iter().enumerate() {
        let label = i as i32 + 1;
        log::trace!(
            "watershed: seed {} at level {} with {} pixels",
            label,
            values[plateau[0]],
            plateau.len()
        );
        for &p in plateau {
            labels[p] = label;
            queued[p] = true;
            queue.push(band_of(values[p]), p);
        }
    }

    let mut nridges = 0usize;
    while let Some(p) = queue.pop() {
        done[p] = true;
        let mut label = labels[p];

        // Ridge test only looks at neighbors whose label is final
        let mut nearby = Around::new(label);
        for_each_neighbor(p, width, height, |n| {
            if done[n] && labels[n] > 0 {
                nearby.insert(labels[n]);
            }
        });
        let around = nearby.labels();

        if around.len() > 1 {
            nridges += 1;
            boundaries.add_ridge(RidgePixel {
                x: (p % width) as u32,
                y: (p / width) as u32,
                level: values[p],
                labels: around.to_vec(),
            });
            match options.ridge_policy {
                RidgePolicy::FloodOrder => {}
                RidgePolicy::LowestLabel => {
                    label = around[0];
                    labels[p] = label;
                }
                RidgePolicy::Unresolved => {
                    labels[p] = 0;
                    for (i, &a) in around.iter().enumerate() {
                        for &b in &around[i + 1..] {
                            boundaries.record(a, b, values[p]);
                        }
                    }
                    continue;
                }
            }
        }

        for_each_neighbor(p, width, height, |n| {
            let other = labels[n];
            if other > 0 && other != label {
                boundaries.record(label, other, values[p].min(values[n]));
            }
        });

        for_each_neighbor(p, width, height, |n| {
            if included[n] && !queued[n] && values[n] <= fill_max {
                labels[n] = label;
                queued[n] = true;
                queue.push(band_of(values[n]), n);
            }
        });
    }

    log::debug!(
        "watershed: {}x{} source, {} seeds, {} boundaries, {} ridge pixels",
        width,
        height,
        seeds.len(),
        boundaries.len(),
        nridges
    );

    Ok(WatershedMap { map, boundaries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonemap_core::{ImageKind, PixelDepth};

    fn grey(width: u32, height: u32, values: &[u32]) -> Pix {
        Pix::from_samples(width, height, ImageKind::Grey, values).unwrap()
    }

    #[test]
    fn test_two_valleys() {
        let pix = grey(5, 1, &[0, 1, 9, 1, 0]);
        let ws = watershed(&pix, &WatershedOptions::new()).unwrap();
        assert_eq!(ws.map.labels(), &[1, 1, 1, 2, 2]);
        assert_eq!(ws.boundaries.level(1, 2), Some(1));
        assert_eq!(ws.boundaries.ridges().len(), 1);
        assert_eq!(ws.boundaries.ridges()[0].x, 2);
    }

    #[test]
    fn test_ridge_policies() {
        let pix = grey(5, 1, &[0, 1, 9, 1, 0]);
        let unresolved = WatershedOptions::new().with_ridge_policy(RidgePolicy::Unresolved);
        let ws = watershed(&pix, &unresolved).unwrap();
        assert_eq!(ws.map.labels(), &[1, 1, 0, 2, 2]);
        assert_eq!(ws.boundaries.level(1, 2), Some(1));

        // Basin 2 reaches the ridge of a right-leaning profile first
        let pix = grey(5, 1, &[3, 2, 9, 1, 0]);
        let ws = watershed(&pix, &WatershedOptions::new()).unwrap();
        assert_eq!(ws.map.labels(), &[1, 1, 2, 2, 2]);
        let lowest = WatershedOptions::new().with_ridge_policy(RidgePolicy::LowestLabel);
        let ws = watershed(&pix, &lowest).unwrap();
        assert_eq!(ws.map.labels(), &[1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_fill_max_value_stops_growth() {
        let pix = grey(4, 1, &[0, 5, 6, 0]);
        let options = WatershedOptions::new().with_fill_max_value(5);
        let ws = watershed(&pix, &options).unwrap();
        assert_eq!(ws.map.labels(), &[1, 1, 0, 2]);
        assert!(ws.boundaries.edges().is_empty());
    }

    #[test]
    fn test_fill_max_above_depth_maximum() {
        let pix = grey(5, 1, &[0, 5, 9, 5, 0]);
        let default = watershed(&pix, &WatershedOptions::new()).unwrap();
        let options = WatershedOptions::new().with_fill_max_value(u32::MAX);
        let ws = watershed(&pix, &options).unwrap();
        assert_eq!(ws.map, default.map);
        assert_eq!(ws.boundaries.level(1, 2), default.boundaries.level(1, 2));

        let pix16 = Pix::from_samples(3, 1, ImageKind::Grey16, &[0, 60000, 0]).unwrap();
        let wide = WatershedOptions::new()
            .with_fill_max_value(u32::MAX)
            .with_interval(7);
        let ws = watershed(&pix16, &wide).unwrap();
        assert_eq!(ws.map.labels(), &[1, 1, 2]);
    }

    #[test]
    fn test_around_keeps_distinct_sorted() {
        let mut around = Around::new(3);
        for label in [5, 1, 3, 5] {
            around.insert(label);
        }
        assert_eq!(around.labels(), &[1, 3, 5]);
        around.insert(4);
        around.insert(2);
        assert_eq!(around.labels(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_plateau_above_fill_max_is_not_numbered() {
        // Minima at levels 7 and 0; only the second is under the fill limit
        let pix = grey(5, 1, &[7, 9, 9, 9, 0]);
        let options = WatershedOptions::new().with_fill_max_value(6);
        let ws = watershed(&pix, &options).unwrap();
        assert_eq!(ws.map.labels(), &[0, 0, 0, 0, 1]);

        let minima = find_local_minima(&pix, None).unwrap();
        assert_eq!(minima, vec![vec![(0, 0)], vec![(4, 0)]]);
    }

    #[test]
    fn test_mask_excludes_pixels() {
        let pix = grey(3, 1, &[0, 0, 0]);
        let mask = Pix::from_packed_bits(3, 1, &[0b1010_0000]).unwrap();
        let ws = watershed(&pix, &WatershedOptions::new().with_mask(mask)).unwrap();
        assert_eq!(ws.map.labels(), &[1, 0, 2]);
    }

    #[test]
    fn test_preconditions() {
        let pix = grey(3, 1, &[0, 0, 0]);
        assert!(matches!(
            watershed(&pix, &WatershedOptions::new().with_interval(0)),
            Err(RegionError::InvalidParameter(_))
        ));
        let options = WatershedOptions::new()
            .with_fill_max_value(1)
            .with_interval(2);
        assert!(matches!(
            watershed(&pix, &options),
            Err(RegionError::InvalidParameter(_))
        ));

        let wrong_size = Pix::new(2, 1, PixelDepth::Bit1).unwrap();
        assert!(matches!(
            watershed(&pix, &WatershedOptions::new().with_mask(wrong_size)),
            Err(RegionError::InvalidParameter(_))
        ));

        let grey_mask = Pix::new(3, 1, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            watershed(&pix, &WatershedOptions::new().with_mask(grey_mask)),
            Err(RegionError::InvalidRasterKind { .. })
        ));

        let rgb = Pix::new_with_kind(3, 1, ImageKind::Rgb).unwrap();
        assert!(matches!(
            watershed(&rgb, &WatershedOptions::new()),
            Err(RegionError::InvalidRasterKind { .. })
        ));
    }

    #[test]
    fn test_band_queue_order() {
        let mut queue = BandQueue::new(3);
        queue.push(2, 10);
        queue.push(0, 11);
        queue.push(0, 12);
        assert_eq!(queue.pop(), Some(11));
        queue.push(1, 13);
        assert_eq!(queue.pop(), Some(12));
        assert_eq!(queue.pop(), Some(13));
        // Band 0 is drained, so a late low push lands in the current band
        queue.push(0, 14);
        assert_eq!(queue.pop(), Some(14));
        assert_eq!(queue.pop(), Some(10));
        assert_eq!(queue.pop(), None);
    }
}
