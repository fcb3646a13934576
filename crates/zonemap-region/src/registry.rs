//! Region registry
//!
//! Groups the pixels of a label map into [`Region`]s, one per non-zero
//! label, and keeps the boundary graph of the watershed pass that produced
//! the map (if any) for the region merger.

use crate::boundary::BoundaryGraph;
use crate::error::{RegionError, RegionResult};
use crate::join::{MergeOptions, join_regions};
use crate::label::LabelMap;
use crate::watershed::WatershedMap;
use std::collections::HashMap;
use zonemap_core::{Box, Pix, PixelDepth};

/// One labeled region of a map
///
/// Regions are built by [`RegionRegistry`] and never change afterwards.
#[derive(Debug, Clone)]
pub struct Region {
    id: i32,
    bounds: Box,
    position: (i32, i32),
    pixel_count: u32,
    /// Member pixels inside `bounds`, positioned at `position`
    mask: Pix,
}

impl Region {
    /// The region's label.
    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Bounding box in map coordinates.
    #[inline]
    pub fn bounds(&self) -> Box {
        self.bounds
    }

    /// Origin of the region's mask in the parent image: the registry
    /// position plus the bounds origin.
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    #[inline]
    pub fn pixel_count(&self) -> u32 {
        self.pixel_count
    }

    /// Whether map pixel (x, y) belongs to the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if !self.bounds.contains_point(x, y) {
            return false;
        }
        let lx = (x - self.bounds.x) as u32;
        let ly = (y - self.bounds.y) as u32;
        self.mask.get_value_unchecked(lx, ly, 0) != 0
    }

    /// Map coordinates of every member pixel, row by row.
    pub fn points(&self) -> Vec<(i32, i32)> {
        let mut points = Vec::with_capacity(self.pixel_count as usize);
        for ly in 0..self.mask.height() {
            for lx in 0..self.mask.width() {
                if self.mask.get_value_unchecked(lx, ly, 0) != 0 {
                    points.push((self.bounds.x + lx as i32, self.bounds.y + ly as i32));
                }
            }
        }
        points
    }

    /// Get the region as a 1-bit mask of its bounds, positioned at
    /// [`Region::position`].
    pub fn to_mask(&self) -> Pix {
        self.mask.clone()
    }

    fn check_source(&self, source: &Pix, operation: &'static str) -> RegionResult<()> {
        if !source.kind().is_grey() {
            return Err(RegionError::raster_kind(
                operation,
                "grey (8 or 16 bpp)",
                source,
            ));
        }
        if self.bounds.right() > source.width() as i32
            || self.bounds.bottom() > source.height() as i32
        {
            return Err(RegionError::OutOfBounds {
                x: self.bounds.right() as i64 - 1,
                y: self.bounds.bottom() as i64 - 1,
                width: source.width(),
                height: source.height(),
            });
        }
        Ok(())
    }

    /// Lowest intensity of `source` over the region.
    ///
    /// `source` is addressed in map coordinates.
    pub fn min_value(&self, source: &Pix) -> RegionResult<u32> {
        self.check_source(source, "min_value")?;
        Ok(self
            .points()
            .into_iter()
            .map(|(x, y)| source.get_value_unchecked(x as u32, y as u32, 0))
            .min()
            .unwrap_or(0))
    }

    /// Mean intensity of `source` over the region.
    pub fn mean_value(&self, source: &Pix) -> RegionResult<f64> {
        self.check_source(source, "mean_value")?;
        let sum: u64 = self
            .points()
            .into_iter()
            .map(|(x, y)| u64::from(source.get_value_unchecked(x as u32, y as u32, 0)))
            .sum();
        Ok(sum as f64 / f64::from(self.pixel_count.max(1)))
    }
}

/// Ordering of region ids: positives ascending, then `-1, -2, ...`.
fn region_order(id: i32) -> (bool, u32) {
    (id < 0, id.unsigned_abs())
}

/// Registry of the regions of one label map
///
/// # Examples
///
/// ```
/// use zonemap_core::Pix;
/// use zonemap_region::{RegionRegistry, label_zones};
///
/// let mask = Pix::from_packed_bits(2, 2, &[0b1100_0000]).unwrap();
/// let registry = RegionRegistry::from_label_map(label_zones(&mask).unwrap().map);
/// let ids: Vec<i32> = registry.regions().iter().map(|r| r.id()).collect();
/// assert_eq!(ids, vec![1, -1]);
/// ```
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    position: (i32, i32),
    map: LabelMap,
    boundaries: BoundaryGraph,
    regions: Vec<Region>,
    index: HashMap<i32, usize>,
}

impl RegionRegistry {
    /// Create an empty registry for a `width x height` map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: (0, 0),
            map: LabelMap::new(width, height),
            boundaries: BoundaryGraph::new(),
            regions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Place the labeled raster at `(x0, y0)` inside its parent image.
    ///
    /// Region positions and masks are rebuilt relative to the new origin.
    pub fn with_position(mut self, x0: i32, y0: i32) -> Self {
        self.position = (x0, y0);
        self.rebuild();
        self
    }

    /// Build a registry from a label map.
    pub fn from_label_map(map: LabelMap) -> Self {
        let mut registry = Self::new(map.width(), map.height());
        registry.map = map;
        registry.rebuild();
        registry
    }

    /// Build a registry from a watershed result, keeping its boundary graph.
    pub fn from_watershed(ws: WatershedMap) -> Self {
        let mut registry = Self::from_label_map(ws.map);
        registry.boundaries = ws.boundaries;
        registry
    }

    fn check_size(&self, map: &LabelMap) -> RegionResult<()> {
        if map.width() != self.map.width() || map.height() != self.map.height() {
            return Err(RegionError::InvalidParameter(format!(
                "label map is {}x{}, registry is {}x{}",
                map.width(),
                map.height(),
                self.map.width(),
                self.map.height()
            )));
        }
        Ok(())
    }

    /// Replace the map with an externally produced one.
    ///
    /// Boundary data from an earlier watershed is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameter`] if the map size differs
    /// from the registry's.
    pub fn put_map(&mut self, map: LabelMap) -> RegionResult<()> {
        self.check_size(&map)?;
        self.map = map;
        self.boundaries = BoundaryGraph::new();
        self.rebuild();
        Ok(())
    }

    /// Replace the map and boundary graph with a watershed result.
    pub fn put_watershed(&mut self, ws: WatershedMap) -> RegionResult<()> {
        self.check_size(&ws.map)?;
        self.map = ws.map;
        self.boundaries = ws.boundaries;
        self.rebuild();
        Ok(())
    }

    /// Regroup the map's pixels into regions.
    fn rebuild(&mut self) {
        let width = self.map.width() as usize;
        let labels = self.map.labels();

        // Pass 1: extent and size per label
        let mut extents: HashMap<i32, (i32, i32, i32, i32, u32)> = HashMap::new();
        for (i, &label) in labels.iter().enumerate() {
            if label == 0 {
                continue;
            }
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            extents
                .entry(label)
                .and_modify(|e| {
                    e.0 = e.0.min(x);
                    e.1 = e.1.min(y);
                    e.2 = e.2.max(x);
                    e.3 = e.3.max(y);
                    e.4 += 1;
                })
                .or_insert((x, y, x, y, 1));
        }

        let mut ids: Vec<i32> = extents.keys().copied().collect();
        ids.sort_unstable_by_key(|&id| region_order(id));

        // Pass 2: member masks, one bounds-sized 1-bit raster per region
        let mut masks = HashMap::with_capacity(ids.len());
        for (&id, &(x0, y0, x1, y1, _)) in &extents {
            let bounds = Box::from_extent(x0, y0, x1, y1);
            if let Ok(pix) = Pix::new(bounds.w as u32, bounds.h as u32, PixelDepth::Bit1) {
                let mut pm = pix.to_mut();
                pm.set_position(self.position.0 + x0, self.position.1 + y0);
                masks.insert(id, (bounds, pm));
            }
        }
        for (i, &label) in labels.iter().enumerate() {
            if label == 0 {
                continue;
            }
            if let Some((bounds, pm)) = masks.get_mut(&label) {
                let x = (i % width) as i32 - bounds.x;
                let y = (i / width) as i32 - bounds.y;
                pm.set_value_unchecked(x as u32, y as u32, 0, 1);
            }
        }

        self.regions.clear();
        self.index.clear();
        for id in ids {
            let Some((bounds, pm)) = masks.remove(&id) else {
                continue;
            };
            let pixel_count = extents.get(&id).map_or(0, |e| e.4);
            let mask: Pix = pm.into();
            self.index.insert(id, self.regions.len());
            self.regions.push(Region {
                id,
                bounds,
                position: mask.position(),
                pixel_count,
                mask,
            });
        }

        log::debug!(
            "registry: {}x{} map, {} regions",
            self.map.width(),
            self.map.height(),
            self.regions.len()
        );
    }

    /// Get all regions: positive ids ascending, then `-1, -2, ...`.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Look up a region by id.
    pub fn get(&self, id: i32) -> Option<&Region> {
        self.index.get(&id).map(|&i| &self.regions[i])
    }

    /// Regions with positive ids, ascending.
    pub fn positive(&self) -> &[Region] {
        let split = self.regions.partition_point(|r| r.id > 0);
        &self.regions[..split]
    }

    /// Regions with negative ids, `-1` first.
    pub fn negative(&self) -> &[Region] {
        let split = self.regions.partition_point(|r| r.id > 0);
        &self.regions[split..]
    }

    #[inline]
    pub fn map(&self) -> &LabelMap {
        &self.map
    }

    #[inline]
    pub fn boundaries(&self) -> &BoundaryGraph {
        &self.boundaries
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Positioned 1-bit masks of every region, in [`regions`](Self::regions)
    /// order.
    pub fn masks(&self) -> Vec<Pix> {
        self.regions.iter().map(Region::to_mask).collect()
    }

    /// Get the region covering map pixel (x, y).
    pub fn region_at(&self, x: u32, y: u32) -> Option<&Region> {
        match self.map.get(x, y)? {
            0 => None,
            id => self.get(id),
        }
    }

    /// Merge regions across shallow boundaries.
    ///
    /// Returns a new registry holding the merged map and the boundary graph
    /// collapsed onto the surviving labels.
    pub fn merged(&self, options: &MergeOptions) -> RegionResult<RegionRegistry> {
        let map = join_regions(self, options)?;

        let mut relabel: HashMap<i32, i32> = HashMap::new();
        for (&before, &after) in self.map.labels().iter().zip(map.labels()) {
            if before > 0 {
                relabel.entry(before).or_insert(after);
            }
        }
        let boundaries = self
            .boundaries
            .collapse(|label| relabel.get(&label).copied().unwrap_or(label));

        let mut registry = Self::new(map.width(), map.height());
        registry.position = self.position;
        registry.map = map;
        registry.boundaries = boundaries;
        registry.rebuild();
        Ok(registry)
    }
}
