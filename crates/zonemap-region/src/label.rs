//! Label maps and zone labeling
//!
//! A [`LabelMap`] assigns every pixel of a raster an `i32` label: `0` for
//! unlabeled or excluded pixels, positive labels for zones of set pixels and
//! negative labels for zones of clear pixels.
//!
//! [`label_zones`] partitions a binary mask into 4-connected zones of both
//! polarities, numbering each polarity densely in raster discovery order.

use crate::error::{RegionError, RegionResult};
use crate::seedfill::fill_component;
use zonemap_core::{ImageKind, Pix, PixelDepth};

/// Row-major map of region labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<i32>,
}

impl LabelMap {
    /// Create a map with every pixel unlabeled.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap a row-major label buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameter`] if `labels.len()` is not
    /// `width * height`.
    pub fn from_labels(width: u32, height: u32, labels: Vec<i32>) -> RegionResult<Self> {
        let expected = width as usize * height as usize;
        if labels.len() != expected {
            return Err(RegionError::InvalidParameter(format!(
                "label buffer holds {} entries, {}x{} map needs {}",
                labels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            labels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the label at (x, y), or `None` outside the map.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[(y * self.width + x) as usize])
    }

    /// Get all labels, row-major.
    #[inline]
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub(crate) fn labels_mut(&mut self) -> &mut [i32] {
        &mut self.labels
    }

    /// Consume the map, returning the label buffer.
    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }

    /// Get every non-zero label present, in ascending order.
    pub fn distinct_labels(&self) -> Vec<i32> {
        let mut labels: Vec<i32> = self.labels.iter().copied().filter(|&l| l != 0).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Render label magnitudes into a 16-bit grey raster.
    ///
    /// Magnitudes above 65535 are clamped.
    ///
    /// # Errors
    ///
    /// Fails if the map is empty.
    pub fn to_pix(&self) -> RegionResult<Pix> {
        let mut pm = Pix::new_with_kind(self.width, self.height, ImageKind::Grey16)?.to_mut();
        let max = PixelDepth::Bit16.max_value();
        for y in 0..self.height {
            for x in 0..self.width {
                let label = self.labels[(y * self.width + x) as usize];
                let value = label.unsigned_abs().min(max);
                if value != 0 {
                    pm.set_value_unchecked(x, y, 0, value);
                }
            }
        }
        Ok(pm.into())
    }
}

/// Zone totals of a labeling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// `positive + negative`
    pub total: u32,
    /// Zones of set pixels
    pub positive: u32,
    /// Zones of clear pixels
    pub negative: u32,
}

/// Result of [`label_zones`]
#[derive(Debug, Clone)]
pub struct ZoneMap {
    pub map: LabelMap,
    pub counts: Counts,
}

/// Read a 1-bit raster into a dense bit buffer.
pub(crate) fn read_mask_bits(mask: &Pix, operation: &'static str) -> RegionResult<Vec<bool>> {
    if mask.depth() != PixelDepth::Bit1 {
        return Err(RegionError::raster_kind(operation, "binary (1 bpp)", mask));
    }
    let mut bits = Vec::with_capacity(mask.size());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            bits.push(mask.get_value_unchecked(x, y, 0) != 0);
        }
    }
    Ok(bits)
}

/// Label the 4-connected zones of a binary mask.
///
/// Pixels are scanned row by row. Each pixel not yet labeled seeds a flood
/// fill over unlabeled 4-neighbors with the same bit. Zones of set pixels
/// are numbered `1, 2, ...` and zones of clear pixels `-1, -2, ...`, each in
/// the order their first pixel is met.
///
/// # Errors
///
/// Returns [`RegionError::InvalidRasterKind`] if `mask` is not 1 bpp.
///
/// # Examples
///
/// ```
/// use zonemap_core::Pix;
/// use zonemap_region::label_zones;
///
/// let mask = Pix::from_packed_bits(2, 2, &[0b1100_0000]).unwrap();
/// let zones = label_zones(&mask).unwrap();
/// assert_eq!(zones.map.labels(), &[1, 1, -1, -1]);
/// assert_eq!(zones.counts.total, 2);
/// ```
pub fn label_zones(mask: &Pix) -> RegionResult<ZoneMap> {
    let bits = read_mask_bits(mask, "label_zones")?;
    let width = mask.width() as usize;
    let height = mask.height() as usize;

    let mut map = LabelMap::new(mask.width(), mask.height());
    let mut visited = vec![false; bits.len()];
    let mut pos_next = 1i32;
    let mut neg_next = -1i32;

    for seed in 0..bits.len() {
        if visited[seed] {
            continue;
        }
        let bit = bits[seed];
        let members = fill_component(seed, width, height, &mut visited, |n| bits[n] == bit);
        let label = if bit {
            pos_next += 1;
            pos_next - 1
        } else {
            neg_next -= 1;
            neg_next + 1
        };
        log::trace!(
            "label_zones: zone {} seeded at {} with {} pixels",
            label,
            seed,
            members.len()
        );
        let labels = map.labels_mut();
        for p in members {
            labels[p] = label;
        }
    }

    let positive = (pos_next - 1) as u32;
    let negative = (-1 - neg_next) as u32;
    let counts = Counts {
        total: positive + negative,
        positive,
        negative,
    };
    log::debug!(
        "label_zones: {}x{} mask, {} positive and {} negative zones",
        width,
        height,
        positive,
        negative
    );

    Ok(ZoneMap { map, counts })
}

/// Count the zones of a binary mask without keeping the map.
pub fn count_zones(mask: &Pix) -> RegionResult<Counts> {
    Ok(label_zones(mask)?.counts)
}
