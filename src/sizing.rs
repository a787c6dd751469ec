//! Random, aspect-preserving display sizes.
//!
//! Every image gets a fresh size on each layout pass. One dimension is drawn
//! uniformly from a [`SizeBand`] and the other follows from the natural
//! aspect ratio.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Size, random_between};

/// Substituted for a natural width or height of zero.
pub const DEFAULT_NATURAL_DIMENSION: u32 = 200;

/// Attempts at a fully in-band size before falling back.
pub const MAX_SIZE_ATTEMPTS: usize = 10;

/// Inclusive range a display dimension is drawn from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeBand {
    /// Smallest display dimension in pixels.
    pub min: f64,
    /// Largest display dimension in pixels.
    pub max: f64,
}

impl SizeBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min <= value <= max`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Finite, positive, and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

impl Default for SizeBand {
    fn default() -> Self {
        Self::new(100.0, 400.0)
    }
}

/// Pick a display size for an image with the given natural dimensions.
///
/// Tries [`MAX_SIZE_ATTEMPTS`] times to land both dimensions inside `band`,
/// choosing width or height as the driving dimension with equal odds. When
/// the aspect ratio makes that impossible (or unlucky), the longer side is
/// drawn from the band and the shorter one derived, which always succeeds.
///
/// A zero natural dimension is treated as a
/// [`DEFAULT_NATURAL_DIMENSION`]-sided square.
pub fn resolve_size(
    natural_w: u32,
    natural_h: u32,
    band: SizeBand,
    rng: &mut fastrand::Rng,
) -> Size {
    let (w, h) = if natural_w == 0 || natural_h == 0 {
        (DEFAULT_NATURAL_DIMENSION, DEFAULT_NATURAL_DIMENSION)
    } else {
        (natural_w, natural_h)
    };
    let ratio = w as f64 / h as f64;

    for _ in 0..MAX_SIZE_ATTEMPTS {
        let drive = random_between(rng, band.min, band.max);
        let size = if rng.bool() {
            Size::new(drive, drive / ratio)
        } else {
            Size::new(drive * ratio, drive)
        };
        if band.contains(size.width) && band.contains(size.height) {
            return size;
        }
    }

    let target = random_between(rng, band.min, band.max);
    if ratio > 1.0 {
        Size::new(target, target / ratio)
    } else {
        Size::new(target * ratio, target)
    }
}
