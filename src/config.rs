//! Gallery configuration and validation.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use zengallery::{Axis, GalleryConfig, SectionPolicy};
//!
//! let config = GalleryConfig::new()
//!     .axis(Axis::Horizontal)
//!     .sections(SectionPolicy::Sectioned)
//!     .size_band(120.0, 360.0)
//!     .resize_debounce(Duration::from_millis(150))
//!     .seed(7);
//!
//! assert!(config.validate().is_ok());
//! ```

use core::fmt;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Axis;
use crate::placement::PlacementParams;
use crate::sizing::SizeBand;

/// How images are ordered when the whole layout is replayed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SectionPolicy {
    /// Replay in insertion order over the whole canvas.
    #[default]
    Flat,
    /// Group by viewport-sized section of the previous layout, replay section
    /// by section, and confine fallback placement to each section.
    Sectioned,
}

/// Everything that shapes a gallery layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalleryConfig {
    pub axis: Axis,
    pub sections: SectionPolicy,
    /// Range a display dimension is drawn from.
    pub size_band: SizeBand,
    pub placement: PlacementParams,
    /// Space kept past the furthest image on the growable axis.
    pub canvas_padding: f64,
    /// Quiet period before a resize triggers relayout.
    pub resize_debounce: Duration,
    /// Distance kept between the viewport edge and the scroll-to-today target.
    pub scroll_margin: f64,
    /// Fixed RNG seed. `None` seeds from the OS when `std` is enabled.
    pub seed: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            sections: SectionPolicy::Flat,
            size_band: SizeBand::default(),
            placement: PlacementParams::default(),
            canvas_padding: 100.0,
            resize_debounce: Duration::from_millis(250),
            scroll_margin: 100.0,
            seed: None,
        }
    }
}

impl GalleryConfig {
    /// Defaults: vertical growth, flat replay, 100–400 px images on a 10 px
    /// grid, 100 px padding, 250 ms resize debounce.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn sections(mut self, sections: SectionPolicy) -> Self {
        self.sections = sections;
        self
    }

    pub fn size_band(mut self, min: f64, max: f64) -> Self {
        self.size_band = SizeBand::new(min, max);
        self
    }

    /// Fixed-axis scan step. Also resets the row stride to three steps.
    pub fn grid_step(mut self, step: f64) -> Self {
        self.placement.grid_step = step;
        self.placement.row_stride = step * 3.0;
        self
    }

    pub fn row_stride(mut self, stride: f64) -> Self {
        self.placement.row_stride = stride;
        self
    }

    /// Random growable-axis offset range `[min, max)` applied to each candidate.
    pub fn jitter(mut self, min: f64, max: f64) -> Self {
        self.placement.jitter_min = min;
        self.placement.jitter_max = max;
        self
    }

    /// Scan window as a multiple of the viewport's growable extent.
    pub fn search_span(mut self, span: f64) -> Self {
        self.placement.search_span = span;
        self
    }

    pub fn canvas_padding(mut self, padding: f64) -> Self {
        self.canvas_padding = padding;
        self
    }

    pub fn resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }

    pub fn scroll_margin(mut self, margin: f64) -> Self {
        self.scroll_margin = margin;
        self
    }

    /// Make layouts reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every knob is usable by the placement engine.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let p = &self.placement;
        if !(p.grid_step.is_finite() && p.grid_step > 0.0) {
            return Err(LayoutError::ZeroGridStep);
        }
        if !(p.row_stride.is_finite() && p.row_stride > 0.0) {
            return Err(LayoutError::ZeroRowStride);
        }
        if !self.size_band.is_valid() {
            return Err(LayoutError::InvalidSizeBand);
        }
        if !(p.jitter_min.is_finite() && p.jitter_max.is_finite() && p.jitter_min <= p.jitter_max)
        {
            return Err(LayoutError::InvalidJitter);
        }
        if !(p.search_span.is_finite() && p.search_span > 0.0) {
            return Err(LayoutError::InvalidSearchSpan);
        }
        if !(self.canvas_padding.is_finite() && self.canvas_padding >= 0.0)
            || !(self.scroll_margin.is_finite() && self.scroll_margin >= 0.0)
        {
            return Err(LayoutError::NegativePadding);
        }
        Ok(())
    }
}

/// Layout error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Grid step is zero, negative, or not finite.
    ZeroGridStep,
    /// Row stride is zero, negative, or not finite.
    ZeroRowStride,
    /// Size band is empty, non-positive, or not finite.
    InvalidSizeBand,
    /// Jitter range is inverted or not finite.
    InvalidJitter,
    /// Search span is zero, negative, or not finite.
    InvalidSearchSpan,
    /// Canvas padding or scroll margin is negative or not finite.
    NegativePadding,
    /// Viewport has a negative or non-finite dimension.
    InvalidViewport,
    /// No image with this index was added.
    UnknownImage(usize),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGridStep => f.write_str("grid step must be positive"),
            Self::ZeroRowStride => f.write_str("row stride must be positive"),
            Self::InvalidSizeBand => f.write_str("size band must satisfy 0 < min <= max"),
            Self::InvalidJitter => f.write_str("jitter range must satisfy min <= max"),
            Self::InvalidSearchSpan => f.write_str("search span must be positive"),
            Self::NegativePadding => f.write_str("padding and scroll margin must be non-negative"),
            Self::InvalidViewport => f.write_str("viewport dimensions must be finite and non-negative"),
            Self::UnknownImage(index) => write!(f, "no image with index {index}"),
        }
    }
}

impl core::error::Error for LayoutError {}
