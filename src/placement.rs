//! Gap-filling placement: grid scan with jitter, then bounded fallbacks.
//!
//! Coordinates are handled as `(fixed, growable)` pairs so the same scan
//! serves both vertical and horizontal galleries. The scan walks the growable
//! axis in rows of [`PlacementParams::row_stride`], and within each row walks
//! the fixed axis in steps of [`PlacementParams::grid_step`]. Each candidate is
//! nudged along the growable axis by a random jitter so rows don't line up.
//!
//! ```text
//!   fixed axis ──────────────────────────►
//!   ┌──────┐  ┌────┐ ┌────────┐
//!   │      │  │    │ │        │      start = furthest edge − image extent
//!   └──────┘  │    │ └────────┘ ─ ─ ─ row 0
//!    ┌───┐    └────┘   ┌──┐       ─ ─ row 1
//!    └───┘             └──┘       ─ ─ row 2 ...   (window = span × viewport)
//!   growable axis ▼
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Point, Rect, Size, Span, random_between};

/// Tuning knobs for the grid scan.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementParams {
    /// Step along the fixed axis, in pixels.
    pub grid_step: f64,
    /// Step between scan rows along the growable axis, in pixels.
    pub row_stride: f64,
    /// Smallest random offset added to a candidate's growable coordinate.
    pub jitter_min: f64,
    /// Largest (exclusive) random offset.
    pub jitter_max: f64,
    /// Scan window length as a multiple of the viewport's growable extent.
    pub search_span: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            grid_step: 10.0,
            row_stride: 30.0,
            jitter_min: -30.0,
            jitter_max: 50.0,
            search_span: 3.0,
        }
    }
}

/// Area the engine may place into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Which axis grows.
    pub axis: Axis,
    /// Current viewport size.
    pub viewport: Size,
    /// Growable-axis range the fallbacks are confined to. `None` uses the
    /// scan window.
    pub region: Option<Span>,
}

impl Bounds {
    pub fn new(axis: Axis, viewport: Size) -> Self {
        Self {
            axis,
            viewport,
            region: None,
        }
    }

    /// Confine fallback placement to `region`.
    pub fn with_region(mut self, region: Span) -> Self {
        self.region = Some(region);
        self
    }
}

/// How a position was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// Free cell found by the jittered grid scan.
    Scanned,
    /// Free cell found on the edge row after the scan window was exhausted.
    Edge,
    /// No free cell; placed at random, possibly overlapping.
    Forced,
}

impl PlacementKind {
    /// Whether the placement is guaranteed not to overlap earlier ones.
    pub fn is_clear(self) -> bool {
        !matches!(self, Self::Forced)
    }
}

/// Result of [`find_position`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Reserved rectangle.
    pub rect: Rect,
    pub kind: PlacementKind,
}

impl Placement {
    pub fn origin(&self) -> Point {
        self.rect.origin()
    }
}

/// Rectangles reserved by placed images.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OccupiedSet {
    rects: Vec<Rect>,
}

impl OccupiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `rect` overlaps any reserved rectangle.
    pub fn collides(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|r| rect.overlaps(r))
    }

    pub fn insert(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    /// Release one reservation equal to `rect`. Returns whether one was found.
    pub fn remove(&mut self, rect: &Rect) -> bool {
        match self.rects.iter().position(|r| r == rect) {
            Some(i) => {
                self.rects.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    /// Furthest trailing edge along the growable axis, or `None` when empty.
    pub fn furthest_edge(&self, axis: Axis) -> Option<f64> {
        self.rects
            .iter()
            .map(|r| axis.growable_end(r))
            .reduce(f64::max)
    }
}

impl FromIterator<Rect> for OccupiedSet {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        Self {
            rects: iter.into_iter().collect(),
        }
    }
}

/// Find a free spot for a `size` rectangle and reserve it in `occupied`.
///
/// Never fails: when neither the scan window nor the edge row has room, the
/// rectangle is dropped at a random position inside the fixed-axis bounds
/// and the region, and the result is marked [`PlacementKind::Forced`].
///
/// `params` must have positive `grid_step` and `row_stride`
/// (see [`GalleryConfig::validate`](crate::GalleryConfig::validate)).
pub fn find_position(
    size: Size,
    occupied: &mut OccupiedSet,
    bounds: &Bounds,
    params: &PlacementParams,
    rng: &mut fastrand::Rng,
) -> Placement {
    let axis = bounds.axis;
    let (extent, growable_extent) = axis.split(size);
    let (fixed_limit, viewport_growable) = axis.split(bounds.viewport);

    let start = match occupied.furthest_edge(axis) {
        Some(edge) => (edge - growable_extent).max(0.0),
        None => 0.0,
    };
    let window_end = start + viewport_growable * params.search_span;

    let candidate = |fixed: f64, growable: f64| Rect::from_origin(axis.point(fixed, growable), size);

    // Jittered grid scan.
    let rows = steps(window_end - start, params.row_stride);
    let cols = fitting_steps(fixed_limit - extent, params.grid_step);
    for row in 0..rows {
        let base = start + row as f64 * params.row_stride;
        for col in 0..cols {
            let fixed = col as f64 * params.grid_step;
            let jitter = random_between(rng, params.jitter_min, params.jitter_max);
            let rect = candidate(fixed, (base + jitter).max(0.0));
            if !occupied.collides(&rect) {
                return reserve(occupied, rect, PlacementKind::Scanned);
            }
        }
    }

    let region = bounds.region.unwrap_or(Span::new(start, window_end));

    // Edge row: one unjittered sweep along the end of the region.
    let edge = (region.end - growable_extent).max(region.start).max(0.0);
    for col in 0..cols {
        let rect = candidate(col as f64 * params.grid_step, edge);
        if !occupied.collides(&rect) {
            return reserve(occupied, rect, PlacementKind::Edge);
        }
    }

    let fixed = random_between(rng, 0.0, (fixed_limit - extent).max(0.0));
    let growable = random_between(
        rng,
        region.start.max(0.0),
        (region.end - growable_extent).max(region.start.max(0.0)),
    );
    log::warn!(
        "no free cell for {:.0}x{:.0}; forcing placement at ({fixed:.0}, {growable:.0})",
        size.width,
        size.height
    );
    reserve(occupied, candidate(fixed, growable), PlacementKind::Forced)
}

fn reserve(occupied: &mut OccupiedSet, rect: Rect, kind: PlacementKind) -> Placement {
    occupied.insert(rect);
    log::trace!("reserved {rect:?} ({kind:?})");
    Placement { rect, kind }
}

/// Count of offsets `0, stride, 2·stride, …` strictly below `length`.
fn steps(length: f64, stride: f64) -> usize {
    if length.is_nan() || length <= 0.0 || stride.is_nan() || stride <= 0.0 {
        return 0;
    }
    (length / stride).ceil() as usize
}

/// Count of offsets `0, stride, 2·stride, …` not exceeding `slack`.
fn fitting_steps(slack: f64, stride: f64) -> usize {
    if slack.is_nan() || slack < 0.0 || stride.is_nan() || stride <= 0.0 {
        return 0;
    }
    (slack / stride).floor() as usize + 1
}
