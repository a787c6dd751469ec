//! Rectangles, sizes, and the axis mapping shared by sizing and placement.
//!
//! All coordinates are CSS pixels as `f64`. Rectangles are closed: two
//! rectangles that only share an edge do not overlap.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width × height in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Top-left corner of a placed rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed axis-aligned rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Rectangle with its top-left corner at `origin`.
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.right - self.left, self.bottom - self.top)
    }

    /// Whether the interiors of `self` and `other` intersect.
    ///
    /// Shared edges do not count: a rectangle ending at `x = 100` and one
    /// starting at `x = 100` sit side by side.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right <= other.left
            || self.left >= other.right
            || self.bottom <= other.top
            || self.top >= other.bottom)
    }
}

/// Direction in which the canvas grows as images are added.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Fixed width, canvas grows downward. Scrolls vertically.
    #[default]
    Vertical,
    /// Fixed height, canvas grows rightward. Scrolls horizontally.
    Horizontal,
}

impl Axis {
    /// Split a size into `(fixed, growable)` extents.
    pub fn split(self, size: Size) -> (f64, f64) {
        match self {
            Self::Vertical => (size.width, size.height),
            Self::Horizontal => (size.height, size.width),
        }
    }

    /// Inverse of [`split`](Self::split).
    pub fn join(self, fixed: f64, growable: f64) -> Size {
        match self {
            Self::Vertical => Size::new(fixed, growable),
            Self::Horizontal => Size::new(growable, fixed),
        }
    }

    /// Point from `(fixed, growable)` coordinates.
    pub fn point(self, fixed: f64, growable: f64) -> Point {
        match self {
            Self::Vertical => Point::new(fixed, growable),
            Self::Horizontal => Point::new(growable, fixed),
        }
    }

    /// Leading edge of `rect` on the growable axis.
    pub fn growable_start(self, rect: &Rect) -> f64 {
        match self {
            Self::Vertical => rect.top,
            Self::Horizontal => rect.left,
        }
    }

    /// Trailing edge of `rect` on the growable axis.
    pub fn growable_end(self, rect: &Rect) -> f64 {
        match self {
            Self::Vertical => rect.bottom,
            Self::Horizontal => rect.right,
        }
    }
}

/// Half-open range `[start, end)` along the growable axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Uniform random value in `[min, max)`. Returns `min` when `max <= min`.
pub fn random_between(rng: &mut fastrand::Rng, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.f64() * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn overlapping_interiors() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(50.0, 50.0, 150.0, 150.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        assert!(!a.overlaps(&rect(100.0, 0.0, 200.0, 100.0)));
        assert!(!a.overlaps(&rect(0.0, 100.0, 100.0, 200.0)));
        assert!(!a.overlaps(&rect(100.0, 100.0, 200.0, 200.0)));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = rect(0.0, 0.0, 1000.0, 1000.0);
        let inner = rect(10.0, 10.0, 20.0, 20.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn rect_round_trips_origin_and_size() {
        let r = Rect::from_origin(Point::new(12.5, 40.0), Size::new(200.0, 150.0));
        assert_eq!(r.origin(), Point::new(12.5, 40.0));
        assert_eq!(r.size(), Size::new(200.0, 150.0));
        assert_eq!(r.right, 212.5);
        assert_eq!(r.bottom, 190.0);
    }

    #[test]
    fn axis_split_and_join() {
        let s = Size::new(1000.0, 800.0);
        assert_eq!(Axis::Vertical.split(s), (1000.0, 800.0));
        assert_eq!(Axis::Horizontal.split(s), (800.0, 1000.0));
        for axis in [Axis::Vertical, Axis::Horizontal] {
            let (f, g) = axis.split(s);
            assert_eq!(axis.join(f, g), s);
        }
    }

    #[test]
    fn axis_growable_edges() {
        let r = rect(10.0, 20.0, 110.0, 220.0);
        assert_eq!(Axis::Vertical.growable_start(&r), 20.0);
        assert_eq!(Axis::Vertical.growable_end(&r), 220.0);
        assert_eq!(Axis::Horizontal.growable_start(&r), 10.0);
        assert_eq!(Axis::Horizontal.growable_end(&r), 110.0);
        assert_eq!(Axis::Horizontal.point(5.0, 7.0), Point::new(7.0, 5.0));
    }

    #[test]
    fn random_between_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let v = random_between(&mut rng, -30.0, 50.0);
            assert!((-30.0..50.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn random_between_empty_range_returns_min() {
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(random_between(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(random_between(&mut rng, 5.0, 1.0), 5.0);
    }
}
