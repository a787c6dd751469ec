//! Layout coordinator: owns the images, the occupied set, and the canvas.
//!
//! The host drives a [`Gallery`] with discrete events:
//!
//! - [`add_image`](Gallery::add_image) for each manifest entry,
//! - [`image_loaded`](Gallery::image_loaded) / [`image_failed`](Gallery::image_failed)
//!   as decodes complete, in whatever order they complete,
//! - [`resize`](Gallery::resize) on every viewport resize and
//!   [`poll`](Gallery::poll) from its timer, which replays the layout once the
//!   resize burst has settled.
//!
//! Every event runs to completion through `&mut self`, so a relayout can
//! never interleave with a placement. Hosts that share a gallery across
//! threads put it behind a mutex.
//!
//! # Example
//!
//! ```
//! use zengallery::{Gallery, GalleryConfig, Size};
//!
//! let mut gallery = Gallery::new(GalleryConfig::new().seed(1), Size::new(1000.0, 800.0)).unwrap();
//! let a = gallery.add_image("photo-2024-01-01.gif");
//! let b = gallery.add_image("photo-2024-03-05.webp");
//!
//! // Decodes may finish out of order.
//! gallery.image_loaded(b, 640, 480).unwrap();
//! gallery.image_loaded(a, 300, 300).unwrap();
//!
//! let target = gallery.scroll_target("2024-03-05").unwrap();
//! assert_eq!(target.id, b);
//! assert_eq!(gallery.geometry().count(), 2);
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{GalleryConfig, LayoutError, SectionPolicy};
use crate::date::matches_day;
use crate::debounce::Debouncer;
use crate::geometry::{Axis, Rect, Size, Span};
use crate::placement::{Bounds, OccupiedSet, Placement, find_position};
use crate::sizing::resolve_size;

/// Seed used when no seed is configured and no OS entropy is available.
#[cfg(not(feature = "std"))]
const FALLBACK_SEED: u64 = 0x5eed_9a11_e7f0_0d1e;

/// Position of an image in insertion order. Doubles as its stacking order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageId(pub usize);

impl ImageId {
    /// CSS `z-index`: later images stack above earlier ones.
    pub fn z_index(self) -> usize {
        self.0 + 1
    }
}

/// Load and placement state of one image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ImageState {
    /// Waiting for the decoder to report natural dimensions.
    Pending,
    /// Sized and positioned by the latest layout pass.
    Placed(Placement),
    /// Decode failed; the image takes no space.
    Failed,
}

/// One manifest entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageItem {
    pub id: ImageId,
    pub filename: String,
    /// Natural `(width, height)` once decoded.
    pub natural: Option<(u32, u32)>,
    pub state: ImageState,
}

impl ImageItem {
    pub fn placement(&self) -> Option<&Placement> {
        match &self.state {
            ImageState::Placed(p) => Some(p),
            _ => None,
        }
    }
}

/// Absolute geometry for the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageGeometry {
    pub id: ImageId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: usize,
}

/// Drawing surface: the fixed axis tracks the viewport, the growable axis
/// tracks the furthest image plus padding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas {
    pub axis: Axis,
    pub size: Size,
}

impl Canvas {
    fn for_viewport(axis: Axis, viewport: Size) -> Self {
        Self {
            axis,
            size: viewport,
        }
    }

    /// Extent along the growable axis.
    pub fn growable_extent(&self) -> f64 {
        self.axis.split(self.size).1
    }

    /// Grow to at least `required` along the growable axis. Returns whether
    /// the canvas changed.
    fn grow_to(&mut self, required: f64) -> bool {
        let (fixed, current) = self.axis.split(self.size);
        if required > current {
            self.size = self.axis.join(fixed, required);
            true
        } else {
            false
        }
    }
}

/// Where the host should scroll to show today's first image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollTarget {
    pub id: ImageId,
    pub rect: Rect,
    /// Scroll position along the growable axis, `scroll_margin` before the
    /// image and never negative.
    pub offset: f64,
}

/// Scatter-layout gallery.
#[derive(Clone, Debug)]
pub struct Gallery {
    config: GalleryConfig,
    viewport: Size,
    items: Vec<ImageItem>,
    occupied: OccupiedSet,
    canvas: Canvas,
    rng: fastrand::Rng,
    debounce: Debouncer,
    pending_viewport: Option<Size>,
    relayouts: usize,
}

impl Gallery {
    /// Create an empty gallery for `viewport`.
    pub fn new(config: GalleryConfig, viewport: Size) -> Result<Self, LayoutError> {
        config.validate()?;
        check_viewport(viewport)?;
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => entropy_rng(),
        };
        Ok(Self {
            canvas: Canvas::for_viewport(config.axis, viewport),
            debounce: Debouncer::new(config.resize_debounce),
            config,
            viewport,
            items: Vec::new(),
            occupied: OccupiedSet::new(),
            rng,
            pending_viewport: None,
            relayouts: 0,
        })
    }

    /// Register a manifest entry. Nothing is placed until it loads.
    pub fn add_image(&mut self, filename: impl Into<String>) -> ImageId {
        let id = ImageId(self.items.len());
        self.items.push(ImageItem {
            id,
            filename: filename.into(),
            natural: None,
            state: ImageState::Pending,
        });
        id
    }

    /// Register every entry of a manifest, in order.
    pub fn extend_images<I, S>(&mut self, filenames: I) -> Vec<ImageId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        filenames.into_iter().map(|f| self.add_image(f)).collect()
    }

    /// Decoder reported natural dimensions: size and place the image.
    ///
    /// A repeat report for an already placed image releases its old
    /// rectangle and re-places it with the new dimensions on top of the
    /// current layout.
    pub fn image_loaded(
        &mut self,
        id: ImageId,
        natural_w: u32,
        natural_h: u32,
    ) -> Result<Placement, LayoutError> {
        let item = self
            .items
            .get_mut(id.0)
            .ok_or(LayoutError::UnknownImage(id.0))?;
        item.natural = Some((natural_w, natural_h));
        self.release(id);
        Ok(self.place_image(id, None))
    }

    /// Decoder failed: the image is excluded from layout and any space it
    /// held is freed.
    pub fn image_failed(&mut self, id: ImageId) -> Result<(), LayoutError> {
        let item = self
            .items
            .get(id.0)
            .ok_or(LayoutError::UnknownImage(id.0))?;
        log::warn!("failed to load image: {}", item.filename);
        self.release(id);
        self.items[id.0].state = ImageState::Failed;
        Ok(())
    }

    /// Drop the reservation held by `id`'s current placement, if any.
    fn release(&mut self, id: ImageId) {
        if let Some(previous) = self.items[id.0].placement().copied() {
            self.occupied.remove(&previous.rect);
            self.items[id.0].state = ImageState::Pending;
        }
    }

    /// Size and place one loaded image, record it, and grow the canvas.
    fn place_image(&mut self, id: ImageId, region: Option<Span>) -> Placement {
        let (natural_w, natural_h) = self.items[id.0].natural.unwrap_or((0, 0));
        let size = resolve_size(natural_w, natural_h, self.config.size_band, &mut self.rng);

        let mut bounds = Bounds::new(self.config.axis, self.viewport);
        bounds.region = region;
        let placement = find_position(
            size,
            &mut self.occupied,
            &bounds,
            &self.config.placement,
            &mut self.rng,
        );

        let required = self.config.axis.growable_end(&placement.rect) + self.config.canvas_padding;
        if self.canvas.grow_to(required) {
            log::debug!("canvas grew to {:.0}", self.canvas.growable_extent());
        }

        self.items[id.0].state = ImageState::Placed(placement);
        placement
    }

    /// Clear the occupied set and canvas, then place every loaded image again.
    ///
    /// [`SectionPolicy::Flat`] replays in insertion order.
    /// [`SectionPolicy::Sectioned`] groups images by the viewport-sized
    /// section they occupied in the previous layout (`section_extent`) and
    /// replays section by section, keeping each image's fallback inside its
    /// section.
    pub fn relayout_all(&mut self) {
        let previous_extent = self.config.axis.split(self.viewport).1;
        self.relayout_with_sections(previous_extent);
    }

    fn relayout_with_sections(&mut self, section_extent: f64) {
        let plan = self.replay_plan(section_extent);
        self.occupied.clear();
        self.canvas = Canvas::for_viewport(self.config.axis, self.viewport);
        self.relayouts += 1;

        for &(id, region) in &plan {
            self.place_image(id, region);
        }
        log::debug!(
            "relayout #{}: repositioned {} images, canvas {:.0}",
            self.relayouts,
            plan.len(),
            self.canvas.growable_extent()
        );
    }

    /// Order in which placed images are replayed, each with the region its
    /// fallbacks are confined to.
    ///
    /// Flat: insertion order, no region. Sectioned: ascending section of the
    /// previous placement (sections `section_extent` long), insertion order
    /// within a section, region = that section's span at the current viewport.
    fn replay_plan(&self, section_extent: f64) -> Vec<(ImageId, Option<Span>)> {
        let axis = self.config.axis;
        let placed = self.items.iter().filter_map(|item| {
            item.placement()
                .map(|p| (item.id, axis.growable_start(&p.rect)))
        });

        match self.config.sections {
            SectionPolicy::Flat => placed.map(|(id, _)| (id, None)).collect(),
            SectionPolicy::Sectioned => {
                let mut by_section: BTreeMap<usize, Vec<ImageId>> = BTreeMap::new();
                for (id, start) in placed {
                    by_section
                        .entry(section_of(start, section_extent))
                        .or_default()
                        .push(id);
                }
                let span = axis.split(self.viewport).1;
                by_section
                    .into_iter()
                    .flat_map(|(section, ids)| {
                        let region = Span::new(section as f64 * span, (section + 1) as f64 * span);
                        ids.into_iter().map(move |id| (id, Some(region)))
                    })
                    .collect()
            }
        }
    }

    /// Viewport changed at time `now`. The relayout is deferred until
    /// [`poll`](Self::poll) observes a quiet window.
    pub fn resize(&mut self, viewport: Size, now: Duration) -> Result<(), LayoutError> {
        check_viewport(viewport)?;
        self.pending_viewport = Some(viewport);
        self.debounce.schedule(now);
        Ok(())
    }

    /// Run the debounced relayout if it is due. Returns whether it ran.
    pub fn poll(&mut self, now: Duration) -> bool {
        if !self.debounce.fire(now) {
            return false;
        }
        let previous_extent = self.config.axis.split(self.viewport).1;
        if let Some(viewport) = self.pending_viewport.take() {
            self.viewport = viewport;
        }
        self.relayout_with_sections(previous_extent);
        true
    }

    /// When the pending resize relayout is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debounce.deadline()
    }

    /// First placed image (insertion order) whose filename embeds `today`
    /// (`YYYY-MM-DD`).
    pub fn scroll_target(&self, today: &str) -> Option<ScrollTarget> {
        let axis = self.config.axis;
        self.items
            .iter()
            .filter(|item| matches_day(&item.filename, today))
            .find_map(|item| {
                item.placement().map(|p| ScrollTarget {
                    id: item.id,
                    rect: p.rect,
                    offset: (axis.growable_start(&p.rect) - self.config.scroll_margin).max(0.0),
                })
            })
    }

    /// Geometry of every placed image, in insertion order.
    pub fn geometry(&self) -> impl Iterator<Item = ImageGeometry> + '_ {
        self.items.iter().filter_map(|item| {
            item.placement().map(|p| ImageGeometry {
                id: item.id,
                left: p.rect.left,
                top: p.rect.top,
                width: p.rect.right - p.rect.left,
                height: p.rect.bottom - p.rect.top,
                z_index: item.id.z_index(),
            })
        })
    }

    /// Whether every image has either been placed or failed. Hosts use this
    /// to trigger the scroll-to-today jump once loading is done.
    pub fn is_settled(&self) -> bool {
        self.items
            .iter()
            .all(|item| !matches!(item.state, ImageState::Pending))
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn item(&self, id: ImageId) -> Option<&ImageItem> {
        self.items.get(id.0)
    }

    pub fn occupied(&self) -> &OccupiedSet {
        &self.occupied
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Number of full relayout passes run so far.
    pub fn relayout_count(&self) -> usize {
        self.relayouts
    }
}

fn check_viewport(viewport: Size) -> Result<(), LayoutError> {
    let ok = |v: f64| v.is_finite() && v >= 0.0;
    if ok(viewport.width) && ok(viewport.height) {
        Ok(())
    } else {
        Err(LayoutError::InvalidViewport)
    }
}

/// Section index of a growable-axis coordinate. Everything lands in section 0
/// when the section extent is empty.
fn section_of(start: f64, extent: f64) -> usize {
    if extent > 0.0 {
        (start / extent).floor().max(0.0) as usize
    } else {
        0
    }
}

#[cfg(feature = "std")]
fn entropy_rng() -> fastrand::Rng {
    fastrand::Rng::new()
}

#[cfg(not(feature = "std"))]
fn entropy_rng() -> fastrand::Rng {
    fastrand::Rng::with_seed(FALLBACK_SEED)
}
