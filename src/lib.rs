//! Gap-filling scatter layout for photo galleries.
//!
//! Pure geometry. Images get random, aspect-preserving sizes and are packed
//! into a canvas that grows along one axis; the host renders the resulting
//! rectangles however it likes. `no_std` + `alloc` compatible.
//!
//! # Modules
//!
//! - [`geometry`] — Rectangles, closed overlap test, axis mapping
//! - [`sizing`] — Random display size within a band, preserving aspect ratio
//! - [`placement`] — Jittered grid scan with edge-row and forced fallbacks
//! - [`gallery`] — Layout coordinator: load events, canvas growth, debounced relayout
//! - [`config`] — [`GalleryConfig`] builder and [`LayoutError`]
//! - [`debounce`] — Cancel-and-restart single-shot timer
//! - [`date`] — `YYYY-MM-DD` extraction and manifest ordering
//! - `manifest` — Directory listing / JSON manifest parsing (feature `manifest`)
//! - `svg` — Layout visualization (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod date;
pub mod debounce;
pub mod gallery;
pub mod geometry;
pub mod placement;
pub mod sizing;

#[cfg(feature = "manifest")]
pub mod manifest;
#[cfg(feature = "svg")]
pub mod svg;

pub use config::{GalleryConfig, LayoutError, SectionPolicy};
pub use debounce::Debouncer;
pub use gallery::{
    Canvas, Gallery, ImageGeometry, ImageId, ImageItem, ImageState, ScrollTarget,
};
pub use geometry::{Axis, Point, Rect, Size, Span};
pub use placement::{
    Bounds, OccupiedSet, Placement, PlacementKind, PlacementParams, find_position,
};
pub use sizing::{SizeBand, resolve_size};
