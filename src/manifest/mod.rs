//! Image manifests: directory listings and JSON filename arrays.
//!
//! Produces the ordered list of image paths a [`Gallery`] is populated from.
//! Fetching the listing is the host's job; these functions only parse text.
//!
//! # Example
//!
//! ```
//! use zengallery::manifest;
//!
//! let html = r#"<a href="../">Parent</a>
//!               <a href="b-2024-03-05.webp">b</a>
//!               <a href="a-2024-01-01.GIF">a</a>
//!               <a href="notes.txt">notes</a>"#;
//!
//! let mut listing = manifest::parse_listing(html).with_base("assets/");
//! listing.sort_by_date();
//!
//! assert_eq!(listing.entries, ["assets/a-2024-01-01.GIF", "assets/b-2024-03-05.webp"]);
//! assert_eq!(listing.warnings.len(), 2);
//! ```

mod json;
mod listing;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::date::compare_by_date;
use crate::gallery::{Gallery, ImageId};

pub use json::parse_json;
pub use listing::{parse_listing, parse_listing_with};

/// Extensions accepted from directory listings by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".gif", ".webp"];

/// Parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Image paths in display order.
    pub entries: Vec<String>,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ManifestWarning>,
}

/// Non-fatal warning from manifest parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestWarning {
    /// A link was found but is not an image entry.
    SkippedLink { href: String, reason: &'static str },
}

/// Fatal manifest error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// The text is not a JSON array of strings.
    Json(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "invalid JSON manifest: {msg}"),
        }
    }
}

impl core::error::Error for ManifestError {}

impl Manifest {
    /// Prefix every relative entry with `base` (e.g. `"assets/"`).
    ///
    /// Entries that are already absolute (`/…` or `scheme://…`) are kept.
    pub fn with_base(mut self, base: &str) -> Self {
        if base.is_empty() {
            return self;
        }
        for entry in &mut self.entries {
            if !is_absolute(entry) {
                *entry = if base.ends_with('/') {
                    format!("{base}{entry}")
                } else {
                    format!("{base}/{entry}")
                };
            }
        }
        self
    }

    /// Order entries by their embedded `YYYY-MM-DD` date, falling back to
    /// the whole name for undated entries.
    ///
    /// A dated entry compared with an undated one compares its date against
    /// the undated entry's whole name, not the two whole names. Digits sort
    /// before letters, so `z-2024-01-01.gif` lands ahead of `b.gif`. This
    /// keeps the ordering total when dated and undated names are mixed.
    pub fn sort_by_date(&mut self) {
        self.entries.sort_by(|a, b| compare_by_date(a, b));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every entry with `gallery`, in order.
    pub fn populate(&self, gallery: &mut Gallery) -> Vec<ImageId> {
        gallery.extend_images(self.entries.iter().cloned())
    }
}

/// Case-insensitive suffix match against `extensions` (each with its dot).
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| {
        name.len() >= ext.len()
            && name.as_bytes()[name.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
    })
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.contains("://")
}
