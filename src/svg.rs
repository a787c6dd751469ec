//! SVG visualization of a computed gallery layout.
//!
//! Draws the canvas, the viewport's first screen, and every placed image as
//! a numbered rectangle (numbers are stacking order). Forced placements are
//! drawn hatched so overlaps are easy to spot.
//!
//! # Example
//!
//! ```
//! use zengallery::{Gallery, GalleryConfig, Size, svg::render_gallery_svg};
//!
//! let mut gallery = Gallery::new(GalleryConfig::new().seed(3), Size::new(1000.0, 800.0)).unwrap();
//! for (i, dims) in [(400, 300), (300, 300), (300, 500)].into_iter().enumerate() {
//!     let id = gallery.add_image(format!("img-{i}.gif"));
//!     gallery.image_loaded(id, dims.0, dims.1).unwrap();
//! }
//!
//! let svg = render_gallery_svg(&gallery);
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use crate::gallery::Gallery;
use crate::placement::PlacementKind;

/// Largest drawn width or height of the canvas, in SVG units.
const MAX_DRAWING: f64 = 600.0;
/// Margin around the drawing.
const MARGIN: f64 = 20.0;
/// Height of the caption above the drawing.
const LABEL_H: f64 = 22.0;

/// Render the gallery's current layout as a complete SVG document.
pub fn render_gallery_svg(gallery: &Gallery) -> String {
    let canvas = gallery.canvas().size;
    let scale = if canvas.width > 0.0 && canvas.height > 0.0 {
        (MAX_DRAWING / canvas.width).min(MAX_DRAWING / canvas.height)
    } else {
        1.0
    };
    let draw_w = canvas.width * scale;
    let draw_h = canvas.height * scale;
    let total_w = draw_w + 2.0 * MARGIN;
    let total_h = draw_h + 2.0 * MARGIN + LABEL_H;
    let ox = MARGIN;
    let oy = MARGIN + LABEL_H;

    let mut svg = String::with_capacity(4096);
    // `fmt::Write` for `String` cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    );

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .z { font-size: 10px; fill: #fff; }
  .canvas { fill: #2735f2; stroke: #999; stroke-width: 1; }
  .viewport { fill: none; stroke: #fff; stroke-width: 1; stroke-dasharray: 4,2; }
  .image { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; fill-opacity: 0.85; }
  .forced { fill: url(#hatch); stroke: #d64545; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .image { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
<defs>
  <pattern id="hatch" width="6" height="6" patternUnits="userSpaceOnUse" patternTransform="rotate(45)">
    <rect width="6" height="6" fill="#f2b8b8"/>
    <line x1="0" y1="0" x2="0" y2="6" stroke="#d64545" stroke-width="2"/>
  </pattern>
</defs>
"##,
    );

    let placed = gallery.geometry().count();
    let _ = writeln!(
        svg,
        r#"<text x="{ox}" y="{:.1}" class="label">{}</text>"#,
        MARGIN + 14.0,
        escape_xml(&format!(
            "Canvas  {:.0}×{:.0}  {placed} images",
            canvas.width, canvas.height
        ))
    );
    let _ = writeln!(
        svg,
        r#"<rect x="{ox:.1}" y="{oy:.1}" width="{draw_w:.1}" height="{draw_h:.1}" class="canvas"/>"#
    );

    let viewport = gallery.viewport();
    let _ = writeln!(
        svg,
        r#"<rect x="{ox:.1}" y="{oy:.1}" width="{:.1}" height="{:.1}" class="viewport"/>"#,
        viewport.width.min(canvas.width) * scale,
        viewport.height.min(canvas.height) * scale
    );

    for item in gallery.items() {
        let Some(p) = item.placement() else {
            continue;
        };
        let r = &p.rect;
        let class = match p.kind {
            PlacementKind::Forced => "forced",
            PlacementKind::Scanned | PlacementKind::Edge => "image",
        };
        let x = ox + r.left * scale;
        let y = oy + r.top * scale;
        let w = (r.right - r.left) * scale;
        let h = (r.bottom - r.top) * scale;
        let _ = writeln!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}"><title>{}</title></rect>"#,
            escape_xml(&item.filename)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" class="z">{}</text>"#,
            x + 3.0,
            y + 11.0,
            item.id.z_index()
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GalleryConfig, Size};

    fn gallery(n: usize) -> Gallery {
        let mut g = Gallery::new(GalleryConfig::new().seed(9), Size::new(1000.0, 800.0)).unwrap();
        for i in 0..n {
            let id = g.add_image(format!("img-{i}.gif"));
            g.image_loaded(id, 400 + i as u32 * 10, 300).unwrap();
        }
        g
    }

    #[test]
    fn empty_gallery_draws_canvas() {
        let svg = render_gallery_svg(&gallery(0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("1000×800"));
        assert!(svg.contains(r#"class="canvas""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn one_rect_per_placed_image() {
        let svg = render_gallery_svg(&gallery(5));
        assert_eq!(svg.matches(r#"class="image""#).count(), 5);
        assert!(svg.contains("<title>img-4.gif</title>"));
        assert!(svg.contains("5 images"));
    }

    #[test]
    fn forced_placements_are_hatched() {
        let mut g = Gallery::new(GalleryConfig::new().seed(2), Size::new(50.0, 800.0)).unwrap();
        let id = g.add_image("wide.gif");
        g.image_loaded(id, 400, 400).unwrap();
        let svg = render_gallery_svg(&g);
        assert_eq!(svg.matches(r#"class="forced""#).count(), 1);
    }

    #[test]
    fn filenames_are_escaped() {
        let mut g = gallery(0);
        let id = g.add_image("a<b>&\"c\".gif");
        g.image_loaded(id, 300, 300).unwrap();
        let svg = render_gallery_svg(&g);
        assert!(svg.contains("a&lt;b&gt;&amp;&quot;c&quot;.gif"));
        assert!(!svg.contains("<<"));
    }
}
