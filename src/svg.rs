//! SVG diagram of synthesized panel rects.
//!
//! Draws the container, a dashed outline around the panel area (the band
//! outside it is the outer border), and each panel labeled with its order
//! and pixel size. Meant for debugging layouts and reviewing template
//! changes, not for producing collage output.
//!
//! # Example
//!
//! ```
//! use collage_layout::{compute_panel_rects, LayoutConfig, RectOptions, Size};
//! use collage_layout::svg::render_panels_svg;
//!
//! let container = Size::new(1200.0, 800.0);
//! let rects = compute_panel_rects(
//!     &LayoutConfig::grid("2fr 1fr", "repeat(2, 1fr)"),
//!     container,
//!     4,
//!     12.0,
//!     &RectOptions::default(),
//! );
//!
//! let svg = render_panels_svg(container, &rects);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::geometry::{PanelRect, Size};

/// Maximum width of the drawn container.
const MAX_DIAGRAM_W: f64 = 600.0;
/// Maximum height of the drawn container.
const MAX_DIAGRAM_H: f64 = 400.0;
/// Margin around the diagram.
const MARGIN: f64 = 20.0;
/// Height of the caption line above the diagram.
const CAPTION_H: f64 = 24.0;

/// Render a complete SVG document showing `rects` inside `container`.
///
/// Rects are drawn in the order given; panel labels show `index + 1`.
pub fn render_panels_svg(container: Size, rects: &[PanelRect]) -> String {
    if !container.is_positive() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let (cw, ch, scale) = scale_to_fit(container);
    let total_w = cw + 2.0 * MARGIN;
    let total_h = ch + 2.0 * MARGIN + CAPTION_H;
    let ox = MARGIN;
    let oy = MARGIN + CAPTION_H;

    let mut svg = String::with_capacity(1024 + rects.len() * 256);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .caption { font-size: 13px; font-weight: bold; fill: #333; }
  .label { font-size: 12px; fill: #fff; }
  .container { fill: #d0d0d0; stroke: #999; stroke-width: 1; }
  .inner { fill: none; stroke: #666; stroke-width: 1; stroke-dasharray: 4,3; }
  .panel { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .caption { fill: #e0e0e0; }
    .container { fill: #3a3a3a; stroke: #555; }
    .inner { stroke: #999; }
    .panel { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let caption = format!(
        "Container  {}×{}  ({} panels)",
        fmt_px(container.width),
        fmt_px(container.height),
        rects.len()
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="caption">{}</text>"#,
        ox,
        MARGIN + 14.0,
        escape_xml(&caption)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="container"/>"#,
        ox, oy, cw, ch
    ));
    svg.push('\n');

    // Outline of the panel area; the band outside it is the outer border.
    if let Some((left, top, right, bottom)) = panel_bounds(rects) {
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner"/>"#,
            ox + left * scale,
            oy + top * scale,
            (right - left) * scale,
            (bottom - top) * scale
        ));
        svg.push('\n');
    }

    for r in rects {
        let x = ox + r.x * scale;
        let y = oy + r.y * scale;
        let w = r.width * scale;
        let h = r.height * scale;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="panel"><title>{}</title></rect>"#,
            x,
            y,
            w,
            h,
            escape_xml(&r.panel_id)
        ));
        svg.push('\n');

        let label = format!(
            "{}  {}×{}",
            r.index.saturating_add(1),
            fmt_px(r.width),
            fmt_px(r.height)
        );
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="label" text-anchor="middle">{}</text>"#,
            x + w / 2.0,
            y + h / 2.0 + 4.0,
            escape_xml(&label)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Scale a size to fit within MAX_DIAGRAM_W × MAX_DIAGRAM_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let scale = (MAX_DIAGRAM_W / size.width).min(MAX_DIAGRAM_H / size.height);
    (size.width * scale, size.height * scale, scale)
}

/// Union of all rects as `(left, top, right, bottom)`.
fn panel_bounds(rects: &[PanelRect]) -> Option<(f64, f64, f64, f64)> {
    let first = rects.first()?;
    Some(rects.iter().fold(
        (first.x, first.y, first.right(), first.bottom()),
        |(l, t, r, b), rect| {
            (
                l.min(rect.x),
                t.min(rect.y),
                r.max(rect.right()),
                b.max(rect.bottom()),
            )
        },
    ))
}

/// Whole pixels print without a fraction, others with one decimal.
fn fmt_px(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
