//! Pixel-space geometry shared by every layout tier.
//!
//! All coordinates are in the rendering surface's space: origin at the
//! top-left, `f64` pixels. Fractional values are kept as-is; rounding to
//! device pixels is the renderer's job.

use alloc::string::String;

#[cfg(not(feature = "std"))]
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Width × height in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One synthesized panel rectangle.
///
/// `index` is the canonical visual order; rect lists are sorted by it,
/// never by the position a rect was declared at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stable panel identifier, `panel-<N>` unless the layout named it.
    pub panel_id: String,
    /// Canonical zero-based order.
    pub index: i64,
}

impl PanelRect {
    /// Size without the offset.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Convert a border thickness given as a percentage of canvas width into
/// pixels.
///
/// The percentage is clamped to `0..=100`; non-finite input yields 0.
///
/// ```
/// use collage_layout::border_px_from_percent;
///
/// assert_eq!(border_px_from_percent(2.0, 1000.0), 20.0);
/// assert_eq!(border_px_from_percent(250.0, 10.0), 10.0);
/// ```
pub fn border_px_from_percent(percent: f64, canvas_width: f64) -> f64 {
    if !percent.is_finite() || !canvas_width.is_finite() {
        return 0.0;
    }
    (percent.clamp(0.0, 100.0) / 100.0 * canvas_width.max(0.0)).round()
}

/// Sanitize a border thickness: negative or non-finite becomes 0.
pub(crate) fn sanitize_border(border: f64) -> f64 {
    if border.is_finite() { border.max(0.0) } else { 0.0 }
}
