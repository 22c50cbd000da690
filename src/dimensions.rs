//! Per-panel size summaries.
//!
//! A lighter view of [`compute_panel_rects`](crate::compute_panel_rects):
//! only `panel id → size`, used as the reference snapshot when deciding
//! whether stored pan offsets need rescaling.

use alloc::collections::BTreeMap;
use alloc::string::String;

use serde_json::Value;

use crate::config::{LayoutConfig, LayoutError};
use crate::geometry::{PanelRect, Size, border_px_from_percent};
use crate::rects::compute_grid_rects;

/// Anything that can hand out a [`LayoutConfig`]: a catalog template, a
/// stored JSON blob, a saved project.
pub trait LayoutSource {
    /// The layout this source describes.
    fn layout_config(&self) -> Result<LayoutConfig, LayoutError>;
}

impl LayoutSource for LayoutConfig {
    fn layout_config(&self) -> Result<LayoutConfig, LayoutError> {
        Ok(self.clone())
    }
}

impl LayoutSource for Value {
    fn layout_config(&self) -> Result<LayoutConfig, LayoutError> {
        LayoutConfig::from_value(self)
    }
}

impl<T: LayoutSource> LayoutSource for Option<T> {
    fn layout_config(&self) -> Result<LayoutConfig, LayoutError> {
        self.as_ref()
            .ok_or(LayoutError::MissingLayout)
            .and_then(|inner| inner.layout_config())
    }
}

impl<T: LayoutSource + ?Sized> LayoutSource for &T {
    fn layout_config(&self) -> Result<LayoutConfig, LayoutError> {
        (**self).layout_config()
    }
}

/// Panel sizes for a template on a canvas.
///
/// `border_percent` is a percentage of canvas width (see
/// [`border_px_from_percent`]). Only track grids are summarized: explicit
/// `panel_rects` are ignored, so for user-dragged layouts run
/// [`compute_panel_rects`](crate::compute_panel_rects) and pass the result
/// to [`dimensions_from_rects`] instead. A source that fails to produce a
/// layout yields an empty map.
///
/// ```
/// use collage_layout::{compute_panel_dimensions, LayoutConfig, Size};
///
/// let template = LayoutConfig::grid("1fr 1fr", "1fr");
/// let dims = compute_panel_dimensions(&template, Size::new(200.0, 100.0), 0.0, 2);
/// assert_eq!(dims["panel-2"], Size::new(100.0, 100.0));
/// ```
pub fn compute_panel_dimensions<S: LayoutSource + ?Sized>(
    source: &S,
    canvas: Size,
    border_percent: f64,
    panel_count: usize,
) -> BTreeMap<String, Size> {
    let config = match source.layout_config() {
        Ok(config) => config,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "template layout unavailable, no panel dimensions");
            return BTreeMap::new();
        }
    };
    let border = border_px_from_percent(border_percent, canvas.width);
    let rects = compute_grid_rects(&config, canvas, panel_count, border);
    dimensions_from_rects(&rects)
}

/// Strip offsets from synthesized rects.
pub fn dimensions_from_rects(rects: &[PanelRect]) -> BTreeMap<String, Size> {
    rects
        .iter()
        .map(|r| (r.panel_id.clone(), r.size()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AreaSlot, RatioRect};
    use crate::rects::{RectOptions, compute_panel_rects};
    use serde_json::json;

    struct Broken;

    impl LayoutSource for Broken {
        fn layout_config(&self) -> Result<LayoutConfig, LayoutError> {
            Err(LayoutError::Malformed)
        }
    }

    #[test]
    fn grid_dimensions_with_border_percent() {
        // 1% of 400 = 4px border. Interior 392×192, gap 4 → columns 194.
        let template = LayoutConfig::grid("1fr 1fr", "1fr");
        let dims = compute_panel_dimensions(&template, Size::new(400.0, 200.0), 1.0, 2);
        assert_eq!(dims.len(), 2);
        assert_eq!(dims["panel-1"], Size::new(194.0, 192.0));
        assert_eq!(dims["panel-2"], Size::new(194.0, 192.0));
    }

    #[test]
    fn area_dimensions() {
        let template = LayoutConfig::grid("2fr 1fr", "1fr 1fr").with_areas(
            r#""big small" "big other""#,
            [AreaSlot::new("big"), AreaSlot::new("small"), AreaSlot::new("other")],
        );
        let dims = compute_panel_dimensions(&template, Size::new(300.0, 200.0), 0.0, 3);
        assert_eq!(dims["panel-1"], Size::new(200.0, 200.0));
        assert_eq!(dims["panel-3"], Size::new(100.0, 100.0));
    }

    #[test]
    fn panel_rects_are_ignored() {
        let template = LayoutConfig::grid("1fr 1fr", "1fr")
            .with_panel_rects([RatioRect::new(0.0, 0.0, 0.2, 1.0)]);
        let dims = compute_panel_dimensions(&template, Size::new(200.0, 100.0), 0.0, 2);
        assert_eq!(dims["panel-1"].width, 100.0);
    }

    #[test]
    fn failing_source_is_empty() {
        assert!(compute_panel_dimensions(&Broken, Size::new(200.0, 100.0), 0.0, 2).is_empty());
        let missing: Option<LayoutConfig> = None;
        assert!(compute_panel_dimensions(&missing, Size::new(200.0, 100.0), 0.0, 2).is_empty());
    }

    #[test]
    fn json_source() {
        let template = json!({"gridTemplateColumns": "repeat(3, 1fr)", "gridTemplateRows": "1fr"});
        let dims = compute_panel_dimensions(&template, Size::new(300.0, 100.0), 0.0, 3);
        assert_eq!(dims.len(), 3);
        assert!(compute_panel_dimensions(&json!("nope"), Size::new(300.0, 100.0), 0.0, 3).is_empty());
    }

    #[test]
    fn dimensions_from_custom_rects() {
        let config = LayoutConfig::from_panel_rects([
            RatioRect::new(0.0, 0.0, 0.25, 1.0),
            RatioRect::new(0.25, 0.0, 0.75, 1.0),
        ]);
        let rects = compute_panel_rects(&config, Size::new(400.0, 100.0), 2, 0.0, &RectOptions::default());
        let dims = dimensions_from_rects(&rects);
        assert_eq!(dims["panel-1"], Size::new(100.0, 100.0));
        assert_eq!(dims["panel-2"], Size::new(300.0, 100.0));
    }
}
