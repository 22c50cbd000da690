//! Pan/zoom transform rescaling.
//!
//! A saved project stores each panel's pan offset in pixels of the surface
//! it was edited on. When the project is reopened on a surface of another
//! size, the offsets are rescaled so the composition looks the same. Zoom
//! (`scale`) is never touched.
//!
//! Two levels of precision:
//!
//! 1. **Panel-level**: saved and current per-panel sizes are both known; each
//!    panel's offset scales by its own width/height ratio.
//! 2. **Canvas-level**: only whole-canvas sizes are known; every panel scales
//!    by the same ratio. An approximation for projects saved without panel
//!    geometry.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use collage_layout::{rescale_transforms, PanelTransform, ScalingContext, Size};
//!
//! let mut transforms = BTreeMap::new();
//! transforms.insert("panel-1".to_string(), PanelTransform::new(1.5, 40.0, -10.0));
//!
//! let ctx = ScalingContext::new(Size::new(1600.0, 1200.0))
//!     .saved_canvas(Size::new(800.0, 600.0));
//!
//! let rescaled = rescale_transforms(&transforms, &ctx).expect("canvas doubled");
//! assert_eq!(rescaled["panel-1"], PanelTransform::new(1.5, 80.0, -20.0));
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::dimensions::dimensions_from_rects;
use crate::geometry::{PanelRect, Size};

/// Ratios within this distance of 1.0 count as "unchanged".
pub const SCALE_EPSILON: f64 = 1e-4;

/// Per-panel pan/zoom state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelTransform {
    /// Zoom factor.
    pub scale: f64,
    /// Horizontal pan offset in pixels; may be negative.
    pub position_x: f64,
    /// Vertical pan offset in pixels; may be negative.
    pub position_y: f64,
}

impl Default for PanelTransform {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl PanelTransform {
    /// Create a transform.
    pub const fn new(scale: f64, position_x: f64, position_y: f64) -> Self {
        Self {
            scale,
            position_x,
            position_y,
        }
    }

    fn scaled(self, ratio: Ratio) -> Self {
        Self {
            scale: self.scale,
            position_x: self.position_x * ratio.x,
            position_y: self.position_y * ratio.y,
        }
    }
}

/// Sizes captured when a project is saved.
///
/// The persistence layer stores this next to the transforms and hands it
/// back on load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeSnapshot {
    pub canvas: Size,
    pub panels: BTreeMap<String, Size>,
}

impl SizeSnapshot {
    /// Snapshot a canvas and the rects laid out on it.
    pub fn capture(canvas: Size, rects: &[PanelRect]) -> Self {
        Self {
            canvas,
            panels: dimensions_from_rects(rects),
        }
    }
}

/// Saved-versus-current sizes for one rescale decision.
///
/// Built fresh on every project load; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingContext {
    pub saved_canvas: Option<Size>,
    pub saved_panels: Option<BTreeMap<String, Size>>,
    pub current_canvas: Size,
    pub current_panels: BTreeMap<String, Size>,
}

impl ScalingContext {
    /// Context for the current canvas, with nothing saved yet.
    pub fn new(current_canvas: Size) -> Self {
        Self {
            saved_canvas: None,
            saved_panels: None,
            current_canvas,
            current_panels: BTreeMap::new(),
        }
    }

    /// Context from a stored snapshot (if any) and the current one.
    pub fn from_snapshots(saved: Option<&SizeSnapshot>, current: SizeSnapshot) -> Self {
        let mut ctx = Self::new(current.canvas).current_panels(current.panels);
        if let Some(saved) = saved {
            ctx = ctx
                .saved_canvas(saved.canvas)
                .saved_panels(saved.panels.clone());
        }
        ctx
    }

    /// Set the current per-panel sizes.
    pub fn current_panels(mut self, panels: BTreeMap<String, Size>) -> Self {
        self.current_panels = panels;
        self
    }

    /// Set the canvas size at save time.
    pub fn saved_canvas(mut self, size: Size) -> Self {
        self.saved_canvas = Some(size);
        self
    }

    /// Set the per-panel sizes at save time.
    pub fn saved_panels(mut self, panels: BTreeMap<String, Size>) -> Self {
        self.saved_panels = Some(panels);
        self
    }

    /// Both per-panel maps present and non-empty.
    fn panel_maps(&self) -> Option<(&BTreeMap<String, Size>, &BTreeMap<String, Size>)> {
        let saved = self.saved_panels.as_ref().filter(|p| !p.is_empty())?;
        if self.current_panels.is_empty() {
            return None;
        }
        Some((saved, &self.current_panels))
    }

    fn panel_ratio(&self, panel: &str) -> Option<Ratio> {
        let (saved, current) = self.panel_maps()?;
        Ratio::between(*saved.get(panel)?, *current.get(panel)?)
    }

    fn canvas_ratio(&self) -> Option<Ratio> {
        Ratio::between(self.saved_canvas?, self.current_canvas)
    }
}

/// Per-axis current/saved ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Ratio {
    x: f64,
    y: f64,
}

impl Ratio {
    fn between(saved: Size, current: Size) -> Option<Self> {
        if !saved.is_positive() || !current.is_positive() {
            return None;
        }
        Some(Self {
            x: current.width / saved.width,
            y: current.height / saved.height,
        })
    }

    fn is_identity(&self) -> bool {
        (self.x - 1.0).abs() <= SCALE_EPSILON && (self.y - 1.0).abs() <= SCALE_EPSILON
    }
}

/// Rescale stored pan offsets for the current surface.
///
/// Returns `None` when nothing needs to change or there is not enough
/// information to decide; the caller then uses the stored transforms as-is.
/// Otherwise returns the complete map, with panels that needed no change
/// (or had no known size) copied through.
pub fn rescale_transforms(
    transforms: &BTreeMap<String, PanelTransform>,
    ctx: &ScalingContext,
) -> Option<BTreeMap<String, PanelTransform>> {
    if ctx.panel_maps().is_some() {
        let mut changed = false;
        let out: BTreeMap<String, PanelTransform> = transforms
            .iter()
            .map(|(id, t)| {
                let next = match ctx.panel_ratio(id) {
                    Some(ratio) if !ratio.is_identity() => {
                        changed = true;
                        t.scaled(ratio)
                    }
                    _ => *t,
                };
                (id.clone(), next)
            })
            .collect();
        #[cfg(feature = "tracing")]
        tracing::debug!(changed, panels = transforms.len(), "panel-level transform rescale");
        return changed.then_some(out);
    }

    let ratio = ctx.canvas_ratio()?;
    if ratio.is_identity() {
        return None;
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(scale_x = ratio.x, scale_y = ratio.y, "canvas-level transform rescale");
    Some(
        transforms
            .iter()
            .map(|(id, t)| (id.clone(), t.scaled(ratio)))
            .collect(),
    )
}

/// Whether [`rescale_transforms`] would change anything, for the panels the
/// context knows about.
pub fn needs_scaling(ctx: &ScalingContext) -> bool {
    if let Some((saved, _)) = ctx.panel_maps() {
        return saved
            .keys()
            .filter_map(|id| ctx.panel_ratio(id))
            .any(|r| !r.is_identity());
    }
    ctx.canvas_ratio().is_some_and(|r| !r.is_identity())
}
