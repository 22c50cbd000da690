//! Panel layout geometry for image collages.
//!
//! Turns a declarative layout (CSS-grid-like track templates, named areas,
//! or explicit ratio rects) plus a container size and border width into
//! pixel rectangles, one per panel. Also rescales stored pan/zoom offsets
//! when the canvas or a panel changes size, and validates stored layouts
//! before reuse.
//!
//! Pure geometry: no pixel operations, no I/O, `no_std` + `alloc` compatible.
//!
//! # Modules
//!
//! - [`geometry`]: sizes, output rects, border conversion
//! - [`tracks`]: `fr` track templates and track resolution
//! - [`areas`]: `grid-template-areas` parsing
//! - [`order`]: panel ids and ordering indices
//! - [`config`]: the layout model and its JSON boundary
//! - [`rects`]: the rect synthesizer
//! - [`dimensions`]: per-panel size summaries
//! - [`transform`]: pan/zoom rescaling
//! - [`validate`]: stored layout compatibility
//! - `svg` (feature `svg`): debug diagrams
//!
//! # Example
//!
//! ```
//! use collage_layout::{compute_panel_rects, LayoutConfig, RectOptions, Size};
//!
//! let layout = LayoutConfig::grid("1fr 1fr", "1fr");
//! let rects = compute_panel_rects(&layout, Size::new(200.0, 100.0), 2, 10.0, &RectOptions::default());
//!
//! assert_eq!(rects.len(), 2);
//! assert_eq!((rects[0].x, rects[0].width), (10.0, 85.0));
//! assert_eq!((rects[1].x, rects[1].width), (105.0, 85.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod areas;
pub mod config;
pub mod dimensions;
pub mod geometry;
pub mod order;
pub mod rects;
#[cfg(feature = "svg")]
pub mod svg;
pub mod tracks;
pub mod transform;
pub mod validate;

pub use areas::{GridAreaBounds, parse_grid_template_areas};
pub use config::{AreaSlot, LayoutConfig, LayoutError, LayoutStrategy, RatioRect};
pub use dimensions::{LayoutSource, compute_panel_dimensions, dimensions_from_rects};
pub use geometry::{PanelRect, Size, border_px_from_percent};
pub use order::panel_order_index;
pub use rects::{DEFAULT_MIN_RECT_SIZE_PX, RectOptions, compute_panel_rects};
pub use tracks::{TrackLayout, parse_track_sizes};
pub use transform::{
    PanelTransform, SCALE_EPSILON, ScalingContext, SizeSnapshot, needs_scaling, rescale_transforms,
};
pub use validate::{compatible_layout, is_layout_compatible};
