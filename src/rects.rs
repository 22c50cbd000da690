//! Panel rectangle synthesis.
//!
//! Turns a [`LayoutConfig`] plus a container size, panel count, and border
//! thickness into pixel rectangles ordered by panel index. Never fails:
//! degenerate input produces an empty or short list, which callers treat as
//! "not renderable yet".
//!
//! # Example
//!
//! ```
//! use collage_layout::{compute_panel_rects, LayoutConfig, RectOptions, Size};
//!
//! let config = LayoutConfig::grid("repeat(2, 1fr)", "1fr");
//! let rects = compute_panel_rects(
//!     &config,
//!     Size::new(210.0, 120.0),
//!     2,
//!     10.0,
//!     &RectOptions::default(),
//! );
//!
//! assert_eq!(rects.len(), 2);
//! assert_eq!((rects[0].x, rects[0].y, rects[0].width, rects[0].height), (10.0, 10.0, 90.0, 100.0));
//! assert_eq!((rects[1].x, rects[1].width), (110.0, 90.0));
//! ```

use alloc::vec::Vec;

use crate::areas::{grid_dimensions, parse_grid_template_areas};
use crate::config::{AreaSlot, LayoutConfig, LayoutStrategy, RatioRect};
use crate::geometry::{PanelRect, Size, sanitize_border};
use crate::order::{PanelIds, panel_id, panel_order_index, panel_order_key};
use crate::tracks::{MAX_TRACKS, TrackLayout, parse_track_sizes};

/// Rects whose width or height is at or below this many pixels are dropped.
pub const DEFAULT_MIN_RECT_SIZE_PX: f64 = 0.25;

/// Tuning knobs for [`compute_panel_rects`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectOptions {
    /// Minimum width and height (exclusive) for a rect to be emitted.
    pub min_rect_size_px: f64,
    /// Sequential grids stop at `columns × rows` panels instead of adding
    /// implicit rows.
    pub limit_sequential_to_grid_cells: bool,
}

impl Default for RectOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RectOptions {
    /// Default options.
    pub const fn new() -> Self {
        Self {
            min_rect_size_px: DEFAULT_MIN_RECT_SIZE_PX,
            limit_sequential_to_grid_cells: false,
        }
    }

    /// Set the minimum rect size.
    pub fn min_rect_size_px(mut self, px: f64) -> Self {
        self.min_rect_size_px = px;
        self
    }

    /// Cap sequential layouts at the declared cell count.
    pub fn limit_sequential_to_grid_cells(mut self, limit: bool) -> Self {
        self.limit_sequential_to_grid_cells = limit;
        self
    }

    fn min_size(&self) -> f64 {
        if self.min_rect_size_px.is_finite() {
            self.min_rect_size_px.max(0.0)
        } else {
            DEFAULT_MIN_RECT_SIZE_PX
        }
    }
}

/// Compute pixel rectangles for `panel_count` panels.
///
/// Resolution order: explicit `panel_rects`, then named `areas`, then a
/// sequential row-major grid. The result is sorted by `index` and holds at
/// most `panel_count` rects.
pub fn compute_panel_rects(
    config: &LayoutConfig,
    container: Size,
    panel_count: usize,
    border: f64,
    options: &RectOptions,
) -> Vec<PanelRect> {
    let Some(frame) = Frame::new(container, border) else {
        return Vec::new();
    };
    if panel_count == 0 {
        return Vec::new();
    }

    let rects = match config.strategy() {
        LayoutStrategy::ExplicitRects(entries) => explicit_rects(entries, &frame),
        strategy => grid_rects(
            strategy,
            &frame,
            panel_count,
            options.limit_sequential_to_grid_cells,
        ),
    };
    finish(rects, panel_count, options.min_size())
}

/// Rects from the track grid alone, ignoring any explicit `panel_rects`.
pub(crate) fn compute_grid_rects(
    config: &LayoutConfig,
    container: Size,
    panel_count: usize,
    border: f64,
) -> Vec<PanelRect> {
    let Some(frame) = Frame::new(container, border) else {
        return Vec::new();
    };
    let rects = grid_rects(config.grid_strategy(), &frame, panel_count, false);
    finish(rects, panel_count, DEFAULT_MIN_RECT_SIZE_PX)
}

/// Container interior after insetting the border on all sides.
struct Frame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    border: f64,
}

impl Frame {
    fn new(container: Size, border: f64) -> Option<Self> {
        let border = sanitize_border(border);
        if !container.is_positive() {
            return None;
        }
        let width = container.width - 2.0 * border;
        let height = container.height - 2.0 * border;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            x: border,
            y: border,
            width,
            height,
            border,
        })
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn columns(&self, weights: &[f64]) -> TrackLayout {
        TrackLayout::resolve(weights, self.x, self.width, self.border)
    }

    fn rows(&self, weights: &[f64]) -> TrackLayout {
        TrackLayout::resolve(weights, self.y, self.height, self.border)
    }
}

/// A rect with the untruncated order key it sorts by.
struct Placed {
    key: f64,
    rect: PanelRect,
}

/// Drop sub-threshold rects, order by key, cap at the panel count.
fn finish(mut placed: Vec<Placed>, panel_count: usize, min_size: f64) -> Vec<PanelRect> {
    placed.retain(|p| {
        let r = &p.rect;
        let keep = r.width > min_size && r.height > min_size;
        if !keep {
            #[cfg(feature = "tracing")]
            tracing::trace!(panel = %r.panel_id, width = r.width, height = r.height, "dropping sub-threshold rect");
        }
        keep
    });
    placed.sort_by(|a, b| a.key.total_cmp(&b.key));
    placed.truncate(panel_count);
    placed.into_iter().map(|p| p.rect).collect()
}

// ============================================================================
// Tier 1: explicit ratio rects
// ============================================================================

fn explicit_rects(entries: &[RatioRect], frame: &Frame) -> Vec<Placed> {
    let mut ids = PanelIds::new(entries.iter().map(|e| e.panel_id.as_deref()));
    let mut placed = Vec::with_capacity(entries.len());
    for (pos, entry) in entries.iter().enumerate() {
        if ![entry.x, entry.y, entry.width, entry.height]
            .iter()
            .all(|v| v.is_finite())
        {
            continue;
        }

        let x = frame.x + entry.x.clamp(0.0, 1.0) * frame.width;
        let y = frame.y + entry.y.clamp(0.0, 1.0) * frame.height;
        let right = (x + entry.width * frame.width).min(frame.right());
        let bottom = (y + entry.height * frame.height).min(frame.bottom());

        let named = entry.panel_id.as_deref();
        let index = panel_order_index(entry.index, named, pos as i64);
        placed.push(Placed {
            key: panel_order_key(entry.index, named, pos as i64),
            rect: PanelRect {
                x,
                y,
                width: right - x,
                height: bottom - y,
                panel_id: ids.issue(named, index),
                index,
            },
        });
    }
    placed
}

// ============================================================================
// Tiers 2–3: track grids
// ============================================================================

fn grid_rects(
    strategy: LayoutStrategy<'_>,
    frame: &Frame,
    panel_count: usize,
    limit_to_cells: bool,
) -> Vec<Placed> {
    match strategy {
        LayoutStrategy::AreaBased {
            template_areas,
            areas,
            columns,
            rows,
        } => area_rects(template_areas, areas, columns, rows, frame, panel_count),
        LayoutStrategy::Sequential { columns, rows } => {
            sequential_rects(columns, rows, frame, panel_count, limit_to_cells)
        }
        LayoutStrategy::ExplicitRects(_) => Vec::new(),
    }
}

fn area_rects(
    template_areas: &str,
    areas: &[AreaSlot],
    columns: Option<&str>,
    rows: Option<&str>,
    frame: &Frame,
    panel_count: usize,
) -> Vec<Placed> {
    let bounds = parse_grid_template_areas(template_areas);
    let (area_rows, area_cols) = grid_dimensions(template_areas);
    let col_tracks = frame.columns(&parse_track_sizes(columns, area_cols));
    let row_tracks = frame.rows(&parse_track_sizes(rows, area_rows));

    let slots = &areas[..areas.len().min(panel_count)];
    let mut ids = PanelIds::new(slots.iter().map(|s| s.panel_id.as_deref()));
    let mut placed = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        // Unknown area names drop the panel silently.
        let Some(b) = bounds.get(slot.grid_area.as_str()) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(area = %slot.grid_area, "area not in template, skipping panel");
            continue;
        };
        let (Some((x, width)), Some((y, height))) = (
            col_tracks.span(b.col_start, b.col_end),
            row_tracks.span(b.row_start, b.row_end),
        ) else {
            continue;
        };

        let named = slot.panel_id.as_deref();
        let index = panel_order_index(None, named, i as i64);
        placed.push(Placed {
            key: index as f64,
            rect: PanelRect {
                x,
                y,
                width,
                height,
                panel_id: ids.issue(named, index),
                index,
            },
        });
    }
    placed
}

fn sequential_rects(
    columns: Option<&str>,
    rows: Option<&str>,
    frame: &Frame,
    panel_count: usize,
    limit_to_cells: bool,
) -> Vec<Placed> {
    let col_weights = parse_track_sizes(columns, panel_count);
    let mut row_weights = parse_track_sizes(rows, 1);
    let cols = col_weights.len();
    // Implicit rows obey the same track cap as declared ones.
    let panel_count = panel_count.min(cols * MAX_TRACKS);

    let emitted = if limit_to_cells {
        panel_count.min(cols * row_weights.len())
    } else {
        // Implicit weight-1 rows keep overflow panels inside the container.
        let needed = panel_count.div_ceil(cols);
        if row_weights.len() < needed {
            row_weights.resize(needed, 1.0);
        }
        panel_count
    };

    let col_tracks = frame.columns(&col_weights);
    let row_tracks = frame.rows(&row_weights);

    (0..emitted)
        .filter_map(|i| {
            let (col, row) = (i % cols, i / cols);
            let (x, width) = col_tracks.span(col, col)?;
            let (y, height) = row_tracks.span(row, row)?;
            Some(Placed {
                key: i as f64,
                rect: PanelRect {
                    x,
                    y,
                    width,
                    height,
                    panel_id: panel_id(i as u64 + 1),
                    index: i as i64,
                },
            })
        })
        .collect()
}
