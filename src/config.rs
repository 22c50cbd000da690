//! Declarative layout descriptions.
//!
//! A [`LayoutConfig`] is what a template catalog or a saved project supplies.
//! It can describe a layout three ways (explicit ratio rects, named areas,
//! or a plain sequential grid); [`LayoutConfig::strategy`] picks exactly one.
//!
//! # Example
//!
//! ```
//! use collage_layout::{LayoutConfig, LayoutStrategy};
//!
//! let config = LayoutConfig::grid("repeat(2, 1fr)", "1fr");
//! assert!(matches!(config.strategy(), LayoutStrategy::Sequential { .. }));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One explicit panel rectangle, expressed as fractions of the container
/// interior. All four ratios are nominally in `0.0..=1.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatioRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<f64>,
}

impl RatioRect {
    /// Create an anonymous ratio rect.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            panel_id: None,
            index: None,
        }
    }

    /// Set the panel id.
    pub fn panel_id(mut self, id: impl Into<String>) -> Self {
        self.panel_id = Some(id.into());
        self
    }

    /// Set the explicit order index.
    pub fn index(mut self, index: f64) -> Self {
        self.index = Some(index);
        self
    }
}

/// Assignment of one panel to a named grid area.
///
/// Deserializes from `{"panelId": "...", "gridArea": "..."}` or from a bare
/// area-name string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AreaSlotRepr")]
pub struct AreaSlot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
    pub grid_area: String,
}

impl AreaSlot {
    /// Slot for `area` with no explicit panel id.
    pub fn new(area: impl Into<String>) -> Self {
        Self {
            panel_id: None,
            grid_area: area.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AreaSlotRepr {
    Name(String),
    Slot {
        #[serde(rename = "panelId", default)]
        panel_id: Option<String>,
        #[serde(rename = "gridArea")]
        grid_area: String,
    },
}

impl From<AreaSlotRepr> for AreaSlot {
    fn from(repr: AreaSlotRepr) -> Self {
        match repr {
            AreaSlotRepr::Name(grid_area) => Self {
                panel_id: None,
                grid_area,
            },
            AreaSlotRepr::Slot {
                panel_id,
                grid_area,
            } => Self {
                panel_id,
                grid_area,
            },
        }
    }
}

/// A layout description as stored by templates and projects.
///
/// Every field is optional. When several representations are present the
/// precedence is `panel_rects` > `areas` > sequential grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_template_areas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<AreaSlot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_rects: Option<Vec<RatioRect>>,
    /// Opaque sequential markers; only their count matters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
}

/// The single layout representation a [`LayoutConfig`] resolves to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutStrategy<'a> {
    /// User-dragged ratio rectangles.
    ExplicitRects(&'a [RatioRect]),
    /// Panels placed into named areas of a track grid.
    AreaBased {
        template_areas: &'a str,
        areas: &'a [AreaSlot],
        columns: Option<&'a str>,
        rows: Option<&'a str>,
    },
    /// Panels flow row-major through a track grid.
    Sequential {
        columns: Option<&'a str>,
        rows: Option<&'a str>,
    },
}

impl LayoutConfig {
    /// Sequential grid from column and row track templates.
    pub fn grid(columns: impl Into<String>, rows: impl Into<String>) -> Self {
        Self {
            grid_template_columns: Some(columns.into()),
            grid_template_rows: Some(rows.into()),
            ..Self::default()
        }
    }

    /// Explicit ratio-rect layout.
    pub fn from_panel_rects(rects: impl IntoIterator<Item = RatioRect>) -> Self {
        Self {
            panel_rects: Some(rects.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Add named areas: the area template plus the ordered panel → area list.
    pub fn with_areas(
        mut self,
        template: impl Into<String>,
        areas: impl IntoIterator<Item = AreaSlot>,
    ) -> Self {
        self.grid_template_areas = Some(template.into());
        self.areas = Some(areas.into_iter().collect());
        self
    }

    /// Replace the explicit ratio rects.
    pub fn with_panel_rects(mut self, rects: impl IntoIterator<Item = RatioRect>) -> Self {
        self.panel_rects = Some(rects.into_iter().collect());
        self
    }

    /// Pick the representation to lay out, by precedence.
    ///
    /// Empty `panel_rects` or `areas` lists do not select their tier.
    pub fn strategy(&self) -> LayoutStrategy<'_> {
        match self.panel_rects.as_deref().filter(|r| !r.is_empty()) {
            Some(rects) => LayoutStrategy::ExplicitRects(rects),
            None => self.grid_strategy(),
        }
    }

    /// Like [`strategy`](Self::strategy) but ignoring `panel_rects`: the
    /// track-grid representation underneath any user-dragged rects.
    pub fn grid_strategy(&self) -> LayoutStrategy<'_> {
        let columns = self.grid_template_columns.as_deref();
        let rows = self.grid_template_rows.as_deref();

        if let (Some(areas), Some(template_areas)) = (
            self.areas.as_deref().filter(|a| !a.is_empty()),
            self.grid_template_areas.as_deref(),
        ) {
            return LayoutStrategy::AreaBased {
                template_areas,
                areas,
                columns,
                rows,
            };
        }
        LayoutStrategy::Sequential { columns, rows }
    }

    /// Deserialize from an untrusted JSON value.
    pub fn from_value(value: &Value) -> Result<Self, LayoutError> {
        if !value.is_object() {
            return Err(LayoutError::NotAnObject);
        }
        Self::deserialize(value).map_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "layout config failed to deserialize");
            LayoutError::Malformed
        })
    }
}

/// Why a stored or catalog layout could not be used.
///
/// Only produced inside the defensive boundaries; public geometry functions
/// convert it to an empty or `false` result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The candidate is not a JSON object.
    NotAnObject,
    /// A field has the wrong shape.
    Malformed,
    /// The template has no layout to offer.
    MissingLayout,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("layout is not an object"),
            Self::Malformed => f.write_str("layout has malformed fields"),
            Self::MissingLayout => f.write_str("template has no layout"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
