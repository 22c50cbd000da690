//! Compatibility checks for stored layouts.
//!
//! A project's `customLayout` may come from an older editor version or be
//! hand-edited. Before reusing it for a given panel count it goes through
//! here; nothing in this module panics or propagates an error.

use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map, Value};

use crate::config::{LayoutConfig, LayoutError};
use crate::tracks::count_tracks;

/// Whether an untrusted layout can host `panel_count` panels.
///
/// The first rule whose field is present (a non-empty array, or both track
/// templates as strings) decides:
///
/// 1. `panelRects.length >= panel_count`
/// 2. `areas.length >= panel_count`
/// 3. `items.length >= panel_count`
/// 4. `columns × rows >= panel_count` (an unparseable template counts 0)
///
/// Anything else, including a non-object candidate, is `false`.
///
/// ```
/// use collage_layout::is_layout_compatible;
/// use serde_json::json;
///
/// assert!(is_layout_compatible(&json!({"panelRects": [{}, {}]}), 2));
/// assert!(!is_layout_compatible(&json!({
///     "gridTemplateColumns": "repeat(1, 1fr)",
///     "gridTemplateRows": "repeat(1, 1fr)"
/// }), 2));
/// ```
pub fn is_layout_compatible(candidate: &Value, panel_count: usize) -> bool {
    match check(candidate, panel_count) {
        Ok(ok) => ok,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "stored layout rejected");
            false
        }
    }
}

/// Validate and deserialize in one step: the typed layout when it is
/// compatible and well-formed, otherwise `None`.
pub fn compatible_layout(candidate: &Value, panel_count: usize) -> Option<LayoutConfig> {
    if !is_layout_compatible(candidate, panel_count) {
        return None;
    }
    LayoutConfig::from_value(candidate).ok()
}

fn check(candidate: &Value, panel_count: usize) -> Result<bool, LayoutError> {
    let obj = candidate.as_object().ok_or(LayoutError::NotAnObject)?;

    for key in ["panelRects", "areas", "items"] {
        if let Some(len) = non_empty_len(obj, key) {
            return Ok(len >= panel_count);
        }
    }

    match (
        obj.get("gridTemplateColumns").and_then(Value::as_str),
        obj.get("gridTemplateRows").and_then(Value::as_str),
    ) {
        (Some(columns), Some(rows)) => {
            let cells = count_tracks(columns).saturating_mul(count_tracks(rows));
            Ok(cells >= panel_count)
        }
        _ => Ok(false),
    }
}

fn non_empty_len(obj: &Map<String, Value>, key: &str) -> Option<usize> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::len)
        .filter(|&len| len > 0)
}
