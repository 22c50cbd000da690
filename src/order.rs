//! Canonical panel ordering.
//!
//! Panels are identified as `panel-<N>` with N one-based. Rects coming from
//! different layout tiers carry ids and indices slightly differently; this
//! module reduces them to one zero-based order.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use num_traits::Float;

const PANEL_PREFIX: &str = "panel-";

/// Format the id of the `n`th panel (one-based): `panel_id(1) == "panel-1"`.
pub fn panel_id(n: u64) -> String {
    format!("{PANEL_PREFIX}{n}")
}

/// Parse `N` out of `panel-<N>`. `None` for any other shape.
pub fn parse_panel_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(PANEL_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Resolve the zero-based order of a panel.
///
/// An explicit finite `index` wins (truncated toward zero). Otherwise a
/// `panel-<N>` id with N ≥ 1 gives `N - 1`. Otherwise `fallback`.
///
/// ```
/// use collage_layout::order::panel_order_index;
///
/// assert_eq!(panel_order_index(Some(4.0), Some("panel-1"), 9), 4);
/// assert_eq!(panel_order_index(None, Some("panel-3"), 9), 2);
/// assert_eq!(panel_order_index(None, Some("bad"), 9), 9);
/// ```
pub fn panel_order_index(index: Option<f64>, panel_id: Option<&str>, fallback: i64) -> i64 {
    if let Some(i) = index.filter(|i| i.is_finite()) {
        return i.trunc() as i64;
    }
    panel_id
        .and_then(parse_panel_number)
        .filter(|&n| n >= 1)
        .and_then(|n| i64::try_from(n - 1).ok())
        .unwrap_or(fallback)
}

/// Sort key behind [`panel_order_index`]. Same precedence, but an explicit
/// index is kept as given, so `0.2` still sorts before `0.7`.
pub fn panel_order_key(index: Option<f64>, panel_id: Option<&str>, fallback: i64) -> f64 {
    match index.filter(|i| i.is_finite()) {
        Some(i) => i,
        None => panel_order_index(None, panel_id, fallback) as f64,
    }
}

/// Hands out the ids of one rect list, never the same id twice.
///
/// Ids the layout names are reserved up front, so a generated `panel-<N>`
/// cannot take the id of a panel declared further down.
pub(crate) struct PanelIds<'a> {
    reserved: BTreeSet<&'a str>,
    issued: BTreeSet<String>,
}

impl<'a> PanelIds<'a> {
    pub(crate) fn new(named: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            reserved: named.into_iter().flatten().collect(),
            issued: BTreeSet::new(),
        }
    }

    /// The layout's own id if no earlier panel has it, otherwise the first
    /// free `panel-<N>` counting up from `index + 1`.
    pub(crate) fn issue(&mut self, named: Option<&str>, index: i64) -> String {
        if let Some(id) = named.filter(|id| !self.issued.contains(*id)) {
            self.issued.insert(String::from(id));
            return String::from(id);
        }
        let mut n = u64::try_from(index).unwrap_or(0).saturating_add(1);
        loop {
            let id = panel_id(n);
            if !self.reserved.contains(id.as_str()) && !self.issued.contains(&id) {
                self.issued.insert(id.clone());
                return id;
            }
            n = n.saturating_add(1);
        }
    }
}
