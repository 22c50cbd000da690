//! Named grid-area templates.
//!
//! Parses `grid-template-areas` strings such as
//! `"main side" "main foot"` into per-name bounding boxes in cell
//! coordinates. A name that appears in non-rectangular cells still gets the
//! smallest box covering all of them; ragged rows are tolerated.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Inclusive, zero-based cell bounds of one named area.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridAreaBounds {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl GridAreaBounds {
    fn cell(row: usize, col: usize) -> Self {
        Self {
            row_start: row,
            row_end: row,
            col_start: col,
            col_end: col,
        }
    }

    fn include(&mut self, row: usize, col: usize) {
        self.row_start = self.row_start.min(row);
        self.row_end = self.row_end.max(row);
        self.col_start = self.col_start.min(col);
        self.col_end = self.col_end.max(col);
    }

    /// Number of rows covered.
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    /// Number of columns covered.
    pub fn col_span(&self) -> usize {
        self.col_end - self.col_start + 1
    }
}

/// Parse an area template into name → bounds.
///
/// `.` (or any run of dots) marks an empty cell.
///
/// ```
/// use collage_layout::areas::{parse_grid_template_areas, GridAreaBounds};
///
/// let areas = parse_grid_template_areas(r#""left right" "left right""#);
/// assert_eq!(
///     areas["left"],
///     GridAreaBounds { row_start: 0, row_end: 1, col_start: 0, col_end: 0 }
/// );
/// ```
pub fn parse_grid_template_areas(template: &str) -> BTreeMap<String, GridAreaBounds> {
    let mut areas: BTreeMap<String, GridAreaBounds> = BTreeMap::new();

    for (row, line) in template_rows(template).iter().enumerate() {
        for (col, name) in line.split_whitespace().enumerate() {
            if is_empty_cell(name) {
                continue;
            }
            match areas.get_mut(name) {
                Some(bounds) => bounds.include(row, col),
                None => {
                    areas.insert(String::from(name), GridAreaBounds::cell(row, col));
                }
            }
        }
    }

    areas
}

/// `(rows, columns)` of an area template: row count and widest row.
pub fn grid_dimensions(template: &str) -> (usize, usize) {
    let rows = template_rows(template);
    let cols = rows
        .iter()
        .map(|r| r.split_whitespace().count())
        .max()
        .unwrap_or(0);
    (rows.len(), cols)
}

/// Split a template into non-blank rows.
///
/// With any quote present, each quoted segment is a row; otherwise the
/// whole string is a single row.
fn template_rows(template: &str) -> Vec<&str> {
    if !template.contains(['"', '\'']) {
        let t = template.trim();
        return if t.is_empty() { Vec::new() } else { alloc::vec![t] };
    }

    let mut rows = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find(['"', '\'']) {
        let quote = rest[open..].chars().next().unwrap_or('"');
        let body = &rest[open + 1..];
        let Some(close) = body.find(quote) else {
            // Unterminated: take what remains.
            push_row(&mut rows, body);
            break;
        };
        push_row(&mut rows, &body[..close]);
        rest = &body[close + 1..];
    }
    rows
}

fn push_row<'a>(rows: &mut Vec<&'a str>, row: &'a str) {
    if !row.trim().is_empty() {
        rows.push(row);
    }
}

fn is_empty_cell(token: &str) -> bool {
    token.bytes().all(|b| b == b'.')
}
