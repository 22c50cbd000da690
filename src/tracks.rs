//! Grid track templates and track pixel math.
//!
//! A track template is the subset of CSS `grid-template-columns` syntax the
//! collage templates use: `repeat(N, Xfr)` or a list of `Xfr` tokens. Only
//! relative (fractional) weights exist here; fixed-size tracks are not
//! supported and are ignored when they appear in a token list.
//!
//! # Example
//!
//! ```
//! use collage_layout::tracks::{parse_track_sizes, TrackLayout};
//!
//! let weights = parse_track_sizes(Some("2fr 1fr"), 1);
//! assert_eq!(weights, vec![2.0, 1.0]);
//!
//! // 310px available, one 10px gap between the two tracks.
//! let tracks = TrackLayout::resolve(&weights, 0.0, 310.0, 10.0);
//! assert_eq!(tracks.sizes, vec![200.0, 100.0]);
//! assert_eq!(tracks.offsets, vec![0.0, 210.0]);
//! ```

use alloc::vec;
use alloc::vec::Vec;

/// Upper bound on the number of tracks a single template may produce.
pub const MAX_TRACKS: usize = 256;

/// Parse a track template into relative weights.
///
/// Total: never fails and never returns an empty list. Empty, missing, or
/// unparseable templates yield `max(1, fallback_count)` tracks of weight 1.
/// Every returned weight is finite and `> 0`.
pub fn parse_track_sizes(template: Option<&str>, fallback_count: usize) -> Vec<f64> {
    match template.and_then(parse_track_weights) {
        Some(weights) => weights,
        None => vec![1.0; fallback_count.clamp(1, MAX_TRACKS)],
    }
}

/// Strict form of [`parse_track_sizes`]: `None` when the template has no
/// recognizable tracks.
pub fn parse_track_weights(template: &str) -> Option<Vec<f64>> {
    let t = template.trim();
    if t.is_empty() {
        return None;
    }
    if has_repeat_prefix(t) {
        return strip_repeat(t).and_then(parse_repeat);
    }

    let weights: Vec<f64> = t
        .split_whitespace()
        .filter_map(parse_fr_token)
        .take(MAX_TRACKS)
        .collect();
    if weights.is_empty() { None } else { Some(weights) }
}

/// Number of tracks a template declares, 0 when unparseable.
pub fn count_tracks(template: &str) -> usize {
    parse_track_weights(template).map_or(0, |w| w.len())
}

fn has_repeat_prefix(t: &str) -> bool {
    t.get(..7).is_some_and(|head| head.eq_ignore_ascii_case("repeat("))
}

/// Strip `repeat(` … `)` and return the argument list.
fn strip_repeat(t: &str) -> Option<&str> {
    let rest = t.get(7..)?;
    let close = rest.rfind(')')?;
    Some(&rest[..close])
}

/// `N, Xfr` → N copies of X. A missing or non-`fr` size means weight 1.
fn parse_repeat(args: &str) -> Option<Vec<f64>> {
    let (count, size) = match args.split_once(',') {
        Some((c, s)) => (c.trim(), s.trim()),
        None => (args.trim(), ""),
    };
    let n: usize = count.parse().ok().filter(|&n| n >= 1)?;
    let weight = parse_fr_token(size).unwrap_or(1.0);
    Some(vec![weight; n.min(MAX_TRACKS)])
}

/// Parse a single `Xfr` token. Bare `fr` is 1; a zero, negative, or
/// non-finite numerator is also treated as 1.
fn parse_fr_token(token: &str) -> Option<f64> {
    let token = token.trim();
    let split = token.len().checked_sub(2)?;
    let (number, unit) = (token.get(..split)?, token.get(split..)?);
    if !unit.eq_ignore_ascii_case("fr") {
        return None;
    }
    if number.is_empty() {
        return Some(1.0);
    }
    let v: f64 = number.parse().ok()?;
    Some(if v.is_finite() && v > 0.0 { v } else { 1.0 })
}

/// Pixel sizes and start offsets for a list of weighted tracks.
///
/// The one place where weights become pixels. Both the rect synthesizer and
/// the dimension summarizer go through here.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackLayout {
    /// Pixel size of each track.
    pub sizes: Vec<f64>,
    /// Start offset of each track (includes `start` and preceding gaps).
    pub offsets: Vec<f64>,
    /// Gap between adjacent tracks.
    pub gap: f64,
}

impl TrackLayout {
    /// Distribute `available` pixels over `weights`, leaving `gap` pixels
    /// between adjacent tracks, starting at `start`.
    ///
    /// Sizes come out negative when the gaps alone exceed `available`;
    /// callers drop such rects.
    pub fn resolve(weights: &[f64], start: f64, available: f64, gap: f64) -> Self {
        let n = weights.len();
        let total: f64 = weights.iter().sum();
        let gaps = n.saturating_sub(1) as f64 * gap;
        let per_unit = if total > 0.0 {
            (available - gaps) / total
        } else {
            0.0
        };

        let sizes: Vec<f64> = weights.iter().map(|w| w * per_unit).collect();
        let mut offsets = Vec::with_capacity(n);
        let mut pos = start;
        for size in &sizes {
            offsets.push(pos);
            pos += size + gap;
        }

        Self {
            sizes,
            offsets,
            gap,
        }
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether there are no tracks.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Offset and extent of the inclusive track range `first..=last`.
    ///
    /// The extent adds one gap per interior boundary. `last` is clipped to
    /// the final track; `None` when `first` is out of range or `last < first`.
    pub fn span(&self, first: usize, last: usize) -> Option<(f64, f64)> {
        if first >= self.len() || last < first {
            return None;
        }
        let last = last.min(self.len() - 1);
        let extent: f64 = self.sizes[first..=last].iter().sum::<f64>()
            + (last - first) as f64 * self.gap;
        Some((self.offsets[first], extent))
    }
}
