//! End-to-end collage layout flows.
//!
//! Template → rects → saved snapshot → reopen on another surface → rescaled
//! pan offsets, plus the stored-layout boundary that guards the whole chain.

use std::collections::BTreeMap;

use collage_layout::*;
use serde_json::json;

fn xywh(r: &PanelRect) -> (f64, f64, f64, f64) {
    (r.x, r.y, r.width, r.height)
}

// ---- Full save / reopen flow ----

#[test]
fn reopen_on_larger_canvas_rescales_offsets() {
    let template = LayoutConfig::grid("repeat(2, 1fr)", "repeat(2, 1fr)");
    let opts = RectOptions::default();

    // Saved on 800×600 with a 1% border (8px): panels 388×288.
    let saved_canvas = Size::new(800.0, 600.0);
    let saved_border = border_px_from_percent(1.0, saved_canvas.width);
    assert_eq!(saved_border, 8.0);
    let saved_rects = compute_panel_rects(&template, saved_canvas, 4, saved_border, &opts);
    assert_eq!(saved_rects.len(), 4);
    assert_eq!(xywh(&saved_rects[3]), (404.0, 304.0, 388.0, 288.0));
    let saved = SizeSnapshot::capture(saved_canvas, &saved_rects);

    // Reopened on 1600×1200 (16px border): panels 776×576, exactly double.
    let canvas = Size::new(1600.0, 1200.0);
    let border = border_px_from_percent(1.0, canvas.width);
    let rects = compute_panel_rects(&template, canvas, 4, border, &opts);
    let ctx = ScalingContext::from_snapshots(Some(&saved), SizeSnapshot::capture(canvas, &rects));
    assert!(needs_scaling(&ctx));

    let mut transforms = BTreeMap::new();
    transforms.insert("panel-1".to_string(), PanelTransform::new(1.25, 10.0, -5.0));
    transforms.insert("panel-4".to_string(), PanelTransform::default());

    let rescaled = rescale_transforms(&transforms, &ctx).unwrap();
    assert_eq!(rescaled["panel-1"], PanelTransform::new(1.25, 20.0, -10.0));
    assert_eq!(rescaled["panel-4"], PanelTransform::default());
}

#[test]
fn reopen_on_same_canvas_keeps_transforms() {
    let template = LayoutConfig::grid("2fr 1fr", "1fr");
    let canvas = Size::new(900.0, 300.0);
    let rects = compute_panel_rects(&template, canvas, 2, 6.0, &RectOptions::default());
    let snapshot = SizeSnapshot::capture(canvas, &rects);

    let ctx = ScalingContext::from_snapshots(Some(&snapshot), snapshot.clone());
    let mut transforms = BTreeMap::new();
    transforms.insert("panel-2".to_string(), PanelTransform::new(2.0, 33.0, 12.0));

    assert!(!needs_scaling(&ctx));
    assert_eq!(rescale_transforms(&transforms, &ctx), None);
}

#[test]
fn project_without_snapshot_is_left_alone() {
    let ctx = ScalingContext::from_snapshots(None, SizeSnapshot::default());
    let mut transforms = BTreeMap::new();
    transforms.insert("panel-1".to_string(), PanelTransform::new(1.0, 5.0, 5.0));
    assert_eq!(rescale_transforms(&transforms, &ctx), None);
}

#[test]
fn summarized_dimensions_match_synthesized_rects() {
    let template = LayoutConfig::grid("1.5fr 1fr 0.5fr", "1fr 2fr");
    let canvas = Size::new(1200.0, 900.0);
    let border = border_px_from_percent(2.0, canvas.width);

    let dims = compute_panel_dimensions(&template, canvas, 2.0, 6);
    let rects = compute_panel_rects(&template, canvas, 6, border, &RectOptions::default());
    assert_eq!(dims, dimensions_from_rects(&rects));
}

// ---- Stored layout boundary ----

#[test]
fn stored_area_layout_round_trip() {
    let stored = json!({
        "gridTemplateColumns": "1fr 1fr",
        "gridTemplateRows": "1fr",
        "gridTemplateAreas": "\"a b\"",
        "areas": [{"panelId": "panel-2", "gridArea": "a"}, "b"]
    });
    let config = compatible_layout(&stored, 2).unwrap();
    assert!(matches!(config.strategy(), LayoutStrategy::AreaBased { .. }));

    let rects = compute_panel_rects(&config, Size::new(200.0, 100.0), 2, 0.0, &RectOptions::default());
    // "b" has no id and sits at position 1, where "panel-2" is already
    // claimed, so it gets the next free id.
    assert_eq!(rects.len(), 2);
    assert_eq!((rects[0].panel_id.as_str(), rects[0].x), ("panel-2", 0.0));
    assert_eq!((rects[1].panel_id.as_str(), rects[1].x), ("panel-3", 100.0));

    // Every panel keeps its own entry in a saved snapshot.
    let snapshot = SizeSnapshot::capture(Size::new(200.0, 100.0), &rects);
    assert_eq!(snapshot.panels.len(), rects.len());

    assert!(compatible_layout(&stored, 3).is_none());
}

#[test]
fn oversized_panel_count_stays_bounded() {
    let template = LayoutConfig::grid("1fr 1fr", "1fr");
    let canvas = Size::new(1000.0, 1000.0);
    let rects = compute_panel_rects(&template, canvas, usize::MAX / 4, 0.0, &RectOptions::default());
    assert_eq!(rects.len(), 2 * tracks::MAX_TRACKS);
    let dims = compute_panel_dimensions(&template, canvas, 0.0, usize::MAX);
    assert_eq!(dims.len(), 2 * tracks::MAX_TRACKS);
}

#[test]
fn stored_layout_garbage_never_escapes() {
    for candidate in [
        json!(null),
        json!(42),
        json!({"panelRects": {"x": 1}}),
        json!({"gridTemplateColumns": ["1fr"], "gridTemplateRows": "1fr"}),
    ] {
        assert!(!is_layout_compatible(&candidate, 1), "{candidate}");
        assert!(compute_panel_dimensions(&candidate, Size::new(100.0, 100.0), 0.0, 1).is_empty());
    }
}

// ---- Documented properties ----

#[test]
fn track_templates() {
    assert_eq!(parse_track_sizes(Some("repeat(3, 1fr)"), 1), vec![1.0, 1.0, 1.0]);
    assert_eq!(parse_track_sizes(Some("2fr 1fr"), 1), vec![2.0, 1.0]);
    assert_eq!(parse_track_sizes(Some(""), 4), vec![1.0; 4]);
    assert_eq!(parse_track_sizes(None, 4), vec![1.0; 4]);
}

#[test]
fn two_column_area_template() {
    let areas = parse_grid_template_areas(r#""left right" "left right""#);
    assert_eq!(
        areas["left"],
        GridAreaBounds {
            row_start: 0,
            row_end: 1,
            col_start: 0,
            col_end: 0
        }
    );
    assert_eq!(
        areas["right"],
        GridAreaBounds {
            row_start: 0,
            row_end: 1,
            col_start: 1,
            col_end: 1
        }
    );
}

#[test]
fn ratio_rects_ignore_declaration_order() {
    let forward = LayoutConfig::from_panel_rects([
        RatioRect::new(0.0, 0.0, 0.5, 1.0).panel_id("panel-1"),
        RatioRect::new(0.5, 0.0, 0.5, 1.0).panel_id("panel-2"),
    ]);
    let backward = LayoutConfig::from_panel_rects([
        RatioRect::new(0.5, 0.0, 0.5, 1.0).panel_id("panel-2"),
        RatioRect::new(0.0, 0.0, 0.5, 1.0).panel_id("panel-1"),
    ]);
    let container = Size::new(100.0, 100.0);
    let a = compute_panel_rects(&forward, container, 2, 0.0, &RectOptions::default());
    let b = compute_panel_rects(&backward, container, 2, 0.0, &RectOptions::default());

    assert_eq!(a, b);
    assert_eq!(xywh(&a[0]), (0.0, 0.0, 50.0, 100.0));
    assert_eq!(xywh(&a[1]), (50.0, 0.0, 50.0, 100.0));
}

#[test]
fn sequential_cap_at_cell_count() {
    let config = LayoutConfig::grid("1fr 1fr", "1fr");
    let opts = RectOptions::new().limit_sequential_to_grid_cells(true);
    let rects = compute_panel_rects(&config, Size::new(200.0, 100.0), 3, 0.0, &opts);
    assert_eq!(rects.len(), 2);
}

#[test]
fn synthesis_is_deterministic() {
    let config = LayoutConfig::grid("1fr 3fr", "repeat(3, 1fr)").with_areas(
        r#""hero side" "hero ." "foot foot""#,
        [AreaSlot::new("hero"), AreaSlot::new("side"), AreaSlot::new("foot")],
    );
    let run = || compute_panel_rects(&config, Size::new(1337.0, 911.0), 3, 7.0, &RectOptions::default());
    let first = run();
    assert_eq!(first.len(), 3);
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[test]
fn compatibility_rules() {
    assert!(is_layout_compatible(&json!({"panelRects": [{}, {}]}), 2));
    assert!(is_layout_compatible(
        &json!({"gridTemplateColumns": "repeat(2,1fr)", "gridTemplateRows": "repeat(2,1fr)"}),
        4
    ));
    assert!(!is_layout_compatible(
        &json!({"gridTemplateColumns": "repeat(1,1fr)", "gridTemplateRows": "repeat(1,1fr)"}),
        2
    ));
}

#[test]
fn panel_level_rescale_doubles_offset() {
    let mut saved = BTreeMap::new();
    saved.insert("panel-1".to_string(), Size::new(100.0, 80.0));
    let mut current = BTreeMap::new();
    current.insert("panel-1".to_string(), Size::new(200.0, 80.0));

    let mut transforms = BTreeMap::new();
    transforms.insert("panel-1".to_string(), PanelTransform::new(1.7, 15.0, 9.0));

    let ctx = ScalingContext::new(Size::new(500.0, 500.0))
        .saved_canvas(Size::new(500.0, 500.0))
        .saved_panels(saved.clone())
        .current_panels(current);
    let out = rescale_transforms(&transforms, &ctx).unwrap();
    assert_eq!(out["panel-1"], PanelTransform::new(1.7, 30.0, 9.0));

    let same = ScalingContext::new(Size::new(500.0, 500.0))
        .saved_canvas(Size::new(500.0, 500.0))
        .saved_panels(saved.clone())
        .current_panels(saved);
    assert_eq!(rescale_transforms(&transforms, &same), None);
}

#[test]
fn order_index_precedence() {
    assert_eq!(panel_order_index(Some(3.0), Some("panel-1"), 7), 3);
    assert_eq!(panel_order_index(None, Some("panel-5"), 7), 4);
    assert_eq!(panel_order_index(None, Some("bad"), 7), 7);
}

#[test]
fn sub_pixel_rects_are_dropped() {
    let config = LayoutConfig::from_panel_rects([
        RatioRect::new(0.0, 0.0, 0.002, 1.0),
        RatioRect::new(0.1, 0.0, 0.9, 1.0),
    ]);
    // 0.002 × 100 = 0.2px: under the 0.25px default.
    let rects = compute_panel_rects(&config, Size::new(100.0, 100.0), 2, 0.0, &RectOptions::default());
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0].index, 1);

    let strict = RectOptions::new().min_rect_size_px(90.0);
    assert!(compute_panel_rects(&config, Size::new(100.0, 100.0), 2, 0.0, &strict).is_empty());
}
