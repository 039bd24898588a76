use commit_plots::chart::{cursors_per_edit_chart, edits_per_commit_chart};
use commit_plots::layout::{
    layout, nice_step, numeric_ticks, x_limits, x_ticks, y_limits, Limits, FIGURE_HEIGHT,
    FIGURE_WIDTH,
};
use commit_plots::layout::Tick;
use commit_plots::model::{Element, StatsDocument, XAxis};
use commit_plots::render::to_typst_source;
use commit_plots::stats::{bucketed_cursor_table, load_stats, sorted_edit_table};
use pretty_assertions::assert_eq;

fn doc(json: &str) -> StatsDocument {
    load_stats(json.as_bytes()).unwrap()
}

fn rects(elements: &[Element]) -> Vec<(f64, f64, f64, f64)> {
    elements
        .iter()
        .filter_map(|e| match e {
            Element::Rect { x, y, width, height } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .collect()
}

fn tick_labels(ticks: &[Tick]) -> Vec<&str> {
    ticks.iter().map(|t| t.label.as_str()).collect()
}

fn all_finite(elements: &[Element]) -> bool {
    elements.iter().all(|e| match e {
        Element::Rect { x, y, width, height } | Element::Text { x, y, width, height, .. } => {
            [x, y, width, height].iter().all(|v| v.is_finite())
        }
        Element::Line { x1, y1, x2, y2 } => [x1, y1, x2, y2].iter().all(|v| v.is_finite()),
    })
}

#[test]
fn edits_chart_keeps_sparse_positions() {
    let doc = doc(r#"{"commitsByNumberOfEdits": {"1": 5, "3": 2}, "editsByCursors": {}}"#);
    let chart = edits_per_commit_chart(&sorted_edit_table(&doc).unwrap());

    assert_eq!(chart.x_axis, XAxis::Numeric);
    assert_eq!(chart.origin, 1);
    let bars: Vec<(f64, f64)> = chart.bars.iter().map(|b| (b.position, b.height)).collect();
    assert_eq!(bars, vec![(0.0, 5.0), (2.0, 2.0)]);
    assert_eq!(tick_labels(&x_ticks(&chart, x_limits(&chart))), vec!["1", "2", "3"]);

    let figure = layout(&chart);
    let r = rects(&figure.elements);
    assert_eq!(r.len(), 2);
    // The gap at x=2 is wider than a bar.
    let gap = r[1].0 - (r[0].0 + r[0].2);
    assert!(gap > r[0].2);
    // Taller bar reaches higher on the page.
    assert!(r[0].1 < r[1].1);
    assert!(r[0].3 > r[1].3);
}

#[test]
fn cursor_chart_has_ten_bars_with_zero_height_for_missing() {
    let doc = doc(r#"{"commitsByNumberOfEdits": {}, "editsByCursors": {"2": 10, ">10": 1}}"#);
    let chart = cursors_per_edit_chart(&bucketed_cursor_table(&doc));

    assert_eq!(chart.x_axis, XAxis::Categorical);
    let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["2", "3", "4", "5", "6", "7", "8", "9", "10", ">10"]);
    let heights: Vec<f64> = chart.bars.iter().map(|b| b.height).collect();
    assert_eq!(heights, vec![10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

    let figure = layout(&chart);
    let r = rects(&figure.elements);
    assert_eq!(r.len(), 10);
    assert!(r[1..9].iter().all(|(_, _, _, h)| *h == 0.0));
    assert!(r.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn figure_is_five_by_two_inches_and_stays_on_page() {
    let doc = doc(
        r#"{"commitsByNumberOfEdits": {"1": 12345, "250": 3}, "editsByCursors": {"5": 7}}"#,
    );
    for chart in [
        edits_per_commit_chart(&sorted_edit_table(&doc).unwrap()),
        cursors_per_edit_chart(&bucketed_cursor_table(&doc)),
    ] {
        let figure = layout(&chart);
        assert_eq!((figure.width, figure.height), (360.0, 144.0));
        for (x, y, w, h) in rects(&figure.elements) {
            assert!(x >= 0.0 && x + w <= FIGURE_WIDTH);
            assert!(y >= 0.0 && y + h <= FIGURE_HEIGHT);
        }
    }
}

#[test]
fn empty_and_all_zero_charts_get_unit_axes() {
    let doc = doc(r#"{"commitsByNumberOfEdits": {}, "editsByCursors": {}}"#);

    let edits = edits_per_commit_chart(&sorted_edit_table(&doc).unwrap());
    assert_eq!(x_limits(&edits), Limits { lo: 0.0, hi: 1.0 });
    assert_eq!(y_limits(&edits), Limits { lo: 0.0, hi: 1.0 });
    assert!(rects(&layout(&edits).elements).is_empty());

    let cursors = cursors_per_edit_chart(&bucketed_cursor_table(&doc));
    assert_eq!(y_limits(&cursors), Limits { lo: 0.0, hi: 1.0 });
    assert_eq!(rects(&layout(&cursors).elements).len(), 10);
}

#[test]
fn ticks_use_integer_nice_steps() {
    assert_eq!(nice_step(0.5, 6), 1.0);
    assert_eq!(nice_step(10.5, 6), 5.0);
    assert_eq!(nice_step(1050.0, 6), 500.0);

    let ticks = numeric_ticks(Limits { lo: 0.0, hi: 10.5 }, 6, 0);
    assert_eq!(tick_labels(&ticks), vec!["0", "5", "10"]);
}

#[test]
fn typst_source_places_labels_and_bars() {
    let doc = doc(r#"{"commitsByNumberOfEdits": {}, "editsByCursors": {">10": 4}}"#);
    let figure = layout(&cursors_per_edit_chart(&bucketed_cursor_table(&doc)));
    let source = to_typst_source(&figure);

    assert!(source.starts_with("#set page(width: 360.00pt, height: 144.00pt, margin: 0pt)"));
    assert!(source.contains(r#"text(size: 7.00pt, ">10")"#));
    assert!(source.contains(r#""Number of cursors""#));
    assert!(source.contains("rotate(-90deg, box("));
    assert!(source.contains(r#"text(size: 8.00pt, "Number of edits")"#));
    assert_eq!(source.matches("rect(").count(), 10);
}

#[test]
fn layout_is_deterministic() {
    let doc = doc(r#"{"commitsByNumberOfEdits": {"2": 3, "9": 1}, "editsByCursors": {}}"#);
    let chart = edits_per_commit_chart(&sorted_edit_table(&doc).unwrap());
    assert_eq!(to_typst_source(&layout(&chart)), to_typst_source(&layout(&chart)));
}

#[test]
fn huge_edit_counts_lay_out_with_exact_labels() {
    for key in ["100000000000000000", "18446744073709551615"] {
        let json = format!(r#"{{"commitsByNumberOfEdits": {{"{key}": 3}}, "editsByCursors": {{}}}}"#);
        let chart = edits_per_commit_chart(&sorted_edit_table(&doc(&json)).unwrap());

        assert_eq!(tick_labels(&x_ticks(&chart, x_limits(&chart))), vec![key]);
        let figure = layout(&chart);
        assert!(all_finite(&figure.elements), "non-finite coordinates for {key}");
        assert!(!to_typst_source(&figure).contains("NaN"));
        assert_eq!(rects(&figure.elements).len(), 1);
    }
}

#[test]
fn sparse_huge_edit_counts_keep_distinct_bars() {
    let doc = doc(
        r#"{"commitsByNumberOfEdits": {"100000000000000000": 1, "100000000000000002": 2}, "editsByCursors": {}}"#,
    );
    let chart = edits_per_commit_chart(&sorted_edit_table(&doc).unwrap());
    let figure = layout(&chart);

    assert!(all_finite(&figure.elements));
    let r = rects(&figure.elements);
    assert_eq!(r.len(), 2);
    assert!(r[0].0 + r[0].2 < r[1].0);
    assert_eq!(
        tick_labels(&x_ticks(&chart, x_limits(&chart))),
        vec!["100000000000000000", "100000000000000001", "100000000000000002"]
    );
}

#[test]
fn y_ticks_near_u64_max_are_exact_and_distinct() {
    let doc = doc(
        r#"{"commitsByNumberOfEdits": {"1": 18446744073709551615}, "editsByCursors": {}}"#,
    );
    let chart = edits_per_commit_chart(&sorted_edit_table(&doc).unwrap());

    let ticks = numeric_ticks(y_limits(&chart), 6, 0);
    assert_eq!(
        tick_labels(&ticks),
        vec!["0", "5000000000000000000", "10000000000000000000", "15000000000000000000"]
    );
    assert!(all_finite(&layout(&chart).elements));
}
