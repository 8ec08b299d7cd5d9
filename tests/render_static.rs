use term_chart::{ChartConfig, PointStyle, Viewport, render::Style, render_static};

#[test]
fn plus_style_marks_each_close() {
    let cfg = ChartConfig::builder().style(PointStyle::Plus).build().unwrap();
    let canvas = render_static(&[1.0, 2.0, 3.0], Viewport::new(10, 20), &cfg).unwrap();
    assert_eq!(canvas.find('+'), [(1, 3), (5, 2), (8, 1)]);
    assert!(canvas.find('•').is_empty());
}

#[test]
fn fixed_range_pins_labels_to_the_edges() {
    let cfg = ChartConfig::builder().y_range(0.0..=10.0).build().unwrap();
    let canvas = render_static(&[5.0], Viewport::new(11, 30), &cfg).unwrap();
    // rows 1..=9 are the chart; 5 sits mid-way
    assert!(canvas.row_text(1).ends_with("┤10"));
    assert!(canvas.row_text(9).trim_end().ends_with("┤0"));
    assert_eq!(canvas.find('•'), [(5, 1)]);
    assert!(canvas.row_text(5).trim_end().ends_with("◀5"));
}

#[test]
fn title_is_drawn_in_reverse_video() {
    let cfg = ChartConfig::builder().title("cpu").build().unwrap();
    let canvas = render_static(&[1.0, 4.0], Viewport::new(8, 30), &cfg).unwrap();
    assert!(canvas.row_text(0).starts_with("┌─── cpu ─"));
    assert_eq!(canvas.cell(0, 5).map(|c| c.style), Some(Style::BANNER));
}

#[test]
fn ohlc_series_fills_the_bar() {
    let cfg = ChartConfig::builder().style(PointStyle::Ohlc).build().unwrap();
    let canvas = render_static(&[0.0, 10.0], Viewport::new(12, 20), &cfg).unwrap();
    // single-reading points: open == close
    assert_eq!(canvas.find('┼').len(), 2);
}
