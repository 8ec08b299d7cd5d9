//! End-to-end runs of the control loop against a scripted event source and
//! an off-screen terminal.

use std::{collections::VecDeque, io, time::Duration};

use term_chart::{
    CapacityPolicy, ChartConfig, Event, EventSource, Point, Session, Viewport, Wait,
    render::{Canvas, Screen, Style, Surface},
};

/// Replays a fixed script; reports end of input once it runs dry.
#[derive(Default)]
struct ScriptedEvents {
    script: VecDeque<Event>,
    waits: Vec<Wait>,
    keys_watched: bool,
}

impl ScriptedEvents {
    fn new(script: impl IntoIterator<Item = Event>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, wait: Wait) -> io::Result<Event> {
        self.waits.push(wait);
        Ok(self.script.pop_front().unwrap_or(Event::Eof))
    }

    fn watch_keys(&mut self) -> io::Result<()> {
        self.keys_watched = true;
        Ok(())
    }
}

/// Canvas whose size changes when the test says so.
struct FakeScreen {
    canvas: Canvas,
    pending: VecDeque<Viewport>,
    presented: usize,
}

impl FakeScreen {
    fn new(viewport: Viewport) -> Self {
        Self {
            canvas: Canvas::new(viewport),
            pending: VecDeque::new(),
            presented: 0,
        }
    }

    fn then_resize_to(mut self, viewport: Viewport) -> Self {
        self.pending.push_back(viewport);
        self
    }
}

impl Surface for FakeScreen {
    fn viewport(&self) -> Viewport {
        self.canvas.viewport()
    }
    fn clear(&mut self) {
        self.canvas.clear();
    }
    fn put_char(&mut self, row: usize, col: usize, ch: char, style: Style) {
        self.canvas.put_char(row, col, ch, style);
    }
}

impl Screen for FakeScreen {
    fn refresh_size(&mut self) -> Viewport {
        // the first call comes from Session::new and keeps the start size
        if self.presented > 0 {
            if let Some(v) = self.pending.pop_front() {
                self.canvas.resize(v);
            }
        }
        self.canvas.viewport()
    }
    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

fn line(s: &str) -> Event {
    Event::Line(format!("{s}\n").into_bytes())
}

/// A window long enough that only explicit timeouts close points.
fn slow_config() -> term_chart::ChartConfigBuilder {
    ChartConfig::builder().coalesce(Duration::from_secs(60))
}

#[test]
fn three_readings_three_points() {
    let mut session = Session::new(
        slow_config().build().unwrap(),
        FakeScreen::new(Viewport::new(10, 20)),
    )
    .unwrap();
    let mut events = ScriptedEvents::new([
        line("1"),
        Event::Timeout,
        line("2"),
        Event::Timeout,
        line("3"),
        Event::Timeout,
    ]);
    session.run(&mut events).unwrap();

    let closes: Vec<f64> = session.buffer().iter().map(|p| p.close).collect();
    assert_eq!(closes, [1.0, 2.0, 3.0]);
    let canvas = &session.screen().canvas;
    assert_eq!(canvas.find('•'), [(1, 3), (5, 2), (8, 1)]);
    assert_eq!(canvas.row_text(1).trim_end(), "│  •              ◀3");
    assert_eq!(canvas.row_text(8).trim_end(), "│•                ┤1");
    // open point => timed wait, otherwise block
    assert_eq!(events.waits[0], Wait::Block);
    assert!(matches!(events.waits[1], Wait::Until(_)));
    assert!(!events.keys_watched);
}

#[test]
fn readings_inside_one_window_fold() {
    let mut session = Session::new(
        slow_config().build().unwrap(),
        FakeScreen::new(Viewport::new(10, 20)),
    )
    .unwrap();
    let mut events = ScriptedEvents::new([line("5"), line("7")]);
    session.run(&mut events).unwrap();

    assert_eq!(session.buffer().len(), 1);
    assert_eq!(
        session.buffer().last().copied(),
        Some(Point {
            open: 5.0,
            high: 7.0,
            low: 5.0,
            close: 7.0
        })
    );
}

#[test]
fn malformed_line_is_dropped() {
    let mut session = Session::new(
        slow_config().build().unwrap(),
        FakeScreen::new(Viewport::new(10, 20)),
    )
    .unwrap();
    let mut events = ScriptedEvents::new([
        line("4"),
        Event::Timeout,
        line("abc"),
        line("  −2.5 "),
        Event::Timeout,
    ]);
    session.run(&mut events).unwrap();

    let closes: Vec<f64> = session.buffer().iter().map(|p| p.close).collect();
    assert_eq!(closes, [4.0, -2.5]);
    assert_eq!(session.stats().readings, 2);
    assert_eq!(session.stats().dropped, 1);
}

#[test]
fn resize_grows_buffer_and_keeps_order() {
    let screen = FakeScreen::new(Viewport::new(10, 20)).then_resize_to(Viewport::new(30, 100));
    let mut session = Session::new(slow_config().build().unwrap(), screen).unwrap();
    assert_eq!(session.buffer().capacity(), 32);

    let mut script = Vec::new();
    for i in 0..40 {
        script.push(line(&i.to_string()));
        script.push(Event::Timeout);
    }
    script.push(Event::Resize);
    script.push(line("40"));
    let mut events = ScriptedEvents::new(script);
    session.run(&mut events).unwrap();

    let buf = session.buffer();
    assert_eq!(buf.capacity(), 128);
    let closes: Vec<f64> = buf.iter().map(|p| p.close).collect();
    let expected: Vec<f64> = (8..=40).map(f64::from).collect();
    assert_eq!(closes, expected);
    assert_eq!(session.screen().viewport(), Viewport::new(30, 100));
}

#[test]
fn fixed_capacity_ignores_resize() {
    let config = slow_config()
        .capacity(CapacityPolicy::Fixed(10))
        .build()
        .unwrap();
    let screen = FakeScreen::new(Viewport::new(10, 20)).then_resize_to(Viewport::new(10, 200));
    let mut session = Session::new(config, screen).unwrap();
    let mut events = ScriptedEvents::new([line("1"), Event::Resize]);
    session.run(&mut events).unwrap();
    assert_eq!(session.buffer().capacity(), 16);
}

#[test]
fn file_input_holds_final_chart_until_key() {
    let config = slow_config()
        .title("data.txt")
        .hold_on_eof(true)
        .build()
        .unwrap();
    let screen = FakeScreen::new(Viewport::new(10, 40)).then_resize_to(Viewport::new(12, 50));
    let mut session = Session::new(config, screen).unwrap();
    let mut events = ScriptedEvents::new([
        line("4"),
        Event::Eof,
        Event::Resize,
        Event::Key,
        line("99"),
    ]);
    session.run(&mut events).unwrap();

    assert!(events.keys_watched);
    // the line after the key press is never consumed
    assert_eq!(events.script.len(), 1);
    assert_eq!(session.title(), Some("data.txt (closed)"));
    let screen = session.screen();
    assert_eq!(screen.canvas.viewport(), Viewport::new(12, 50));
    assert!(screen.canvas.row_text(0).contains(" data.txt (closed) "));
    // startup, end of input, hold, resize
    assert_eq!(screen.presented, 4);
    assert_eq!(session.buffer().len(), 1);
}

#[test]
fn stdin_input_ends_at_eof() {
    let mut session = Session::new(
        slow_config().build().unwrap(),
        FakeScreen::new(Viewport::new(10, 20)),
    )
    .unwrap();
    let mut events = ScriptedEvents::new([line("1"), Event::Eof, Event::Key]);
    session.run(&mut events).unwrap();
    assert!(!events.keys_watched);
    assert_eq!(events.script.len(), 1);
}

#[test]
fn single_point_labels_share_its_row() {
    let mut session = Session::new(
        slow_config().build().unwrap(),
        FakeScreen::new(Viewport::new(10, 20)),
    )
    .unwrap();
    let mut events = ScriptedEvents::new([line("42")]);
    session.run(&mut events).unwrap();

    let canvas = &session.screen().canvas;
    let dots = canvas.find('•');
    assert_eq!(dots.len(), 1);
    let (row, _) = dots[0];
    assert!(canvas.row_text(row).contains("◀42"));
    assert!(canvas.find('┤').is_empty());
    assert!(canvas.cell(row, 17).is_some_and(|c| c.style == Style::BOLD));
}

#[test]
fn empty_input_draws_only_the_frame() {
    let mut session = Session::new(
        ChartConfig::builder().title("idle").build().unwrap(),
        FakeScreen::new(Viewport::new(6, 20)),
    )
    .unwrap();
    let mut events = ScriptedEvents::new([]);
    session.run(&mut events).unwrap();

    let canvas = &session.screen().canvas;
    assert!(canvas.row_text(0).starts_with("┌─── idle ─"));
    assert!(canvas.row_text(5).starts_with("└─"));
    assert!(canvas.find('•').is_empty());
    assert_eq!(session.screen().presented, 1);
}
