//! The control loop: read → aggregate → solve → draw.
//!
//! Everything here runs on one thread. Input, resize and key events arrive
//! through an [`EventSource`]; the buffer is only mutated while handling an
//! event and the layout/render pass always runs after that mutation.

use std::{io, time::Instant};

use crate::{
    core::{
        aggregate::{Aggregator, Decision, Wait},
        config::ChartConfig,
        constants::CLOSED_SUFFIX,
        data::parse_owned_line,
        error::ChartError,
        layout::{Layout, Viewport, solve},
        ring::SampleBuffer,
    },
    render::{ChartRenderer, Screen},
};

/// What woke the loop up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// One input line, newline included if there was one.
    Line(Vec<u8>),
    /// The coalescing deadline passed without input.
    Timeout,
    /// The terminal changed size.
    Resize,
    /// Input (or, in hold mode, the keyboard) is exhausted.
    Eof,
    /// A key was pressed.
    Key,
}

/// Source of [`Event`]s for [`Session::run`].
pub trait EventSource {
    /// Block according to `wait` and return the next event.
    /// `Wait::Until` returns [`Event::Timeout`] once the deadline passes.
    ///
    /// # Errors
    /// Failures of the underlying input.
    fn next_event(&mut self, wait: Wait) -> io::Result<Event>;

    /// Start delivering [`Event::Key`]; called when entering hold mode.
    ///
    /// # Errors
    /// Failures setting up keyboard input.
    fn watch_keys(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Counters reported when the session ends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub readings: u64,
    pub dropped: u64,
    pub frames: u64,
}

/// Owns the buffer, the aggregator and the screen for one chart.
pub struct Session<S: Screen> {
    config: ChartConfig,
    title: Option<String>,
    buffer: SampleBuffer,
    aggregator: Aggregator,
    renderer: ChartRenderer,
    screen: S,
    stats: Stats,
}

impl<S: Screen> Session<S> {
    /// Size the buffer for the screen's current width.
    ///
    /// # Errors
    /// Buffer allocation failure or an invalid capacity.
    pub fn new(config: ChartConfig, mut screen: S) -> Result<Self, ChartError> {
        let viewport = screen.refresh_size();
        let mut buffer = SampleBuffer::new(config.capacity)?;
        buffer.ensure_capacity(viewport.cols)?;
        Ok(Self {
            title: config.title.clone(),
            aggregator: Aggregator::new(config.coalesce),
            renderer: ChartRenderer::new(config.style),
            config,
            buffer,
            screen,
            stats: Stats::default(),
        })
    }

    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
    #[inline]
    #[must_use]
    pub fn screen(&self) -> &S {
        &self.screen
    }
    #[inline]
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }
    #[inline]
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Layout for the current buffer and screen size.
    #[must_use]
    pub fn layout(&self) -> Layout {
        solve(&self.buffer, self.screen.viewport(), self.config.y_range)
    }

    /// Parse one line and aggregate it. Malformed lines are dropped.
    pub fn ingest_line(&mut self, line: Vec<u8>, now: Instant) -> Option<Decision> {
        match parse_owned_line(line) {
            Ok(value) => {
                self.stats.readings += 1;
                Some(self.aggregator.ingest(&mut self.buffer, value, now))
            }
            Err(e) => {
                self.stats.dropped += 1;
                tracing::debug!(error = %e, "dropped input line");
                None
            }
        }
    }

    /// Solve, draw and present one frame.
    ///
    /// # Errors
    /// Terminal write failures.
    pub fn redraw(&mut self) -> io::Result<()> {
        let layout = self.layout();
        self.renderer
            .draw(&mut self.screen, &self.buffer, &layout, self.title.as_deref());
        self.screen.present()?;
        self.stats.frames += 1;
        Ok(())
    }

    /// Adopt the new terminal size, grow the buffer to match and redraw.
    ///
    /// # Errors
    /// Buffer allocation or terminal write failures.
    pub fn on_resize(&mut self) -> Result<(), ChartError> {
        let Viewport { rows, cols } = self.screen.refresh_size();
        tracing::debug!(rows, cols, "terminal resized");
        self.buffer.ensure_capacity(cols)?;
        self.redraw()?;
        Ok(())
    }

    /// Run until end of input (and, with `hold_on_eof`, until a key press).
    ///
    /// # Errors
    /// Input, terminal or allocation failures.
    pub fn run<E: EventSource>(&mut self, events: &mut E) -> Result<(), ChartError> {
        self.redraw()?;
        loop {
            if self.aggregator.is_expired(Instant::now()) {
                self.aggregator.close();
                self.redraw()?;
                continue;
            }
            match events.next_event(self.aggregator.wait())? {
                Event::Line(line) => {
                    self.ingest_line(line, Instant::now());
                }
                Event::Timeout => {
                    self.aggregator.close();
                    self.redraw()?;
                }
                Event::Resize => self.on_resize()?,
                Event::Eof => {
                    if self.aggregator.close() {
                        self.redraw()?;
                    }
                    break;
                }
                Event::Key => {}
            }
        }
        tracing::debug!(stats = ?self.stats, "input exhausted");

        if self.config.hold_on_eof {
            self.hold(events)?;
        }
        Ok(())
    }

    /// Keep the final chart on screen until a key press.
    fn hold<E: EventSource>(&mut self, events: &mut E) -> Result<(), ChartError> {
        let base = self.title.take().unwrap_or_default();
        self.title = Some(format!("{base}{CLOSED_SUFFIX}").trim_start().to_owned());
        tracing::debug!(title = ?self.title, "holding final chart");
        events.watch_keys()?;
        self.redraw()?;
        loop {
            match events.next_event(Wait::Block)? {
                Event::Resize => self.on_resize()?,
                Event::Key | Event::Eof => break,
                Event::Line(_) | Event::Timeout => {}
            }
        }
        Ok(())
    }
}
