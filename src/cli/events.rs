//! Terminal event source: helper threads feed one channel, the session
//! consumes it.
//!
//! * `chart-input` reads lines; it owns the partial-line accumulator, so a
//!   resize never loses half a line.
//! * a `SIGWINCH` watcher (Unix) turns resizes into [`Event::Resize`].
//! * `chart-keys` (hold mode only) reads single key presses from stdin.

use std::{
    io::{self, BufRead, BufReader, Read},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    time::Instant,
};

#[cfg(unix)]
use signal_hook::{consts::signal::SIGWINCH, iterator::Signals};

use crate::{
    core::aggregate::Wait,
    session::{Event, EventSource},
};

// Resize notifications are produced via SIGWINCH on Unix, on a dedicated
// signal thread.
#[cfg(unix)]
struct ResizeSignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl ResizeSignalGuard {
    fn new(tx: Sender<Event>) -> io::Result<Self> {
        let mut signals = Signals::new([SIGWINCH]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = thread::Builder::new()
            .name("chart-resize".into())
            .spawn(move || {
                for _ in signals.forever() {
                    if tx.send(Event::Resize).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for ResizeSignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn spawn_reader(input: Box<dyn Read + Send>, tx: Sender<Event>) -> io::Result<()> {
    thread::Builder::new()
        .name("chart-input".into())
        .spawn(move || {
            let mut rdr = BufReader::new(input);
            let mut line = Vec::with_capacity(64);
            loop {
                match rdr.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Event::Line(std::mem::take(&mut line))).is_err() {
                            return;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "input read failed");
                        break;
                    }
                }
            }
            let _ = tx.send(Event::Eof);
        })?;
    Ok(())
}

fn spawn_keys(tx: Sender<Event>) -> io::Result<()> {
    thread::Builder::new()
        .name("chart-keys".into())
        .spawn(move || {
            let mut byte = [0u8; 1];
            let mut stdin = io::stdin().lock();
            loop {
                match stdin.read(&mut byte) {
                    Ok(0) => {
                        let _ = tx.send(Event::Eof);
                        return;
                    }
                    Ok(_) => {
                        let _ = tx.send(Event::Key);
                        return;
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(_) => {
                        let _ = tx.send(Event::Eof);
                        return;
                    }
                }
            }
        })?;
    Ok(())
}

/// [`EventSource`] backed by real input, signals and the keyboard.
pub struct TerminalEvents {
    tx: Sender<Event>,
    rx: Receiver<Event>,
    keys: bool,
    #[cfg(unix)]
    _resize: ResizeSignalGuard,
}

impl TerminalEvents {
    /// Start reading `input` and watching for resizes.
    ///
    /// # Errors
    /// Thread or signal-handler setup failure.
    pub fn spawn(input: Box<dyn Read + Send>) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        spawn_reader(input, tx.clone())?;
        Ok(Self {
            #[cfg(unix)]
            _resize: ResizeSignalGuard::new(tx.clone())?,
            tx,
            rx,
            keys: false,
        })
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self, wait: Wait) -> io::Result<Event> {
        let event = match wait {
            Wait::Block => self.rx.recv().ok(),
            Wait::Until(deadline) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                match self.rx.recv_timeout(timeout) {
                    Ok(e) => Some(e),
                    Err(RecvTimeoutError::Timeout) => Some(Event::Timeout),
                    Err(RecvTimeoutError::Disconnected) => None,
                }
            }
        };
        // every sender gone: nothing more can ever arrive
        Ok(event.unwrap_or(Event::Eof))
    }

    fn watch_keys(&mut self) -> io::Result<()> {
        if !self.keys {
            spawn_keys(self.tx.clone())?;
            self.keys = true;
        }
        Ok(())
    }
}
