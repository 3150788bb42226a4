use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TraceEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal lost focus; treated like the pointer leaving the surface
    FocusLost,
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TraceEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TraceEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let event = match event::read() {
                Ok(CtEvent::Key(key)) => TraceEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => TraceEvent::Mouse(mouse),
                Ok(CtEvent::FocusLost) => TraceEvent::FocusLost,
                Ok(CtEvent::Resize(_, _)) => TraceEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event stream closed");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TraceEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The one-second cadence of the session clocks
    pub fn seconds() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TraceEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TraceEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TraceEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks follow a fixed schedule: a burst of pointer events does not push
/// the next tick back, so the clocks keep pace with wall time.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Cell<Instant>,
    disconnected: Cell<bool>,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Cell::new(Instant::now() + ticker.interval());
        Self {
            event_source,
            ticker,
            next_tick,
            disconnected: Cell::new(false),
        }
    }

    /// True once the event source has closed; only ticks arrive after that
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }

    /// Blocks until the next event or the tick deadline, whichever is first
    pub fn step(&self) -> TraceEvent {
        let now = Instant::now();
        let deadline = self.next_tick.get();
        if now >= deadline {
            return self.fire_tick(deadline);
        }
        match self.event_source.recv_timeout(deadline - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.fire_tick(deadline),
            Err(RecvTimeoutError::Disconnected) => {
                if !self.disconnected.replace(true) {
                    tracing::warn!("event source disconnected, running on ticks only");
                }
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                self.fire_tick(deadline)
            }
        }
    }

    fn fire_tick(&self, deadline: Instant) -> TraceEvent {
        let interval = self.ticker.interval();
        let mut next = deadline + interval;
        // After a long stall, resume the schedule from now instead of
        // replaying every missed tick.
        let now = Instant::now();
        if next + interval < now {
            next = now + interval;
        }
        self.next_tick.set(next);
        TraceEvent::Tick
    }
}
