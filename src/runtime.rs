use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the main loop reacts to.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where key presses and resizes come from.
pub trait AppEventSource: Send + 'static {
    /// Wait at most `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                // key releases would double every keystroke on Windows
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("terminal event stream closed: {e}");
                    break;
                }
            };
            if tx.send(ev).is_err() {
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

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for headless runs.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Hands the loop one event per step; an idle interval becomes a tick.
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Measures wall-clock time between loop iterations; the trainer only ever
/// sees these deltas.
#[derive(Debug)]
pub struct Clock {
    last: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous call (or since construction).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, Flow};
    use crate::round::Phase;
    use crate::settings::Settings;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn runner_feeds_ticks_and_keys_to_the_app() {
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        let mut app = App::new(Settings::default(), StdRng::seed_from_u64(3));
        app.start();

        // nothing queued: a tick, and the round is still preparing
        assert!(matches!(runner.step(), AppEvent::Tick));
        app.on_elapsed(Duration::from_millis(1)).unwrap();
        assert_eq!(app.trainer.phase(), Phase::Prepare);

        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        let AppEvent::Key(key) = runner.step() else {
            panic!("expected the queued key");
        };
        assert_eq!(app.on_key(key).unwrap(), Flow::Quit);
        assert_eq!(app.trainer.phase(), Phase::Exited);

        // a closed source degrades to ticks
        drop(tx);
        assert!(matches!(runner.step(), AppEvent::Tick));
    }

    #[test]
    fn clock_laps_are_monotonic() {
        let mut clock = Clock::new();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.lap() >= Duration::from_millis(5));
        assert!(clock.lap() < Duration::from_secs(1));
    }
}
