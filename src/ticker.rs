use std::time::{Duration, Instant};

/// How often a running ticker wants to refresh the displayed time.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Elapsed-time ticker owned by a game session.
///
/// It is acquired on the first reveal and released when the game ends or the
/// session is torn down. While released, ticks do nothing.
#[derive(Debug, Default)]
pub struct Ticker {
    started: Option<Instant>,
    last_tick: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self { Self::default() }

    pub fn start_at(&mut self, now: Instant) {
        if self.started.is_some() { return; }
        self.started = Some(now);
        self.last_tick = Some(now);
        tracing::debug!("ticker started");
    }

    /// Releases the ticker. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        self.last_tick = None;
        let was_running = self.started.take().is_some();
        if was_running { tracing::debug!("ticker stopped"); }
        was_running
    }

    pub fn is_running(&self) -> bool { self.started.is_some() }

    /// Whole seconds since start, or `None` once released.
    pub fn tick_at(&mut self, now: Instant) -> Option<u64> {
        let started = self.started?;
        self.last_tick = Some(now);
        Some(now.saturating_duration_since(started).as_secs())
    }

    /// Time left until the next tick is due; `None` when not running.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        let last = self.last_tick?;
        Some(TICK_INTERVAL.saturating_sub(now.saturating_duration_since(last)))
    }
}
