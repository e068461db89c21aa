//! Fixed-period game clock and the one-shot fed indicator timer
//!
//! Both timers live in one owned handle so a session can tear them down
//! together. Nothing here runs in the background: the owner awaits
//! [`GameClock::next_event`] from its select loop, so a stopped clock simply
//! never yields another tick.

use std::future;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at, sleep_until};
use tracing::{debug, warn};

/// Something the clock wants the game to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Advance the simulation by one step
    Tick,
    /// The fed indicator raised during `session` should be cleared
    FedIndicatorExpired { session: u64 },
}

pub struct GameClock {
    period: Duration,
    ticker: Option<Interval>,
    fed_expiry: Option<(u64, Instant)>,
}

impl GameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ticker: None,
            fed_expiry: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start ticking; the first tick lands one full period from now.
    /// Returns false (and keeps the existing schedule) if already running.
    pub fn start(&mut self) -> bool {
        if self.ticker.is_some() {
            warn!("game clock already running, start ignored");
            return false;
        }

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
        debug!(period = ?self.period, "game clock started");
        true
    }

    /// Stop ticking. Returns false if the clock was not running.
    pub fn stop(&mut self) -> bool {
        if self.ticker.take().is_none() {
            return false;
        }
        debug!("game clock stopped");
        true
    }

    /// Arrange for a [`ClockEvent::FedIndicatorExpired`] at `at`, replacing
    /// any earlier pending expiry.
    pub fn schedule_fed_expiry(&mut self, session: u64, at: Instant) {
        self.fed_expiry = Some((session, at));
    }

    pub fn cancel_fed_expiry(&mut self) {
        self.fed_expiry = None;
    }

    pub fn has_pending_fed_expiry(&self) -> bool {
        self.fed_expiry.is_some()
    }

    /// Wait for the next event. Pends forever when nothing is scheduled.
    ///
    /// Cancel safe: dropping the future loses no tick and no expiry.
    pub async fn next_event(&mut self) -> ClockEvent {
        let fed_expiry = self.fed_expiry;
        let event = tokio::select! {
            _ = next_tick(self.ticker.as_mut()) => ClockEvent::Tick,
            session = expiry(fed_expiry) => ClockEvent::FedIndicatorExpired { session },
        };

        if let ClockEvent::FedIndicatorExpired { .. } = event {
            self.fed_expiry = None;
        }
        event
    }
}

async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => future::pending::<()>().await,
    }
}

async fn expiry(pending: Option<(u64, Instant)>) -> u64 {
    match pending {
        Some((session, at)) => {
            sleep_until(at).await;
            session
        }
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const PERIOD: Duration = Duration::from_millis(180);

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut clock = GameClock::new(PERIOD);
        let t0 = Instant::now();
        assert!(clock.start());

        assert_eq!(clock.next_event().await, ClockEvent::Tick);
        assert_eq!(Instant::now() - t0, PERIOD);
        assert_eq!(clock.next_event().await, ClockEvent::Tick);
        assert_eq!(Instant::now() - t0, PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_schedule() {
        let mut clock = GameClock::new(PERIOD);
        let t0 = Instant::now();
        assert!(clock.start());
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(!clock.start());

        clock.next_event().await;
        assert_eq!(Instant::now() - t0, PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_clock_never_ticks() {
        let mut clock = GameClock::new(PERIOD);
        clock.start();
        clock.next_event().await;
        assert!(clock.stop());
        assert!(!clock.stop());
        assert!(!clock.is_running());

        let waited = timeout(Duration::from_secs(10), clock.next_event()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fed_expiry_fires_once() {
        let mut clock = GameClock::new(PERIOD);
        let t0 = Instant::now();
        clock.schedule_fed_expiry(4, t0 + Duration::from_millis(800));

        assert_eq!(
            clock.next_event().await,
            ClockEvent::FedIndicatorExpired { session: 4 }
        );
        assert_eq!(Instant::now() - t0, Duration::from_millis(800));
        assert!(!clock.has_pending_fed_expiry());

        let waited = timeout(Duration::from_secs(10), clock.next_event()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_expiry_never_fires() {
        let mut clock = GameClock::new(PERIOD);
        clock.schedule_fed_expiry(1, Instant::now() + Duration::from_millis(800));
        clock.cancel_fed_expiry();

        let waited = timeout(Duration::from_secs(10), clock.next_event()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_and_expiry_interleave() {
        let mut clock = GameClock::new(PERIOD);
        let t0 = Instant::now();
        clock.start();
        clock.schedule_fed_expiry(2, t0 + Duration::from_millis(400));

        assert_eq!(clock.next_event().await, ClockEvent::Tick); // 180
        assert_eq!(clock.next_event().await, ClockEvent::Tick); // 360
        assert_eq!(
            clock.next_event().await,
            ClockEvent::FedIndicatorExpired { session: 2 }
        );
        assert_eq!(clock.next_event().await, ClockEvent::Tick); // 540
        assert_eq!(Instant::now() - t0, Duration::from_millis(540));
    }
}
