//! Restartable one-second tick source.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Period of one countdown unit.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic tick source that can be torn down and recreated.
///
/// A stopped ticker never completes [`Ticker::tick`], so it can sit in a
/// `select!` alongside other branches.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    /// Creates a running ticker whose first tick is one period from now.
    pub fn start(period: Duration) -> Self {
        let mut ticker = Self::stopped(period);
        ticker.restart();
        ticker
    }

    /// Creates a ticker that is not running.
    pub fn stopped(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Drops the current interval; no more ticks until restarted.
    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Replaces the interval with a fresh one, discarding any missed ticks.
    pub fn restart(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Waits for the next tick. Pends forever while stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
