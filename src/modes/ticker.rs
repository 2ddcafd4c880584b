use std::future;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fixed-period simulation clock that can be switched off entirely
///
/// While stopped there is no timer at all, so nothing accumulates during a
/// pause and no ticks are replayed on resume.
pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    pub fn stopped() -> Self {
        Self { interval: None }
    }

    /// Start ticking every `period`, first tick one period from now
    ///
    /// Does nothing if the ticker is already running.
    pub fn start(&mut self, period: Duration) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Drop the timer; safe to call when already stopped
    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick; never resolves while stopped
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::stopped()
    }
}
