//! Gravity clock: a re-armable periodic timer.
//!
//! At most one schedule is live. Arming replaces the previous schedule, so a
//! speed change never leaves two ticks interleaved.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Default)]
pub struct GravityClock {
    interval: Option<Interval>,
    period_ms: u32,
}

impl GravityClock {
    /// A disarmed clock; [`GravityClock::tick`] never completes until armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the schedule: first tick one full period from now.
    pub fn arm(&mut self, period_ms: u32) {
        let period = Duration::from_millis(u64::from(period_ms.max(1)));
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period_ms = period_ms;
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Current period while armed
    pub fn period_ms(&self) -> Option<u32> {
        self.interval.as_ref().map(|_| self.period_ms)
    }

    /// Bring the schedule in line with the game.
    ///
    /// Disarms when not playing. Otherwise re-arms if `restart` is set, the clock was
    /// idle, or the period changed. Returns true when a new schedule was started.
    pub fn sync(&mut self, playing: bool, period_ms: u32, restart: bool) -> bool {
        if !playing {
            self.disarm();
            return false;
        }
        if restart || self.period_ms() != Some(period_ms) {
            self.arm(period_ms);
            return true;
        }
        false
    }

    /// Wait for the next gravity tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
