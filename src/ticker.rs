//! Periodic tick source owned by an intersection.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

/// Period between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerState {
    Idle,
    Running,
    Cancelled,
}

/// Handle over the periodic tick.
///
/// Moves `Idle -> Running -> Cancelled`. Cancellation is terminal.
#[derive(Debug)]
pub struct TickSource {
    period: Duration,
    state: TickerState,
    delivered: u64,
}

impl TickSource {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: TickerState::Idle,
            delivered: 0,
        }
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TickerState::Cancelled
    }

    /// Ticks delivered since the source started.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Begin delivering ticks. Returns `false` unless the source was idle.
    pub fn start(&mut self) -> bool {
        if self.state != TickerState::Idle {
            return false;
        }
        self.state = TickerState::Running;
        debug!(period = ?self.period, "tick source started");
        true
    }

    /// Stop delivering ticks for good.
    ///
    /// Returns `true` only for the call that performed the cancellation.
    pub fn cancel(&mut self) -> bool {
        if self.state == TickerState::Cancelled {
            return false;
        }
        self.state = TickerState::Cancelled;
        info!(delivered = self.delivered, "tick source cancelled");
        true
    }

    /// Count a tick. Returns `false` if the source is not running.
    pub(crate) fn deliver(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.delivered += 1;
        true
    }

    /// Timer that paces delivery. The first tick fires one period after creation.
    pub(crate) fn timer(&self) -> Interval {
        let start = tokio::time::Instant::now() + self.period;
        let mut timer = tokio::time::interval_at(start, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
