//! Two-phase intersection controller.
//!
//! Only the active signal advances. It runs green, blinking yellow, then red;
//! when its red phase times out control passes to the other signal, which
//! starts green. Each time signal B finishes red one round is counted, and the
//! controller halts once the round limit is reached.

use crate::config::IntersectionConfig;
use crate::core::State;
use crate::error::{BuildError, ControllerError};
use crate::render::RenderSink;
use crate::signal::{
    LightState, Notifier, Signal, SignalColor, SignalId, TrafficSignal, RED_DURATION,
    YELLOW_DURATION,
};
use crate::ticker::{TickSource, TICK_PERIOD};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, trace, warn};

/// Spacing between the two signals on a rendered line.
const SEPARATOR: &str = "   ";

/// Why the controller stopped.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    RoundLimitReached,
    /// The active signal was dark when its dwell expired.
    UnreachableState,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ControllerStatus {
    Ready,
    Running,
    Halted { reason: HaltReason },
}

impl State for ControllerStatus {
    fn name(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Halted { .. } => "Halted",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }

    fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Halted {
                reason: HaltReason::UnreachableState
            }
        )
    }
}

/// What a single tick did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// Dwell not reached yet.
    Idle,
    /// The active signal changed, or control moved to the other signal.
    Transitioned,
    /// This tick stopped the controller.
    Halted(HaltReason),
    /// Controller not running; nothing happened.
    Ignored,
}

/// Serializable view of a signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub name: String,
    pub light: LightState,
    pub dwell_limit: u32,
    pub green_duration: u32,
    /// Transitions this signal has made since construction
    pub transitions: u64,
}

impl From<&Signal> for SignalSnapshot {
    fn from(signal: &Signal) -> Self {
        Self {
            name: signal.name().to_string(),
            light: signal.light(),
            dwell_limit: signal.dwell_limit(),
            green_duration: signal.green_duration(),
            transitions: signal.history().recorded(),
        }
    }
}

/// Serializable view of the whole controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionSnapshot {
    pub status: ControllerStatus,
    pub active: SignalId,
    pub elapsed: u32,
    pub round: u32,
    pub round_limit: u32,
    pub ticks: u64,
    pub signal_a: SignalSnapshot,
    pub signal_b: SignalSnapshot,
}

impl IntersectionSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Controller owning two signals and the tick source that drives them.
pub struct Intersection<R: RenderSink> {
    config: IntersectionConfig,
    signal_a: Signal,
    signal_b: Signal,
    active: SignalId,
    elapsed: u32,
    round: u32,
    status: ControllerStatus,
    ticker: TickSource,
    sink: R,
    notifier: Notifier,
    updates: UnboundedReceiver<SignalId>,
}

impl<R: RenderSink> Intersection<R> {
    /// Create a stopped intersection. Both signals start steady red.
    pub fn new(config: IntersectionConfig, sink: R) -> Result<Self, BuildError> {
        config.validate()?;
        let (notifier, updates) = Notifier::channel();

        Ok(Self {
            config,
            signal_a: Self::build_signal(&config, SignalId::A),
            signal_b: Self::build_signal(&config, SignalId::B),
            active: SignalId::A,
            elapsed: 0,
            round: 0,
            status: ControllerStatus::Ready,
            ticker: TickSource::new(TICK_PERIOD),
            sink,
            notifier,
            updates,
        })
    }

    /// Wire both signals, turn signal A green and start the tick source.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        match self.status {
            ControllerStatus::Running => return Err(ControllerError::AlreadyStarted),
            ControllerStatus::Halted { .. } => return Err(ControllerError::Halted),
            ControllerStatus::Ready => {}
        }

        self.signal_a.attach(self.notifier.clone());
        self.signal_b.attach(self.notifier.clone());

        self.status = ControllerStatus::Running;
        self.ticker.start();
        info!(
            green_a = self.config.green_time_a,
            green_b = self.config.green_time_b,
            round_limit = self.config.round_limit,
            "intersection started"
        );

        self.active = SignalId::A;
        self.elapsed = 0;
        let green = self.signal_a.green_duration();
        self.signal_a.steady_on(SignalColor::Green, green);
        self.flush_updates();
        Ok(())
    }

    /// Advance the controller by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.ticker.deliver() {
            trace!(status = self.status.name(), "tick ignored");
            return TickOutcome::Ignored;
        }

        self.elapsed += 1;
        let active = self.active;
        if !self.signal(active).is_timeout(self.elapsed) {
            self.sink.idle_tick();
            return TickOutcome::Idle;
        }

        match self.signal(active).light() {
            LightState::Lit {
                color: SignalColor::Green,
                ..
            } => {
                self.signal_mut(active)
                    .blink(SignalColor::Yellow, YELLOW_DURATION);
            }
            LightState::Lit {
                color: SignalColor::Yellow,
                ..
            } => {
                self.signal_mut(active)
                    .steady_on(SignalColor::Red, RED_DURATION);
            }
            LightState::Lit {
                color: SignalColor::Red,
                ..
            } => {
                if active == SignalId::B {
                    self.round += 1;
                    debug!(round = self.round, limit = self.config.round_limit, "round complete");
                    if self.round >= self.config.round_limit {
                        return self.halt(HaltReason::RoundLimitReached);
                    }
                }

                let next = active.other();
                self.active = next;
                let green = self.signal(next).green_duration();
                self.signal_mut(next).steady_on(SignalColor::Green, green);
            }
            LightState::Off => {
                error!(
                    signal = %active,
                    elapsed = self.elapsed,
                    "active signal is dark, halting controller"
                );
                return self.halt(HaltReason::UnreachableState);
            }
        }

        self.elapsed = 0;
        self.flush_updates();
        TickOutcome::Transitioned
    }

    /// Drive the controller on its tick period until the tick source is cancelled.
    pub async fn run(&mut self) -> ControllerStatus {
        if !self.ticker.is_running() {
            warn!(status = self.status.name(), "run called on a controller that is not running");
            return self.status;
        }

        let mut timer = self.ticker.timer();
        while self.ticker.is_running() {
            timer.tick().await;
            self.tick();
        }
        self.status
    }

    /// Render both signals as one line to the sink.
    pub fn update(&mut self) {
        let line = self.render_line();
        self.sink.render_line(&line);
    }

    /// Current line without emitting it.
    pub fn render_line(&self) -> String {
        format!(
            "{}{}{}",
            self.signal_a.render(),
            SEPARATOR,
            self.signal_b.render()
        )
    }

    pub fn signal(&self, id: SignalId) -> &Signal {
        match id {
            SignalId::A => &self.signal_a,
            SignalId::B => &self.signal_b,
        }
    }

    pub fn active(&self) -> SignalId {
        self.active
    }

    pub fn active_signal(&self) -> &Signal {
        self.signal(self.active)
    }

    /// Ticks since the active signal's current state began.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn round_limit(&self) -> u32 {
        self.config.round_limit
    }

    pub fn config(&self) -> IntersectionConfig {
        self.config
    }

    pub fn status(&self) -> ControllerStatus {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status.is_final()
    }

    pub fn ticker(&self) -> &TickSource {
        &self.ticker
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn snapshot(&self) -> IntersectionSnapshot {
        IntersectionSnapshot {
            status: self.status,
            active: self.active,
            elapsed: self.elapsed,
            round: self.round,
            round_limit: self.config.round_limit,
            ticks: self.ticker.delivered(),
            signal_a: SignalSnapshot::from(&self.signal_a),
            signal_b: SignalSnapshot::from(&self.signal_b),
        }
    }

    fn build_signal(config: &IntersectionConfig, id: SignalId) -> Signal {
        Signal::new(id, id.label(), config.green_time(id))
    }

    fn signal_mut(&mut self, id: SignalId) -> &mut Signal {
        match id {
            SignalId::A => &mut self.signal_a,
            SignalId::B => &mut self.signal_b,
        }
    }

    fn halt(&mut self, reason: HaltReason) -> TickOutcome {
        self.status = ControllerStatus::Halted { reason };
        self.ticker.cancel();
        info!(
            ?reason,
            round = self.round,
            ticks = self.ticker.delivered(),
            "intersection halted"
        );
        TickOutcome::Halted(reason)
    }

    fn flush_updates(&mut self) {
        while let Ok(id) = self.updates.try_recv() {
            trace!(signal = %id, "rendering change");
            self.update();
        }
    }
}
