//! Road signals and their light states.
//!
//! A [`Signal`] holds its own light, dwell limit and transition history. It
//! knows nothing about the other signal at the crossing; the only link back to
//! its owner is an optional [`Notifier`] used to request a re-render.

use crate::core::{State, StateHistory, StateTransition};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

/// Ticks a signal blinks yellow before turning red.
pub const YELLOW_DURATION: u32 = 2;

/// Ticks a signal stays red before control may pass to the other signal.
pub const RED_DURATION: u32 = 3;

/// Most recent transitions each signal keeps in its history.
pub const HISTORY_CAPACITY: usize = 32;

const LIT_GREEN: &str = "🟢⚫️⚫️";
const LIT_YELLOW: &str = "⚫️🟡⚫️";
const LIT_RED: &str = "⚫️⚫️🔴";
const DARK: &str = "⚫️⚫️⚫️";

/// Identifies one of the two signals at an intersection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SignalId {
    A,
    B,
}

impl SignalId {
    /// The signal that takes over when this one hands off.
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }

    /// Default display label, e.g. `Signal A`.
    pub fn label(self) -> String {
        format!("Signal {}", self.letter())
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalColor {
    Green,
    Yellow,
    Red,
}

/// How a lit signal shows its color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightMode {
    Steady,
    Blinking,
}

/// Flat view of a signal's display, derived from [`LightState`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDisplayState {
    On,
    Blinking,
    Off,
}

/// What a signal is currently showing.
///
/// A color exists only while the signal is lit, so an unlit signal with a
/// color cannot be represented.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "light", rename_all = "snake_case")]
pub enum LightState {
    Lit { color: SignalColor, mode: LightMode },
    Off,
}

impl LightState {
    pub fn steady(color: SignalColor) -> Self {
        Self::Lit {
            color,
            mode: LightMode::Steady,
        }
    }

    pub fn blinking(color: SignalColor) -> Self {
        Self::Lit {
            color,
            mode: LightMode::Blinking,
        }
    }

    pub fn color(&self) -> Option<SignalColor> {
        match self {
            Self::Lit { color, .. } => Some(*color),
            Self::Off => None,
        }
    }

    pub fn display_state(&self) -> SignalDisplayState {
        match self {
            Self::Lit {
                mode: LightMode::Steady,
                ..
            } => SignalDisplayState::On,
            Self::Lit {
                mode: LightMode::Blinking,
                ..
            } => SignalDisplayState::Blinking,
            Self::Off => SignalDisplayState::Off,
        }
    }
}

impl State for LightState {
    fn name(&self) -> &str {
        match self {
            Self::Lit { color, mode } => match (color, mode) {
                (SignalColor::Green, LightMode::Steady) => "green",
                (SignalColor::Green, LightMode::Blinking) => "blinking green",
                (SignalColor::Yellow, LightMode::Steady) => "yellow",
                (SignalColor::Yellow, LightMode::Blinking) => "blinking yellow",
                (SignalColor::Red, LightMode::Steady) => "red",
                (SignalColor::Red, LightMode::Blinking) => "blinking red",
            },
            Self::Off => "off",
        }
    }

    // A dark signal is never entered by the controller's own cycle.
    fn is_error(&self) -> bool {
        matches!(self, Self::Off)
    }
}

/// Non-owning handle a signal uses to tell its intersection it changed.
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: UnboundedSender<SignalId>,
}

impl Notifier {
    /// Create a notifier together with the receiving end its owner drains.
    pub fn channel() -> (Self, UnboundedReceiver<SignalId>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    fn notify(&self, id: SignalId) {
        if self.tx.send(id).is_err() {
            trace!(signal = %id, "owner gone, dropping change notification");
        }
    }
}

/// Operations every signal at a crossing supports.
pub trait TrafficSignal {
    /// True once `elapsed` ticks have reached the current dwell limit.
    fn is_timeout(&self, elapsed: u32) -> bool;

    /// Show `color` steadily for at least `duration` ticks.
    fn steady_on(&mut self, color: SignalColor, duration: u32);

    /// Blink `color` for at least `duration` ticks.
    fn blink(&mut self, color: SignalColor, duration: u32);

    /// Go dark for at least `duration` ticks.
    fn turn_off(&mut self, duration: u32);

    /// Fixed-width three-lamp rendering, prefixed by the signal's name.
    fn render(&self) -> String;
}

/// A vehicle signal with a configurable green phase.
#[derive(Clone, Debug)]
pub struct Signal {
    id: SignalId,
    name: String,
    light: LightState,
    dwell_limit: u32,
    green_duration: u32,
    history: StateHistory<LightState>,
    notifier: Option<Notifier>,
}

impl Signal {
    /// New detached signal showing steady red for [`RED_DURATION`] ticks.
    pub fn new(id: SignalId, name: impl Into<String>, green_duration: u32) -> Self {
        Self {
            id,
            name: name.into(),
            light: LightState::steady(SignalColor::Red),
            dwell_limit: RED_DURATION,
            green_duration,
            history: StateHistory::new(HISTORY_CAPACITY),
            notifier: None,
        }
    }

    /// Wire the change notification back to an owner.
    pub fn attach(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    pub fn is_attached(&self) -> bool {
        self.notifier.is_some()
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn light(&self) -> LightState {
        self.light
    }

    pub fn color(&self) -> Option<SignalColor> {
        self.light.color()
    }

    pub fn display_state(&self) -> SignalDisplayState {
        self.light.display_state()
    }

    pub fn dwell_limit(&self) -> u32 {
        self.dwell_limit
    }

    pub fn green_duration(&self) -> u32 {
        self.green_duration
    }

    pub fn history(&self) -> &StateHistory<LightState> {
        &self.history
    }

    fn change(&mut self, light: LightState, duration: u32) {
        let from = self.light;
        self.light = light;
        self.dwell_limit = duration;
        self.history.push(StateTransition {
            from,
            to: light,
            timestamp: Utc::now(),
            dwell: duration,
        });

        debug!(
            signal = %self.id,
            from = from.name(),
            to = light.name(),
            dwell = duration,
            "signal changed"
        );

        if let Some(notifier) = &self.notifier {
            notifier.notify(self.id);
        }
    }
}

impl TrafficSignal for Signal {
    fn is_timeout(&self, elapsed: u32) -> bool {
        elapsed >= self.dwell_limit
    }

    fn steady_on(&mut self, color: SignalColor, duration: u32) {
        self.change(LightState::steady(color), duration);
    }

    fn blink(&mut self, color: SignalColor, duration: u32) {
        self.change(LightState::blinking(color), duration);
    }

    fn turn_off(&mut self, duration: u32) {
        self.change(LightState::Off, duration);
    }

    fn render(&self) -> String {
        let lamps = match self.light.color() {
            Some(SignalColor::Green) => LIT_GREEN,
            Some(SignalColor::Yellow) => LIT_YELLOW,
            Some(SignalColor::Red) => LIT_RED,
            None => DARK,
        };
        format!("{}: {}", self.name, lamps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal() -> Signal {
        Signal::new(SignalId::A, "Signal A", 15)
    }

    #[test]
    fn new_signal_is_steady_red() {
        let s = signal();
        assert_eq!(s.color(), Some(SignalColor::Red));
        assert_eq!(s.display_state(), SignalDisplayState::On);
        assert_eq!(s.dwell_limit(), RED_DURATION);
        assert_eq!(s.green_duration(), 15);
        assert!(!s.is_attached());
        assert!(s.history().is_empty());
    }

    #[test]
    fn timeout_is_inclusive() {
        let s = signal();
        assert!(!s.is_timeout(0));
        assert!(!s.is_timeout(RED_DURATION - 1));
        assert!(s.is_timeout(RED_DURATION));
        assert!(s.is_timeout(RED_DURATION + 1));
    }

    #[test]
    fn zero_dwell_times_out_immediately() {
        let mut s = signal();
        s.turn_off(0);
        assert!(s.is_timeout(0));
    }

    #[test]
    fn transitions_overwrite_light_and_dwell() {
        let mut s = signal();

        s.steady_on(SignalColor::Green, 15);
        assert_eq!(s.light(), LightState::steady(SignalColor::Green));
        assert_eq!(s.dwell_limit(), 15);

        s.blink(SignalColor::Yellow, YELLOW_DURATION);
        assert_eq!(s.display_state(), SignalDisplayState::Blinking);
        assert_eq!(s.color(), Some(SignalColor::Yellow));
        assert_eq!(s.dwell_limit(), YELLOW_DURATION);

        s.turn_off(4);
        assert_eq!(s.display_state(), SignalDisplayState::Off);
        assert_eq!(s.color(), None);
        assert_eq!(s.dwell_limit(), 4);

        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn render_lights_one_lamp_per_color() {
        let mut s = signal();
        assert_eq!(s.render(), "Signal A: ⚫️⚫️🔴");

        s.steady_on(SignalColor::Green, 15);
        assert_eq!(s.render(), "Signal A: 🟢⚫️⚫️");

        s.blink(SignalColor::Yellow, 2);
        assert_eq!(s.render(), "Signal A: ⚫️🟡⚫️");

        s.turn_off(0);
        assert_eq!(s.render(), "Signal A: ⚫️⚫️⚫️");
    }

    #[test]
    fn detached_signal_changes_without_notifying() {
        let mut s = signal();
        s.steady_on(SignalColor::Green, 15);
        assert_eq!(s.color(), Some(SignalColor::Green));
    }

    #[test]
    fn attached_signal_notifies_once_per_change() {
        let (notifier, mut rx) = Notifier::channel();
        let mut s = Signal::new(SignalId::B, "Signal B", 10);
        s.attach(notifier);

        s.steady_on(SignalColor::Green, 10);
        s.blink(SignalColor::Yellow, 2);

        assert_eq!(rx.try_recv().ok(), Some(SignalId::B));
        assert_eq!(rx.try_recv().ok(), Some(SignalId::B));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn notifying_a_dropped_owner_is_harmless() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);

        let mut s = signal();
        s.attach(notifier);
        s.steady_on(SignalColor::Green, 15);
        assert_eq!(s.color(), Some(SignalColor::Green));
    }

    #[test]
    fn light_state_names() {
        assert_eq!(LightState::steady(SignalColor::Green).name(), "green");
        assert_eq!(
            LightState::blinking(SignalColor::Yellow).name(),
            "blinking yellow"
        );
        assert_eq!(LightState::Off.name(), "off");
        assert!(LightState::Off.is_error());
        assert!(!LightState::steady(SignalColor::Red).is_error());
    }

    #[test]
    fn signal_id_alternates() {
        assert_eq!(SignalId::A.other(), SignalId::B);
        assert_eq!(SignalId::B.other(), SignalId::A);
        assert_eq!(SignalId::B.label(), "Signal B");
    }

    #[test]
    fn light_state_serializes_tagged() {
        let json = serde_json::to_string(&LightState::blinking(SignalColor::Yellow)).unwrap();
        assert_eq!(json, r#"{"light":"lit","color":"yellow","mode":"blinking"}"#);

        let off: LightState = serde_json::from_str(r#"{"light":"off"}"#).unwrap();
        assert_eq!(off, LightState::Off);
    }
}
