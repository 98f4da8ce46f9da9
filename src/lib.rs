//! Crossing: a two-phase traffic intersection controller
//!
//! Two road signals take turns. The active one runs green, blinking yellow
//! and red on a fixed timetable while the other holds red; a periodic
//! one-second tick drives everything. After signal B finishes red a given
//! number of times the controller cancels its tick source and stops.
//!
//! # Core Concepts
//!
//! - **Signal**: one road signal with its light, dwell limit and history
//! - **Intersection**: owns both signals and advances the active one per tick
//! - **RenderSink**: receives one rendered line per state change
//!
//! # Example
//!
//! ```rust
//! use crossing::{IntersectionBuilder, MemorySink, SignalColor, SignalId, TickOutcome};
//!
//! let mut intersection = IntersectionBuilder::new()
//!     .green_time_a(2)
//!     .green_time_b(2)
//!     .round_limit(1)
//!     .sink(MemorySink::new())
//!     .build()
//!     .unwrap();
//!
//! intersection.start().unwrap();
//! assert_eq!(intersection.signal(SignalId::A).color(), Some(SignalColor::Green));
//!
//! let mut ticks = 0;
//! while !matches!(intersection.tick(), TickOutcome::Halted(_)) {
//!     ticks += 1;
//! }
//! assert_eq!(ticks + 1, 2 * (2 + 2 + 3));
//! assert_eq!(intersection.round(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod intersection;
pub mod render;
pub mod signal;
pub mod ticker;

pub use builder::IntersectionBuilder;
pub use config::IntersectionConfig;
pub use error::{BuildError, ControllerError};
pub use intersection::{
    ControllerStatus, HaltReason, Intersection, IntersectionSnapshot, SignalSnapshot, TickOutcome,
};
pub use render::{ConsoleSink, MemorySink, RenderSink};
pub use signal::{
    LightMode, LightState, Signal, SignalColor, SignalDisplayState, SignalId, TrafficSignal,
    HISTORY_CAPACITY, RED_DURATION, YELLOW_DURATION,
};
pub use ticker::{TickSource, TickerState, TICK_PERIOD};
