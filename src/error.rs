//! Errors for building and starting an intersection.

use crate::signal::SignalId;
use thiserror::Error;

/// Errors that can occur when building an intersection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(
        "Green time for signal {signal} not specified. Call .green_time_{}(ticks)",
        .signal.letter().to_ascii_lowercase()
    )]
    MissingGreenTime { signal: SignalId },

    #[error("Green time for signal {0} must be greater than zero")]
    ZeroGreenTime(SignalId),

    #[error("Round limit not specified. Call .round_limit(rounds)")]
    MissingRoundLimit,

    #[error("Round limit must be greater than zero")]
    ZeroRoundLimit,

    #[error("Render sink not specified. Call .sink(sink)")]
    MissingSink,
}

/// Errors returned by controller lifecycle calls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Intersection already started")]
    AlreadyStarted,

    #[error("Intersection has halted and cannot be restarted")]
    Halted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_green_time_names_the_setter() {
        let err = BuildError::MissingGreenTime {
            signal: SignalId::B,
        };
        assert_eq!(
            err.to_string(),
            "Green time for signal B not specified. Call .green_time_b(ticks)"
        );
    }

    #[test]
    fn controller_errors_display() {
        assert_eq!(
            ControllerError::AlreadyStarted.to_string(),
            "Intersection already started"
        );
        assert!(ControllerError::Halted.to_string().contains("halted"));
    }
}
