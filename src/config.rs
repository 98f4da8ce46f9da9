//! Construction parameters for an intersection.

use crate::error::BuildError;
use crate::signal::SignalId;
use serde::{Deserialize, Serialize};

/// Timing parameters of one intersection.
///
/// Yellow and red phases are fixed; only the green phases and the number
/// of rounds are configurable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct IntersectionConfig {
    /// Ticks signal A stays green
    pub green_time_a: u32,
    /// Ticks signal B stays green
    pub green_time_b: u32,
    /// Rounds to run before halting
    pub round_limit: u32,
}

impl IntersectionConfig {
    pub fn new(green_time_a: u32, green_time_b: u32, round_limit: u32) -> Self {
        Self {
            green_time_a,
            green_time_b,
            round_limit,
        }
    }

    /// Reject zero durations and a zero round limit.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.green_time_a == 0 {
            return Err(BuildError::ZeroGreenTime(SignalId::A));
        }
        if self.green_time_b == 0 {
            return Err(BuildError::ZeroGreenTime(SignalId::B));
        }
        if self.round_limit == 0 {
            return Err(BuildError::ZeroRoundLimit);
        }
        Ok(())
    }

    /// Green phase length of one signal.
    pub fn green_time(&self, id: SignalId) -> u32 {
        match id {
            SignalId::A => self.green_time_a,
            SignalId::B => self.green_time_b,
        }
    }
}
