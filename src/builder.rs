//! Fluent construction of an [`Intersection`].

use crate::config::IntersectionConfig;
use crate::error::BuildError;
use crate::intersection::Intersection;
use crate::render::RenderSink;
use crate::signal::SignalId;

/// Builder for an intersection. Every parameter is required.
///
/// # Example
///
/// ```
/// use crossing::{IntersectionBuilder, MemorySink};
///
/// let intersection = IntersectionBuilder::new()
///     .green_time_a(15)
///     .green_time_b(10)
///     .round_limit(3)
///     .sink(MemorySink::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(intersection.round_limit(), 3);
/// ```
pub struct IntersectionBuilder<R: RenderSink> {
    green_time_a: Option<u32>,
    green_time_b: Option<u32>,
    round_limit: Option<u32>,
    sink: Option<R>,
}

impl<R: RenderSink> IntersectionBuilder<R> {
    pub fn new() -> Self {
        Self {
            green_time_a: None,
            green_time_b: None,
            round_limit: None,
            sink: None,
        }
    }

    /// Ticks signal A stays green (required).
    pub fn green_time_a(mut self, ticks: u32) -> Self {
        self.green_time_a = Some(ticks);
        self
    }

    /// Ticks signal B stays green (required).
    pub fn green_time_b(mut self, ticks: u32) -> Self {
        self.green_time_b = Some(ticks);
        self
    }

    /// Rounds to run before halting (required).
    pub fn round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = Some(rounds);
        self
    }

    /// Take all timing parameters from a config.
    pub fn config(self, config: IntersectionConfig) -> Self {
        self.green_time_a(config.green_time_a)
            .green_time_b(config.green_time_b)
            .round_limit(config.round_limit)
    }

    /// Where rendered lines go (required).
    pub fn sink(mut self, sink: R) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the intersection.
    /// Returns an error if a parameter is missing or zero.
    pub fn build(self) -> Result<Intersection<R>, BuildError> {
        let config = IntersectionConfig {
            green_time_a: self
                .green_time_a
                .ok_or(BuildError::MissingGreenTime {
                    signal: SignalId::A,
                })?,
            green_time_b: self
                .green_time_b
                .ok_or(BuildError::MissingGreenTime {
                    signal: SignalId::B,
                })?,
            round_limit: self.round_limit.ok_or(BuildError::MissingRoundLimit)?,
        };
        let sink = self.sink.ok_or(BuildError::MissingSink)?;

        Intersection::new(config, sink)
    }
}

impl<R: RenderSink> Default for IntersectionBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySink;

    #[test]
    fn builder_requires_green_times() {
        let result = IntersectionBuilder::<MemorySink>::new()
            .green_time_b(10)
            .round_limit(3)
            .sink(MemorySink::new())
            .build();
        assert!(matches!(
            result,
            Err(BuildError::MissingGreenTime {
                signal: SignalId::A
            })
        ));

        let result = IntersectionBuilder::<MemorySink>::new()
            .green_time_a(10)
            .round_limit(3)
            .sink(MemorySink::new())
            .build();
        assert!(matches!(
            result,
            Err(BuildError::MissingGreenTime {
                signal: SignalId::B
            })
        ));
    }

    #[test]
    fn builder_requires_round_limit_and_sink() {
        let result = IntersectionBuilder::<MemorySink>::new()
            .green_time_a(15)
            .green_time_b(10)
            .sink(MemorySink::new())
            .build();
        assert!(matches!(result, Err(BuildError::MissingRoundLimit)));

        let result = IntersectionBuilder::<MemorySink>::new()
            .green_time_a(15)
            .green_time_b(10)
            .round_limit(3)
            .build();
        assert!(matches!(result, Err(BuildError::MissingSink)));
    }

    #[test]
    fn builder_validates_values() {
        let result = IntersectionBuilder::new()
            .green_time_a(15)
            .green_time_b(10)
            .round_limit(0)
            .sink(MemorySink::new())
            .build();
        assert!(matches!(result, Err(BuildError::ZeroRoundLimit)));
    }

    #[test]
    fn builder_accepts_config() {
        let intersection = IntersectionBuilder::new()
            .config(IntersectionConfig::new(8, 6, 2))
            .sink(MemorySink::new())
            .build()
            .unwrap();

        assert_eq!(intersection.config(), IntersectionConfig::new(8, 6, 2));
        assert_eq!(intersection.signal(SignalId::A).green_duration(), 8);
        assert_eq!(intersection.signal(SignalId::B).green_duration(), 6);
    }
}
