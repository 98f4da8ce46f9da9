//! Core State trait for controller and light states.
//!
//! Both the per-signal light state and the controller status implement this
//! trait so they can be named in logs and recorded in a history.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for states tracked by the controller.
///
/// All methods are pure. States are small immutable values describing
/// where a signal or the controller currently is.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records
/// - `PartialEq`: States are compared by the tick handler and by tests
/// - `Debug`: States appear in diagnostics
/// - `Serialize` + `Deserialize`: States appear in snapshots
///
/// # Example
///
/// ```rust
/// use crossing::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Barrier {
///     Raised,
///     Lowered,
///     Jammed,
/// }
///
/// impl State for Barrier {
///     fn name(&self) -> &str {
///         match self {
///             Self::Raised => "Raised",
///             Self::Lowered => "Lowered",
///             Self::Jammed => "Jammed",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Jammed)
///     }
/// }
///
/// assert_eq!(Barrier::Lowered.name(), "Lowered");
/// assert!(Barrier::Jammed.is_error());
/// assert!(!Barrier::Raised.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this state represents a fault.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Lamp {
        Dark,
        Lit,
        Burnt,
    }

    impl State for Lamp {
        fn name(&self) -> &str {
            match self {
                Self::Dark => "Dark",
                Self::Lit => "Lit",
                Self::Burnt => "Burnt",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Burnt)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Burnt)
        }
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Plain {
        Only,
    }

    impl State for Plain {
        fn name(&self) -> &str {
            "Only"
        }
    }

    #[test]
    fn defaults_are_not_final_or_error() {
        assert!(!Plain::Only.is_final());
        assert!(!Plain::Only.is_error());
    }

    #[test]
    fn overrides_are_respected() {
        assert_eq!(Lamp::Lit.name(), "Lit");
        assert!(!Lamp::Dark.is_final());
        assert!(Lamp::Burnt.is_final());
        assert!(Lamp::Burnt.is_error());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&Lamp::Lit).unwrap();
        let back: Lamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Lamp::Lit);
    }
}
