//! Component lifecycle states.

use core::fmt;

use crate::error::{GfError, GfResult};

/// Staged lifecycle shared by every configurable component.
///
/// `Constructed → Configured → Preinitialized → Active`, with `Destroyed`
/// reachable from any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LifecycleState {
    Constructed,
    Configured,
    Preinitialized,
    Active,
    Destroyed,
}

impl LifecycleState {
    /// Whether property values may still be applied.
    pub fn accepts_configuration(self) -> bool {
        matches!(self, Self::Constructed | Self::Configured)
    }

    /// Check that the current state is one of `allowed`, otherwise report
    /// `operation` as a lifecycle violation of `component`.
    pub fn require(
        self,
        component: &str,
        operation: &'static str,
        allowed: &[LifecycleState],
    ) -> GfResult<()> {
        if allowed.contains(&self) {
            Ok(())
        } else {
            Err(GfError::Lifecycle {
                component: component.to_string(),
                operation,
                state: self,
            })
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Constructed => "constructed",
            Self::Configured => "configured",
            Self::Preinitialized => "preinitialized",
            Self::Active => "active",
            Self::Destroyed => "destroyed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_early_states_accept_configuration() {
        assert!(LifecycleState::Constructed.accepts_configuration());
        assert!(LifecycleState::Configured.accepts_configuration());
        assert!(!LifecycleState::Preinitialized.accepts_configuration());
        assert!(!LifecycleState::Active.accepts_configuration());
        assert!(!LifecycleState::Destroyed.accepts_configuration());
    }

    #[test]
    fn require_reports_operation() {
        let err = LifecycleState::Constructed
            .require("crust", "preinitialize", &[LifecycleState::Configured])
            .unwrap_err();
        assert!(matches!(
            err,
            GfError::Lifecycle {
                operation: "preinitialize",
                state: LifecycleState::Constructed,
                ..
            }
        ));
    }
}
