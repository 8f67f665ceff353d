//! Pipeline stage model.
//!
//! The compile pipeline runs parse, verify, and compile in strict order.
//! Each stage is gated on the previous stage's success, and re-running a
//! stage invalidates every later stage's result.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the compile pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Parse,
    Verify,
    Compile,
}

impl Stage {
    /// The stage that must have succeeded before this one may run.
    pub fn prerequisite(self) -> Option<Stage> {
        match self {
            Stage::Parse => None,
            Stage::Verify => Some(Stage::Parse),
            Stage::Compile => Some(Stage::Verify),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Verify => write!(f, "verify"),
            Stage::Compile => write!(f, "compile"),
        }
    }
}

/// Outcome of a single pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StageState {
    #[default]
    Unrun,
    Succeeded,
    Failed,
}

/// Tracks the three stage outcomes for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageStatus {
    pub parsed: StageState,
    pub verified: StageState,
    pub compiled: StageState,
}

impl StageStatus {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, stage: Stage) -> StageState {
        match stage {
            Stage::Parse => self.parsed,
            Stage::Verify => self.verified,
            Stage::Compile => self.compiled,
        }
    }

    /// Record a stage outcome, clearing every later stage back to `Unrun`.
    pub fn record(&mut self, stage: Stage, ok: bool) {
        let state = if ok {
            StageState::Succeeded
        } else {
            StageState::Failed
        };
        match stage {
            Stage::Parse => {
                self.parsed = state;
                self.verified = StageState::Unrun;
                self.compiled = StageState::Unrun;
            }
            Stage::Verify => {
                self.verified = state;
                self.compiled = StageState::Unrun;
            }
            Stage::Compile => {
                self.compiled = state;
            }
        }
    }

    /// Check that `stage`'s prerequisite has succeeded.
    pub fn require(&self, stage: Stage) -> Result<()> {
        if let Some(required) = stage.prerequisite() {
            if self.get(required) != StageState::Succeeded {
                return Err(Error::StageOrder {
                    attempted: stage,
                    required,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_in_order() {
        let mut status = StageStatus::default();
        assert!(status.require(Stage::Parse).is_ok());
        assert!(status.require(Stage::Verify).is_err());

        status.record(Stage::Parse, true);
        assert!(status.require(Stage::Verify).is_ok());
        assert!(status.require(Stage::Compile).is_err());

        status.record(Stage::Verify, true);
        assert!(status.require(Stage::Compile).is_ok());
    }

    #[test]
    fn test_record_clears_later_stages() {
        let mut status = StageStatus::default();
        status.record(Stage::Parse, true);
        status.record(Stage::Verify, true);
        status.record(Stage::Compile, true);

        status.record(Stage::Parse, true);
        assert_eq!(status.verified, StageState::Unrun);
        assert_eq!(status.compiled, StageState::Unrun);
    }

    #[test]
    fn test_failed_stage_blocks_successor() {
        let mut status = StageStatus::default();
        status.record(Stage::Parse, true);
        status.record(Stage::Verify, false);

        let err = status.require(Stage::Compile).unwrap_err();
        assert!(matches!(
            err,
            Error::StageOrder {
                attempted: Stage::Compile,
                required: Stage::Verify,
            }
        ));
    }
}
