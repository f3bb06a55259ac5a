//! Bounded retry state machine.

use crate::constants::MAX_REPHRASE_ATTEMPTS;

use super::types::RemediationStatus;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LoopState {
    /// Waiting for the rephrase + gate round of `attempt_index`.
    Attempting { attempt_index: u32 },
    Done(Terminal),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Terminal {
    OriginalKept,
    Rephrased { candidate: String, attempt_index: u32 },
    ManualReviewRequired { attempts: u32 },
}

impl LoopState {
    /// State right after scoring.
    pub(crate) fn scored(needs_rephrasing: bool) -> Self {
        if needs_rephrasing {
            LoopState::Attempting { attempt_index: 0 }
        } else {
            LoopState::Done(Terminal::OriginalKept)
        }
    }

    pub(crate) fn accepted(attempt_index: u32, candidate: String) -> Self {
        LoopState::Done(Terminal::Rephrased {
            candidate,
            attempt_index,
        })
    }

    pub(crate) fn rejected(attempt_index: u32) -> Self {
        let next = attempt_index + 1;
        if next < MAX_REPHRASE_ATTEMPTS {
            LoopState::Attempting {
                attempt_index: next,
            }
        } else {
            LoopState::Done(Terminal::ManualReviewRequired { attempts: next })
        }
    }
}

impl Terminal {
    pub(crate) fn status(&self) -> RemediationStatus {
        match self {
            Terminal::OriginalKept => RemediationStatus::OriginalKept,
            Terminal::Rephrased { .. } => RemediationStatus::Rephrased,
            Terminal::ManualReviewRequired { .. } => RemediationStatus::ManualReviewRequired,
        }
    }
}
