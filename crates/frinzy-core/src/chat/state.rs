//! Per-chat state machine: `Loading → Ready → (Sending ⇄ Ready) → Closed`.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{FrinzyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ChatState {
    Loading,
    Ready,
    Sending,
    /// The match does not exist or the viewer is not a member.
    Unavailable,
    Closed,
}

impl ChatState {
    pub fn can_transition_to(self, next: ChatState) -> bool {
        use ChatState::*;
        matches!(
            (self, next),
            (Loading, Ready)
                | (Loading, Unavailable)
                | (Ready, Sending)
                | (Sending, Ready)
                | (Loading | Ready | Sending | Unavailable, Closed)
        )
    }

    /// Moves to `next`, rejecting edges the state machine does not have.
    pub fn transition(self, next: ChatState) -> Result<ChatState> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(FrinzyError::internal(format!(
                "invalid chat transition {} -> {}",
                self, next
            )))
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, ChatState::Ready | ChatState::Sending)
    }
}
