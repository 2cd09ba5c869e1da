//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Finalizing,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recording session entity.
///
/// State machine:
///   IDLE -> RECORDING (begin)
///   RECORDING -> FINALIZING (finalize)
///
/// Finalizing is terminal: a session ends with exactly one submission,
/// so there is no transition back to Idle. Attempting to finalize twice
/// is rejected, which is what prevents a double submission.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if no recording has started yet
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Check if the recording is being assembled and submitted
    pub fn is_finalizing(&self) -> bool {
        self.state == SessionState::Finalizing
    }

    /// Transition from IDLE to RECORDING
    pub fn begin(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin recording".to_string(),
            });
        }
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to FINALIZING
    pub fn finalize(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "finalize recording".to_string(),
            });
        }
        self.state = SessionState::Finalizing;
        Ok(())
    }

    /// End the session without an artifact.
    ///
    /// Like finalize, discard is terminal: once the session has ended,
    /// for whatever reason, it cannot record or submit again.
    pub fn discard(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "discard recording".to_string(),
            });
        }
        self.state = SessionState::Finalizing;
        Ok(())
    }
}
