//! Session error type.

use thiserror::Error;

use crate::session::CallPhase;

/// Errors from the call-session state machine.
///
/// These cover caller mistakes (intents in the wrong phase). SDK and backend
/// failures are not errors here; they arrive as events and the session
/// reconciles them into state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Intent requires an active call.
    #[error("cannot {operation} in phase {phase:?}")]
    InvalidPhase {
        /// Phase the session was in.
        phase: CallPhase,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// `connect` was called more than once.
    #[error("session already connected or connecting")]
    AlreadyConnected,
}
