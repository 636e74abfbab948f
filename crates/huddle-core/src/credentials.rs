//! Room credentials.

use serde::{Deserialize, Serialize};

/// Credentials required to join a room.
///
/// Supplied by the room backend before the call starts and immutable for the
/// life of the call. Invalid or expired values surface as a connection
/// failure from the SDK, not as a validation error here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCredentials {
    /// Application key identifying the SDK project.
    pub app_key: String,
    /// Session identifier for the room.
    pub session_id: String,
    /// Access token used to connect the session.
    pub token: String,
    /// Display name shown to other participants and used in the transcript.
    pub display_name: String,
}

impl RoomCredentials {
    /// Build credentials for a named participant.
    pub fn new(
        app_key: impl Into<String>,
        session_id: impl Into<String>,
        token: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            session_id: session_id.into(),
            token: token.into(),
            display_name: display_name.into(),
        }
    }
}
