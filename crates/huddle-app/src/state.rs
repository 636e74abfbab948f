//! Observable application state types.
//!
//! These structures serve as the "View Model" for the application. They
//! contain the subset of call state necessary for rendering the UI without
//! exposing the session state machine itself.

use huddle_core::{Region, StreamId};

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not in a call.
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Connected with a live call.
    InCall,
}

/// Applied publish and caption flags, as confirmed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags {
    /// Camera published.
    pub camera: bool,
    /// Microphone published.
    pub mic: bool,
    /// Local screen share active.
    pub screen_sharing: bool,
    /// Live captioning session active.
    pub captions: bool,
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self { camera: true, mic: true, screen_sharing: false, captions: false }
    }
}

/// One rendered media tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Stream shown in this tile.
    pub stream_id: StreamId,
    /// Participant display name.
    pub name: String,
    /// Region the tile is bound to.
    pub region: Region,
}
