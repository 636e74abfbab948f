//! Application input events.
//!
//! [`AppEvent`] is the comprehensive set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize) and system ticks.
//! - Call notifications translated from the session by the bridge.

use huddle_core::{Region, StreamId};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection in progress.
    Connecting,

    /// Call is live.
    Connected,

    /// A media tile appeared (remote subscriber or screen share).
    TileAdded {
        /// Stream shown in the tile.
        stream_id: StreamId,
        /// Participant display name.
        name: String,
        /// Target region.
        region: Region,
    },

    /// A media tile went away.
    TileRemoved {
        /// Stream whose tile is removed.
        stream_id: StreamId,
    },

    /// Applied camera/microphone publish flags changed.
    PublishFlags {
        /// Camera published.
        camera: bool,
        /// Microphone published.
        mic: bool,
    },

    /// Local screen sharing started or stopped.
    ScreenShareChanged {
        /// Local screen share active.
        sharing: bool,
    },

    /// Live captioning turned on or off.
    CaptionsChanged {
        /// Captioning session active.
        captions: bool,
    },

    /// A finalized caption was appended to the transcript.
    TranscriptAppended {
        /// Speaker display name.
        speaker: String,
        /// Caption text.
        text: String,
    },

    /// A blocking alert must be shown.
    Alert {
        /// Alert text.
        message: String,
    },

    /// A transient notice for the status line.
    Notice {
        /// Notice text.
        message: String,
    },

    /// The call ended and all call state was reset.
    CallEnded,

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
