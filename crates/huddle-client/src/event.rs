//! Session events and actions.

use huddle_core::{CaptionEvent, CaptionsId, MediaKind, Region, RoomCredentials, StreamId, TileLayout};

/// Events the caller feeds into the session.
///
/// The caller is responsible for:
/// - Forwarding SDK callbacks (stream lifecycle, captions, capability probes)
/// - Forwarding captioning-backend HTTP resolutions
/// - Forwarding user intents (toggles, end call)
///
/// Events may arrive in arbitrary order relative to each other; the session
/// reconciles them against its own state.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// User toggled the camera.
    ToggleCamera,

    /// User toggled the microphone.
    ToggleMicrophone,

    /// User toggled screen sharing.
    ///
    /// Starting while already sharing is a toggle-off, never a second
    /// concurrent share.
    ToggleScreenShare,

    /// User toggled live captions.
    ToggleCaptions,

    /// User ended the call.
    EndCall,

    /// The SDK session connected.
    Connected,

    /// The SDK session failed to connect.
    ConnectFailed {
        /// SDK-reported reason.
        reason: String,
    },

    /// The local publisher is live with the given stream id.
    PublisherReady {
        /// Stream id assigned to the local publisher.
        stream_id: StreamId,
    },

    /// Publishing the local stream failed.
    PublishFailed {
        /// SDK-reported reason.
        reason: String,
    },

    /// A remote stream was announced.
    StreamCreated {
        /// SDK-assigned stream id.
        stream_id: StreamId,
        /// Display name of the remote participant.
        name: String,
        /// Camera or screen-share stream.
        kind: MediaKind,
    },

    /// A remote stream was torn down.
    StreamDestroyed {
        /// Stream id of the departing stream.
        stream_id: StreamId,
    },

    /// A caption arrived for some stream (local or remote).
    CaptionReceived(CaptionEvent),

    /// Result of a screen-share capability probe.
    ScreenShareCapability(ScreenShareCapability),

    /// Creating the screen-share publisher failed.
    ScreenShareFailed {
        /// SDK-reported reason.
        reason: String,
    },

    /// The screen-share media track stopped outside our control
    /// (e.g. the user stopped sharing from browser chrome).
    ScreenShareEnded,

    /// The captioning backend accepted the start request.
    CaptionsStarted {
        /// Handle required to stop this captioning session.
        captions_id: CaptionsId,
    },

    /// The captioning backend rejected the start request or the request
    /// failed in transit.
    CaptionsStartFailed {
        /// Failure description.
        reason: String,
    },

    /// The captioning backend acknowledged the stop request.
    CaptionsStopped,

    /// The stop request failed; the backend session is still live.
    CaptionsStopFailed {
        /// Failure description.
        reason: String,
    },
}

/// Result of probing the platform for screen-share support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenShareCapability {
    /// Platform supports screen sharing at all.
    pub supported: bool,
    /// Extension support is registered. `None` when not applicable.
    pub extension_registered: Option<bool>,
    /// Required extension is installed. `None` when not applicable.
    pub extension_installed: Option<bool>,
}

impl ScreenShareCapability {
    /// Capability answer for a platform with native support.
    pub fn native() -> Self {
        Self { supported: true, extension_registered: None, extension_installed: None }
    }

    /// Capability answer for an unsupported platform.
    pub fn unsupported() -> Self {
        Self { supported: false, extension_registered: None, extension_installed: None }
    }
}

/// Actions the session produces for the caller to execute.
///
/// Media and HTTP actions are handed to the driver; `Alert` and `Notify`
/// are the notification capability the UI implements, which keeps the
/// session itself free of side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Open the SDK session and connect with the token.
    Connect {
        /// Room credentials.
        credentials: RoomCredentials,
    },

    /// Create and publish the local camera/microphone stream.
    Publish {
        /// Fixed layout hints for the publisher tile.
        layout: TileLayout,
        /// Display name attached to the stream.
        name: String,
        /// Enable caption publishing on this stream.
        publish_captions: bool,
    },

    /// Re-assert the camera/microphone publish flags on the local stream.
    SetPublishFlags {
        /// Publish video.
        video: bool,
        /// Publish audio.
        audio: bool,
    },

    /// Subscribe to the local publisher's own stream for captions only:
    /// zero volume, invisible render target. Local captions arrive through
    /// this channel, not through the publish path.
    SubscribeSelfCaptions {
        /// Local publisher stream id.
        stream_id: StreamId,
    },

    /// Probe the platform for screen-share capability.
    ProbeScreenShare,

    /// Create and publish the independent screen-share stream.
    PublishScreen {
        /// Fixed layout hints for the screen tile.
        layout: TileLayout,
        /// Publish audio along with the screen.
        publish_audio: bool,
    },

    /// Destroy the screen-share publisher.
    DestroyScreen,

    /// Subscribe to a remote stream.
    Subscribe {
        /// Stream to subscribe to.
        stream_id: StreamId,
        /// Target render region (screen-share vs. generic remote video).
        region: Region,
        /// Fixed layout hints.
        layout: TileLayout,
        /// Enable caption delivery for this subscriber.
        captions: bool,
    },

    /// Dispose the subscriber for a stream.
    Unsubscribe {
        /// Stream whose subscriber is disposed.
        stream_id: StreamId,
    },

    /// Ask the captioning backend to start a captioning session.
    StartCaptions {
        /// Room session id.
        session_id: String,
        /// Room access token.
        token: String,
    },

    /// Ask the captioning backend to stop the captioning session.
    StopCaptions {
        /// Handle returned when captioning started.
        caption_id: CaptionsId,
    },

    /// Unpublish the local stream.
    Unpublish,

    /// Disconnect the SDK session.
    Disconnect,

    /// Surface a blocking alert to the user.
    Alert {
        /// Alert text.
        message: String,
    },

    /// Surface a transient notification to the user.
    Notify {
        /// Notification text.
        message: String,
    },
}
