//! Call-session state machine.
//!
//! [`CallSession`] is the top-level state machine for one call. It owns the
//! publisher flags, the subscriber registry, the stream-id-to-name map, the
//! caption machine, and the transcript, and reconciles asynchronous SDK and
//! backend events against them.
//!
//! All handles that the original design kept in per-callback reference cells
//! are owned fields here, with a well-defined lifetime: created on join,
//! cleared on end call.

use std::collections::HashMap;

use huddle_core::{
    CaptionEvent, CaptionsId, MediaKind, Region, RoomCredentials, StreamId, TileLayout, Transcript,
};

use crate::{
    error::SessionError,
    event::{ScreenShareCapability, SessionAction, SessionEvent},
};

/// Alert text when the platform cannot share a screen at all.
const ALERT_SHARE_UNSUPPORTED: &str = "Screen sharing not supported";

/// Alert text when screen sharing needs a missing browser extension.
const ALERT_SHARE_EXTENSION: &str = "Browser requires extension";

/// Lifecycle phase of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Session created, not yet connecting.
    New,
    /// Connect issued, waiting for the SDK.
    Connecting,
    /// Connected; media and captions flow.
    InCall,
    /// Call ended. Late callbacks are ignored.
    Ended,
}

/// Camera/microphone publish flags.
///
/// Mutated only by user intent; every mutation re-asserts both flags on the
/// local stream so the applied publish state always matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PublisherFlags {
    camera: bool,
    mic: bool,
}

impl Default for PublisherFlags {
    fn default() -> Self {
        Self { camera: true, mic: true }
    }
}

/// Screen-share publisher lifecycle. At most one handle ever exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenShare {
    /// Not sharing.
    Off,
    /// Capability probe in flight.
    Probing,
    /// Screen publisher created.
    Active,
}

/// Captioning session state.
///
/// The observable flag transitions on request resolution, not initiation:
/// a failed start rolls back to `Off`, a failed stop rolls back to `On`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionState {
    /// No captioning session.
    Off,
    /// Start request in flight.
    Starting,
    /// Captioning live; the handle is required to stop it.
    On(CaptionsId),
    /// Stop request in flight; the handle is kept for rollback.
    Stopping(CaptionsId),
}

/// One tracked remote subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEntry {
    /// SDK-assigned stream id.
    pub stream_id: StreamId,
    /// Display name recorded at announce time.
    pub name: String,
    /// Camera or screen-share stream.
    pub kind: MediaKind,
}

/// State machine for one call.
pub struct CallSession {
    credentials: RoomCredentials,
    phase: CallPhase,
    publisher: PublisherFlags,
    local_stream: Option<StreamId>,
    screen_share: ScreenShare,
    remote_screen_active: bool,
    subscribers: HashMap<StreamId, SubscriberEntry>,
    names: HashMap<StreamId, String>,
    /// Final captions that arrived before their stream was announced,
    /// buffered per stream id in arrival order.
    pending_captions: HashMap<StreamId, Vec<String>>,
    transcript: Transcript,
    captions: CaptionState,
}

impl CallSession {
    /// Create a session for the given room credentials.
    pub fn new(credentials: RoomCredentials) -> Self {
        Self {
            credentials,
            phase: CallPhase::New,
            publisher: PublisherFlags::default(),
            local_stream: None,
            screen_share: ScreenShare::Off,
            remote_screen_active: false,
            subscribers: HashMap::new(),
            names: HashMap::new(),
            pending_captions: HashMap::new(),
            transcript: Transcript::new(),
            captions: CaptionState::Off,
        }
    }

    /// Initiate the connection.
    pub fn connect(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        if self.phase != CallPhase::New {
            return Err(SessionError::AlreadyConnected);
        }
        self.phase = CallPhase::Connecting;
        Ok(vec![SessionAction::Connect { credentials: self.credentials.clone() }])
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>, SessionError> {
        match event {
            SessionEvent::ToggleCamera => self.handle_toggle_camera(),
            SessionEvent::ToggleMicrophone => self.handle_toggle_microphone(),
            SessionEvent::ToggleScreenShare => self.handle_toggle_screen_share(),
            SessionEvent::ToggleCaptions => self.handle_toggle_captions(),
            SessionEvent::EndCall => Ok(self.handle_end_call()),
            SessionEvent::Connected => Ok(self.handle_connected()),
            SessionEvent::ConnectFailed { reason } => Ok(self.handle_connect_failed(&reason)),
            SessionEvent::PublisherReady { stream_id } => Ok(self.handle_publisher_ready(stream_id)),
            SessionEvent::PublishFailed { reason } => {
                // Swallowed like connect failures: logged, no user surface.
                tracing::warn!(%reason, "publishing local stream failed");
                Ok(vec![])
            },
            SessionEvent::StreamCreated { stream_id, name, kind } => {
                Ok(self.handle_stream_created(stream_id, name, kind))
            },
            SessionEvent::StreamDestroyed { stream_id } => {
                Ok(self.handle_stream_destroyed(&stream_id))
            },
            SessionEvent::CaptionReceived(caption) => Ok(self.handle_caption(caption)),
            SessionEvent::ScreenShareCapability(capability) => {
                Ok(self.handle_share_capability(capability))
            },
            SessionEvent::ScreenShareFailed { reason } => Ok(self.handle_share_failed(&reason)),
            SessionEvent::ScreenShareEnded => Ok(self.handle_share_ended()),
            SessionEvent::CaptionsStarted { captions_id } => {
                Ok(self.handle_captions_started(captions_id))
            },
            SessionEvent::CaptionsStartFailed { reason } => {
                Ok(self.handle_captions_start_failed(&reason))
            },
            SessionEvent::CaptionsStopped => Ok(self.handle_captions_stopped()),
            SessionEvent::CaptionsStopFailed { reason } => {
                Ok(self.handle_captions_stop_failed(&reason))
            },
        }
    }

    fn handle_toggle_camera(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        self.require_in_call("toggle camera")?;
        self.publisher.camera = !self.publisher.camera;
        Ok(vec![self.publish_flags()])
    }

    fn handle_toggle_microphone(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        self.require_in_call("toggle microphone")?;
        self.publisher.mic = !self.publisher.mic;
        Ok(vec![self.publish_flags()])
    }

    fn handle_toggle_screen_share(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        self.require_in_call("toggle screen share")?;
        match self.screen_share {
            ScreenShare::Active => {
                self.screen_share = ScreenShare::Off;
                Ok(vec![SessionAction::DestroyScreen, self.publish_flags()])
            },
            ScreenShare::Off => {
                self.screen_share = ScreenShare::Probing;
                Ok(vec![SessionAction::ProbeScreenShare])
            },
            // Probe already in flight
            ScreenShare::Probing => Ok(vec![]),
        }
    }

    fn handle_toggle_captions(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        self.require_in_call("toggle captions")?;
        match self.captions.clone() {
            CaptionState::Off => {
                self.captions = CaptionState::Starting;
                Ok(vec![SessionAction::StartCaptions {
                    session_id: self.credentials.session_id.clone(),
                    token: self.credentials.token.clone(),
                }])
            },
            CaptionState::On(captions_id) => {
                self.captions = CaptionState::Stopping(captions_id.clone());
                Ok(vec![SessionAction::StopCaptions { caption_id: captions_id }])
            },
            // A request is already in flight; the toggle resolves with it.
            CaptionState::Starting | CaptionState::Stopping(_) => Ok(vec![]),
        }
    }

    fn handle_end_call(&mut self) -> Vec<SessionAction> {
        if matches!(self.phase, CallPhase::New | CallPhase::Ended) {
            return vec![];
        }

        let mut actions = Vec::new();
        if self.local_stream.is_some() {
            actions.push(SessionAction::Unpublish);
        }
        if self.screen_share == ScreenShare::Active {
            actions.push(SessionAction::DestroyScreen);
        }
        let mut stream_ids: Vec<StreamId> = self.subscribers.keys().cloned().collect();
        stream_ids.sort();
        for stream_id in stream_ids {
            actions.push(SessionAction::Unsubscribe { stream_id });
        }
        actions.push(SessionAction::Disconnect);

        self.phase = CallPhase::Ended;
        self.publisher = PublisherFlags::default();
        self.local_stream = None;
        self.screen_share = ScreenShare::Off;
        self.remote_screen_active = false;
        self.subscribers.clear();
        self.names.clear();
        self.pending_captions.clear();
        self.transcript.clear();
        self.captions = CaptionState::Off;

        actions
    }

    fn handle_connected(&mut self) -> Vec<SessionAction> {
        if self.phase != CallPhase::Connecting {
            tracing::warn!(phase = ?self.phase, "dropping Connected event");
            return vec![];
        }
        self.phase = CallPhase::InCall;
        vec![SessionAction::Publish {
            layout: TileLayout::PUBLISHER,
            name: self.credentials.display_name.clone(),
            publish_captions: true,
        }]
    }

    fn handle_connect_failed(&mut self, reason: &str) -> Vec<SessionAction> {
        // Swallowed like the original: logged, no user surface.
        tracing::warn!(%reason, "session connect failed");
        if self.phase == CallPhase::Connecting {
            self.phase = CallPhase::New;
        }
        vec![]
    }

    fn handle_publisher_ready(&mut self, stream_id: StreamId) -> Vec<SessionAction> {
        if self.phase != CallPhase::InCall {
            return vec![];
        }
        // Own captions resolve through the same name map as everyone else's.
        self.names.insert(stream_id.clone(), self.credentials.display_name.clone());
        self.local_stream = Some(stream_id.clone());
        vec![SessionAction::SubscribeSelfCaptions { stream_id }, self.publish_flags()]
    }

    fn handle_stream_created(
        &mut self,
        stream_id: StreamId,
        name: String,
        kind: MediaKind,
    ) -> Vec<SessionAction> {
        if self.phase != CallPhase::InCall {
            return vec![];
        }

        // Name must be recorded before any caption for this stream resolves.
        self.names.insert(stream_id.clone(), name.clone());
        if kind == MediaKind::Screen {
            self.remote_screen_active = true;
        }
        self.subscribers.insert(
            stream_id.clone(),
            SubscriberEntry { stream_id: stream_id.clone(), name: name.clone(), kind },
        );

        // Flush captions that raced ahead of the announcement.
        if let Some(buffered) = self.pending_captions.remove(&stream_id) {
            for text in buffered {
                self.transcript.append(name.clone(), text);
            }
        }

        vec![SessionAction::Subscribe {
            stream_id,
            region: Region::for_remote(kind),
            layout: TileLayout::SUBSCRIBER,
            captions: true,
        }]
    }

    fn handle_stream_destroyed(&mut self, stream_id: &StreamId) -> Vec<SessionAction> {
        if self.phase != CallPhase::InCall {
            return vec![];
        }

        let Some(entry) = self.subscribers.remove(stream_id) else {
            return vec![];
        };

        // Name map entry is kept until call end so trailing captions for the
        // departed stream still resolve.
        let mut actions = Vec::new();
        match entry.kind {
            MediaKind::Screen => self.remote_screen_active = false,
            MediaKind::Camera => {
                actions.push(SessionAction::Notify { message: format!("{} out room", entry.name) });
            },
        }
        actions.push(SessionAction::Unsubscribe { stream_id: stream_id.clone() });
        actions
    }

    fn handle_caption(&mut self, caption: CaptionEvent) -> Vec<SessionAction> {
        if self.phase != CallPhase::InCall || !caption.is_final {
            return vec![];
        }

        match self.names.get(&caption.stream_id) {
            Some(name) => self.transcript.append(name.clone(), caption.text),
            None => {
                // Announcement has not arrived yet; hold the caption until
                // the name is known.
                self.pending_captions.entry(caption.stream_id).or_default().push(caption.text);
            },
        }
        vec![]
    }

    fn handle_share_capability(&mut self, capability: ScreenShareCapability) -> Vec<SessionAction> {
        if self.phase != CallPhase::InCall || self.screen_share != ScreenShare::Probing {
            return vec![];
        }

        if !capability.supported || capability.extension_registered == Some(false) {
            self.screen_share = ScreenShare::Off;
            return vec![SessionAction::Alert { message: ALERT_SHARE_UNSUPPORTED.to_string() }];
        }
        if capability.extension_installed == Some(false) {
            self.screen_share = ScreenShare::Off;
            return vec![SessionAction::Alert { message: ALERT_SHARE_EXTENSION.to_string() }];
        }

        self.screen_share = ScreenShare::Active;
        vec![
            SessionAction::PublishScreen {
                layout: TileLayout::SCREEN_PUBLISHER,
                publish_audio: true,
            },
            self.publish_flags(),
        ]
    }

    fn handle_share_failed(&mut self, reason: &str) -> Vec<SessionAction> {
        tracing::warn!(%reason, "screen-share publisher failed");
        if self.screen_share == ScreenShare::Active {
            self.screen_share = ScreenShare::Off;
            return vec![self.publish_flags()];
        }
        vec![]
    }

    fn handle_share_ended(&mut self) -> Vec<SessionAction> {
        if self.screen_share != ScreenShare::Active {
            return vec![];
        }
        self.screen_share = ScreenShare::Off;
        vec![SessionAction::DestroyScreen, self.publish_flags()]
    }

    fn handle_captions_started(&mut self, captions_id: CaptionsId) -> Vec<SessionAction> {
        if self.phase == CallPhase::InCall && self.captions == CaptionState::Starting {
            self.captions = CaptionState::On(captions_id);
            return vec![];
        }
        // Late or unexpected resolution: the call ended (or state moved on)
        // while the start request was in flight. Stop the orphaned backend
        // session instead of leaking it.
        tracing::warn!(%captions_id, "stopping orphaned captioning session");
        vec![SessionAction::StopCaptions { caption_id: captions_id }]
    }

    fn handle_captions_start_failed(&mut self, reason: &str) -> Vec<SessionAction> {
        tracing::warn!(%reason, "captions failed to start");
        if self.captions != CaptionState::Starting {
            return vec![];
        }
        self.captions = CaptionState::Off;
        if self.phase == CallPhase::InCall {
            return vec![SessionAction::Notify { message: "Captions failed to start".to_string() }];
        }
        vec![]
    }

    fn handle_captions_stopped(&mut self) -> Vec<SessionAction> {
        if matches!(self.captions, CaptionState::Stopping(_)) {
            self.captions = CaptionState::Off;
        }
        vec![]
    }

    fn handle_captions_stop_failed(&mut self, reason: &str) -> Vec<SessionAction> {
        tracing::warn!(%reason, "captions failed to stop");
        if let CaptionState::Stopping(captions_id) = self.captions.clone() {
            // The backend session is still live; keep the handle.
            self.captions = CaptionState::On(captions_id);
            if self.phase == CallPhase::InCall {
                return vec![SessionAction::Notify {
                    message: "Captions failed to stop".to_string(),
                }];
            }
        }
        vec![]
    }

    fn require_in_call(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == CallPhase::InCall {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase { phase: self.phase, operation })
        }
    }

    /// Current publish-flag assertion for the local stream.
    fn publish_flags(&self) -> SessionAction {
        SessionAction::SetPublishFlags { video: self.publisher.camera, audio: self.publisher.mic }
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Room credentials this session was created with.
    pub fn credentials(&self) -> &RoomCredentials {
        &self.credentials
    }

    /// Camera publish flag.
    pub fn camera_on(&self) -> bool {
        self.publisher.camera
    }

    /// Microphone publish flag.
    pub fn mic_on(&self) -> bool {
        self.publisher.mic
    }

    /// Whether a local screen-share publisher exists.
    pub fn screen_sharing(&self) -> bool {
        self.screen_share == ScreenShare::Active
    }

    /// Whether a remote participant is sharing a screen.
    pub fn remote_screen_active(&self) -> bool {
        self.remote_screen_active
    }

    /// Captioning state.
    pub fn captions(&self) -> &CaptionState {
        &self.captions
    }

    /// Whether a captioning session is live.
    pub fn captions_on(&self) -> bool {
        matches!(self.captions, CaptionState::On(_) | CaptionState::Stopping(_))
    }

    /// The transcript so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Local publisher stream id, once known.
    pub fn local_stream(&self) -> Option<&StreamId> {
        self.local_stream.as_ref()
    }

    /// Tracked remote subscribers, in no particular order.
    pub fn subscribers(&self) -> impl Iterator<Item = &SubscriberEntry> {
        self.subscribers.values()
    }

    /// Number of tracked remote subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Display name recorded for a stream id.
    pub fn display_name(&self, stream_id: &StreamId) -> Option<&str> {
        self.names.get(stream_id).map(String::as_str)
    }
}
