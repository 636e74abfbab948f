//! Session-to-Application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`huddle_client::CallSession`] and
//! adapts it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] into specific session events
//!   and call operations.
//! - Accumulates outgoing [`huddle_client::SessionAction`] to be executed by
//!   the driver against the SDK and backend in the next I/O cycle.
//! - Interprets results from the session and converts them back into
//!   [`crate::AppEvent`]s to update the UI, including the transcript delta
//!   and caption-flag transitions.

use huddle_client::{CallPhase, CallSession, SessionAction, SessionError, SessionEvent};
use huddle_core::RoomCredentials;

use crate::{AppAction, AppEvent};

/// Bridge between App and call-session logic.
pub struct Bridge {
    session: CallSession,
    outgoing: Vec<SessionAction>,
    /// Transcript entries already surfaced to the App.
    transcript_seen: usize,
    /// Last captioning flag surfaced to the App.
    captions_on: bool,
    /// Last local screen-share flag surfaced to the App.
    screen_sharing: bool,
    /// Last lifecycle phase surfaced to the App.
    last_phase: CallPhase,
}

impl Bridge {
    /// Create a new Bridge for the given room credentials.
    pub fn new(credentials: RoomCredentials) -> Self {
        let session = CallSession::new(credentials);
        let last_phase = session.phase();
        Self {
            session,
            outgoing: Vec::new(),
            transcript_seen: 0,
            captions_on: false,
            screen_sharing: false,
            last_phase,
        }
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::JoinCall => {
                if self.session.phase() == CallPhase::Ended {
                    self.reset_session();
                }
                let result = self.session.connect();
                self.handle_session_result(result)
            },
            AppAction::ToggleCamera => self.feed(SessionEvent::ToggleCamera),
            AppAction::ToggleMicrophone => self.feed(SessionEvent::ToggleMicrophone),
            AppAction::ToggleScreenShare => self.feed(SessionEvent::ToggleScreenShare),
            AppAction::ToggleCaptions => self.feed(SessionEvent::ToggleCaptions),
            AppAction::EndCall => self.feed(SessionEvent::EndCall),
            AppAction::Render | AppAction::Quit | AppAction::ExportTranscript { .. } => vec![],
        }
    }

    /// Handle an SDK or backend event delivered by the driver.
    pub fn handle_sdk_event(&mut self, event: SessionEvent) -> Vec<AppEvent> {
        self.feed(event)
    }

    /// Take pending outgoing session actions.
    pub fn take_outgoing(&mut self) -> Vec<SessionAction> {
        std::mem::take(&mut self.outgoing)
    }

    /// The wrapped session.
    pub fn session(&self) -> &CallSession {
        &self.session
    }

    /// Replace an ended session with a fresh one for the same room.
    ///
    /// `CallSession` is single-use; rejoining needs a new instance and a
    /// reset of every surfaced-state cursor.
    fn reset_session(&mut self) {
        self.session = CallSession::new(self.session.credentials().clone());
        self.transcript_seen = 0;
        self.captions_on = false;
        self.screen_sharing = false;
        self.last_phase = self.session.phase();
    }

    fn feed(&mut self, event: SessionEvent) -> Vec<AppEvent> {
        let result = self.session.handle(event);
        self.handle_session_result(result)
    }

    fn handle_session_result(
        &mut self,
        result: Result<Vec<SessionAction>, SessionError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => {
                let mut events = self.process_session_actions(actions);
                events.extend(self.drain_state_changes());
                events
            },
            Err(e) => {
                tracing::warn!(error = %e, "session rejected operation");
                vec![AppEvent::Error { message: e.to_string() }]
            },
        }
    }

    fn process_session_actions(&mut self, actions: Vec<SessionAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                SessionAction::Alert { message } => {
                    events.push(AppEvent::Alert { message });
                },
                SessionAction::Notify { message } => {
                    events.push(AppEvent::Notice { message });
                },
                SessionAction::SetPublishFlags { video, audio } => {
                    events.push(AppEvent::PublishFlags { camera: video, mic: audio });
                    self.outgoing.push(SessionAction::SetPublishFlags { video, audio });
                },
                SessionAction::Subscribe { stream_id, region, layout, captions } => {
                    let name = self
                        .session
                        .display_name(&stream_id)
                        .unwrap_or_default()
                        .to_string();
                    events.push(AppEvent::TileAdded {
                        stream_id: stream_id.clone(),
                        name,
                        region,
                    });
                    self.outgoing.push(SessionAction::Subscribe {
                        stream_id,
                        region,
                        layout,
                        captions,
                    });
                },
                SessionAction::Unsubscribe { stream_id } => {
                    events.push(AppEvent::TileRemoved { stream_id: stream_id.clone() });
                    self.outgoing.push(SessionAction::Unsubscribe { stream_id });
                },
                SessionAction::Connect { .. }
                | SessionAction::PublishScreen { .. }
                | SessionAction::DestroyScreen
                | SessionAction::Publish { .. }
                | SessionAction::SubscribeSelfCaptions { .. }
                | SessionAction::ProbeScreenShare
                | SessionAction::StartCaptions { .. }
                | SessionAction::StopCaptions { .. }
                | SessionAction::Unpublish
                | SessionAction::Disconnect => {
                    self.outgoing.push(action);
                },
            }
        }

        events
    }

    /// Surface observable session-state transitions as App events.
    fn drain_state_changes(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();

        let phase = self.session.phase();
        if phase != self.last_phase {
            match phase {
                CallPhase::Connecting => events.push(AppEvent::Connecting),
                CallPhase::InCall => events.push(AppEvent::Connected),
                CallPhase::Ended => events.push(AppEvent::CallEnded),
                CallPhase::New => {},
            }
            self.last_phase = phase;
        }

        let captions_on = self.session.captions_on();
        if captions_on != self.captions_on {
            self.captions_on = captions_on;
            events.push(AppEvent::CaptionsChanged { captions: captions_on });
        }

        let screen_sharing = self.session.screen_sharing();
        if screen_sharing != self.screen_sharing {
            self.screen_sharing = screen_sharing;
            events.push(AppEvent::ScreenShareChanged { sharing: screen_sharing });
        }

        // Transcript resets on call end; re-sync the cursor.
        let entries = self.session.transcript().entries();
        if entries.len() < self.transcript_seen {
            self.transcript_seen = 0;
        }
        for entry in &entries[self.transcript_seen..] {
            events.push(AppEvent::TranscriptAppended {
                speaker: entry.speaker.clone(),
                text: entry.text.clone(),
            });
        }
        self.transcript_seen = entries.len();

        events
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use huddle_client::ScreenShareCapability;
    use huddle_core::{CaptionEvent, CaptionsId, MediaKind, StreamId};

    use super::*;

    fn credentials() -> RoomCredentials {
        RoomCredentials::new("app-key", "session-1", "token-1", "Alice")
    }

    fn in_call_bridge() -> Bridge {
        let mut bridge = Bridge::new(credentials());
        let _ = bridge.process_app_action(AppAction::JoinCall);
        let _ = bridge.handle_sdk_event(SessionEvent::Connected);
        let _ = bridge.take_outgoing();
        bridge
    }

    #[test]
    fn join_queues_connect_and_reports_connecting() {
        let mut bridge = Bridge::new(credentials());
        let events = bridge.process_app_action(AppAction::JoinCall);
        assert!(events.iter().any(|e| matches!(e, AppEvent::Connecting)));
        assert!(
            bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Connect { .. }))
        );
    }

    #[test]
    fn connected_surfaces_and_queues_publish() {
        let mut bridge = Bridge::new(credentials());
        let _ = bridge.process_app_action(AppAction::JoinCall);
        let _ = bridge.take_outgoing();

        let events = bridge.handle_sdk_event(SessionEvent::Connected);
        assert!(events.iter().any(|e| matches!(e, AppEvent::Connected)));
        assert!(
            bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Publish { .. }))
        );
    }

    #[test]
    fn announced_stream_becomes_a_named_tile() {
        let mut bridge = in_call_bridge();
        let events = bridge.handle_sdk_event(SessionEvent::StreamCreated {
            stream_id: StreamId::new("s1"),
            name: "Bob".to_string(),
            kind: MediaKind::Camera,
        });
        assert!(
            events
                .iter()
                .any(|e| matches!(e, AppEvent::TileAdded { name, .. } if name == "Bob"))
        );
        assert!(
            bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Subscribe { .. }))
        );
    }

    #[test]
    fn final_caption_surfaces_transcript_delta() {
        let mut bridge = in_call_bridge();
        let _ = bridge.handle_sdk_event(SessionEvent::StreamCreated {
            stream_id: StreamId::new("s1"),
            name: "Bob".to_string(),
            kind: MediaKind::Camera,
        });

        let events = bridge.handle_sdk_event(SessionEvent::CaptionReceived(
            CaptionEvent::finalized(StreamId::new("s1"), "hello"),
        ));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::TranscriptAppended { speaker, text }
                if speaker == "Bob" && text == "hello"
        )));
    }

    #[test]
    fn captions_flag_changes_on_backend_resolution() {
        let mut bridge = in_call_bridge();
        let events = bridge.process_app_action(AppAction::ToggleCaptions);
        assert!(!events.iter().any(|e| matches!(e, AppEvent::CaptionsChanged { .. })));

        let events = bridge
            .handle_sdk_event(SessionEvent::CaptionsStarted { captions_id: CaptionsId::new("c1") });
        assert!(
            events.iter().any(|e| matches!(e, AppEvent::CaptionsChanged { captions: true }))
        );
    }

    #[test]
    fn share_flag_follows_capability_probe() {
        let mut bridge = in_call_bridge();
        let events = bridge.process_app_action(AppAction::ToggleScreenShare);
        assert!(!events.iter().any(|e| matches!(e, AppEvent::ScreenShareChanged { .. })));

        let events = bridge.handle_sdk_event(SessionEvent::ScreenShareCapability(
            ScreenShareCapability::native(),
        ));
        assert!(
            events.iter().any(|e| matches!(e, AppEvent::ScreenShareChanged { sharing: true }))
        );
    }

    #[test]
    fn unsupported_share_surfaces_alert() {
        let mut bridge = in_call_bridge();
        let _ = bridge.process_app_action(AppAction::ToggleScreenShare);
        let events = bridge.handle_sdk_event(SessionEvent::ScreenShareCapability(
            ScreenShareCapability::unsupported(),
        ));
        assert!(events.iter().any(|e| matches!(e, AppEvent::Alert { .. })));
    }

    #[test]
    fn toggle_before_call_surfaces_error() {
        let mut bridge = Bridge::new(credentials());
        let events = bridge.process_app_action(AppAction::ToggleCamera);
        assert!(events.iter().any(|e| matches!(e, AppEvent::Error { .. })));
    }

    #[test]
    fn rejoin_after_end_starts_a_fresh_session() {
        let mut bridge = in_call_bridge();
        let _ = bridge.process_app_action(AppAction::EndCall);
        let _ = bridge.take_outgoing();

        let events = bridge.process_app_action(AppAction::JoinCall);
        assert!(events.iter().any(|e| matches!(e, AppEvent::Connecting)));
        assert!(!events.iter().any(|e| matches!(e, AppEvent::Error { .. })));
        assert!(
            bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Connect { .. }))
        );
    }

    #[test]
    fn end_call_surfaces_call_ended_and_queues_teardown() {
        let mut bridge = in_call_bridge();
        let events = bridge.process_app_action(AppAction::EndCall);
        assert!(events.iter().any(|e| matches!(e, AppEvent::CallEnded)));
        assert!(
            bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Disconnect))
        );
    }
}
