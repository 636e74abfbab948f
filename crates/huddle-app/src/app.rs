//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from I/O and
//! SDK mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks media tiles, control flags, and the transcript view.
//! - Maps key presses onto the five call controls plus export and end-call.
//! - Holds the blocking alert and transient status message.

use huddle_core::{Region, StreamId, Transcript};

use crate::{AppAction, AppEvent, ConnectionState, ControlFlags, KeyInput, Tile};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or SDK.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Applied control flags as confirmed by the bridge.
    flags: ControlFlags,
    /// Media tiles in arrival order.
    tiles: Vec<Tile>,
    /// Transcript view (mirror of the session's transcript).
    transcript: Transcript,
    /// Blocking alert. Any key dismisses it.
    alert: Option<String>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create a new App.
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            flags: ControlFlags::default(),
            tiles: Vec::new(),
            transcript: Transcript::new(),
            alert: None,
            status_message: None,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                self.state = ConnectionState::InCall;
                vec![AppAction::Render]
            },
            AppEvent::TileAdded { stream_id, name, region } => {
                if !self.tiles.iter().any(|t| t.stream_id == stream_id) {
                    self.tiles.push(Tile { stream_id, name, region });
                }
                vec![AppAction::Render]
            },
            AppEvent::TileRemoved { stream_id } => {
                self.tiles.retain(|t| t.stream_id != stream_id);
                vec![AppAction::Render]
            },
            AppEvent::PublishFlags { camera, mic } => {
                self.flags.camera = camera;
                self.flags.mic = mic;
                vec![AppAction::Render]
            },
            AppEvent::ScreenShareChanged { sharing } => {
                self.flags.screen_sharing = sharing;
                vec![AppAction::Render]
            },
            AppEvent::CaptionsChanged { captions } => {
                self.flags.captions = captions;
                vec![AppAction::Render]
            },
            AppEvent::TranscriptAppended { speaker, text } => {
                self.transcript.append(speaker, text);
                vec![AppAction::Render]
            },
            AppEvent::Alert { message } => {
                self.alert = Some(message);
                vec![AppAction::Render]
            },
            AppEvent::Notice { message } => {
                self.status_message = Some(message);
                vec![AppAction::Render]
            },
            AppEvent::CallEnded => {
                self.state = ConnectionState::Disconnected;
                self.flags = ControlFlags::default();
                self.tiles.clear();
                self.transcript.clear();
                self.status_message = Some("Call ended".to_string());
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Map a key press onto call controls.
    ///
    /// A pending alert swallows the key and is dismissed, matching the
    /// blocking-dialog semantics of the original alerts.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if self.alert.take().is_some() {
            return vec![AppAction::Render];
        }

        match key {
            KeyInput::Char('c') => vec![AppAction::ToggleCamera],
            KeyInput::Char('m') => vec![AppAction::ToggleMicrophone],
            KeyInput::Char('s') => vec![AppAction::ToggleScreenShare],
            KeyInput::Char('t') => vec![AppAction::ToggleCaptions],
            KeyInput::Char('d') => {
                self.status_message = Some("Transcript exported".to_string());
                vec![
                    AppAction::ExportTranscript { contents: self.transcript.render_plain() },
                    AppAction::Render,
                ]
            },
            // Overflow menu placeholder: present, no behavior.
            KeyInput::Char('o') => vec![],
            KeyInput::Char('q') => vec![AppAction::Quit],
            KeyInput::Esc => vec![AppAction::EndCall],
            KeyInput::Enter => {
                if self.state == ConnectionState::Disconnected {
                    vec![AppAction::JoinCall, AppAction::Render]
                } else {
                    vec![]
                }
            },
            KeyInput::Char(_) => vec![],
        }
    }

    /// Initiate joining the call.
    pub fn join(&self) -> Vec<AppAction> {
        vec![AppAction::JoinCall, AppAction::Render]
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Applied control flags.
    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Media tiles in arrival order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Whether a remote participant is sharing a screen.
    pub fn remote_screen_active(&self) -> bool {
        self.tiles.iter().any(|t| t.region == Region::Screen)
    }

    /// Whether we are in a call with no remote tiles yet (spinner state).
    pub fn waiting_for_peers(&self) -> bool {
        self.state == ConnectionState::InCall && self.tiles.is_empty()
    }

    /// Transcript view.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Pending blocking alert. `None` if no alert.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Remove a tile by stream id (used by tests and the bridge).
    pub fn tile_for(&self, stream_id: &StreamId) -> Option<&Tile> {
        self.tiles.iter().find(|t| &t.stream_id == stream_id)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_call_app() -> App {
        let mut app = App::new();
        let _ = app.handle(AppEvent::Connected);
        app
    }

    #[test]
    fn keys_map_to_controls() {
        let mut app = in_call_app();
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('c'))), vec![AppAction::ToggleCamera]);
        assert_eq!(
            app.handle(AppEvent::Key(KeyInput::Char('m'))),
            vec![AppAction::ToggleMicrophone]
        );
        assert_eq!(
            app.handle(AppEvent::Key(KeyInput::Char('s'))),
            vec![AppAction::ToggleScreenShare]
        );
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('t'))), vec![AppAction::ToggleCaptions]);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), vec![AppAction::EndCall]);
    }

    #[test]
    fn overflow_key_has_no_behavior() {
        let mut app = in_call_app();
        assert!(app.handle(AppEvent::Key(KeyInput::Char('o'))).is_empty());
    }

    #[test]
    fn alert_blocks_and_is_dismissed_by_any_key() {
        let mut app = in_call_app();
        let _ = app.handle(AppEvent::Alert { message: "Screen sharing not supported".to_string() });
        assert!(app.alert().is_some());

        // Key is consumed by the alert, not the control it maps to.
        let actions = app.handle(AppEvent::Key(KeyInput::Char('c')));
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.alert().is_none());
    }

    #[test]
    fn export_carries_rendered_transcript() {
        let mut app = in_call_app();
        let _ = app.handle(AppEvent::TranscriptAppended {
            speaker: "Alice".to_string(),
            text: "hi".to_string(),
        });

        let actions = app.handle(AppEvent::Key(KeyInput::Char('d')));
        let Some(AppAction::ExportTranscript { contents }) = actions.first() else {
            unreachable!("export action expected");
        };
        assert_eq!(contents, "Name: Alice \n Text: hi \n");
    }

    #[test]
    fn duplicate_tiles_are_ignored() {
        let mut app = in_call_app();
        for _ in 0..2 {
            let _ = app.handle(AppEvent::TileAdded {
                stream_id: StreamId::new("s1"),
                name: "Bob".to_string(),
                region: Region::Remote,
            });
        }
        assert_eq!(app.tiles().len(), 1);
    }

    #[test]
    fn screen_tile_marks_remote_share() {
        let mut app = in_call_app();
        let _ = app.handle(AppEvent::TileAdded {
            stream_id: StreamId::new("scr"),
            name: "Bob".to_string(),
            region: Region::Screen,
        });
        assert!(app.remote_screen_active());

        let _ = app.handle(AppEvent::TileRemoved { stream_id: StreamId::new("scr") });
        assert!(!app.remote_screen_active());
    }

    #[test]
    fn call_ended_resets_view() {
        let mut app = in_call_app();
        let _ = app.handle(AppEvent::TileAdded {
            stream_id: StreamId::new("s1"),
            name: "Bob".to_string(),
            region: Region::Remote,
        });
        let _ = app.handle(AppEvent::TranscriptAppended {
            speaker: "Bob".to_string(),
            text: "yo".to_string(),
        });
        let _ = app.handle(AppEvent::PublishFlags { camera: false, mic: false });

        let _ = app.handle(AppEvent::CallEnded);
        assert_eq!(app.connection_state(), ConnectionState::Disconnected);
        assert!(app.tiles().is_empty());
        assert!(app.transcript().is_empty());
        assert_eq!(app.flags(), ControlFlags::default());
    }

    #[test]
    fn waiting_for_peers_until_first_tile() {
        let mut app = in_call_app();
        assert!(app.waiting_for_peers());

        let _ = app.handle(AppEvent::TileAdded {
            stream_id: StreamId::new("s1"),
            name: "Bob".to_string(),
            region: Region::Remote,
        });
        assert!(!app.waiting_for_peers());
    }
}
