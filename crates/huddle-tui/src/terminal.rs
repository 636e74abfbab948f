//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Session actions go to the
//! in-process simulated call; captioning requests go to the HTTP backend
//! when one is configured.

use std::{
    io::{self, Stdout, stdout},
    path::PathBuf,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use huddle_app::{App, AppEvent, Driver, KeyInput};
use huddle_client::{SessionAction, SessionEvent, backend::BackendClient};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{sim, ui};

/// File the transcript export is written to.
const TRANSCRIPT_FILE: &str = "transcript.txt";

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the call
/// plumbing: the simulated SDK call plus the optional captioning backend.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    call: Option<sim::CallHandle>,
    backend: Option<BackendClient>,
    /// Resolutions of in-flight backend requests.
    backend_tx: mpsc::UnboundedSender<SessionEvent>,
    backend_rx: mpsc::UnboundedReceiver<SessionEvent>,
    transcript_path: PathBuf,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    ///
    /// With a backend client, captioning start/stop requests go over HTTP;
    /// without one they are answered by the simulated call.
    pub fn new(backend: Option<BackendClient>) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend_terminal = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend_terminal)?;
        let event_stream = EventStream::new();

        let (backend_tx, backend_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            event_stream,
            call: None,
            backend,
            backend_tx,
            backend_rx,
            transcript_path: PathBuf::from(TRANSCRIPT_FILE),
        })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        }
    }

    /// Forward an action to the simulated call, if one is running.
    async fn forward(&mut self, action: SessionAction) -> Result<(), TerminalError> {
        if let Some(call) = &self.call {
            call.to_call.send(action).await.map_err(|_| TerminalError::ChannelSend)?;
        }
        Ok(())
    }
}

/// Issue a captioning request against the HTTP backend on its own task.
///
/// The event loop must never wait on the backend; the resolution comes back
/// through `resolutions` and is delivered by `recv_event`.
fn spawn_captions_request(
    backend: BackendClient,
    action: SessionAction,
    resolutions: mpsc::UnboundedSender<SessionEvent>,
) {
    tokio::spawn(async move {
        let event = match action {
            SessionAction::StartCaptions { session_id, token } => {
                match backend.start_captions(&session_id, &token).await {
                    Ok(captions_id) => SessionEvent::CaptionsStarted { captions_id },
                    Err(e) => {
                        tracing::warn!(error = %e, "captions start request failed");
                        SessionEvent::CaptionsStartFailed { reason: e.to_string() }
                    },
                }
            },
            SessionAction::StopCaptions { caption_id } => {
                match backend.stop_captions(&caption_id).await {
                    Ok(()) => SessionEvent::CaptionsStopped,
                    Err(e) => {
                        tracing::warn!(error = %e, "captions stop request failed");
                        SessionEvent::CaptionsStopFailed { reason: e.to_string() }
                    },
                }
            },
            _ => return,
        };
        // Receiver dropped means the driver is shutting down.
        let _ = resolutions.send(event);
    });
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(50);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event.code).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(Some(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    async fn execute(&mut self, action: SessionAction) -> Result<(), Self::Error> {
        match action {
            SessionAction::Connect { .. } => {
                let call = sim::spawn_call();
                let to_call = call.to_call.clone();
                self.call = Some(call);
                to_call.send(action).await.map_err(|_| TerminalError::ChannelSend)?;
            },

            SessionAction::StartCaptions { .. } | SessionAction::StopCaptions { .. } => {
                match self.backend.clone() {
                    Some(backend) => {
                        spawn_captions_request(backend, action, self.backend_tx.clone());
                    },
                    None => self.forward(action).await?,
                }
            },

            SessionAction::Disconnect => {
                self.forward(action).await?;
                if let Some(call) = self.call.take() {
                    call.stop();
                }
            },

            other => self.forward(other).await?,
        }
        Ok(())
    }

    async fn recv_event(&mut self) -> Option<SessionEvent> {
        if let Ok(event) = self.backend_rx.try_recv() {
            return Some(event);
        }
        self.call.as_mut().and_then(|call| call.from_call.try_recv().ok())
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn save_transcript(&mut self, contents: &str) -> Result<(), Self::Error> {
        std::fs::write(&self.transcript_path, contents)?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(call) = self.call.take() {
            call.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
