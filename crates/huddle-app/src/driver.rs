//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use huddle_client::{SessionAction, SessionEvent};

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production TUI and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, an in-process call
///   simulator for the SDK side
/// - **Simulation**: Scripted events for deterministic tests
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no events are ready.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Execute a session action against the SDK or the captioning backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK or backend call cannot be issued.
    fn execute(
        &mut self,
        action: SessionAction,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive the next SDK or backend event.
    ///
    /// Returns an event or `None` if no events are ready.
    fn recv_event(&mut self) -> impl Future<Output = Option<SessionEvent>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Persist an exported transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript cannot be written.
    fn save_transcript(&mut self, contents: &str) -> Result<(), Self::Error>;

    /// Stop the session and clean up resources.
    fn stop(&mut self);
}
