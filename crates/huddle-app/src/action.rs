//! Application side-effects and intents.
//!
//! [`AppAction`] represents instructions produced by the [`crate::App`]
//! state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Join the call.
    JoinCall,

    /// Toggle the camera.
    ToggleCamera,

    /// Toggle the microphone.
    ToggleMicrophone,

    /// Toggle screen sharing.
    ToggleScreenShare,

    /// Toggle live captions.
    ToggleCaptions,

    /// End the call.
    EndCall,

    /// Save the rendered transcript as `transcript.txt`.
    ExportTranscript {
        /// Rendered plain-text transcript.
        contents: String,
    },
}
