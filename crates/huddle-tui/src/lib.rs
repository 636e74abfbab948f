//! Terminal UI for Huddle
//!
//! A thin shell over [`huddle_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`huddle_app::Runtime`].
//!
//! The SDK side of the call is an in-process simulator ([`sim`]); with
//! `--server` the room credentials and the captioning session come from the
//! real HTTP backend.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod sim;
pub mod terminal;
pub mod ui;

pub use huddle_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
