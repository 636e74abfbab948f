//! Core domain types for Huddle
//!
//! Shared vocabulary for the call-session state machine and the UI layers:
//! stream identities, room credentials, caption events, and the transcript.
//!
//! This crate performs no I/O. Everything here is plain data passed between
//! the state machines and the drivers that execute their actions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod caption;
mod credentials;
mod layout;
mod stream;
mod transcript;

pub use caption::{CaptionEvent, CaptionsId};
pub use credentials::RoomCredentials;
pub use layout::{InsertMode, TileLayout};
pub use stream::{MediaKind, Region, StreamId};
pub use transcript::{Transcript, TranscriptEntry};
