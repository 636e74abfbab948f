//! Call-session client
//!
//! Action-based state machine for one conference call. Coordinates the
//! media-SDK session lifecycle, the publisher flags, the subscriber
//! registry, and the captioning session.
//!
//! # Architecture
//!
//! Sans-IO: the session receives events ([`SessionEvent`]), processes them
//! through pure state machine logic, and returns actions ([`SessionAction`])
//! for the caller to execute against the SDK and the captioning backend.
//!
//! # Components
//!
//! - [`CallSession`]: top-level state machine for one call
//! - [`SessionEvent`]: events fed into the session
//! - [`SessionAction`]: actions produced by the session
//!
//! # HTTP backend (optional)
//!
//! With the `http` feature enabled, this crate also provides [`backend`]:
//! a reqwest client for the room and captioning endpoints.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;
mod session;

#[cfg(feature = "http")]
pub mod backend;

pub use error::SessionError;
pub use event::{ScreenShareCapability, SessionAction, SessionEvent};
pub use huddle_core::{
    CaptionEvent, CaptionsId, MediaKind, Region, RoomCredentials, StreamId, TileLayout, Transcript,
    TranscriptEntry,
};
pub use session::{CallPhase, CallSession, CaptionState, SubscriberEntry};
