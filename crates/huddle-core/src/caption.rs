//! Caption events and the captioning session handle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::StreamId;

/// Handle for a server-side captioning session.
///
/// Returned by the captioning backend when captioning starts and required to
/// stop it. Stale once stopped; a restart acquires a fresh handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptionsId(String);

impl CaptionsId {
    /// Wrap a backend-assigned captions id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaptionsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caption delivered for one stream.
///
/// Caption events identify the speaker only by stream id; the session keeps
/// the id-to-name mapping recorded at stream announce time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEvent {
    /// Stream the caption belongs to.
    pub stream_id: StreamId,
    /// Caption text.
    pub text: String,
    /// Whether this is a finalized caption. Interim captions are discarded
    /// by the transcript.
    pub is_final: bool,
}

impl CaptionEvent {
    /// A finalized caption for `stream_id`.
    pub fn finalized(stream_id: StreamId, text: impl Into<String>) -> Self {
        Self { stream_id, text: text.into(), is_final: true }
    }

    /// An interim (partial) caption for `stream_id`.
    pub fn interim(stream_id: StreamId, text: impl Into<String>) -> Self {
        Self { stream_id, text: text.into(), is_final: false }
    }
}
