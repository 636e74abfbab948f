//! Stream identity and classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the media SDK assigns to each stream.
///
/// Stream ids are the only key caption events carry, so every layer that
/// touches captions resolves speaker names through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StreamId(String);

impl StreamId {
    /// Wrap an SDK-assigned stream id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Camera + microphone stream.
    Camera,
    /// Screen-share stream.
    Screen,
}

/// Named render region a subscriber or publisher is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Local publisher tile.
    Publisher,
    /// Generic remote-video area.
    Remote,
    /// Dedicated screen-share area.
    Screen,
    /// Invisible target. Used for the caption-only self-subscription.
    Hidden,
}

impl Region {
    /// Target region for an announced remote stream.
    pub fn for_remote(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Camera => Self::Remote,
            MediaKind::Screen => Self::Screen,
        }
    }
}
