//! Append-only call transcript.

use std::fmt::Write as _;

/// One finalized caption attributed to a speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Speaker display name, resolved at caption time from the name map.
    pub speaker: String,
    /// Finalized caption text.
    pub text: String,
}

/// Append-only ordered sequence of finalized captions.
///
/// Entries are appended only for final caption events; interim captions
/// never reach the transcript. Cleared when the call ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized caption.
    pub fn append(&mut self, speaker: impl Into<String>, text: impl Into<String>) {
        self.entries.push(TranscriptEntry { speaker: speaker.into(), text: text.into() });
    }

    /// Entries in arrival order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render the export format.
    ///
    /// Per entry, exactly `Name: <name> \n Text: <text> \n` with no
    /// separator between entries beyond each entry's trailing newline.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            // write! to a String cannot fail
            let _ = write!(out, "Name: {} \n Text: {} \n", entry.speaker, entry.text);
        }
        out
    }
}
