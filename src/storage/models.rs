//! Record types for the note store and history log.
//!
//! Notes are persisted one per line as `[YYYY-MM-DD HH:MM:SS] <text>`.
//! A note's position is not stored; it is the 1-based rank of its line
//! in the file and is recomputed on every read.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `strftime` format of the timestamp stored in front of every note.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static NOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]*)\] ?(.*)$").expect("note line pattern is valid"));

/// A note as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Current 1-based rank in file order. Changes when earlier notes
    /// are deleted, so it is not a stable identifier.
    pub position: usize,

    /// Creation timestamp without brackets. `None` for lines written by
    /// hand without the `[...]` prefix.
    pub timestamp: Option<String>,

    /// Free-form note text.
    pub text: String,
}

impl Note {
    /// Parses a stored line into a note at the given position.
    pub fn from_line(position: usize, line: &str) -> Self {
        let (timestamp, text) = split_timestamp(line);
        Self {
            position,
            timestamp: timestamp.map(str::to_string),
            text: text.to_string(),
        }
    }

    /// Renders the note back into its stored form.
    pub fn to_line(&self) -> String {
        match &self.timestamp {
            Some(ts) => format_line(ts, &self.text),
            None => self.text.clone(),
        }
    }
}

/// A search result: the matching note's current position and its full
/// stored line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Current 1-based position of the note.
    pub position: usize,
    /// The stored line, timestamp included.
    pub line: String,
}

/// Splits `"[ts] text"` into its timestamp and text parts.
///
/// Lines that do not start with a bracketed prefix yield no timestamp
/// and the whole line as text.
pub fn split_timestamp(line: &str) -> (Option<&str>, &str) {
    match NOTE_LINE.captures(line) {
        Some(caps) => {
            let ts = caps.get(1).map(|m| m.as_str());
            let text = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            (ts, text)
        }
        None => (None, line),
    }
}

/// Formats a stored note line.
pub fn format_line(timestamp: &str, text: &str) -> String {
    format!("[{timestamp}] {text}")
}
