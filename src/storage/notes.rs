//! Note repository.
//!
//! Notes live in a single line-oriented text file owned by this module.
//! Every operation re-reads the file: nothing is cached between calls, so
//! positions always reflect the current file order.
//!
//! # Positions are not handles
//!
//! A note's position is its 1-based rank in the file. Deleting note `k`
//! shifts every later note down by one, so a position obtained from
//! [`NoteRepository::search`] or [`NoteRepository::list_all`] is only
//! valid until the next mutating call.

use super::clock::{Clock, SystemClock};
use super::error::{Result, StoreError};
use super::line_store::LineStore;
use super::models::{format_line, split_timestamp, Note, SearchHit, TIMESTAMP_FORMAT};

/// Timestamped notes on top of a [`LineStore`].
pub struct NoteRepository<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: LineStore> NoteRepository<S, SystemClock> {
    /// Creates a repository stamping notes with the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: LineStore, C: Clock> NoteRepository<S, C> {
    /// Creates a repository with an explicit clock.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends a new note stamped with the current time.
    ///
    /// Surrounding whitespace and one layer of matching quotes are
    /// removed first; nothing left is [`StoreError::EmptyNoteText`].
    pub fn add(&self, text: &str) -> Result<Note> {
        let text = normalize_text(text)?;
        let timestamp = self.timestamp();

        self.store.append_line(&format_line(&timestamp, &text))?;
        let position = self.count()?;

        tracing::debug!("Added note {} to {}", position, self.store.location());
        Ok(Note {
            position,
            timestamp: Some(timestamp),
            text,
        })
    }

    /// Lists every note in file order, positions starting at 1.
    pub fn list_all(&self) -> Result<Vec<Note>> {
        Ok(self
            .store
            .read_all()?
            .iter()
            .enumerate()
            .map(|(i, line)| Note::from_line(i + 1, line))
            .collect())
    }

    /// Number of stored notes.
    pub fn count(&self) -> Result<usize> {
        Ok(self.store.read_all()?.len())
    }

    /// Returns the note at `position`.
    pub fn get(&self, position: usize) -> Result<Note> {
        let lines = self.store.read_all()?;
        let idx = checked_index(position, lines.len())?;
        Ok(Note::from_line(position, &lines[idx]))
    }

    /// Case-insensitive substring search over full lines, timestamp
    /// included. An empty keyword matches every note.
    pub fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        let needle = keyword.to_lowercase();
        Ok(self
            .store
            .read_all()?
            .into_iter()
            .enumerate()
            .filter(|(_, line)| line.to_lowercase().contains(&needle))
            .map(|(i, line)| SearchHit {
                position: i + 1,
                line,
            })
            .collect())
    }

    /// Removes the note at `position` and returns it.
    ///
    /// Fails with [`StoreError::IndexOutOfRange`] without touching the
    /// file when `position` is not in `1..=count`.
    pub fn delete_by_index(&self, position: usize) -> Result<Note> {
        let mut lines = self.store.read_all()?;
        let idx = checked_index(position, lines.len())?;

        let removed = lines.remove(idx);
        self.store.overwrite_all(&lines)?;

        tracing::debug!("Deleted note {} from {}", position, self.store.location());
        Ok(Note::from_line(position, &removed))
    }

    /// Removes every note whose full line contains `keyword`
    /// (case-insensitive) and returns how many were removed.
    ///
    /// No match is not an error. An empty or blank keyword is rejected
    /// with [`StoreError::EmptyKeyword`] since it would match everything.
    pub fn delete_by_keyword(&self, keyword: &str) -> Result<usize> {
        if keyword.trim().is_empty() {
            return Err(StoreError::EmptyKeyword);
        }

        let needle = keyword.to_lowercase();
        let lines = self.store.read_all()?;
        let before = lines.len();
        let kept: Vec<String> = lines
            .into_iter()
            .filter(|line| !line.to_lowercase().contains(&needle))
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            self.store.overwrite_all(&kept)?;
        }

        tracing::debug!(
            "Deleted {} notes matching {:?} from {}",
            removed,
            keyword,
            self.store.location()
        );
        Ok(removed)
    }

    /// Replaces the text of the note at `position`, keeping its original
    /// timestamp. Returns the old stored line.
    ///
    /// A line without a timestamp prefix gets a fresh one.
    pub fn edit_by_index(&self, position: usize, new_text: &str) -> Result<String> {
        let new_text = normalize_text(new_text)?;
        let mut lines = self.store.read_all()?;
        let idx = checked_index(position, lines.len())?;

        let timestamp = match split_timestamp(&lines[idx]) {
            (Some(ts), _) => ts.to_string(),
            (None, _) => self.timestamp(),
        };
        let old = std::mem::replace(&mut lines[idx], format_line(&timestamp, &new_text));
        self.store.overwrite_all(&lines)?;

        tracing::debug!("Edited note {} in {}", position, self.store.location());
        Ok(old)
    }

    fn timestamp(&self) -> String {
        self.clock.now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Maps a 1-based position onto a vector index.
fn checked_index(position: usize, count: usize) -> Result<usize> {
    if position == 0 || position > count {
        return Err(StoreError::IndexOutOfRange { position, count });
    }
    Ok(position - 1)
}

/// Trims whitespace and one layer of matching surrounding quotes.
///
/// A lone quote character counts as an empty quoted string. Whitespace
/// just inside the quotes is trimmed as well, since the stored line
/// separates timestamp and text with a single space.
fn normalize_text(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            let rest = trimmed.strip_prefix(*q)?;
            if rest.is_empty() {
                return Some(rest);
            }
            rest.strip_suffix(*q)
        })
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        return Err(StoreError::EmptyNoteText);
    }
    if unquoted.contains(['\n', '\r']) {
        return Err(StoreError::MultilineText);
    }
    Ok(unquoted.to_string())
}
