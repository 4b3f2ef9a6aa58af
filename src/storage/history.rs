//! Bounded calculation history.
//!
//! Each successful calculation is appended as `"<expression> = <result>"`
//! and the log is cut back to the most recent [`HISTORY_LIMIT`] entries
//! right after the append.

use super::error::Result;
use super::line_store::LineStore;

/// Number of entries kept in the history log.
pub const HISTORY_LIMIT: usize = 10;

/// Append-only log that retains only the newest [`HISTORY_LIMIT`] lines.
pub struct HistoryLog<S> {
    store: S,
}

impl<S: LineStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends `"<expression> = <result>"` and drops entries beyond the
    /// most recent [`HISTORY_LIMIT`].
    pub fn record(&self, expression: &str, result: &str) -> Result<()> {
        self.store.append_line(&format!("{expression} = {result}"))?;

        let lines = self.store.read_all()?;
        if lines.len() > HISTORY_LIMIT {
            let dropped = lines.len() - HISTORY_LIMIT;
            self.store.overwrite_all(&lines[dropped..])?;
            tracing::debug!("Trimmed {} old history entries", dropped);
        }
        Ok(())
    }

    /// Returns the stored entries, oldest first.
    pub fn read_recent(&self) -> Result<Vec<String>> {
        self.store.read_all()
    }

    /// Removes every entry.
    pub fn clear(&self) -> Result<()> {
        self.store.overwrite_all(&[])
    }
}
