//! State shared by every command in a run.

use deskmate_cli::config::{Config, DataPaths};
use deskmate_cli::storage::{FileLineStore, HistoryLog, NoteRepository};

use super::reminders::Reminders;

pub struct Context {
    pub config: Config,
    pub paths: DataPaths,
    pub notes: NoteRepository<FileLineStore>,
    pub history: HistoryLog<FileLineStore>,
    pub reminders: Reminders,
    /// True inside the shell, where reminders run in the background.
    pub interactive: bool,
}

impl Context {
    pub fn new(config: Config, paths: DataPaths, interactive: bool) -> Self {
        tracing::debug!(
            "Notes at {:?}, history at {:?}",
            paths.notes,
            paths.history
        );

        Self {
            notes: NoteRepository::new(FileLineStore::new(&paths.notes)),
            history: HistoryLog::new(FileLineStore::new(&paths.history)),
            reminders: Reminders::new(),
            config,
            paths,
            interactive,
        }
    }
}
