//! Storage layer for Deskmate
//!
//! Notes and calculation history are plain text files, one record per
//! line, behind the [`LineStore`] port.

pub mod clock;
pub mod error;
pub mod history;
pub mod line_store;
pub mod models;
pub mod notes;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, StoreError};
pub use history::{HistoryLog, HISTORY_LIMIT};
pub use line_store::{FileLineStore, LineStore, MemoryLineStore};
pub use models::*;
pub use notes::NoteRepository;
