//! Newline-delimited text storage.
//!
//! The note repository and the history log both persist their state as
//! plain text, one record per line. This module provides the file
//! primitives and the [`LineStore`] port they are written against, so the
//! higher layers can be exercised with [`MemoryLineStore`] in tests.

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::error::{Result, StoreError};

/// Reads every line of the file at `path`, in on-disk order.
///
/// Line terminators (`\n`, `\r\n`) are stripped. A missing file reads as
/// an empty sequence.
pub fn read_all(path: &Path) -> Result<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("Line file {:?} does not exist yet", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    Ok(content.lines().map(str::to_string).collect())
}

/// Appends a single line to the file at `path`, creating the file and
/// its parent directories if needed.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    writeln!(file, "{line}").map_err(|e| StoreError::io(path, e))?;

    tracing::debug!("Appended line to {:?}", path);
    Ok(())
}

/// Replaces the whole content of the file at `path` with `lines`.
///
/// The new content is written to a sibling temp file which is then
/// renamed over the target, so a failed write leaves the previous
/// content in place.
pub fn overwrite_all(path: &Path, lines: &[String]) -> Result<()> {
    ensure_parent(path)?;

    let temp_path = temp_path_for(path);
    if let Err(e) = write_lines(&temp_path, lines) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io(&temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io(path, e));
    }

    tracing::debug!("Rewrote {:?} with {} lines", path, lines.len());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Sequence-of-lines storage used by the note repository and history log.
pub trait LineStore {
    /// Returns every stored line, oldest first. Empty if nothing is stored.
    fn read_all(&self) -> Result<Vec<String>>;

    /// Appends one line at the end.
    fn append_line(&self, line: &str) -> Result<()>;

    /// Replaces the stored content with exactly `lines`.
    fn overwrite_all(&self, lines: &[String]) -> Result<()>;

    /// Human-readable location, used in command output.
    fn location(&self) -> String;
}

/// A [`LineStore`] backed by a text file.
#[derive(Debug, Clone)]
pub struct FileLineStore {
    path: PathBuf,
}

impl FileLineStore {
    /// Creates a store for the file at `path`. Nothing is touched on disk
    /// until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineStore for FileLineStore {
    fn read_all(&self) -> Result<Vec<String>> {
        read_all(&self.path)
    }

    fn append_line(&self, line: &str) -> Result<()> {
        append_line(&self.path, line)
    }

    fn overwrite_all(&self, lines: &[String]) -> Result<()> {
        overwrite_all(&self.path, lines)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory [`LineStore`] for tests.
#[derive(Debug, Default)]
pub struct MemoryLineStore {
    lines: RefCell<Vec<String>>,
}

impl MemoryLineStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `lines`.
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            lines: RefCell::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns a copy of the stored lines.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LineStore for MemoryLineStore {
    fn read_all(&self) -> Result<Vec<String>> {
        Ok(self.lines.borrow().clone())
    }

    fn append_line(&self, line: &str) -> Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn overwrite_all(&self, lines: &[String]) -> Result<()> {
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
