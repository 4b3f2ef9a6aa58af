//! Thin wrappers around the operating system.
//!
//! These back the `time`, `open`, `sysinfo`, `battery`, `network` and
//! `find` commands. None of them touch the note store or the history log.

pub mod fun;
pub mod host;
pub mod text;

use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::storage::TIMESTAMP_FORMAT;

pub use host::{BatteryInfo, NetworkInfo, Usage};

/// Current local time as `YYYY-MM-DD HH:MM:SS`.
pub fn now_string() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Strips one layer of surrounding quotes from a user-typed path.
/// A lone quote character yields an empty string.
pub fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    ['"', '\'']
        .iter()
        .find_map(|q| {
            let rest = trimmed.strip_prefix(*q)?;
            if rest.is_empty() {
                return Some(rest);
            }
            rest.strip_suffix(*q)
        })
        .unwrap_or(trimmed)
}

fn is_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Opens a file, folder or URL with the desktop's default handler.
///
/// Returns the target as it was opened. Local paths must exist.
pub fn open_path(raw: &str) -> Result<String> {
    let target = unquote(raw);
    if target.is_empty() {
        bail!("No path given");
    }

    if !is_url(target) && !Path::new(target).exists() {
        bail!("Path not found: {target}");
    }

    tracing::debug!("Opening {:?}", target);
    webbrowser::open(target).with_context(|| format!("Error opening {target}"))?;
    Ok(target.to_string())
}

/// Snapshot of host information for the `sysinfo` command.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub os: String,
    pub family: String,
    pub arch: String,
    pub hostname: String,
    pub logical_cpus: Option<usize>,
    /// Busy share of all CPUs over a short sample (Linux only).
    pub cpu_usage_percent: Option<f64>,
    /// 1, 5 and 15 minute load averages (Unix only).
    pub load_average: Option<[f64; 3]>,
    pub memory: Option<Usage>,
    /// Filesystem holding the root directory.
    pub disk: Option<Usage>,
    pub current_dir: Option<PathBuf>,
}

impl SystemInfo {
    /// Gathers host information. Blocks for [`host::CPU_SAMPLE`] while
    /// CPU usage is measured.
    pub fn collect() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            os: std::env::consts::OS.to_string(),
            family: std::env::consts::FAMILY.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            hostname,
            logical_cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .ok(),
            cpu_usage_percent: host::cpu_usage(),
            load_average: load_average(),
            memory: host::memory_usage(),
            disk: host::disk_usage(Path::new("/")),
            current_dir: std::env::current_dir().ok(),
        }
    }
}

fn load_average() -> Option<[f64; 3]> {
    #[cfg(unix)]
    {
        let mut loads = [0f64; 3];
        // SAFETY: getloadavg writes at most `nelem` doubles into the
        // buffer, which holds exactly three.
        let n = unsafe { libc::getloadavg(loads.as_mut_ptr(), 3) };
        if n == 3 {
            return Some(loads);
        }
        None
    }

    #[cfg(not(unix))]
    {
        None
    }
}

/// Lists paths matching a glob pattern, sorted, capped at `limit`.
///
/// Returns the total number of matches alongside the listed paths.
pub fn find_paths(pattern: &str, limit: usize) -> Result<(Vec<PathBuf>, usize)> {
    let pattern = unquote(pattern);
    let entries =
        glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("Skipping unreadable path: {}", e);
                None
            }
        })
        .collect();
    paths.sort();

    let total = paths.len();
    paths.truncate(limit);
    Ok((paths, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_now_string_format() {
        let now = now_string();
        assert!(
            chrono::NaiveDateTime::parse_from_str(&now, TIMESTAMP_FORMAT).is_ok(),
            "Unexpected time format: {now}"
        );
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"C:\\My Files\""), "C:\\My Files");
        assert_eq!(unquote(" '/tmp/x' "), "/tmp/x");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\""), "");
    }

    #[test]
    fn test_open_missing_path_fails_without_launching() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = open_path(&missing.display().to_string()).unwrap_err();

        assert!(err.to_string().starts_with("Path not found"));
    }

    #[test]
    fn test_system_info_collects_basics() {
        let info = SystemInfo::collect();
        assert!(!info.os.is_empty());
        assert!(!info.arch.is_empty());
        assert!(info.logical_cpus.unwrap_or(1) >= 1);
        if let Some(usage) = info.cpu_usage_percent {
            assert!((0.0..=100.0).contains(&usage));
        }
        if let Some(memory) = info.memory {
            assert!(memory.used <= memory.total);
        }
    }

    #[test]
    fn test_find_paths_sorted_and_limited() {
        let dir = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.txt", "skip.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let pattern = dir.path().join("*.txt").display().to_string();

        let (paths, total) = find_paths(&pattern, 2).unwrap();

        assert_eq!(total, 3);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.txt"));
        assert!(paths[1].ends_with("b.txt"));
    }

    #[test]
    fn test_find_paths_rejects_bad_pattern() {
        assert!(find_paths("[", 10).is_err());
    }
}
