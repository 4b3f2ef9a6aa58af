//! Fire-and-forget reminder timers.
//!
//! Reminders run on a small tokio runtime owned by the shell. They only
//! print to the terminal and never touch the note or history files.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::runtime::{Builder, Runtime};

/// Reminder timers. The runtime is started on first use, so commands
/// that never schedule anything don't pay for it.
pub struct Reminders {
    runtime: OnceLock<Runtime>,
    pending: Arc<AtomicUsize>,
}

impl Reminders {
    pub fn new() -> Self {
        Self {
            runtime: OnceLock::new(),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn runtime(&self) -> Result<&Runtime> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("deskmate-reminders")
            .enable_all()
            .build()
            .context("Failed to start reminder runtime")?;
        tracing::debug!("Reminder runtime started");
        Ok(self.runtime.get_or_init(|| runtime))
    }

    /// Schedules a reminder and returns immediately.
    pub fn schedule(&self, delay: Duration, title: String, message: String) -> Result<()> {
        let runtime = self.runtime()?;
        let pending = Arc::clone(&self.pending);
        pending.fetch_add(1, Ordering::SeqCst);

        tracing::debug!("Reminder '{}' scheduled in {:?}", title, delay);
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            announce(&title, &message);
            pending.fetch_sub(1, Ordering::SeqCst);
        });
        Ok(())
    }

    /// Blocks the calling thread until the reminder fires.
    pub fn wait(&self, delay: Duration, title: &str, message: &str) -> Result<()> {
        self.runtime()?.block_on(tokio::time::sleep(delay));
        announce(title, message);
        Ok(())
    }

    /// Number of scheduled reminders that have not fired yet.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Exits the process cleanly on Ctrl-C instead of dying mid-line.
    pub fn exit_on_ctrl_c(&self) -> Result<()> {
        self.runtime()?.spawn(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("\nExiting.");
                std::process::exit(0);
            }
        });
        Ok(())
    }
}

impl Default for Reminders {
    fn default() -> Self {
        Self::new()
    }
}

fn announce(title: &str, message: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "\x07\n{} {}",
        format!("[{title}]").yellow().bold(),
        message
    );
    let _ = stdout.flush();
}
