//! Deskmate - a local personal-assistant shell
//!
//! Deskmate is a read-eval-print loop of small commands: timestamped
//! notes, a calculator with a bounded history, unit conversion and a
//! handful of system utilities. Notes and history are kept as plain text
//! files, one record per line.

pub mod calc;
pub mod config;
pub mod convert;
pub mod storage;
pub mod system;
