//! Log sink module
//!
//! Thread-safe line-oriented log destinations: stdout, stderr, an append-mode
//! file, or any caller-supplied writer.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Log output target
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
    /// Write to a caller-supplied writer
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Destination for diagnostics that are kept from clients.
///
/// Cheap to clone; clones share the same underlying target.
#[derive(Clone)]
pub struct LogSink {
    target: Arc<LogTarget>,
}

impl LogSink {
    pub fn stdout() -> Self {
        Self::from_target(LogTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::from_target(LogTarget::Stderr)
    }

    /// Append to a log file, creating it and its parent directories
    pub fn file(path: &str) -> io::Result<Self> {
        let file = open_log_file(path)?;
        Ok(Self::from_target(LogTarget::File(Mutex::new(file))))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::from_target(LogTarget::Writer(Mutex::new(Box::new(writer))))
    }

    fn from_target(target: LogTarget) -> Self {
        Self {
            target: Arc::new(target),
        }
    }

    /// Write one line. Failures to write are ignored.
    pub fn write_line(&self, message: &str) {
        match &*self.target {
            LogTarget::Stdout => {
                println!("{message}");
            }
            LogTarget::Stderr => {
                eprintln!("{message}");
            }
            LogTarget::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
            LogTarget::Writer(writer) => {
                if let Ok(mut w) = writer.lock() {
                    let _ = writeln!(w, "{message}");
                    let _ = w.flush();
                }
            }
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &*self.target {
            LogTarget::Stdout => "stdout",
            LogTarget::Stderr => "stderr",
            LogTarget::File(_) => "file",
            LogTarget::Writer(_) => "writer",
        };
        f.debug_struct("LogSink").field("target", &kind).finish()
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
