//! In-memory sink that captures lines
//!
//! Clones share one buffer, so a clone handed to a logger can be read back
//! through the original:
//!
//! ```
//! use unklogger::prelude::*;
//!
//! let captured = MemorySink::new();
//! let logger = Logger::builder()
//!     .all_sinks(captured.clone())
//!     .colors(false)
//!     .build();
//!
//! logger.warn(["disk", "almost full"]);
//! assert!(captured.lines()[0].ends_with("| [disk] almost full"));
//! ```

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MemorySink {
    name: String,
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of every captured line
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.lines.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Remove and return the captured lines
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
