//! Sink implementations

pub mod console;
pub mod memory;

pub use console::{ConsoleSink, Stream};
pub use memory::MemorySink;

// Re-export traits for convenience
pub use crate::core::{shared, SharedSink, Sink};
