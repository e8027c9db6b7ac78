//! # Unklogger
//!
//! A minimal structured console logger. Each call formats its arguments into
//! one timestamped, tag-prefixed line, optionally colors it by severity and
//! writes it to the channel's sink.
//!
//! ## Features
//!
//! - **Tags**: with two or more arguments the first one labels the line
//! - **Any argument**: strings, numbers, errors, objects and arrays, with
//!   reference cycles rendered instead of failing
//! - **Hooks**: observe or rewrite each line before and after it is written
//! - **Extensions**: named callbacks bound onto every returned event context
//!
//! ```
//! use unklogger::prelude::*;
//!
//! let mut logger = Logger::new();
//! logger.add_hook("beforeWrite", |ctx| ctx.output.push_str(" (audited)"));
//!
//! let ctx = logger.warn(["disk", "90% used"]);
//! assert!(ctx.output.ends_with("[disk] 90% used (audited)"));
//! ```
//!
//! There is no hidden global instance: construct a [`Logger`] at startup and
//! hand it (or a clone) to whatever needs to log.

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Callable, Channel, Clock, Composite, ErrorValue, EventContext, HookEvent, Level, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Primitive, Result, Sink, Value,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink};
}

pub use crate::core::{
    Callable, Channel, Clock, Composite, Decorator, Decorators, ErrorValue, EventContext,
    ExtensionFn, Hook, HookEvent, Level, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Primitive, Result, SharedSink, Shape, Sink, SinkSet, Value, ValueKind,
};
pub use sinks::{ConsoleSink, MemorySink};
