//! Core logger types and traits

pub mod decorator;
pub mod error;
pub mod event_context;
pub mod extensions;
pub mod formatter;
pub mod hooks;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod serializer;
pub mod sink;
pub mod timestamp;
pub mod value;

pub use decorator::{Decorator, Decorators};
pub use error::{LoggerError, Result};
pub use event_context::EventContext;
pub use extensions::{ExtensionFn, ExtensionRegistry};
pub use hooks::{Hook, HookEvent, HookRegistry};
pub use level::{Channel, Level};
pub use logger::{Logger, LoggerBuilder, LoggerConfig, INTERNAL_TAG};
pub use metrics::LoggerMetrics;
pub use sink::{shared, SharedSink, Sink, SinkSet};
pub use timestamp::{format_timestamp, Clock, TIMESTAMP_FORMAT};
pub use value::{Callable, Composite, ErrorValue, Primitive, Shape, Value, ValueKind};
