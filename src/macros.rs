//! Logging macros for heterogeneous argument lists.
//!
//! Entry points take any iterator of values, which is awkward when the
//! arguments have different types. These macros convert each argument with
//! `Value::from`.
//!
//! # Examples
//!
//! ```
//! use unklogger::prelude::*;
//! use unklogger::{args, info};
//!
//! let logger = Logger::new();
//!
//! // Tag plus mixed payload
//! let ctx = info!(logger, "Server", "listening on port", 8080);
//! assert!(ctx.output.ends_with("[Server] listening on port 8080"));
//!
//! // Argument list for a custom call
//! let values = args!["db", Composite::object().with("pool", 4)];
//! assert_eq!(values.len(), 2);
//! ```

/// Build a `Vec<Value>` from mixed arguments.
///
/// # Examples
///
/// ```
/// use unklogger::{args, Value};
///
/// let empty = args![];
/// assert!(empty.is_empty());
///
/// let mixed = args!["tag", 1, true, ()];
/// assert_eq!(mixed[3], Value::undefined());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

/// Log on the `log` channel.
///
/// # Examples
///
/// ```
/// # use unklogger::prelude::*;
/// # let logger = Logger::new();
/// use unklogger::log;
/// log!(logger, "Simple message");
/// log!(logger, "Job", "finished in", 1.5, "s");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::args![$($arg),*])
    };
}

/// Log an info message.
///
/// # Examples
///
/// ```
/// # use unklogger::prelude::*;
/// # let logger = Logger::new();
/// use unklogger::info;
/// info!(logger, "Application started");
/// info!(logger, "Queue", "processing", 100, "items");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($crate::args![$($arg),*])
    };
}

/// Log a success message (green by default).
///
/// # Examples
///
/// ```
/// # use unklogger::prelude::*;
/// # let logger = Logger::new();
/// use unklogger::success;
/// success!(logger, "Deploy", "completed");
/// ```
#[macro_export]
macro_rules! success {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.success($crate::args![$($arg),*])
    };
}

/// Log a warning (yellow by default).
///
/// # Examples
///
/// ```
/// # use unklogger::prelude::*;
/// # let logger = Logger::new();
/// use unklogger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry", "attempt", 3, "of", 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn($crate::args![$($arg),*])
    };
}

/// Log an error (red by default).
///
/// # Examples
///
/// ```
/// # use unklogger::prelude::*;
/// # let logger = Logger::new();
/// use unklogger::error;
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
/// error!(logger, "Database", Value::error(&err));
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($crate::args![$($arg),*])
    };
}
