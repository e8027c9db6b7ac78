//! Per-call event context

use super::extensions::ExtensionFn;
use super::value::Value;
use std::fmt;

/// Record of a single log call
///
/// Built by the formatter, handed by `&mut` through the `beforeWrite` and
/// `afterWrite` hooks, then returned to the caller with the extensions that
/// were registered at call time bound onto it.
#[derive(Clone)]
pub struct EventContext {
    /// Local time of the call, `YYYY-MM-DD HH:mm:ss`
    pub timestamp: String,
    /// Labels extracted from the first argument
    pub tags: Vec<Value>,
    /// Serialized payload
    pub message: String,
    /// Final line: `<timestamp> | [tag] ... message`
    pub output: String,
    /// Call arguments exactly as passed, tags included
    pub arguments: Vec<Value>,
    extensions: Vec<(String, ExtensionFn)>,
}

impl EventContext {
    pub fn new(
        timestamp: String,
        tags: Vec<Value>,
        message: String,
        output: String,
        arguments: Vec<Value>,
    ) -> Self {
        Self {
            timestamp,
            tags,
            message,
            output,
            arguments,
            extensions: Vec::new(),
        }
    }

    /// Invoke a bound extension with this context and `args`
    ///
    /// Returns `None` if no extension of that name was registered when the
    /// context was produced.
    pub fn call<I>(&self, name: &str, args: I) -> Option<Value>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let (_, extension) = self.extensions.iter().find(|(n, _)| n == name)?;
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        Some(extension(self, &args))
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|(n, _)| n == name)
    }

    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(|(n, _)| n.as_str())
    }

    pub(crate) fn bind_extensions(&mut self, extensions: Vec<(String, ExtensionFn)>) {
        self.extensions = extensions;
    }
}

impl fmt::Debug for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("timestamp", &self.timestamp)
            .field("tags", &self.tags)
            .field("message", &self.message)
            .field("output", &self.output)
            .field("arguments", &self.arguments)
            .field("extensions", &self.extension_names().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output)
    }
}
