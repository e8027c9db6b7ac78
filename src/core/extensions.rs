//! Extension registry
//!
//! Extensions are named callbacks that every produced [`EventContext`]
//! carries, so a caller can chain follow-up behavior onto a log call:
//!
//! ```
//! use unklogger::{Logger, Value};
//!
//! let mut logger = Logger::builder().quiet(true).build();
//! logger.add_extension("ping", |_ctx, _args| Value::from("pong"));
//!
//! let ctx = logger.info(["FOO"]);
//! assert_eq!(ctx.call("ping", Vec::<Value>::new()), Some(Value::from("pong")));
//! ```

use super::error::{LoggerError, Result};
use super::event_context::EventContext;
use super::serializer::is_identifier;
use super::value::Value;
use std::fmt;
use std::sync::Arc;

/// Extension callback: receives the context it is bound to plus call arguments
pub type ExtensionFn = Arc<dyn Fn(&EventContext, &[Value]) -> Value + Send + Sync>;

#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    entries: Vec<(String, ExtensionFn)>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `name` is an identifier
    pub fn validate_name(name: &str) -> Result<()> {
        if is_identifier(name) {
            return Ok(());
        }
        let reason = match name.chars().next() {
            None => "must not be empty".to_string(),
            Some(c) if c.is_ascii_digit() => "must not start with a digit".to_string(),
            Some(_) => match name
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$'))
            {
                Some(bad) => format!("contains invalid character '{}'", bad),
                None => "is not an identifier".to_string(),
            },
        };
        Err(LoggerError::invalid_extension_name(name, reason))
    }

    /// Register or replace the extension called `name`
    pub fn register(&mut self, name: impl Into<String>, extension: ExtensionFn) -> Result<()> {
        let name = name.into();
        Self::validate_name(&name)?;

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = extension,
            None => self.entries.push((name, extension)),
        }
        Ok(())
    }

    /// Attach the current set of extensions to `context`
    pub fn bind(&self, context: &mut EventContext) {
        context.bind_extensions(self.entries.clone());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
