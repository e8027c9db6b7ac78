//! Hook registry
//!
//! Hooks run synchronously, in registration order, around the write of each
//! line. A hook may change any field of the context; changes to `output` in a
//! `beforeWrite` hook are what gets written.

use super::error::LoggerError;
use super::event_context::EventContext;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Hook callback
pub type Hook = Arc<dyn Fn(&mut EventContext) + Send + Sync>;

/// Pipeline stage a hook is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// After the line is composed, before color and write
    BeforeWrite,
    /// After the write, including writes skipped by quiet mode
    AfterWrite,
}

impl HookEvent {
    pub const ALL: [HookEvent; 2] = [HookEvent::BeforeWrite, HookEvent::AfterWrite];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::BeforeWrite => "beforeWrite",
            HookEvent::AfterWrite => "afterWrite",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for HookEvent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for HookEvent {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| {
                let expected = HookEvent::ALL.map(|e| e.as_str()).join(", ");
                LoggerError::invalid_hook_event(s, expected)
            })
    }
}

#[derive(Clone, Default)]
pub struct HookRegistry {
    before_write: Vec<Hook>,
    after_write: Vec<Hook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, event: HookEvent, hook: Hook) {
        self.hooks_mut(event).push(hook);
    }

    /// Run every hook for `event` against `context`
    pub fn run(&self, event: HookEvent, context: &mut EventContext) {
        for hook in self.hooks(event) {
            hook(context);
        }
    }

    pub fn len(&self, event: HookEvent) -> usize {
        self.hooks(event).len()
    }

    pub fn is_empty(&self) -> bool {
        self.before_write.is_empty() && self.after_write.is_empty()
    }

    fn hooks(&self, event: HookEvent) -> &[Hook] {
        match event {
            HookEvent::BeforeWrite => &self.before_write,
            HookEvent::AfterWrite => &self.after_write,
        }
    }

    fn hooks_mut(&mut self, event: HookEvent) -> &mut Vec<Hook> {
        match event {
            HookEvent::BeforeWrite => &mut self.before_write,
            HookEvent::AfterWrite => &mut self.after_write,
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("before_write", &self.before_write.len())
            .field("after_write", &self.after_write.len())
            .finish()
    }
}
