//! Message formatter
//!
//! Splits the call arguments into tags and payload, serializes the payload
//! and composes the output line:
//!
//! ```text
//! info(["db", "pool"], "connected", 3)  =>  "2025-01-08 10:30:45 | [db] [pool] connected 3"
//! ```
//!
//! Tag extraction only happens with two or more arguments, so a single
//! argument is always the message.

use super::event_context::EventContext;
use super::serializer::serialize;
use super::value::{Shape, Value};

/// Separator placed after an error so its trace keeps its own lines
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Build the pre-hook context for a call
pub fn format(arguments: Vec<Value>, timestamp: String) -> EventContext {
    let mut payload = arguments.clone();
    let tags = if payload.len() > 1 {
        extract_tags(payload.remove(0))
    } else {
        Vec::new()
    };

    let message = join_message(&payload);
    let output = compose_output(&timestamp, &tags, &message);

    EventContext::new(timestamp, tags, message, output, arguments)
}

/// An array is the tag list itself; anything else is a single tag
pub fn extract_tags(first: Value) -> Vec<Value> {
    if let Value::Composite(ref composite) = first {
        if let Shape::Array(values) = composite.shape() {
            return values;
        }
    }
    vec![first]
}

/// Serialize and join the payload, trimming trailing whitespace
pub fn join_message(payload: &[Value]) -> String {
    let mut message = String::new();
    for value in payload {
        message.push_str(&serialize(value));
        message.push_str(if value.is_error() { LINE_ENDING } else { " " });
    }
    message.truncate(message.trim_end().len());
    message
}

/// `[tag] ` per tag, no separator between groups
pub fn render_tags(tags: &[Value]) -> String {
    tags.iter()
        .map(|tag| format!("[{}] ", tag.to_display_string()))
        .collect()
}

pub fn compose_output(timestamp: &str, tags: &[Value], message: &str) -> String {
    format!("{} | {}{}", timestamp, render_tags(tags), message)
}
