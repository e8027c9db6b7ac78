//! Value serializer
//!
//! Turns one argument into its printable form:
//!
//! - errors print their trace text
//! - objects and arrays print as 4-space indented JSON in insertion order
//! - composites that contain a reference cycle cannot be JSON and fall back
//!   to an inspect-style rendering that marks the back references
//! - everything else prints its literal text
//!
//! [`serialize`] never fails.

use super::error::{LoggerError, Result};
use super::value::{format_float, Composite, Primitive, Shape, Value};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;

/// Nesting depth the inspect renderer expands before abbreviating
const INSPECT_MAX_DEPTH: usize = 2;

/// Widest single-line inspect rendering before entries are broken onto lines
const INSPECT_LINE_WIDTH: usize = 72;

/// Printable text for a single argument
pub fn serialize(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Error(e) => e.stack(),
        Value::Composite(c) => match to_pretty_json(c) {
            Ok(json) => json,
            Err(_) => inspect(c),
        },
        Value::Primitive(p) => p.to_string(),
        Value::Callable(c) => c.source().to_string(),
    }
}

/// Indented JSON for a composite, failing on reference cycles
pub fn to_pretty_json(composite: &Composite) -> Result<String> {
    let json = to_json(composite)?;

    let mut buf = Vec::new();
    let formatter = NumberFormatter(PrettyFormatter::with_indent(b"    "));
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    json.serialize(&mut ser)?;

    String::from_utf8(buf).map_err(|e| LoggerError::other(e.to_string()))
}

/// Pretty formatter whose floats print the same as top-level numbers
struct NumberFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for NumberFormatter<'_> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}

/// JSON tree for a composite, failing on reference cycles
pub fn to_json(composite: &Composite) -> Result<serde_json::Value> {
    JsonBuilder::default().composite(composite)
}

#[derive(Default)]
struct JsonBuilder {
    ancestors: Vec<usize>,
    path: Vec<String>,
}

impl JsonBuilder {
    fn composite(&mut self, composite: &Composite) -> Result<serde_json::Value> {
        if self.ancestors.contains(&composite.id()) {
            return Err(LoggerError::circular(self.path_string()));
        }
        self.ancestors.push(composite.id());

        let json = match composite.shape() {
            Shape::Object(entries) => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries {
                    self.path.push(key.clone());
                    if let Some(member) = self.member(&value)? {
                        map.insert(key, member);
                    }
                    self.path.pop();
                }
                serde_json::Value::Object(map)
            }
            Shape::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for (idx, value) in values.iter().enumerate() {
                    self.path.push(idx.to_string());
                    items.push(self.member(value)?.unwrap_or(serde_json::Value::Null));
                    self.path.pop();
                }
                serde_json::Value::Array(items)
            }
        };

        self.ancestors.pop();
        Ok(json)
    }

    /// `None` means the member has no JSON form and is skipped in objects
    fn member(&mut self, value: &Value) -> Result<Option<serde_json::Value>> {
        let json = match value {
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Primitive(Primitive::Undefined) | Value::Callable(_) => return Ok(None),
            Value::Primitive(Primitive::Null) => serde_json::Value::Null,
            Value::Primitive(Primitive::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Primitive(Primitive::Int(i)) => serde_json::Value::Number((*i).into()),
            Value::Primitive(Primitive::Float(f)) => json_float(*f),
            // Error fields are not enumerable
            Value::Error(_) => serde_json::Value::Object(serde_json::Map::new()),
            Value::Composite(c) => self.composite(c)?,
        };
        Ok(Some(json))
    }

    fn path_string(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.path {
            path.push('.');
            path.push_str(segment);
        }
        path
    }
}

fn json_float(value: f64) -> serde_json::Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return serde_json::Value::Number((value as i64).into());
    }
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Inspect-style rendering that tolerates reference cycles
///
/// ```
/// use unklogger::{Composite, Value};
/// use unklogger::core::serializer::inspect;
///
/// let node = Composite::object().with("id", 7);
/// node.insert("self", &node);
/// assert_eq!(inspect(&node), "<ref *1> { id: 7, self: [Circular *1] }");
/// ```
pub fn inspect(composite: &Composite) -> String {
    let mut inspector = Inspector::default();
    inspector.mark_cycles(composite, 0);
    inspector.render_composite(composite, 0)
}

#[derive(Default)]
struct Inspector {
    /// Nodes that something refers back to, in discovery order
    targets: Vec<usize>,
    ancestors: Vec<usize>,
}

impl Inspector {
    fn mark_cycles(&mut self, composite: &Composite, depth: usize) {
        let id = composite.id();
        if self.ancestors.contains(&id) {
            if !self.targets.contains(&id) {
                self.targets.push(id);
            }
            return;
        }
        if depth > INSPECT_MAX_DEPTH {
            return;
        }

        self.ancestors.push(id);
        for child in children(composite) {
            if let Value::Composite(c) = child {
                self.mark_cycles(&c, depth + 1);
            }
        }
        self.ancestors.pop();
    }

    fn reference(&self, id: usize) -> Option<usize> {
        self.targets.iter().position(|t| *t == id).map(|i| i + 1)
    }

    fn render_value(&mut self, value: &Value, depth: usize) -> String {
        match value {
            Value::Text(s) => quote(s),
            Value::Error(e) => e.stack(),
            Value::Primitive(p) => p.to_string(),
            Value::Callable(c) => match c.name() {
                Some(name) => format!("[Function: {}]", name),
                None => "[Function (anonymous)]".to_string(),
            },
            Value::Composite(c) => self.render_composite(c, depth),
        }
    }

    fn render_composite(&mut self, composite: &Composite, depth: usize) -> String {
        let id = composite.id();
        if self.ancestors.contains(&id) {
            return match self.reference(id) {
                Some(n) => format!("[Circular *{}]", n),
                None => "[Circular]".to_string(),
            };
        }

        let shape = composite.shape();
        let (open, close) = match shape {
            Shape::Object(_) => ('{', '}'),
            Shape::Array(_) => ('[', ']'),
        };
        if depth > INSPECT_MAX_DEPTH {
            return match shape {
                Shape::Object(_) => "[Object]".to_string(),
                Shape::Array(_) => "[Array]".to_string(),
            };
        }

        let prefix = match self.reference(id) {
            Some(n) => format!("<ref *{}> ", n),
            None => String::new(),
        };

        self.ancestors.push(id);
        let entries: Vec<String> = match shape {
            Shape::Object(entries) => entries
                .iter()
                .map(|(key, value)| format!("{}: {}", format_key(key), self.render_value(value, depth + 1)))
                .collect(),
            Shape::Array(values) => values
                .iter()
                .map(|value| self.render_value(value, depth + 1))
                .collect(),
        };
        self.ancestors.pop();

        if entries.is_empty() {
            return format!("{}{}{}", prefix, open, close);
        }

        let single = format!("{}{} {} {}", prefix, open, entries.join(", "), close);
        let indent = "  ".repeat(depth);
        let fits = indent.len() + single.chars().count() <= INSPECT_LINE_WIDTH;
        if fits && !entries.iter().any(|e| e.contains('\n')) {
            return single;
        }

        let inner = format!("{}  ", indent);
        let body = entries
            .iter()
            .map(|e| format!("{}{}", inner, e))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("{}{}\n{}\n{}{}", prefix, open, body, indent, close)
    }
}

fn children(composite: &Composite) -> Vec<Value> {
    match composite.shape() {
        Shape::Object(entries) => entries.into_iter().map(|(_, v)| v).collect(),
        Shape::Array(values) => values,
    }
}

/// Single quotes unless the text contains one, then double quotes, then backticks
fn quote(s: &str) -> String {
    let delimiter = if !s.contains('\'') {
        '\''
    } else if !s.contains('"') {
        '"'
    } else if !s.contains('`') && !s.contains("${") {
        '`'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' || c == '\u{7f}' => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

fn format_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
