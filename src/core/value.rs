//! Log call arguments
//!
//! A log call takes any mix of strings, numbers, errors, objects and arrays.
//! [`Value`] is the closed set of shapes an argument can take; every
//! serialization rule dispatches on [`Value::classify`].
//!
//! Objects and arrays are [`Composite`] nodes with reference semantics:
//! cloning a composite shares the node, so a composite can be inserted into
//! itself and form a cycle.

use super::error::Result;
use super::serializer;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A single log call argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Error(ErrorValue),
    Composite(Composite),
    Primitive(Primitive),
    Callable(Callable),
}

/// Classification tag used to pick a serialization rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    ErrorLike,
    Composite,
    Primitive,
    Callable,
}

/// Scalar values that are not text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Undefined,
}

/// An error captured as an argument, rendered by its trace text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    name: String,
    message: String,
    stack: Option<String>,
}

/// A function-like argument, rendered by its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    name: Option<String>,
    source: String,
}

/// Contents of a composite node
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Key/value entries in insertion order
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
}

/// Shared object or array node
#[derive(Clone)]
pub struct Composite(Arc<RwLock<Shape>>);

impl Value {
    pub fn classify(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Error(_) => ValueKind::ErrorLike,
            Value::Composite(_) => ValueKind::Composite,
            Value::Primitive(_) => ValueKind::Primitive,
            Value::Callable(_) => ValueKind::Callable,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn null() -> Self {
        Value::Primitive(Primitive::Null)
    }

    pub fn undefined() -> Self {
        Value::Primitive(Primitive::Undefined)
    }

    /// Capture any error type, including its source chain
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Value::Error(ErrorValue::from_error(err))
    }

    /// Convert any serializable type into a value tree
    ///
    /// # Example
    ///
    /// ```
    /// use unklogger::Value;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Request { method: &'static str, status: u16 }
    ///
    /// let value = Value::from_serialize(&Request { method: "GET", status: 200 }).unwrap();
    /// assert_eq!(
    ///     unklogger::core::serializer::serialize(&value),
    ///     "{\n    \"method\": \"GET\",\n    \"status\": 200\n}"
    /// );
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Value::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// String coercion used when a value is interpolated into text, e.g. a tag
    pub fn to_display_string(&self) -> String {
        let mut out = String::new();
        self.display_into(&mut out, &mut Vec::new());
        out
    }

    fn display_into(&self, out: &mut String, ancestors: &mut Vec<usize>) {
        match self {
            Value::Text(s) => out.push_str(s),
            Value::Error(e) => out.push_str(&e.to_string()),
            Value::Primitive(p) => out.push_str(&p.to_string()),
            Value::Callable(c) => out.push_str(c.source()),
            Value::Composite(c) => match c.shape() {
                Shape::Object(_) => out.push_str("[object Object]"),
                Shape::Array(values) => {
                    // Arrays already being joined further up render as empty
                    if ancestors.contains(&c.id()) {
                        return;
                    }
                    ancestors.push(c.id());
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        match value {
                            Value::Primitive(p) if p.is_nullish() => {}
                            other => other.display_into(out, ancestors),
                        }
                    }
                    ancestors.pop();
                }
            },
        }
    }
}

impl Primitive {
    pub fn is_nullish(&self) -> bool {
        matches!(self, Primitive::Null | Primitive::Undefined)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Int(i) => write!(f, "{}", i),
            Primitive::Float(fl) => f.write_str(&format_float(*fl)),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Null => f.write_str("null"),
            Primitive::Undefined => f.write_str("undefined"),
        }
    }
}

/// Number text: integral values drop the fraction, non-finite values are named,
/// magnitudes at or above 1e21 or below 1e-6 use exponent form
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        exponent_form(value)
    } else {
        format!("{}", value)
    }
}

/// `1.5e+300`, `1e-7`: shortest mantissa, signed exponent
fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error and its `source()` chain as trace text
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let name = short_type_name::<E>();
        let message = err.to_string();

        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\nCaused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            name,
            message,
            stack: Some(stack),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full trace text, falling back to `name: message`
    pub fn stack(&self) -> String {
        self.stack
            .clone()
            .unwrap_or_else(|| format!("{}: {}", self.name, self.message))
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

fn short_type_name<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    if full.starts_with("dyn ") {
        return "Error".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

impl Callable {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            name: None,
            source: source.into(),
        }
    }

    pub fn named(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            source: source.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Composite {
    pub fn object() -> Self {
        Self(Arc::new(RwLock::new(Shape::Object(Vec::new()))))
    }

    pub fn array() -> Self {
        Self(Arc::new(RwLock::new(Shape::Array(Vec::new()))))
    }

    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let composite = Self::object();
        for (key, value) in entries {
            composite.insert(key, value);
        }
        composite
    }

    pub fn from_values<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self(Arc::new(RwLock::new(Shape::Array(values))))
    }

    /// Set `key`, overwriting in place when it already exists
    ///
    /// Arrays only accept numeric keys within `0..=len`; anything else is ignored.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let mut shape = self.0.write();
        match &mut *shape {
            Shape::Object(entries) => {
                if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                    return Some(std::mem::replace(&mut slot.1, value));
                }
                entries.push((key, value));
                None
            }
            Shape::Array(values) => match key.parse::<usize>() {
                Ok(idx) if idx < values.len() => Some(std::mem::replace(&mut values[idx], value)),
                Ok(idx) if idx == values.len() => {
                    values.push(value);
                    None
                }
                _ => None,
            },
        }
    }

    /// Builder form of [`Composite::insert`]
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append to an array. Returns `false` for objects.
    pub fn push(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        match &mut *self.0.write() {
            Shape::Array(values) => {
                values.push(value);
                true
            }
            Shape::Object(_) => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match &*self.0.read() {
            Shape::Object(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            Shape::Array(values) => key.parse::<usize>().ok().and_then(|i| values.get(i).cloned()),
        }
    }

    /// Snapshot of the current contents; children stay shared
    pub fn shape(&self) -> Shape {
        self.0.read().clone()
    }

    pub fn is_array(&self) -> bool {
        matches!(&*self.0.read(), Shape::Array(_))
    }

    pub fn len(&self) -> usize {
        match &*self.0.read() {
            Shape::Object(entries) => entries.len(),
            Shape::Array(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &Composite) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the node, stable for its lifetime
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Composite({})", serializer::inspect(self))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Primitive(Primitive::Bool(b))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Primitive(Primitive::Int(i64::from(i)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => Value::Primitive(Primitive::Int(i)),
            Err(_) => Value::Primitive(Primitive::Float(i as f64)),
        }
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Primitive(Primitive::Float(f64::from(f)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Primitive(Primitive::Float(f))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::undefined()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or_else(Value::null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Composite(Composite::from_values(values))
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(e)
    }
}

impl From<Composite> for Value {
    fn from(c: Composite) -> Self {
        Value::Composite(c)
    }
}

impl From<&Composite> for Value {
    fn from(c: &Composite) -> Self {
        Value::Composite(c.clone())
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::from(i),
                None => Value::from(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(values) => Value::Composite(Composite::from_values(values)),
            serde_json::Value::Object(map) => Value::Composite(Composite::from_entries(map)),
        }
    }
}
