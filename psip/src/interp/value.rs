//! Runtime values for the interpreter

use super::scope::{DictRef, Dictionary};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::rc::Rc;

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Real(f64),
    /// Boolean
    Bool(bool),
    /// Immutable string, stored without its parentheses
    String(Rc<str>),
    /// Name literal, stored with its leading `/`
    Name(Rc<str>),
    /// Deferred code: raw tokens, classified again on every run
    Block(Rc<[String]>),
    /// Shared dictionary
    Dict(DictRef),
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::String(Rc::from(text))
    }

    pub fn name(text: &str) -> Self {
        Value::Name(Rc::from(text))
    }

    pub fn block<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Block(tokens.into_iter().map(Into::into).collect())
    }

    pub fn new_dict() -> Self {
        Value::Dict(Dictionary::new().into_ref())
    }

    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Name(_) => "name",
            Value::Block(_) => "block",
            Value::Dict(_) => "dictionary",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers widen to f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Real(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text written by `=`: strings lose their parentheses
    pub fn print_form(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "({s})"),
            Value::Name(n) => write!(f, "{n}"),
            Value::Block(tokens) => write!(f, "{{{}}}", tokens.join(" ")),
            Value::Dict(dict) => write!(f, "-dict:{}-", dict.borrow().len()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Int(a), Value::Real(b)) | (Value::Real(b), Value::Int(a)) => (*a as f64) == *b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Name(a), Value::Name(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Dictionaries may contain themselves, so they serialize as their size only.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Real(x) => serializer.serialize_f64(*x),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) | Value::Name(s) => serializer.serialize_str(s),
            Value::Block(tokens) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("block", &tokens[..])?;
                map.end()
            }
            Value::Dict(dict) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("dict", &dict.borrow().len())?;
                map.end()
            }
        }
    }
}
