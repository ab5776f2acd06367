//! Universal triple-target type.

use std::hash::{Hash, Hasher};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Var;

/// Target of a relation triple.
///
/// Covers everything the right-hand side of an AMR relation can be:
/// - `Var`: another concept node (a graph edge)
/// - `String`: a quoted literal, e.g. the operands of a `name` node
/// - `Int` / `Float`: numeric quantities; integral floats collapse to `Int`
/// - `Bool`: boolean constants
/// - `Atom`: a bare raw-token constant, e.g. polarity `-`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Var(Var),
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Atom(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Var(_) => "VAR",
            Value::String(_) => "STRING",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::Bool(_) => "BOOLEAN",
            Value::Atom(_) => "ATOM",
        }
    }

    /// Bare-constant target, printed without quotes (e.g. polarity `-`).
    pub fn atom(s: impl Into<String>) -> Self {
        Value::Atom(s.into())
    }

    /// Numeric value with the `.0` suffix collapsed: an integral, in-range
    /// float becomes `Int`, anything else stays `Float`.
    pub fn number(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 && f.abs() <= (1i64 << 53) as f64 {
            Value::Int(f as i64)
        } else {
            Value::Float(f)
        }
    }

    pub fn as_var(&self) -> Option<Var> {
        match self {
            Value::Var(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Atom(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool { matches!(self, Value::Atom(_)) }
}

// Float targets compare and hash bitwise so triples can live in a set.

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Var(a), Value::Var(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Var(v) => v.hash(state),
            Value::String(s) | Value::Atom(s) => s.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<Var> for Value { fn from(v: Var) -> Self { Value::Var(v) } }
impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Var(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Atom(a) => write!(f, "{a}"),
        }
    }
}
