//! Field value model and boolean inference

use std::fmt;

/// Literals read as `true`.
const TRUE_LITERALS: [&str; 4] = ["yes", "true", "1", "on"];
/// Literals read as `false`.
const FALSE_LITERALS: [&str; 4] = ["no", "false", "0", "off"];

/// The type a field was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    Float,
    String,
}

/// Typed side of a field. `Text` fields only live in the raw string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text,
}

/// One configuration value: the canonical string written on save, plus the
/// typed value it was created from.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    raw: String,
    value: Value,
}

impl Field {
    pub fn bool(value: bool) -> Self {
        Self {
            raw: value.to_string(),
            value: Value::Bool(value),
        }
    }

    pub fn int(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            value: Value::Int(value),
        }
    }

    pub fn float(value: f64) -> Self {
        Self {
            raw: value.to_string(),
            value: Value::Float(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            raw: value.into(),
            value: Value::Text,
        }
    }

    pub fn kind(&self) -> Kind {
        match self.value {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Text => Kind::String,
        }
    }

    pub fn value(&self) -> Value {
        self.value
    }

    /// Canonical string form, regardless of kind.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `Some` only for fields created as booleans.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Map a recognized boolean literal to its value.
///
/// Matching is exact and case-sensitive: `Yes` is not a boolean.
pub fn bool_literal(value: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&value) {
        Some(true)
    } else if FALSE_LITERALS.contains(&value) {
        Some(false)
    } else {
        None
    }
}

/// Infer the field type of an already-trimmed value.
///
/// Boolean literals become boolean fields, everything else is kept as a
/// string. Numbers are not inferred.
pub fn classify(value: &str) -> Field {
    match bool_literal(value) {
        Some(b) => Field::bool(b),
        None => Field::string(value),
    }
}
