//! Value type tags, type constraints and the schema itself
//!
//! Supported runtime types:
//! - null
//! - bool
//! - int: number representable as i64 or u64
//! - float: any other number
//! - string: UTF-8 string
//! - array: ordered sequence (lists and tuples alike)
//! - object: string-keyed map

use std::fmt;

use serde_json::Value;

use super::field::Field;

/// Runtime type tag of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Returns the type tag of a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueType::Int,
            Value::Number(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// What types a field accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeConstraint {
    /// Accept anything
    #[default]
    Any,
    /// Exactly one type
    Exact(ValueType),
    /// Any one of the listed types
    OneOf(Vec<ValueType>),
}

impl TypeConstraint {
    /// Whether a value's type satisfies the constraint.
    pub fn accepts(&self, value: &Value) -> bool {
        let actual = ValueType::of(value);
        match self {
            TypeConstraint::Any => true,
            TypeConstraint::Exact(expected) => *expected == actual,
            TypeConstraint::OneOf(expected) => expected.contains(&actual),
        }
    }
}

impl From<ValueType> for TypeConstraint {
    fn from(value_type: ValueType) -> Self {
        TypeConstraint::Exact(value_type)
    }
}

impl<const N: usize> From<[ValueType; N]> for TypeConstraint {
    fn from(types: [ValueType; N]) -> Self {
        TypeConstraint::OneOf(types.to_vec())
    }
}

impl From<Vec<ValueType>> for TypeConstraint {
    fn from(types: Vec<ValueType>) -> Self {
        TypeConstraint::OneOf(types)
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConstraint::Any => write!(f, "any"),
            TypeConstraint::Exact(t) => write!(f, "{}", t),
            TypeConstraint::OneOf(types) => {
                let names: Vec<&str> = types.iter().map(|t| t.type_name()).collect();
                write!(f, "({})", names.join(" | "))
            }
        }
    }
}

/// Whether a value counts as empty for the required check.
///
/// `false` is empty here; the required check exempts it separately.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Equality used for choice membership: numbers compare by value, so `1.0`
/// matches `1`. Arrays and objects compare element-wise the same way.
pub(crate) fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            x.as_f64() == y.as_f64()
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| same_value(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, a)| y.get(k).map_or(false, |b| same_value(a, b)))
        }
        _ => a == b,
    }
}

/// The ordered field set attached to one target identity.
///
/// Created once per identity and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    target: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema, naming every field after its key.
    pub fn new<I, K>(target: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        let mut named: Vec<Field> = Vec::new();
        for (key, mut field) in fields {
            let key = key.into();
            field.assign_name(&key);
            // a repeated key replaces the earlier declaration in place
            match named.iter_mut().find(|f| f.name() == key) {
                Some(existing) => *existing = field,
                None => named.push(field),
            }
        }

        Self {
            target: target.into(),
            fields: named,
        }
    }

    /// Returns the target identity
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Whether a field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name())
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
