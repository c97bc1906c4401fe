//! Per-call value binding
//!
//! A binder pairs the values a caller actually supplied with the schema of the
//! target being invoked. Every declared field is validated against its resolved
//! value (supplied, else default) while the binder is built; a binder that
//! exists has passed validation.
//!
//! Binders are meant for one call or one instance. They are not synchronized:
//! sharing one across threads and calling `set` concurrently is a race.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::errors::{ArgError, ArgResult};
use super::field::Field;
use super::types::{Schema, ValueType};
use crate::config;
use crate::observability::{log_event_with_fields, Event};

static NULL: Value = Value::Null;

/// Resolved, validated values for one call or instance.
#[derive(Debug, Clone)]
pub struct Binder {
    schema: Arc<Schema>,
    values: HashMap<String, Value>,
}

impl Binder {
    /// Binds supplied values to a schema, validating every declared field in
    /// declaration order.
    ///
    /// Names the schema does not declare are kept but ignored.
    ///
    /// # Errors
    ///
    /// The first failing field's error; no binder is returned in that case.
    pub fn new<I, K>(schema: &Arc<Schema>, values: I) -> ArgResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let binder = Self {
            schema: Arc::clone(schema),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        };

        for name in binder.values.keys() {
            if !binder.schema.contains(name) {
                log_event_with_fields(Event::UndeclaredValueIgnored, &[
                    ("target", binder.schema.target()),
                    ("field", name.as_str()),
                ]);
            }
        }

        for field in binder.schema.fields() {
            field
                .validate(binder.resolve(field))
                .map_err(|e| binder.rejected(e))?;
        }

        log_event_with_fields(Event::BinderCreated, &[("target", binder.schema.target())]);
        Ok(binder)
    }

    /// Binds a JSON object of values. `null` means nothing was supplied.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for anything other than an object or null, otherwise as
    /// [`Binder::new`].
    pub fn from_json(schema: &Arc<Schema>, values: Value) -> ArgResult<Self> {
        match values {
            Value::Object(map) => Self::new(schema, map),
            Value::Null => Self::new(schema, Map::new()),
            other => Err(ArgError::type_mismatch("", &other.to_string(), ValueType::Object)
                .with_target(schema.target())),
        }
    }

    /// Target identity of the bound schema
    pub fn target(&self) -> &str {
        self.schema.target()
    }

    /// The bound schema
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Effective value of a field: supplied if present, else its default,
    /// else null.
    ///
    /// # Errors
    ///
    /// `UnknownField` if the name is not declared.
    pub fn get(&self, name: &str) -> ArgResult<&Value> {
        let field = self.field(name)?;
        Ok(self.resolve(field))
    }

    /// Replaces the value of a writable field after validating it.
    ///
    /// # Errors
    ///
    /// `UnknownField` if undeclared, `ReadOnly` unless the field was declared
    /// writable, otherwise the field's validation error. The stored value is
    /// only replaced on success.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> ArgResult<()> {
        let field = self.field(name)?;
        if field.read_only() {
            return Err(ArgError::read_only(self.target(), name));
        }

        let value = value.into();
        field.validate(&value).map_err(|e| self.rejected(e))?;

        self.values.insert(name.to_string(), value);
        log_event_with_fields(Event::ValueUpdated, &[
            ("target", self.schema.target()),
            ("field", name),
        ]);
        Ok(())
    }

    /// Every declared field mapped to its effective value, computed now.
    pub fn values(&self) -> Map<String, Value> {
        self.schema
            .fields()
            .iter()
            .map(|f| (f.name().to_string(), self.resolve(f).clone()))
            .collect()
    }

    /// Whether the caller supplied a value for the name (null included).
    pub fn is_supplied(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Effective value as a string slice, `None` when null.
    pub fn get_str(&self, name: &str) -> ArgResult<Option<&str>> {
        self.get_typed(name, ValueType::String, Value::as_str)
    }

    /// Effective value as an i64, `None` when null.
    ///
    /// Ints above `i64::MAX` are a `TypeMismatch` here; read them with
    /// [`get_u64`](Self::get_u64).
    pub fn get_i64(&self, name: &str) -> ArgResult<Option<i64>> {
        self.get_typed(name, ValueType::Int, Value::as_i64)
    }

    /// Effective value as a u64, `None` when null. Negative ints mismatch.
    pub fn get_u64(&self, name: &str) -> ArgResult<Option<u64>> {
        self.get_typed(name, ValueType::Int, Value::as_u64)
    }

    /// Effective value as an f64 (ints widen), `None` when null.
    pub fn get_f64(&self, name: &str) -> ArgResult<Option<f64>> {
        self.get_typed(name, ValueType::Float, Value::as_f64)
    }

    /// Effective value as a bool, `None` when null.
    pub fn get_bool(&self, name: &str) -> ArgResult<Option<bool>> {
        self.get_typed(name, ValueType::Bool, Value::as_bool)
    }

    fn get_typed<'a, T>(
        &'a self,
        name: &str,
        expected: ValueType,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> ArgResult<Option<T>> {
        let value = self.get(name)?;
        if value.is_null() {
            return Ok(None);
        }
        match convert(value) {
            Some(v) => Ok(Some(v)),
            None => Err(ArgError::type_mismatch(name, &value.to_string(), expected)
                .with_target(self.target())),
        }
    }

    fn field(&self, name: &str) -> ArgResult<&Field> {
        self.schema
            .field(name)
            .ok_or_else(|| ArgError::unknown_field(self.schema.target(), name))
    }

    fn resolve<'a>(&'a self, field: &'a Field) -> &'a Value {
        self.values
            .get(field.name())
            .or_else(|| field.default())
            .unwrap_or(&NULL)
    }

    fn rejected(&self, err: ArgError) -> ArgError {
        let err = err.with_target(self.schema.target());
        if config::log_rejections() {
            log_event_with_fields(Event::ValueRejected, &[
                ("target", self.schema.target()),
                ("field", err.field().unwrap_or("")),
                ("code", err.code().code()),
            ]);
        }
        err
    }
}
