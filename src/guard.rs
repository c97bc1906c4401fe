//! Attaching schemas to the code they guard
//!
//! Types, methods and functions all attach the same way: a stable identity, a
//! field declaration, and an explicit bind at each call site before the
//! guarded logic runs.
//!
//! ```
//! use argbind::{target_id, Field, SchemaRegistry, Target, ValueType};
//! use serde_json::json;
//!
//! fn drive_target() -> Target {
//!     Target::new(target_id!("drive"))
//!         .field("start", Field::builder().of_type(ValueType::String))
//!         .field("destination", Field::builder().of_type(ValueType::String))
//! }
//!
//! let registry = SchemaRegistry::new();
//! let route = drive_target()
//!     .call(&registry, json!({"start": "Geneva", "destination": "Paris"}), |args| {
//!         args.values()
//!     })
//!     .unwrap();
//! assert_eq!(route["destination"], json!("Paris"));
//! ```

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::schema::{
    ArgError, ArgResult, Binder, Field, FieldBuilder, FieldDefinitionError, Schema, SchemaRegistry,
};

/// Stable identity for a target: the calling module's path plus a name.
#[macro_export]
macro_rules! target_id {
    ($name:literal) => {
        concat!(module_path!(), "::", $name)
    };
}

/// Binds values to a schema; the building block of every attachment.
pub fn with_validation<I, K>(schema: &Arc<Schema>, values: I) -> ArgResult<Binder>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    Binder::new(schema, values)
}

/// Runs `f` only once the values validated against the schema.
pub fn call_validated<I, K, T>(
    schema: &Arc<Schema>,
    values: I,
    f: impl FnOnce(&Binder) -> T,
) -> ArgResult<T>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let binder = with_validation(schema, values)?;
    Ok(f(&binder))
}

/// Builds every declared field, naming the failing one on error.
pub fn declare<I, N>(builders: I) -> Result<Vec<(String, Field)>, FieldDefinitionError>
where
    I: IntoIterator<Item = (N, FieldBuilder)>,
    N: Into<String>,
{
    builders
        .into_iter()
        .map(|(name, builder)| {
            let name = name.into();
            match builder.build() {
                Ok(field) => Ok((name, field)),
                Err(mut e) => {
                    e.source = e.source.with_field(&name);
                    Err(e)
                }
            }
        })
        .collect()
}

/// Errors from an attachment point
#[derive(Debug, Error)]
pub enum GuardError {
    /// The declaration itself is inconsistent
    #[error(transparent)]
    Definition(#[from] FieldDefinitionError),

    /// The supplied values were rejected
    #[error(transparent)]
    Rejected(#[from] ArgError),
}

impl GuardError {
    /// The underlying argument error, whichever side it came from
    pub fn arg_error(&self) -> &ArgError {
        match self {
            GuardError::Definition(e) => &e.source,
            GuardError::Rejected(e) => e,
        }
    }
}

/// An attachment point: identity plus field declarations, registered lazily
/// on first use.
#[derive(Debug, Clone)]
pub struct Target {
    id: String,
    fields: Vec<(String, FieldBuilder)>,
}

impl Target {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, builder: FieldBuilder) -> Self {
        self.fields.push((name.into(), builder));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The authoritative schema for this identity, registering the declared
    /// fields if nothing is registered yet.
    ///
    /// Declarations are only built (and checked) on first registration.
    pub fn schema(&self, registry: &SchemaRegistry) -> Result<Arc<Schema>, GuardError> {
        if let Ok(schema) = registry.get_schema(&self.id) {
            return Ok(schema);
        }
        let fields = declare(self.fields.iter().cloned())?;
        Ok(registry.register(&self.id, fields))
    }

    /// Registers if needed, then binds the supplied JSON object.
    pub fn bind(&self, registry: &SchemaRegistry, values: Value) -> Result<Binder, GuardError> {
        let schema = self.schema(registry)?;
        Ok(Binder::from_json(&schema, values)?)
    }

    /// Registers if needed, binds, and runs `f` with the validated values.
    pub fn call<T>(
        &self,
        registry: &SchemaRegistry,
        values: Value,
        f: impl FnOnce(&Binder) -> T,
    ) -> Result<T, GuardError> {
        let binder = self.bind(registry, values)?;
        Ok(f(&binder))
    }
}
