//! Field declarations
//!
//! A field is built in two phases: the builder assembles the raw declaration,
//! then `build()` runs the field's own rules over its default and every choice.
//! A declaration that contradicts itself never becomes usable.

use std::sync::Arc;

use serde_json::Value;

use super::errors::{ArgError, ArgResult, DeclarationPart, FieldDefinitionError};
use super::types::{is_empty, same_value, TypeConstraint};
use crate::validators::Validator;

/// One declared input and its full contract.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    type_constraint: TypeConstraint,
    required: bool,
    read_only: bool,
    default: Option<Value>,
    choices: Option<Vec<Value>>,
    validators: Vec<Arc<dyn Validator>>,
}

impl Field {
    /// Start a declaration. Fields are required and read-only unless relaxed.
    pub fn builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    /// Name assigned by the owning schema (empty until registered).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_constraint(&self) -> &TypeConstraint {
        &self.type_constraint
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn choices(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub(crate) fn assign_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Validates a value against this field.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. type (skipped for null and for `TypeConstraint::Any`)
    /// 2. required (empty value, `false` excepted, with no default)
    /// 3. choices (only when the field is required or the value is not null)
    /// 4. validators, in declaration order (only for non-null values)
    pub fn validate(&self, value: &Value) -> ArgResult<()> {
        if !value.is_null() && !self.type_constraint.accepts(value) {
            return Err(ArgError::type_mismatch(
                &self.name,
                &value.to_string(),
                &self.type_constraint,
            ));
        }

        if self.required
            && is_empty(value)
            && *value != Value::Bool(false)
            && self.default.is_none()
        {
            return Err(ArgError::missing_value(&self.name));
        }

        if let Some(ref choices) = self.choices {
            if (self.required || !value.is_null())
                && !choices.iter().any(|c| same_value(c, value))
            {
                return Err(ArgError::invalid_choice(&self.name, choices));
            }
        }

        if !value.is_null() {
            for validator in &self.validators {
                validator
                    .validate(value)
                    .map_err(|e| e.with_field(&self.name))?;
            }
        }

        Ok(())
    }

    fn check_declaration(&self) -> Result<(), FieldDefinitionError> {
        if let Some(ref default) = self.default {
            self.validate(default).map_err(|source| FieldDefinitionError {
                part: DeclarationPart::Default,
                source,
            })?;
        }

        if let Some(ref choices) = self.choices {
            for (i, choice) in choices.iter().enumerate() {
                self.validate(choice).map_err(|source| FieldDefinitionError {
                    part: DeclarationPart::Choice(i),
                    source,
                })?;
            }
        }

        Ok(())
    }
}

/// Builder for [`Field`].
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    fn new() -> Self {
        Self {
            field: Field {
                name: String::new(),
                type_constraint: TypeConstraint::Any,
                required: true,
                read_only: true,
                default: None,
                choices: None,
                validators: Vec::new(),
            },
        }
    }

    /// Restrict the accepted types.
    pub fn of_type(mut self, constraint: impl Into<TypeConstraint>) -> Self {
        self.field.type_constraint = constraint.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.field.read_only = read_only;
        self
    }

    /// Set the default. A null default means "no default".
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.field.default = if value.is_null() { None } else { Some(value) };
        self
    }

    /// Set the allowed values. An empty set disables the check.
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let choices: Vec<Value> = choices.into_iter().map(Into::into).collect();
        self.field.choices = if choices.is_empty() { None } else { Some(choices) };
        self
    }

    /// Append a validator to the chain.
    pub fn validator(self, validator: impl Validator + 'static) -> Self {
        self.shared_validator(Arc::new(validator))
    }

    /// Append an already shared validator to the chain.
    pub fn shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.field.validators.push(validator);
        self
    }

    /// Finish the declaration, checking the default and every choice.
    pub fn build(self) -> Result<Field, FieldDefinitionError> {
        self.field.check_declaration()?;
        Ok(self.field)
    }
}
