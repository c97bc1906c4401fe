//! Argument error types
//!
//! Error codes:
//! - ARG_TYPE_MISMATCH
//! - ARG_MISSING_VALUE
//! - ARG_INVALID_CHOICE
//! - ARG_VALIDATOR_FAILURE
//! - ARG_PATH_NOT_FOUND
//! - ARG_UNKNOWN_FIELD
//! - ARG_READ_ONLY
//! - ARG_UNKNOWN_TARGET
//!
//! All of them are surfaced to the caller immediately. Nothing is retried and
//! nothing is partially committed.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Argument error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Value's runtime type is not among the accepted types
    TypeMismatch,
    /// Required field is empty and has no default
    MissingValue,
    /// Value is not one of the declared choices
    InvalidChoice,
    /// A configured validator rejected the value
    ValidatorFailure,
    /// File/Dir validator found no such path
    PathNotFound,
    /// Field name not declared in the schema
    UnknownField,
    /// Attempt to set a read-only field
    ReadOnly,
    /// No schema registered for the target identity
    UnknownTarget,
}

impl ErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TypeMismatch => "ARG_TYPE_MISMATCH",
            ErrorCode::MissingValue => "ARG_MISSING_VALUE",
            ErrorCode::InvalidChoice => "ARG_INVALID_CHOICE",
            ErrorCode::ValidatorFailure => "ARG_VALIDATOR_FAILURE",
            ErrorCode::PathNotFound => "ARG_PATH_NOT_FOUND",
            ErrorCode::UnknownField => "ARG_UNKNOWN_FIELD",
            ErrorCode::ReadOnly => "ARG_READ_ONLY",
            ErrorCode::UnknownTarget => "ARG_UNKNOWN_TARGET",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Argument error with full context
#[derive(Debug, Clone)]
pub struct ArgError {
    code: ErrorCode,
    message: String,
    target: Option<String>,
    field: Option<String>,
    path: Option<PathBuf>,
}

impl ArgError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            target: None,
            field: None,
            path: None,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(field: &str, value: &str, expected: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::TypeMismatch,
            format!("value {} is not of type {}", value, expected),
        )
        .with_field(field)
    }

    /// Create a missing value error
    pub fn missing_value(field: &str) -> Self {
        Self::new(ErrorCode::MissingValue, "value is required").with_field(field)
    }

    /// Create an invalid choice error
    pub fn invalid_choice(field: &str, choices: &[serde_json::Value]) -> Self {
        let listed: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        Self::new(
            ErrorCode::InvalidChoice,
            format!("value needs to be one of [{}]", listed.join(", ")),
        )
        .with_field(field)
    }

    /// Create a validator failure. Validators call this without field context;
    /// the owning field fills it in.
    pub fn validator_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidatorFailure, message)
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut err = Self::new(
            ErrorCode::PathNotFound,
            format!("no such file or directory: '{}'", path.display()),
        );
        err.path = Some(path.to_path_buf());
        err
    }

    /// Create an unknown field error
    pub fn unknown_field(target: &str, field: &str) -> Self {
        Self::new(
            ErrorCode::UnknownField,
            format!("field '{}' does not exist for '{}'", field, target),
        )
        .with_target(target)
        .with_field(field)
    }

    /// Create a read-only error
    pub fn read_only(target: &str, field: &str) -> Self {
        Self::new(
            ErrorCode::ReadOnly,
            format!("field '{}' is read-only in '{}'", field, target),
        )
        .with_target(target)
        .with_field(field)
    }

    /// Create an unknown target error
    pub fn unknown_target(target: &str) -> Self {
        Self::new(
            ErrorCode::UnknownTarget,
            format!("no schema registered for '{}'", target),
        )
        .with_target(target)
    }

    /// Attach the field name unless one is already set.
    pub fn with_field(mut self, field: &str) -> Self {
        if self.field.is_none() && !field.is_empty() {
            self.field = Some(field.to_string());
        }
        self
    }

    /// Attach the target identity unless one is already set.
    pub fn with_target(mut self, target: &str) -> Self {
        if self.target.is_none() {
            self.target = Some(target.to_string());
        }
        self
    }

    /// Returns the error code
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the target identity if applicable
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Returns the field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the missing path for `PathNotFound`
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(ref target) = self.target {
            write!(f, " [{}]", target)?;
        }
        if let Some(ref field) = self.field {
            write!(f, " field '{}'", field)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ArgError {}

/// Result type for argument operations
pub type ArgResult<T> = Result<T, ArgError>;

/// Which part of a field declaration failed its own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationPart {
    Default,
    Choice(usize),
}

impl fmt::Display for DeclarationPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationPart::Default => write!(f, "default"),
            DeclarationPart::Choice(i) => write!(f, "choice #{}", i),
        }
    }
}

/// A field declaration that contradicts itself.
///
/// Raised while building a field, never while binding values: it points at the
/// schema author, not at the caller.
#[derive(Debug, Clone, Error)]
#[error("invalid field declaration ({part}): {source}")]
pub struct FieldDefinitionError {
    pub part: DeclarationPart,
    #[source]
    pub source: ArgError,
}

impl FieldDefinitionError {
    /// Error code of the rule the declaration broke
    pub fn code(&self) -> ErrorCode {
        self.source.code()
    }
}
