//! Pluggable value validators
//!
//! A validator inspects a non-null value and either accepts it or reports
//! why not. Fields run their validators in declaration order and stop at the
//! first rejection.
//!
//! Built-ins:
//! - `MinLength` / `MaxLength`: element count bounds
//! - `Email` / `Url`: pattern checks
//! - `File` / `Dir`: filesystem existence checks (synchronous I/O)
//!
//! Custom rules implement [`Validator`] directly:
//!
//! ```
//! use argbind::validators::Validator;
//! use argbind::{ArgError, ArgResult};
//! use serde_json::Value;
//!
//! #[derive(Debug)]
//! struct City;
//!
//! impl Validator for City {
//!     fn validate(&self, value: &Value) -> ArgResult<()> {
//!         match value.as_str() {
//!             Some("Geneva" | "Paris" | "Lyon" | "Madrid") => Ok(()),
//!             _ => Err(ArgError::validator_failure("Invalid value")),
//!         }
//!     }
//! }
//! ```

mod length;
mod path;
mod pattern;

pub use length::{MaxLength, MinLength};
pub use path::{Dir, File};
pub use pattern::{Email, Url};

use std::fmt;

use serde_json::Value;

use crate::schema::{ArgError, ArgResult};

/// A rule applied to a non-null value.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Accept the value or return the reason it was rejected.
    fn validate(&self, value: &Value) -> ArgResult<()>;

    /// Short name used in error messages for inputs the validator cannot read.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Borrow a value as a string or fail with a validator error.
pub(crate) fn expect_str<'a>(validator: &str, value: &'a Value) -> ArgResult<&'a str> {
    value.as_str().ok_or_else(|| {
        ArgError::validator_failure(format!(
            "{} expects a string, got {}",
            validator,
            crate::schema::ValueType::of(value)
        ))
    })
}
