//! Element count bounds

use serde_json::Value;

use super::Validator;
use crate::schema::{ArgError, ArgResult, ValueType};

/// Number of elements in a value: chars of a string, items of an array,
/// entries of an object.
fn measure(value: &Value) -> ArgResult<usize> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(a) => Ok(a.len()),
        Value::Object(o) => Ok(o.len()),
        other => Err(ArgError::validator_failure(format!(
            "value of type {} has no length",
            ValueType::of(other)
        ))),
    }
}

/// Rejects values with fewer than `n` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength {
    min: usize,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &Value) -> ArgResult<()> {
        if measure(value)? < self.min {
            return Err(ArgError::validator_failure(format!(
                "Min length is {}",
                self.min
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "min_length"
    }
}

/// Rejects values with more than `n` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLength {
    max: usize,
}

impl MaxLength {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator for MaxLength {
    fn validate(&self, value: &Value) -> ArgResult<()> {
        if measure(value)? > self.max {
            return Err(ArgError::validator_failure(format!(
                "Max length is {}",
                self.max
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "max_length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_min_length_bounds() {
        let v = MinLength::new(2);
        assert!(v.validate(&json!("rr")).is_ok());
        assert!(v.validate(&json!("rrr")).is_ok());
        assert!(v.validate(&json!("r")).is_err());
    }

    #[test]
    fn test_max_length_bounds() {
        let v = MaxLength::new(4);
        assert!(v.validate(&json!("rrrr")).is_ok());
        assert!(v.validate(&json!("return")).is_err());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert!(MaxLength::new(4).validate(&json!("éééé")).is_ok());
    }

    #[test]
    fn test_sequences_and_maps() {
        assert!(MinLength::new(2).validate(&json!([1, 2])).is_ok());
        assert!(MinLength::new(2).validate(&json!([1])).is_err());
        assert!(MaxLength::new(1).validate(&json!({"a": 1, "b": 2})).is_err());
    }

    #[test]
    fn test_unmeasurable_value() {
        let err = MinLength::new(1).validate(&json!(12)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidatorFailure);
        assert!(err.message().contains("no length"));
    }
}
