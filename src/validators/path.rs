//! Filesystem existence checks
//!
//! These hit the filesystem on every call. The result describes the path at
//! validation time only; it may change before the caller uses it.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::{expect_str, Validator};
use crate::schema::{ArgError, ArgResult};

/// Accepts paths that currently exist as regular files.
#[derive(Debug, Clone, Copy, Default)]
pub struct File;

impl Validator for File {
    fn validate(&self, value: &Value) -> ArgResult<()> {
        let path = Path::new(expect_str(self.name(), value)?);
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(()),
            _ => Err(ArgError::path_not_found(path)),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Accepts paths that currently exist as directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dir;

impl Validator for Dir {
    fn validate(&self, value: &Value) -> ArgResult<()> {
        let path = Path::new(expect_str(self.name(), value)?);
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(ArgError::path_not_found(path)),
        }
    }

    fn name(&self) -> &str {
        "dir"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ErrorCode;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_dir_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_str().unwrap();
        assert!(Dir.validate(&json!(path)).is_ok());
    }

    #[test]
    fn test_dir_missing_reports_path() {
        let err = Dir.validate(&json!("aaa")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PathNotFound);
        assert_eq!(err.path(), Some(Path::new("aaa")));
    }

    #[test]
    fn test_file_is_not_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");
        fs::write(&file_path, "data").unwrap();

        let file_str = file_path.to_str().unwrap();
        let dir_str = temp_dir.path().to_str().unwrap();

        assert!(File.validate(&json!(file_str)).is_ok());
        assert_eq!(
            Dir.validate(&json!(file_str)).unwrap_err().code(),
            ErrorCode::PathNotFound
        );
        assert_eq!(
            File.validate(&json!(dir_str)).unwrap_err().code(),
            ErrorCode::PathNotFound
        );
    }

    #[test]
    fn test_check_is_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("later.txt");
        let value = json!(file_path.to_str().unwrap());

        assert!(File.validate(&value).is_err());
        fs::write(&file_path, "now").unwrap();
        assert!(File.validate(&value).is_ok());
    }

    #[test]
    fn test_non_string_path() {
        let err = File.validate(&json!(["a"])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidatorFailure);
    }
}
