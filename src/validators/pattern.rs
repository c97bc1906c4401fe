//! Pattern-based string checks

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::{expect_str, Validator};
use crate::schema::{ArgError, ArgResult};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const URL_PATTERN: &str = r"^(?:http|ftp)s?://";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static URL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn url_re() -> &'static Regex {
    URL_RE.get_or_init(|| Regex::new(URL_PATTERN).expect("url pattern compiles"))
}

/// Accepts `local-part@domain.tld` addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Validator for Email {
    fn validate(&self, value: &Value) -> ArgResult<()> {
        let s = expect_str(self.name(), value)?;
        if !email_re().is_match(s) {
            return Err(ArgError::validator_failure(format!("Email not valid {}", s)));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}

/// Accepts strings starting with `http://`, `https://`, `ftp://` or `ftps://`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

impl Validator for Url {
    fn validate(&self, value: &Value) -> ArgResult<()> {
        let s = expect_str(self.name(), value)?;
        if !url_re().is_match(s) {
            return Err(ArgError::validator_failure(format!("Url not valid {}", s)));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "url"
    }
}
