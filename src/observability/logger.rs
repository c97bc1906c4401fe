//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - Lines below the process-wide minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Rejected input
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parses a level name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(Severity::Trace),
            "info" => Some(Severity::Info),
            "warn" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Set the process-wide minimum severity
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Current process-wide minimum severity
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Whether a line at this severity would be written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields.
    ///
    /// Error and Fatal go to stderr, everything else to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) || captured(severity, event, fields) {
            return;
        }
        if severity >= Severity::Error {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &mut io::stdout());
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let _ = writer.write_all(Self::format_line(severity, event, fields).as_bytes());
        let _ = writer.flush();
    }

    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(128);

        output.push_str("{\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push_str("\",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");
        output
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

// Unit tests capture lines per thread instead of writing them, and serialize
// on GLOBAL_STATE whenever they touch process-wide settings.

#[cfg(test)]
thread_local! {
    static CAPTURED: RefCell<Option<Vec<String>>> = RefCell::new(None);
}

#[cfg(test)]
static GLOBAL_STATE: Mutex<()> = Mutex::new(());

#[cfg(test)]
fn captured(severity: Severity, event: &str, fields: &[(&str, &str)]) -> bool {
    CAPTURED.with(|c| match c.borrow_mut().as_mut() {
        Some(lines) => {
            lines.push(Logger::format_line(severity, event, fields));
            true
        }
        None => false,
    })
}

#[cfg(not(test))]
fn captured(_severity: Severity, _event: &str, _fields: &[(&str, &str)]) -> bool {
    false
}

/// Runs `f` and returns the lines it logged on this thread.
#[cfg(test)]
pub(crate) fn capture(f: impl FnOnce()) -> Vec<String> {
    CAPTURED.with(|c| *c.borrow_mut() = Some(Vec::new()));
    f();
    CAPTURED.with(|c| c.borrow_mut().take().unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn lock_global_state() -> MutexGuard<'static, ()> {
    GLOBAL_STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("trace"), Some(Severity::Trace));
        assert_eq!(Severity::parse("WARN"), Some(Severity::Warn));
        assert_eq!(Severity::parse("verbose"), None);
    }

    #[test]
    fn test_severity_u8_roundtrip() {
        for s in [
            Severity::Trace,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ] {
            assert_eq!(Severity::from_u8(s as u8), s);
        }
    }

    #[test]
    fn test_log_json_format() {
        let output = Logger::format_line(Severity::Info, "TEST_EVENT", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = Logger::format_line(
            Severity::Info,
            "TEST",
            &[("zebra", "1"), ("apple", "2"), ("mango", "3")],
        );
        let output2 = Logger::format_line(
            Severity::Info,
            "TEST",
            &[("apple", "2"), ("mango", "3"), ("zebra", "1")],
        );
        assert_eq!(output1, output2);

        let apple_pos = output1.find("apple").unwrap();
        let zebra_pos = output1.find("zebra").unwrap();
        assert!(apple_pos < zebra_pos);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = Logger::format_line(
            Severity::Warn,
            "TEST",
            &[("message", "hello \"world\"\nline2")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["message"], "hello \"world\"\nline2");
        assert_eq!(output.chars().filter(|c| *c == '\n').count(), 1);
    }

    #[test]
    fn test_writer_receives_line() {
        let mut buffer = Vec::new();
        Logger::log_to_writer(Severity::Info, "EV", &[("k", "v")], &mut buffer);
        let line = String::from_utf8(buffer).unwrap();
        assert!(line.starts_with("{\"event\":\"EV\""));
        assert!(line.ends_with("}\n"));
    }

    #[test]
    fn test_min_severity_filters_lines() {
        let _guard = lock_global_state();
        Logger::set_min_severity(Severity::Warn);
        assert_eq!(Logger::min_severity(), Severity::Warn);
        assert!(!Logger::enabled(Severity::Info));

        let lines = capture(|| {
            Logger::log(Severity::Trace, "DROPPED_TRACE", &[]);
            Logger::log(Severity::Info, "DROPPED_INFO", &[]);
            Logger::log(Severity::Warn, "KEPT_WARN", &[]);
            Logger::log(Severity::Error, "KEPT_ERROR", &[]);
        });
        Logger::set_min_severity(Severity::Info);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("KEPT_WARN"));
        assert!(lines[1].contains("KEPT_ERROR"));
    }

    #[test]
    fn test_capture_is_scoped() {
        let _guard = lock_global_state();
        let lines = capture(|| Logger::log(Severity::Info, "INSIDE", &[]));
        assert_eq!(lines.len(), 1);
        assert!(capture(|| {}).is_empty());
    }
}
