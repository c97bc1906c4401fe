//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in argbind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Registry
    /// A schema became authoritative for a target
    SchemaRegistered,
    /// A later registration for a known target was discarded
    SchemaRegistrationIgnored,

    // Binder
    /// All declared fields validated, binder ready
    BinderCreated,
    /// A value failed validation
    ValueRejected,
    /// A writable field was updated
    ValueUpdated,
    /// A supplied name is not declared and was ignored
    UndeclaredValueIgnored,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemaRegistrationIgnored => "SCHEMA_REGISTRATION_IGNORED",
            Event::BinderCreated => "BINDER_CREATED",
            Event::ValueRejected => "VALUE_REJECTED",
            Event::ValueUpdated => "VALUE_UPDATED",
            Event::UndeclaredValueIgnored => "UNDECLARED_VALUE_IGNORED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded | Event::SchemaRegistered => Severity::Info,
            Event::ValueRejected => Severity::Warn,
            Event::SchemaRegistrationIgnored
            | Event::BinderCreated
            | Event::ValueUpdated
            | Event::UndeclaredValueIgnored => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
