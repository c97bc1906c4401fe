//! Observability for argbind
//!
//! Structured, synchronous JSON logging of registry and binder activity.
//! Logging is read-only: it never changes a validation outcome.
//!
//! # Usage
//!
//! ```ignore
//! use argbind::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::SchemaRegistered, &[("target", "app::drive")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
#[cfg(test)]
pub(crate) use logger::{capture, lock_global_state};

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
