//! Schema registry: target identity -> schema
//!
//! Registration is first-write-wins. The existence check and the insert happen
//! under one write lock, so two threads racing to register a never-seen target
//! cannot both succeed; the loser gets the winner's schema back.
//!
//! Once a schema is visible for a target it stays visible and never changes.
//! Readers only take the read lock.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde_json::Value;

use super::binder::Binder;
use super::errors::{ArgError, ArgResult};
use super::field::Field;
use super::types::Schema;
use crate::observability::{log_event_with_fields, Event};

/// Registry of schemas keyed by target identity.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
}

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry. Never torn down.
    pub fn global() -> &'static SchemaRegistry {
        GLOBAL.get_or_init(SchemaRegistry::new)
    }

    /// Registers a field set for a target unless one is already registered.
    ///
    /// Returns the authoritative schema: the newly built one on first
    /// registration, the existing one otherwise. A differing field set offered
    /// later is discarded without error.
    pub fn register<I, K>(&self, target: &str, fields: I) -> Arc<Schema>
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        self.register_with(target, || fields)
    }

    /// Like [`register`](Self::register), but only builds the field set when
    /// the target is not registered yet.
    ///
    /// `fields` runs without any registry lock held, so it may itself use the
    /// registry. If another registration for the target lands while it runs,
    /// the built set is discarded and the winner is returned.
    pub fn register_with<F, I, K>(&self, target: &str, fields: F) -> Arc<Schema>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        if let Some(existing) = self.lookup(target) {
            log_event_with_fields(Event::SchemaRegistrationIgnored, &[("target", target)]);
            return existing;
        }

        let built = Arc::new(Schema::new(target, fields()));

        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);

        // re-check under the write lock: another writer may have won meanwhile
        if let Some(existing) = schemas.get(target) {
            let existing = Arc::clone(existing);
            drop(schemas);
            log_event_with_fields(Event::SchemaRegistrationIgnored, &[("target", target)]);
            return existing;
        }

        schemas.insert(target.to_string(), Arc::clone(&built));
        drop(schemas);

        let count = built.len().to_string();
        log_event_with_fields(Event::SchemaRegistered, &[
            ("target", target),
            ("fields", count.as_str()),
        ]);

        built
    }

    /// Whether a schema is registered for the target.
    pub fn has_schema(&self, target: &str) -> bool {
        self.lookup(target).is_some()
    }

    /// The schema registered for the target.
    ///
    /// # Errors
    ///
    /// `UnknownTarget` if nothing was registered for it.
    pub fn get_schema(&self, target: &str) -> ArgResult<Arc<Schema>> {
        self.lookup(target)
            .ok_or_else(|| ArgError::unknown_target(target))
    }

    /// Builds a binder for the target from the supplied values.
    ///
    /// # Errors
    ///
    /// `UnknownTarget` if the target is not registered, otherwise the first
    /// field validation failure.
    pub fn create_binder<I, K>(&self, target: &str, values: I) -> ArgResult<Binder>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let schema = self.get_schema(target)?;
        Binder::new(&schema, values)
    }

    /// Registered target identities, sorted.
    pub fn targets(&self) -> Vec<String> {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        let mut targets: Vec<String> = schemas.keys().cloned().collect();
        targets.sort();
        targets
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, target: &str) -> Option<Arc<Schema>> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
            .cloned()
    }
}
