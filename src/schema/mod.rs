//! Schema definition and enforcement
//!
//! A schema is the ordered set of fields declared for one target (a type,
//! method or function, identified by a stable string). Values supplied on each
//! call are bound against it and rejected before business logic runs.
//!
//! # Design Principles
//!
//! - Declarations check themselves once, when built
//! - Registration is first-write-wins and never fails
//! - Every declared field is validated when a binder is built
//! - Fields are read-only unless declared writable
//! - The first violation aborts; nothing is partially accepted

mod binder;
mod errors;
mod field;
mod registry;
mod types;

pub use binder::Binder;
pub use errors::{ArgError, ArgResult, DeclarationPart, ErrorCode, FieldDefinitionError};
pub use field::{Field, FieldBuilder};
pub use registry::SchemaRegistry;
pub use types::{is_empty, Schema, TypeConstraint, ValueType};
