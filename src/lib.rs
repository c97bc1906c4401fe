//! argbind - declared, self-checking input schemas enforced per call
//!
//! Declare once per target which fields it takes (type, required, read-only,
//! default, choices, validators), then bind the values of every call against
//! that declaration before any business logic runs.
//!
//! ```
//! use argbind::{Field, SchemaRegistry, ValueType};
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::new();
//! registry.register("shop::Vehicle", [
//!     ("name", Field::builder().of_type(ValueType::String).build().unwrap()),
//!     ("type", Field::builder()
//!         .of_type(ValueType::String)
//!         .choices(["car", "truck", "bike"])
//!         .default("car")
//!         .build()
//!         .unwrap()),
//! ]);
//!
//! let vehicle = registry
//!     .create_binder("shop::Vehicle", [("name", json!("Red car"))])
//!     .unwrap();
//! assert_eq!(vehicle.get("type").unwrap(), &json!("car"));
//! ```

pub mod config;
pub mod guard;
pub mod observability;
pub mod schema;
pub mod validators;

pub use config::{Config, ConfigError};
pub use guard::{call_validated, declare, with_validation, GuardError, Target};
pub use schema::{
    ArgError, ArgResult, Binder, DeclarationPart, ErrorCode, Field, FieldBuilder,
    FieldDefinitionError, Schema, SchemaRegistry, TypeConstraint, ValueType,
};
pub use validators::Validator;
