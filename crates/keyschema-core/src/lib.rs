#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Typed validation and coercion engine for schema-declared configuration keys.
//!
//! Layout: `model.rs` (schema entries and data types), `sizing.rs` (min/max bounds),
//! `value.rs` (typed values), `validator/` (one scalar strategy per data type),
//! `cidr.rs` and `binary_object.rs` (leaf utilities), `engine.rs` (cardinality,
//! uniqueness and enumeration enforcement), `schema.rs` (structural checks),
//! `compliance.rs` (schema evolution checks), `registry.rs` (validator table).

pub mod binary_object;
pub mod cidr;
pub mod compliance;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod schema;
pub mod sizing;
pub mod validator;
pub mod value;

pub use binary_object::{BinaryObject, decode_binary_object, encode_binary_object};
pub use cidr::{CidrRange, HostResolver, address_in_scope, cidr_contains, parse_cidr};
pub use compliance::{ComplianceResult, is_compliant};
pub use engine::{validate_input, validate_role};
pub use error::{
    BinaryObjectError, CidrError, CidrResult, ScalarError, SizingError, ValidationError,
    ValidationResult,
};
pub use model::{DataType, SchemaEntry, ValueRole};
pub use registry::ValidatorRegistry;
pub use schema::validate_schema_entry;
pub use sizing::{Bound, Measure, SizeLimits, Sizing};
pub use validator::ScalarValidator;
pub use value::ConfigValue;
