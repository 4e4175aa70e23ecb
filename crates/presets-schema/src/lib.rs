//! Schema checking for CMake preset documents.
//!
//! The preset loader only needs two things from this crate: a way to
//! validate a document against the schema for its declared version, and
//! a diagnostic telling whether `cmakeMinimumRequired` is new enough for
//! that version. Both sit behind the [`SchemaChecker`] trait.

pub mod checker;
pub mod error;
pub mod versions;

pub use checker::{
    JsonSchemaChecker, NoSchemaCheck, SchemaChecker, schema_has_version, schema_versions,
    validate_against,
};
pub use error::{Error, Result};
pub use versions::{
    CmakeCompatibility, MINIMUM_SCHEMA_VERSION, check_cmake_minimum, cmake_version_for_schema,
    declared_cmake_version,
};
