//! Schema version to CMake version mapping
//!
//! Each presets schema version was introduced by a specific CMake release.
//! A document that declares schema version N but a `cmakeMinimumRequired`
//! older than that release can never be read by the CMake it claims to
//! support, which is worth a warning.

use semver::Version;
use serde_json::Value;

/// Lowest schema version a document may declare.
pub const MINIMUM_SCHEMA_VERSION: u32 = 2;

const SCHEMA_CMAKE_VERSIONS: &[(u32, (u64, u64, u64))] = &[
    (1, (3, 19, 0)),
    (2, (3, 20, 0)),
    (3, (3, 21, 0)),
    (4, (3, 23, 0)),
    (5, (3, 24, 0)),
    (6, (3, 25, 0)),
    (7, (3, 27, 0)),
    (8, (3, 28, 0)),
    (9, (3, 30, 0)),
    (10, (3, 31, 0)),
];

/// Outcome of comparing `cmakeMinimumRequired` with a schema version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmakeCompatibility {
    Sufficient,
    TooLow { required: Version, declared: Version },
    UnknownSchema,
}

/// The CMake release that introduced `schema_version`.
pub fn cmake_version_for_schema(schema_version: u32) -> Option<Version> {
    SCHEMA_CMAKE_VERSIONS
        .iter()
        .find(|(schema, _)| *schema == schema_version)
        .map(|(_, (major, minor, patch))| Version::new(*major, *minor, *patch))
}

/// Read a `cmakeMinimumRequired` object; absent parts count as 0.
pub fn declared_cmake_version(declared: Option<&Value>) -> Version {
    let part = |key: &str| {
        declared
            .and_then(|value| value.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    Version::new(part("major"), part("minor"), part("patch"))
}

/// Check that `declared` is at least the CMake release behind `schema_version`.
///
/// Only ever used for diagnostics; a mismatch logs a warning.
pub fn check_cmake_minimum(schema_version: u32, declared: Option<&Value>) -> CmakeCompatibility {
    let Some(required) = cmake_version_for_schema(schema_version) else {
        tracing::warn!("Unknown schema version: {}", schema_version);
        return CmakeCompatibility::UnknownSchema;
    };

    let declared = declared_cmake_version(declared);
    if declared < required {
        tracing::warn!(
            "Schema version {} requires CMake {} or higher, but cmakeMinimumRequired is set to {}",
            schema_version,
            required,
            declared
        );
        CmakeCompatibility::TooLow { required, declared }
    } else {
        tracing::debug!(
            "CMake minimum required version {} is sufficient for schema version {}",
            declared,
            schema_version
        );
        CmakeCompatibility::Sufficient
    }
}
