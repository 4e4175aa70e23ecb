//! Schema checking capability
//!
//! [`JsonSchemaChecker`] validates documents with the `jsonschema` crate
//! against schema files kept in a local cache directory:
//!
//! ```text
//! <cache>/cmakepresets-schema/
//!   schema-v4.json     # schema known to cover version 4
//!   schema-v6.json
//!   schema.json        # latest schema, used for unknown or newer versions
//! ```
//!
//! Fetching those files is somebody else's job. A version with no usable
//! schema on disk yields [`Error::Unavailable`], which callers treat as
//! "skip validation".

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::versions::{self, CmakeCompatibility};
use crate::{Error, Result};

/// Directory name under the platform cache directory.
const CACHE_DIR_NAME: &str = "cmakepresets-schema";

/// Validator messages kept when no better explanation is found.
const MAX_REPORTED_ERRORS: usize = 10;

/// Validation capability consumed by the preset loader.
pub trait SchemaChecker {
    /// Validate `document` against the schema for `schema_version`.
    fn validate(&self, document: &Value, schema_version: u32) -> Result<()>;

    /// Compare the document's `cmakeMinimumRequired` with `schema_version`.
    fn check_cmake_minimum(&self, schema_version: u32, declared: Option<&Value>) -> CmakeCompatibility {
        versions::check_cmake_minimum(schema_version, declared)
    }
}

/// Checker that accepts every document with a supported version.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSchemaCheck;

impl SchemaChecker for NoSchemaCheck {
    fn validate(&self, _document: &Value, schema_version: u32) -> Result<()> {
        if schema_version < versions::MINIMUM_SCHEMA_VERSION {
            return Err(Error::UnsupportedVersion {
                version: i64::from(schema_version),
            });
        }
        Ok(())
    }
}

/// Checker backed by cached CMake presets schema files.
#[derive(Debug, Clone)]
pub struct JsonSchemaChecker {
    cache_dir: PathBuf,
}

impl JsonSchemaChecker {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Use `<platform cache dir>/cmakepresets-schema`.
    pub fn with_default_cache() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(CACHE_DIR_NAME))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Find a cached schema covering `version`.
    ///
    /// Prefers `schema-v{version}.json`; falls back to the latest
    /// `schema.json` when it declares the version or when the version is
    /// newer than anything it declares.
    pub fn load_schema(&self, version: u32) -> Result<Value> {
        if version < versions::MINIMUM_SCHEMA_VERSION {
            return Err(Error::UnsupportedVersion {
                version: i64::from(version),
            });
        }

        let versioned = self.cache_dir.join(format!("schema-v{version}.json"));
        if let Some(schema) = read_cached(&versioned) {
            if schema_has_version(&schema, version) {
                tracing::debug!(?versioned, "Using cached schema for version {}", version);
                return Ok(schema);
            }
            tracing::debug!(?versioned, "Cached schema does not support version {}", version);
        }

        let latest = self.cache_dir.join("schema.json");
        if let Some(schema) = read_cached(&latest) {
            let known = schema_versions(&schema);
            let newer = known.last().is_some_and(|highest| version > *highest);
            if known.contains(&version) || newer {
                tracing::debug!(?latest, "Using latest cached schema for version {}", version);
                return Ok(schema);
            }
        }

        Err(Error::Unavailable {
            version,
            reason: format!("no cached schema in {}", self.cache_dir.display()),
        })
    }
}

impl SchemaChecker for JsonSchemaChecker {
    fn validate(&self, document: &Value, schema_version: u32) -> Result<()> {
        if let Some(declared) = document.get("version").and_then(Value::as_i64) {
            if declared < i64::from(versions::MINIMUM_SCHEMA_VERSION) {
                tracing::warn!("Document uses unsupported schema version {}", declared);
                return Err(Error::UnsupportedVersion { version: declared });
            }
        }

        let schema = self.load_schema(schema_version)?;
        validate_against(document, &schema)
    }
}

fn read_cached(path: &Path) -> Option<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(?path, "Cannot read cached schema: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(schema) => Some(schema),
        Err(e) => {
            tracing::debug!(?path, "Error reading cached schema: {}", e);
            None
        }
    }
}

/// Versions declared by the `oneOf` variants of a presets schema.
pub fn schema_versions(schema: &Value) -> BTreeSet<u32> {
    variants(schema)
        .filter_map(|variant| variant_version(variant))
        .collect()
}

/// Whether the schema has a variant for `version`.
pub fn schema_has_version(schema: &Value, version: u32) -> bool {
    schema_versions(schema).contains(&version)
}

fn variants(schema: &Value) -> impl Iterator<Item = &Value> {
    schema
        .get("oneOf")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn variant_version(variant: &Value) -> Option<u32> {
    variant
        .pointer("/properties/version/const")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

/// First schema version that knows each top-level field.
fn feature_min_versions(schema: &Value) -> BTreeMap<String, u32> {
    let mut min_versions: BTreeMap<String, u32> = BTreeMap::new();
    for variant in variants(schema) {
        let Some(version) = variant_version(variant) else {
            continue;
        };
        let Some(properties) = variant.get("properties").and_then(Value::as_object) else {
            continue;
        };
        for field in properties.keys().filter(|field| *field != "version") {
            min_versions
                .entry(field.clone())
                .and_modify(|min| *min = (*min).min(version))
                .or_insert(version);
        }
    }
    min_versions
}

/// Validate `document` against a presets `schema`.
///
/// A document newer than every version the schema declares is checked as
/// the highest declared version.
pub fn validate_against(document: &Value, schema: &Value) -> Result<()> {
    let doc_version = document.get("version").and_then(Value::as_u64);
    let mut instance = Cow::Borrowed(document);

    let highest = schema_versions(schema).last().copied();
    if let (Some(version), Some(highest)) = (doc_version, highest) {
        if version > u64::from(highest) {
            tracing::warn!(
                "Schema for version {} not available. Validating against version {}",
                version,
                highest
            );
            if let Some(object) = instance.to_mut().as_object_mut() {
                object.insert("version".to_string(), Value::from(highest));
            }
        }
    }

    let validator = jsonschema::validator_for(schema).map_err(|e| Error::BadSchema {
        message: e.to_string(),
    })?;

    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| {
            let location = e.instance_path.to_string();
            if location.is_empty() {
                e.to_string()
            } else {
                format!("{location}: {e}")
            }
        })
        .collect();

    if errors.is_empty() {
        tracing::debug!("Document successfully validated against schema");
        return Ok(());
    }

    let message = explain_failure(document, schema).unwrap_or_else(|| {
        let mut lines: Vec<String> = errors.iter().take(MAX_REPORTED_ERRORS).cloned().collect();
        if errors.len() > MAX_REPORTED_ERRORS {
            lines.push("...".to_string());
        }
        lines.join("\n")
    });
    tracing::error!("Validation error: {}", message);
    Err(Error::Invalid { message })
}

/// Name a field the document uses before its schema version supports it.
fn explain_failure(document: &Value, schema: &Value) -> Option<String> {
    let version = document.get("version").and_then(Value::as_u64)?;
    let min_versions = feature_min_versions(schema);
    let fields = document.as_object()?;

    fields.keys().find_map(|field| {
        let min = *min_versions.get(field)?;
        (version < u64::from(min)).then(|| {
            format!(
                "The '{field}' field is first available in version {min} or higher, but document version is {version}"
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "oneOf": [
                {"properties": {"version": {"const": 2}, "configurePresets": {}}},
                {"properties": {"version": {"const": 4}, "configurePresets": {}, "include": {}}}
            ]
        })
    }

    #[test]
    fn versions_are_read_from_variants() {
        assert_eq!(schema_versions(&schema()), BTreeSet::from([2, 4]));
        assert!(schema_has_version(&schema(), 4));
        assert!(!schema_has_version(&schema(), 3));
    }

    #[test]
    fn feature_versions_take_the_minimum() {
        let min = feature_min_versions(&schema());
        assert_eq!(min["configurePresets"], 2);
        assert_eq!(min["include"], 4);
        assert!(!min.contains_key("version"));
    }

    #[test]
    fn explain_names_too_new_field() {
        let doc = json!({"version": 2, "include": []});
        let message = explain_failure(&doc, &schema()).unwrap();
        assert!(message.contains("'include' field is first available in version 4"));
    }

    #[test]
    fn no_schema_check_rejects_version_one() {
        assert!(NoSchemaCheck.validate(&json!({}), 1).is_err());
        assert!(NoSchemaCheck.validate(&json!({}), 4).is_ok());
    }
}
