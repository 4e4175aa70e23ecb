//! Version gate for the main presets document

use serde_json::Value;

use presets_schema::MINIMUM_SCHEMA_VERSION;

use crate::model::Document;
use crate::{Error, Result};

/// Rejects main documents whose `version` is missing, non-integer or below 2.
pub struct VersionGate;

impl VersionGate {
    /// Check `document` and return its schema version.
    pub fn check(document: &Document) -> Result<u32> {
        Self::check_value(document.key(), document.content())
    }

    /// Check the `version` field of `content`, naming `file` in errors.
    pub fn check_value(file: &str, content: &Value) -> Result<u32> {
        let Some(version) = content.get("version") else {
            tracing::error!("Missing version in {}", file);
            return Err(Error::MissingVersion {
                file: file.to_string(),
            });
        };

        let Some(version) = version.as_i64() else {
            return Err(Error::InvalidVersion {
                file: file.to_string(),
                found: version.to_string(),
            });
        };

        match u32::try_from(version) {
            Ok(version) if version >= MINIMUM_SCHEMA_VERSION => {
                tracing::debug!("Found version {} in {}", version, file);
                Ok(version)
            }
            _ => {
                tracing::error!("Unsupported version {} in {}", version, file);
                Err(Error::UnsupportedVersion {
                    file: file.to_string(),
                    version,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"version": 2}), 2)]
    #[case(json!({"version": 10}), 10)]
    fn accepts_supported_versions(#[case] content: Value, #[case] expected: u32) {
        assert_eq!(VersionGate::check_value("CMakePresets.json", &content).unwrap(), expected);
    }

    #[test]
    fn missing_version_names_the_file() {
        let err = VersionGate::check_value("CMakePresets.json", &json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing version in CMakePresets.json; minimum required is 2"
        );
    }

    #[rstest]
    #[case(json!({"version": 1}))]
    #[case(json!({"version": 0}))]
    #[case(json!({"version": -3}))]
    fn rejects_old_versions(#[case] content: Value) {
        let err = VersionGate::check_value("CMakePresets.json", &content).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { .. }));
        assert!(err.to_string().contains("minimum required is 2"));
    }

    #[rstest]
    #[case(json!({"version": "4"}))]
    #[case(json!({"version": 4.5}))]
    fn rejects_non_integer_versions(#[case] content: Value) {
        let err = VersionGate::check_value("CMakePresets.json", &content).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }
}
