use presets_schema::{CmakeCompatibility, check_cmake_minimum, cmake_version_for_schema};
use rstest::rstest;
use semver::Version;
use serde_json::json;

#[rstest]
#[case(2, Version::new(3, 20, 0))]
#[case(4, Version::new(3, 23, 0))]
#[case(10, Version::new(3, 31, 0))]
fn test_schema_to_cmake_version(#[case] schema: u32, #[case] expected: Version) {
    assert_eq!(cmake_version_for_schema(schema), Some(expected));
}

#[test]
fn test_unknown_schema_version() {
    assert_eq!(cmake_version_for_schema(42), None);
    assert_eq!(check_cmake_minimum(42, None), CmakeCompatibility::UnknownSchema);
}

#[test]
fn test_sufficient_minimum() {
    let declared = json!({"major": 3, "minor": 23, "patch": 0});
    assert_eq!(check_cmake_minimum(4, Some(&declared)), CmakeCompatibility::Sufficient);

    let newer = json!({"major": 3, "minor": 28});
    assert_eq!(check_cmake_minimum(4, Some(&newer)), CmakeCompatibility::Sufficient);
}

#[test]
fn test_too_low_minimum() {
    let declared = json!({"major": 3, "minor": 21, "patch": 0});
    assert_eq!(
        check_cmake_minimum(4, Some(&declared)),
        CmakeCompatibility::TooLow {
            required: Version::new(3, 23, 0),
            declared: Version::new(3, 21, 0),
        }
    );
}

#[test]
fn test_missing_minimum_counts_as_zero() {
    assert!(matches!(
        check_cmake_minimum(2, None),
        CmakeCompatibility::TooLow { .. }
    ));
}
