use presets_fs::{NormalizedPath, SourceRoot};
use std::fs;
use tempfile::TempDir;

fn normalized(path: &std::path::Path) -> String {
    NormalizedPath::new(path).normalize().as_str().to_string()
}

#[test]
fn test_directory_input_finds_presets_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("CMakePresets.json"), "{}").unwrap();

    let root = SourceRoot::new(temp.path()).unwrap();
    assert_eq!(root.source_dir().as_str(), normalized(temp.path()));
    assert_eq!(
        root.presets_file().unwrap().file_name(),
        Some("CMakePresets.json")
    );
}

#[test]
fn test_file_input_uses_parent_as_source_dir() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("CMakePresets.json");
    fs::write(&file, "{}").unwrap();

    let root = SourceRoot::new(&file).unwrap();
    assert_eq!(root.source_dir().as_str(), normalized(temp.path()));
    assert_eq!(root.presets_file().unwrap().as_str(), normalized(&file));
}

#[test]
fn test_missing_presets_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("CMakeUserPresets.json"), "{}").unwrap();

    let root = SourceRoot::new(temp.path()).unwrap();
    assert!(root.presets_file().is_none());
}

#[test]
fn test_relative_input_is_anchored_at_base() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("CMakePresets.json"), "{}").unwrap();

    let root = SourceRoot::with_base("project/CMakePresets.json", temp.path());
    assert!(root.presets_file().is_some());
    assert_eq!(root.source_dir().as_str(), normalized(&project));
}
