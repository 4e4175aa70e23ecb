//! [`PresetTree`] builder for preset document scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// A temporary source directory holding preset documents.
///
/// # Example
///
/// ```rust,no_run
/// use presets_test_utils::{PresetTree, preset};
/// use serde_json::json;
///
/// let tree = PresetTree::new().with_presets(json!({
///     "version": 4,
///     "configurePresets": [preset("base", json!({"hidden": true}))]
/// }));
/// tree.assert_file_exists("CMakePresets.json");
/// ```
pub struct PresetTree {
    temp_dir: TempDir,
}

impl Default for PresetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetTree {
    /// Create an empty temporary source directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the source directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `CMakePresets.json` in the source directory.
    pub fn presets_path(&self) -> PathBuf {
        self.root().join("CMakePresets.json")
    }

    /// Write `CMakePresets.json`.
    pub fn with_presets(self, document: Value) -> Self {
        self.with_file("CMakePresets.json", document)
    }

    /// Write `CMakeUserPresets.json`.
    pub fn with_user_presets(self, document: Value) -> Self {
        self.with_file("CMakeUserPresets.json", document)
    }

    /// Write a JSON document at `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, document: Value) -> Self {
        self.write_json(relative, &document);
        self
    }

    /// Write raw text at `relative`, e.g. deliberately broken JSON.
    pub fn with_text(self, relative: &str, content: &str) -> Self {
        self.write_text(relative, content);
        self
    }

    pub fn write_json(&self, relative: &str, document: &Value) -> PathBuf {
        let text = serde_json::to_string_pretty(document).unwrap();
        self.write_text(relative, &text)
    }

    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Assert that `path` (relative to the source directory) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}

/// Build a preset object named `name` with the fields of `fields` added.
///
/// `fields` must be a JSON object (or `null` for a bare preset).
pub fn preset(name: &str, fields: Value) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), json!(name));
    if let Value::Object(extra) = fields {
        object.extend(extra);
    }
    Value::Object(object)
}
