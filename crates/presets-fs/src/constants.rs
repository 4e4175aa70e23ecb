//! Well-known preset file names.

use std::path::Path;

/// The two documents CMake looks for at the top of a source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetsFile {
    /// `CMakePresets.json`, the project-wide document
    Presets,
    /// `CMakeUserPresets.json`, the local, usually git-ignored overrides
    UserPresets,
}

impl PresetsFile {
    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Presets => "CMakePresets.json",
            Self::UserPresets => "CMakeUserPresets.json",
        }
    }
}

impl AsRef<Path> for PresetsFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for PresetsFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for PresetsFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
