//! Source root discovery
//!
//! Turns whatever the user pointed at (a `CMakePresets.json` file or the
//! directory containing it) into the source directory and the paths of the
//! presets documents found there.

use std::path::Path;

use crate::{Error, NormalizedPath, PresetsFile, Result};

/// Resolved location of a preset source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    source_dir: NormalizedPath,
    presets_file: Option<NormalizedPath>,
}

impl SourceRoot {
    /// Resolve `input` against the current working directory.
    pub fn new(input: impl AsRef<Path>) -> Result<Self> {
        let input = input.as_ref();
        if input.is_absolute() {
            return Ok(Self::with_base(input, Path::new("/")));
        }
        let cwd = std::env::current_dir().map_err(|e| Error::io(input, e))?;
        Ok(Self::with_base(input, dunce::simplified(&cwd)))
    }

    /// Resolve `input`, anchoring relative paths at `base`.
    ///
    /// A path ending in `CMakePresets.json` is taken as the presets file;
    /// anything else is taken as the source directory.
    pub fn with_base(input: impl AsRef<Path>, base: &Path) -> Self {
        let input = NormalizedPath::new(input);
        let path = NormalizedPath::new(base).join(input.as_str()).normalize();

        let (source_dir, candidate) = if path.as_str().ends_with(PresetsFile::Presets.as_str()) {
            let dir = path.parent().unwrap_or_else(|| NormalizedPath::new("."));
            tracing::debug!(presets_file = %path, "Using presets file");
            (dir, path)
        } else {
            tracing::debug!(source_dir = %path, "Using source directory");
            let file = path.join(PresetsFile::Presets.as_str());
            (path, file)
        };

        let presets_file = if candidate.is_file() {
            tracing::debug!(presets_file = %candidate, "Found presets file");
            Some(candidate)
        } else {
            tracing::debug!(presets_file = %candidate, "No presets file found");
            None
        };

        Self {
            source_dir,
            presets_file,
        }
    }

    /// The directory holding the presets document.
    pub fn source_dir(&self) -> &NormalizedPath {
        &self.source_dir
    }

    /// Path of `CMakePresets.json`, if it exists.
    pub fn presets_file(&self) -> Option<&NormalizedPath> {
        self.presets_file.as_ref()
    }
}
