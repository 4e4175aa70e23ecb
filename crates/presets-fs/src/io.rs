//! File reading capability
//!
//! The loader never touches `std::fs` directly; it goes through a
//! [`FileReader`] so tests can serve documents from memory.

use std::collections::HashMap;
use std::fs;

use serde_json::Value;

use crate::{Error, NormalizedPath, Result};

/// Source of preset document text.
pub trait FileReader {
    /// Read the whole file as UTF-8 text.
    ///
    /// The handle is opened and closed within the call.
    fn read_text(&self, path: &NormalizedPath) -> Result<String>;

    /// Whether a regular file exists at `path`.
    fn is_file(&self, path: &NormalizedPath) -> bool;
}

/// [`FileReader`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_text(&self, path: &NormalizedPath) -> Result<String> {
        let native_path = path.to_native();
        fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
    }

    fn is_file(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }
}

/// [`FileReader`] serving fixed contents keyed by normalized path.
#[derive(Debug, Default, Clone)]
pub struct MemoryReader {
    files: HashMap<String, String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; the path is normalized before it is stored.
    pub fn with_file(mut self, path: impl Into<NormalizedPath>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<NormalizedPath>, content: impl Into<String>) {
        let key = path.into().normalize().as_str().to_string();
        self.files.insert(key, content.into());
    }
}

impl FileReader for MemoryReader {
    fn read_text(&self, path: &NormalizedPath) -> Result<String> {
        let key = path.normalize();
        self.files.get(key.as_str()).cloned().ok_or_else(|| {
            Error::io(
                path.to_native(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            )
        })
    }

    fn is_file(&self, path: &NormalizedPath) -> bool {
        self.files.contains_key(path.normalize().as_str())
    }
}

/// Read and decode a JSON document.
///
/// Decoding failures carry the line and column reported by `serde_json`.
pub fn read_json(reader: &dyn FileReader, path: &NormalizedPath) -> Result<Value> {
    let content = reader.read_text(path)?;
    serde_json::from_str(&content).map_err(|e| Error::parse(path.to_native(), &e))
}
