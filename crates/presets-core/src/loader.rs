//! Document loading and include traversal
//!
//! Loading starts at the main `CMakePresets.json`, picks up
//! `CMakeUserPresets.json` next to it, then follows `include` entries
//! breadth-first until no new documents turn up:
//!
//! ```text
//! CMakePresets.json ──include──> cmake/common.json ──include──> cmake/toolchains.json
//!        │                                 ▲
//! CMakeUserPresets.json ──include──────────┘   (already loaded, skipped)
//! ```
//!
//! Documents are keyed by their path relative to the source directory, or
//! by their absolute path when they live outside it. A key is loaded at
//! most once, so include cycles terminate.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use presets_fs::{FileReader, NormalizedPath, PresetsFile, read_json};
use presets_schema::SchemaChecker;

use crate::model::Document;
use crate::version::VersionGate;
use crate::{Error, Result};

/// Every document reachable from the main presets file.
#[derive(Debug, Clone)]
pub struct LoadedDocuments {
    source_dir: NormalizedPath,
    documents: IndexMap<String, Document>,
    processed: IndexSet<String>,
}

impl LoadedDocuments {
    pub fn source_dir(&self) -> &NormalizedPath {
        &self.source_dir
    }

    /// Documents in load order: main file, user file, then includes.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Document> {
        self.documents.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    /// Keys whose `include` entries have been followed.
    pub fn processed(&self) -> &IndexSet<String> {
        &self.processed
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Reads single documents and assigns their keys.
pub struct DocumentLoader<'a> {
    reader: &'a dyn FileReader,
    source_dir: NormalizedPath,
}

impl<'a> DocumentLoader<'a> {
    pub fn new(reader: &'a dyn FileReader, source_dir: NormalizedPath) -> Self {
        Self { reader, source_dir }
    }

    /// Key for `path`: relative to the source directory when inside it.
    pub fn key_for(&self, path: &NormalizedPath) -> String {
        match path.relative_to(&self.source_dir) {
            Some(relative) => relative.as_str().to_string(),
            None => path.normalize().as_str().to_string(),
        }
    }

    pub fn load(&self, path: &NormalizedPath) -> Result<Document> {
        let path = path.normalize();
        let key = self.key_for(&path);
        tracing::debug!(file = %key, path = %path, "Loading presets document");
        let content = read_json(self.reader, &path)?;
        Ok(Document::new(key, path, content))
    }
}

/// Loads the main document and everything it pulls in.
pub struct IncludeGraph<'a> {
    reader: &'a dyn FileReader,
    checker: &'a dyn SchemaChecker,
    user_presets: bool,
}

impl<'a> IncludeGraph<'a> {
    pub fn new(reader: &'a dyn FileReader, checker: &'a dyn SchemaChecker) -> Self {
        Self {
            reader,
            checker,
            user_presets: true,
        }
    }

    /// Whether to pick up `CMakeUserPresets.json` next to the main file.
    pub fn with_user_presets(mut self, enabled: bool) -> Self {
        self.user_presets = enabled;
        self
    }

    /// Load `main_path` and every document reachable through `include`.
    ///
    /// The main document must pass the version gate and, when a schema is
    /// available, schema validation. Included documents are taken as-is.
    pub fn load(&self, main_path: &NormalizedPath) -> Result<LoadedDocuments> {
        let main_path = main_path.normalize();
        let source_dir = main_path.parent().unwrap_or_else(|| NormalizedPath::new("."));
        let loader = DocumentLoader::new(self.reader, source_dir.clone());

        let main = loader.load(&main_path)?;
        let version = VersionGate::check(&main)?;
        self.validate(&main, version)?;
        self.checker
            .check_cmake_minimum(version, main.content().get("cmakeMinimumRequired"));

        let mut documents = IndexMap::new();
        documents.insert(main.key().to_string(), main);

        if self.user_presets {
            let user_path = source_dir.join(PresetsFile::UserPresets.as_str());
            if self.reader.is_file(&user_path) {
                tracing::info!(path = %user_path, "Loading user presets");
                let user = loader.load(&user_path)?;
                documents.insert(user.key().to_string(), user);
            } else {
                tracing::debug!(path = %user_path, "No user presets file");
            }
        }

        let mut queue: VecDeque<String> = documents.keys().cloned().collect();
        let mut processed = IndexSet::new();

        while let Some(current) = queue.pop_front() {
            if processed.contains(&current) {
                continue;
            }
            let includes = match documents.get(&current) {
                Some(document) => document.includes(),
                None => Vec::new(),
            };
            let current_dir = NormalizedPath::new(&current).parent();

            for include in includes {
                let base = match &current_dir {
                    Some(dir) => source_dir.join(dir.as_str()),
                    None => source_dir.clone(),
                };
                let target = base.join(&include).normalize();
                let key = loader.key_for(&target);
                if documents.contains_key(&key) {
                    tracing::debug!(file = %key, from = %current, "Include already loaded");
                    continue;
                }

                tracing::info!(file = %key, from = %current, "Including file");
                let document = loader.load(&target)?;
                documents.insert(key.clone(), document);
                queue.push_back(key);
            }

            processed.insert(current);
        }

        tracing::debug!(count = documents.len(), "Loaded presets documents");
        Ok(LoadedDocuments {
            source_dir,
            documents,
            processed,
        })
    }

    fn validate(&self, main: &Document, version: u32) -> Result<()> {
        match self.checker.validate(main.content(), version) {
            Ok(()) => {
                tracing::debug!(file = %main.key(), "Schema validation passed");
                Ok(())
            }
            Err(presets_schema::Error::Unavailable { version, reason }) => {
                tracing::warn!(
                    file = %main.key(),
                    "Skipping schema validation for version {}: {}",
                    version,
                    reason
                );
                Ok(())
            }
            Err(presets_schema::Error::Invalid { message }) => Err(Error::SchemaValidation {
                file: main.key().to_string(),
                message,
            }),
            Err(presets_schema::Error::UnsupportedVersion { version }) => {
                Err(Error::UnsupportedVersion {
                    file: main.key().to_string(),
                    version,
                })
            }
            Err(other) => Err(other.into()),
        }
    }
}
