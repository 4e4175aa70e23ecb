//! Lookup of presets across all loaded documents

use std::collections::HashMap;

use crate::loader::LoadedDocuments;
use crate::model::{Preset, PresetKind};

/// Read-only view answering "which presets exist" questions.
///
/// Documents are scanned in load order, so the first declaration of a name
/// wins every lookup.
#[derive(Debug, Clone, Copy)]
pub struct PresetIndex<'a> {
    documents: &'a LoadedDocuments,
}

impl<'a> PresetIndex<'a> {
    pub fn new(documents: &'a LoadedDocuments) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &'a LoadedDocuments {
        self.documents
    }

    /// Presets of `kind` from every document, computed lazily.
    pub fn presets_of_type(&self, kind: PresetKind) -> impl Iterator<Item = Preset> + use<'a> {
        self.documents
            .iter()
            .flat_map(move |document| document.presets(kind))
    }

    /// Every preset of every kind.
    pub fn all_presets(&self) -> impl Iterator<Item = Preset> + use<'a> {
        let documents = self.documents;
        PresetKind::ALL
            .into_iter()
            .flat_map(move |kind| PresetIndex::new(documents).presets_of_type(kind))
    }

    /// First preset of `kind` called `name`.
    ///
    /// A miss is logged as a warning.
    pub fn by_name(&self, kind: PresetKind, name: &str) -> Option<Preset> {
        let found = self.lookup(kind, name);
        match &found {
            Some(preset) => {
                tracing::debug!(origin = %preset.origin(), "Found {} preset '{}'", kind, name)
            }
            None => tracing::warn!("No {} preset named '{}'", kind, name),
        }
        found
    }

    /// First preset called `name`, checking kinds in document order.
    ///
    /// Logs one warning when no kind has it.
    pub fn find_any_type(&self, name: &str) -> Option<Preset> {
        let found = PresetKind::ALL
            .into_iter()
            .find_map(|kind| self.lookup(kind, name));
        if found.is_none() {
            tracing::warn!("No preset of any type named '{}'", name);
        }
        found
    }

    /// Like [`by_name`](Self::by_name) but silent, for callers that report
    /// misses themselves.
    pub(crate) fn lookup(&self, kind: PresetKind, name: &str) -> Option<Preset> {
        self.documents
            .iter()
            .find_map(|document| document.find_preset(kind, name))
    }

    /// Name of each preset to the key of the document declaring it.
    ///
    /// Names are gathered across all kinds; the first declaration wins.
    pub fn file_paths(&self) -> HashMap<String, String> {
        let mut paths = HashMap::new();
        for preset in self.all_presets() {
            if let Some(name) = preset.name() {
                paths
                    .entry(name.to_string())
                    .or_insert_with(|| preset.origin().to_string());
            }
        }
        paths
    }
}
