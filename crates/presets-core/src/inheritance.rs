//! Inheritance chains and flattening
//!
//! A preset's chain lists its ancestors depth-first, each parent's own
//! ancestors before the parent itself, in `inherits` order. Flattening
//! merges the chain followed by the preset:
//!
//! - `inherits` never survives a merge
//! - `hidden` comes only from the preset being flattened
//! - object values (`cacheVariables`, `environment`, ...) merge one level
//!   deep, later entries winning per key
//! - everything else is replaced by later entries

use serde_json::Value;

use crate::index::PresetIndex;
use crate::model::{Inherits, Preset, PresetKind, PropertyMap};

/// Fields taken only from the last entry of a chain.
const NON_INHERITABLE: &[&str] = &["inherits", "hidden"];

/// Computes inheritance chains over a [`PresetIndex`].
#[derive(Debug, Clone, Copy)]
pub struct InheritanceResolver<'a> {
    index: PresetIndex<'a>,
}

impl<'a> InheritanceResolver<'a> {
    pub fn new(index: PresetIndex<'a>) -> Self {
        Self { index }
    }

    /// Ancestors of the preset `name`, root-most first.
    ///
    /// Unknown parents are skipped with a warning. A parent reached again
    /// through its own descendants is a cycle: that branch is dropped and
    /// logged.
    pub fn chain(&self, kind: PresetKind, name: &str) -> Vec<Preset> {
        let mut visiting = vec![name.to_string()];
        self.chain_from(kind, name, &mut visiting)
    }

    fn chain_from(&self, kind: PresetKind, name: &str, visiting: &mut Vec<String>) -> Vec<Preset> {
        let Some(preset) = self.index.lookup(kind, name) else {
            return Vec::new();
        };

        let parents = match preset.inherits() {
            Inherits::Absent => return Vec::new(),
            Inherits::Malformed(value) => {
                tracing::warn!("Ignoring malformed inherits {} in {} preset '{}'", value, kind, name);
                return Vec::new();
            }
            Inherits::Names(parents) => parents,
        };

        let mut chain: Vec<Preset> = Vec::new();
        for parent_name in parents {
            if visiting.iter().any(|seen| seen == parent_name) {
                tracing::warn!(
                    "Inheritance cycle: {} preset '{}' inherits '{}', which is already in its chain",
                    kind,
                    name,
                    parent_name
                );
                continue;
            }
            let Some(parent) = self.index.lookup(kind, parent_name) else {
                tracing::warn!(
                    "Could not find parent preset '{}' referenced by '{}'",
                    parent_name,
                    name
                );
                continue;
            };

            visiting.push(parent_name.to_string());
            let ancestors = self.chain_from(kind, parent_name, visiting);
            visiting.pop();

            for ancestor in ancestors {
                push_unique(&mut chain, ancestor);
            }
            push_unique(&mut chain, parent);
        }
        chain
    }

    /// The effective properties of the preset `name`.
    ///
    /// Returns an empty map when the preset does not exist.
    pub fn flatten(&self, kind: PresetKind, name: &str) -> PropertyMap {
        let Some(preset) = self.index.lookup(kind, name) else {
            tracing::warn!("Preset '{}' of type {} not found", name, kind);
            return PropertyMap::new();
        };

        let mut chain = self.chain(kind, name);
        chain.push(preset);
        tracing::debug!(
            "Flattening {} preset '{}' over {} chain entries",
            kind,
            name,
            chain.len()
        );
        merge_chain(&chain)
    }
}

fn push_unique(chain: &mut Vec<Preset>, preset: Preset) {
    if !chain.iter().any(|existing| existing.same_as(&preset)) {
        chain.push(preset);
    }
}

/// Merge `chain` in order; the last entry is the preset being flattened.
pub fn merge_chain(chain: &[Preset]) -> PropertyMap {
    let mut merged = PropertyMap::new();
    let last = chain.len().saturating_sub(1);

    for (position, preset) in chain.iter().enumerate() {
        for (key, value) in preset.fields() {
            if key == "inherits" {
                continue;
            }
            if position != last && NON_INHERITABLE.contains(&key.as_str()) {
                continue;
            }

            let combined = match (merged.get(key), value) {
                (Some(Value::Object(existing)), Value::Object(incoming)) => {
                    let mut combined = existing.clone();
                    for (field, field_value) in incoming {
                        combined.insert(field.clone(), field_value.clone());
                    }
                    Value::Object(combined)
                }
                _ => value.clone(),
            };
            merged.insert(key.clone(), combined);
        }
    }
    merged
}
