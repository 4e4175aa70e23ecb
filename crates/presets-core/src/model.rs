//! Preset documents and the presets they hold
//!
//! Presets are kept as the JSON objects found in their documents. Only the
//! fields the engine itself acts on (`name`, `hidden`, `inherits`,
//! `configurePreset`) get typed accessors; everything else passes through
//! untouched.

use std::fmt;
use std::str::FromStr;

use presets_fs::NormalizedPath;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A preset's properties keyed by field name, in document order.
pub type PropertyMap = Map<String, Value>;

/// The five preset categories of a presets document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Configure,
    Build,
    Test,
    Package,
    Workflow,
}

impl PresetKind {
    /// Every kind, in document order.
    pub const ALL: [PresetKind; 5] = [
        PresetKind::Configure,
        PresetKind::Build,
        PresetKind::Test,
        PresetKind::Package,
        PresetKind::Workflow,
    ];

    /// Kinds that may point at a configure preset.
    pub const DEPENDENT: [PresetKind; 3] = [PresetKind::Build, PresetKind::Test, PresetKind::Package];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKind::Configure => "configure",
            PresetKind::Build => "build",
            PresetKind::Test => "test",
            PresetKind::Package => "package",
            PresetKind::Workflow => "workflow",
        }
    }

    /// The top-level document field holding presets of this kind.
    pub fn array_key(&self) -> &'static str {
        match self {
            PresetKind::Configure => "configurePresets",
            PresetKind::Build => "buildPresets",
            PresetKind::Test => "testPresets",
            PresetKind::Package => "packagePresets",
            PresetKind::Workflow => "workflowPresets",
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preset kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset type '{0}'; expected one of configure, build, test, package, workflow")]
pub struct UnknownPresetKind(pub String);

impl FromStr for PresetKind {
    type Err = UnknownPresetKind;

    /// Accepts both `build` and `buildPresets`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetKind::ALL
            .into_iter()
            .find(|kind| s == kind.as_str() || s == kind.array_key())
            .ok_or_else(|| UnknownPresetKind(s.to_string()))
    }
}

/// One loaded presets document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    key: String,
    path: NormalizedPath,
    content: Value,
}

impl Document {
    pub fn new(key: impl Into<String>, path: NormalizedPath, content: Value) -> Self {
        Self {
            key: key.into(),
            path,
            content,
        }
    }

    /// Path relative to the source directory, or absolute outside it.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absolute normalized path of the document.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    /// String entries of the `include` array.
    ///
    /// Entries that are not strings are skipped with a warning.
    pub fn includes(&self) -> Vec<String> {
        let Some(includes) = self.content.get("include") else {
            return Vec::new();
        };
        let Some(entries) = includes.as_array() else {
            tracing::warn!(file = %self.key, "Ignoring non-array include field");
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(include) => Some(include.to_string()),
                None => {
                    tracing::warn!(file = %self.key, "Ignoring non-string include entry {}", entry);
                    None
                }
            })
            .collect()
    }

    /// Presets of `kind` declared in this document, in order.
    ///
    /// Entries that are not JSON objects are skipped.
    pub fn presets(&self, kind: PresetKind) -> impl Iterator<Item = Preset> + '_ {
        self.entries(kind)
            .map(move |(position, fields)| Preset::new(kind, self.key.clone(), position, fields.clone()))
    }

    /// The first preset of `kind` called `name`.
    ///
    /// Names are compared in place; only the matching entry is copied.
    pub fn find_preset(&self, kind: PresetKind, name: &str) -> Option<Preset> {
        self.entries(kind)
            .find(|(_, fields)| fields.get("name").and_then(Value::as_str) == Some(name))
            .map(|(position, fields)| Preset::new(kind, self.key.clone(), position, fields.clone()))
    }

    fn entries(&self, kind: PresetKind) -> impl Iterator<Item = (usize, &PropertyMap)> + '_ {
        self.content
            .get(kind.array_key())
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .enumerate()
            .filter_map(|(position, entry)| entry.as_object().map(|fields| (position, fields)))
    }
}

/// Parent list of a preset.
#[derive(Debug, Clone, PartialEq)]
pub enum Inherits<'a> {
    Absent,
    Names(Vec<&'a str>),
    /// `inherits` holds something other than a string or list of strings.
    Malformed(&'a Value),
}

/// A single preset together with where it was declared.
///
/// Two presets are the same declaration when they share kind, document and
/// position; equal field contents alone don't make them the same.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    kind: PresetKind,
    origin: String,
    position: usize,
    fields: PropertyMap,
}

impl Preset {
    pub fn new(kind: PresetKind, origin: impl Into<String>, position: usize, fields: PropertyMap) -> Self {
        Self {
            kind,
            origin: origin.into(),
            position,
            fields,
        }
    }

    pub fn kind(&self) -> PresetKind {
        self.kind
    }

    /// Key of the document declaring this preset.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Index within its document's preset array.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn fields(&self) -> &PropertyMap {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.fields.get("displayName").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.get("description").and_then(Value::as_str)
    }

    pub fn hidden(&self) -> bool {
        self.fields.get("hidden").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn configure_preset(&self) -> Option<&str> {
        self.fields.get("configurePreset").and_then(Value::as_str)
    }

    /// Parent names, accepting a single string or a list of strings.
    pub fn inherits(&self) -> Inherits<'_> {
        let Some(value) = self.fields.get("inherits") else {
            return Inherits::Absent;
        };
        match value {
            Value::String(parent) => Inherits::Names(vec![parent.as_str()]),
            Value::Array(parents) => {
                let names: Option<Vec<&str>> = parents.iter().map(Value::as_str).collect();
                names.map_or(Inherits::Malformed(value), Inherits::Names)
            }
            _ => Inherits::Malformed(value),
        }
    }

    /// Whether `other` is the very same declaration.
    pub fn same_as(&self, other: &Preset) -> bool {
        self.kind == other.kind && self.position == other.position && self.origin == other.origin
    }
}

impl Serialize for Preset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
