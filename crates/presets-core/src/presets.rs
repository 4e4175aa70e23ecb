//! The loaded preset set and its query surface

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use presets_fs::{FsReader, SourceRoot};
use presets_schema::{JsonSchemaChecker, SchemaChecker};

use crate::dependency::{Dependents, DependencyMapper, PresetTree, RelatedPresets};
use crate::environment::EnvironmentSnapshot;
use crate::index::PresetIndex;
use crate::inheritance::InheritanceResolver;
use crate::loader::{IncludeGraph, LoadedDocuments};
use crate::macros::{MacroResolver, ResolvedPreset};
use crate::model::{Preset, PresetKind, PropertyMap};
use crate::{Error, Result};

/// Every preset reachable from one `CMakePresets.json`.
///
/// The set is immutable once loaded; derived views (chains, trees,
/// resolved presets) are recomputed on each call.
///
/// # Example
///
/// ```ignore
/// use presets_core::{PresetKind, PresetSet};
///
/// let presets = PresetSet::load("path/to/project")?;
/// let flat = presets.flatten_preset(PresetKind::Configure, "release");
/// println!("{}", flat["binaryDir"]);
/// ```
#[derive(Debug, Clone)]
pub struct PresetSet {
    root: SourceRoot,
    documents: LoadedDocuments,
    environment: EnvironmentSnapshot,
}

impl PresetSet {
    pub fn builder() -> PresetSetBuilder {
        PresetSetBuilder::default()
    }

    /// Load from a `CMakePresets.json` path or the directory holding it.
    ///
    /// Schemas come from the default cache and `$env{}` / `$penv{}` see the
    /// process environment as it is now.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().load(path)
    }

    pub fn root(&self) -> &SourceRoot {
        &self.root
    }

    pub fn documents(&self) -> &LoadedDocuments {
        &self.documents
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    pub fn index(&self) -> PresetIndex<'_> {
        PresetIndex::new(&self.documents)
    }

    pub fn presets_of_type(&self, kind: PresetKind) -> Vec<Preset> {
        self.index().presets_of_type(kind).collect()
    }

    pub fn configure_presets(&self) -> Vec<Preset> {
        self.presets_of_type(PresetKind::Configure)
    }

    pub fn build_presets(&self) -> Vec<Preset> {
        self.presets_of_type(PresetKind::Build)
    }

    pub fn test_presets(&self) -> Vec<Preset> {
        self.presets_of_type(PresetKind::Test)
    }

    pub fn package_presets(&self) -> Vec<Preset> {
        self.presets_of_type(PresetKind::Package)
    }

    pub fn workflow_presets(&self) -> Vec<Preset> {
        self.presets_of_type(PresetKind::Workflow)
    }

    pub fn preset_by_name(&self, kind: PresetKind, name: &str) -> Option<Preset> {
        self.index().by_name(kind, name)
    }

    /// First preset called `name` of any kind.
    pub fn find_preset(&self, name: &str) -> Option<Preset> {
        self.index().find_any_type(name)
    }

    pub fn inheritance_chain(&self, kind: PresetKind, name: &str) -> Vec<Preset> {
        InheritanceResolver::new(self.index()).chain(kind, name)
    }

    /// Effective properties of a preset; empty when it does not exist.
    pub fn flatten_preset(&self, kind: PresetKind, name: &str) -> PropertyMap {
        InheritanceResolver::new(self.index()).flatten(kind, name)
    }

    pub fn dependent_presets(&self, kind: PresetKind, name: &str) -> Dependents {
        DependencyMapper::new(self.index()).dependents(kind, name)
    }

    pub fn preset_tree(&self) -> PresetTree {
        DependencyMapper::new(self.index()).tree()
    }

    pub fn related_presets(&self, configure: &str, filter: Option<PresetKind>) -> Option<RelatedPresets> {
        DependencyMapper::new(self.index()).related(configure, filter)
    }

    /// Preset name to the key of the document declaring it.
    pub fn preset_file_paths(&self) -> HashMap<String, String> {
        self.index().file_paths()
    }

    pub fn macro_resolver(&self) -> MacroResolver {
        MacroResolver::new(self.root.source_dir().clone(), self.environment.clone())
    }

    /// Flatten a preset and expand its macros.
    ///
    /// `env_overrides` take precedence over the preset's `environment`
    /// in `$env{}` references.
    pub fn resolve_macros(
        &self,
        kind: PresetKind,
        name: &str,
        env_overrides: &BTreeMap<String, String>,
    ) -> ResolvedPreset {
        let Some(preset) = self.preset_by_name(kind, name) else {
            return ResolvedPreset {
                preset: PropertyMap::new(),
                diagnostics: Vec::new(),
            };
        };
        let flattened = self.flatten_preset(kind, name);
        self.macro_resolver()
            .resolve_in_preset(&flattened, Some(preset.origin()), env_overrides)
    }
}

/// Options for loading a [`PresetSet`].
pub struct PresetSetBuilder {
    checker: Option<Box<dyn SchemaChecker>>,
    environment: Option<EnvironmentSnapshot>,
    user_presets: bool,
}

impl Default for PresetSetBuilder {
    fn default() -> Self {
        Self {
            checker: None,
            environment: None,
            user_presets: true,
        }
    }
}

impl PresetSetBuilder {
    /// Schema checker for the main document; defaults to the cached
    /// JSON schemas.
    pub fn schema_checker(mut self, checker: impl SchemaChecker + 'static) -> Self {
        self.checker = Some(Box::new(checker));
        self
    }

    /// Environment seen by macros; defaults to the process environment.
    pub fn environment(mut self, environment: EnvironmentSnapshot) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Whether to load `CMakeUserPresets.json`; on by default.
    pub fn user_presets(mut self, enabled: bool) -> Self {
        self.user_presets = enabled;
        self
    }

    pub fn load(self, path: impl AsRef<Path>) -> Result<PresetSet> {
        let path = path.as_ref();
        let root = SourceRoot::new(path)?;
        let Some(presets_file) = root.presets_file().cloned() else {
            return Err(Error::PresetsNotFound {
                path: path.to_path_buf(),
            });
        };

        let checker = self
            .checker
            .unwrap_or_else(|| Box::new(JsonSchemaChecker::with_default_cache()) as Box<dyn SchemaChecker>);
        let documents = IncludeGraph::new(&FsReader, &*checker)
            .with_user_presets(self.user_presets)
            .load(&presets_file)?;

        let set = PresetSet {
            root,
            documents,
            environment: self.environment.unwrap_or_else(EnvironmentSnapshot::capture),
        };

        for kind in PresetKind::ALL {
            tracing::debug!(count = set.index().presets_of_type(kind).count(), "{} presets", kind);
        }
        tracing::info!(
            documents = set.documents.len(),
            source_dir = %set.root.source_dir(),
            "Loaded presets"
        );
        Ok(set)
    }
}
