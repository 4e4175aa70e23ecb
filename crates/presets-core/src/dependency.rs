//! Which build, test and package presets use a configure preset

use indexmap::IndexMap;
use serde::Serialize;

use crate::index::PresetIndex;
use crate::inheritance::InheritanceResolver;
use crate::model::{Preset, PresetKind};

/// Presets depending on one configure preset, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dependents {
    pub build: Vec<Preset>,
    pub test: Vec<Preset>,
    pub package: Vec<Preset>,
}

impl Dependents {
    /// Dependents of `kind`; always empty for configure and workflow.
    pub fn get(&self, kind: PresetKind) -> &[Preset] {
        match kind {
            PresetKind::Build => &self.build,
            PresetKind::Test => &self.test,
            PresetKind::Package => &self.package,
            PresetKind::Configure | PresetKind::Workflow => &[],
        }
    }

    fn push(&mut self, preset: Preset) {
        match preset.kind() {
            PresetKind::Build => self.build.push(preset),
            PresetKind::Test => self.test.push(preset),
            PresetKind::Package => self.package.push(preset),
            PresetKind::Configure | PresetKind::Workflow => {}
        }
    }

    pub fn len(&self) -> usize {
        self.build.len() + self.test.len() + self.package.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A configure preset with everything that depends on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub preset: Preset,
    pub dependents: Dependents,
}

/// Configure preset name to its node, in declaration order.
pub type PresetTree = IndexMap<String, TreeNode>;

/// Dependents of one configure preset, keyed by kind.
pub type RelatedPresets = IndexMap<PresetKind, Vec<Preset>>;

/// Maps configure presets to their dependents.
#[derive(Debug, Clone, Copy)]
pub struct DependencyMapper<'a> {
    index: PresetIndex<'a>,
    inheritance: InheritanceResolver<'a>,
}

impl<'a> DependencyMapper<'a> {
    pub fn new(index: PresetIndex<'a>) -> Self {
        Self {
            index,
            inheritance: InheritanceResolver::new(index),
        }
    }

    /// Presets pointing at the configure preset `name`.
    ///
    /// A preset counts when it names `name` directly, or when it has no
    /// `configurePreset` of its own but inherits one equal to `name`.
    pub fn dependents(&self, kind: PresetKind, name: &str) -> Dependents {
        let mut dependents = Dependents::default();
        if kind != PresetKind::Configure {
            return dependents;
        }

        for dependent_kind in PresetKind::DEPENDENT {
            for preset in self.index.presets_of_type(dependent_kind) {
                if preset.configure_preset() == Some(name) {
                    dependents.push(preset);
                    continue;
                }
                if !preset.has("inherits") || preset.has("configurePreset") {
                    continue;
                }
                let Some(preset_name) = preset.name() else {
                    continue;
                };
                let flattened = self.inheritance.flatten(dependent_kind, preset_name);
                let inherited = flattened.get("configurePreset").and_then(|v| v.as_str());
                if inherited == Some(name) {
                    tracing::debug!(
                        "{} preset '{}' inherits configurePreset '{}'",
                        dependent_kind,
                        preset_name,
                        name
                    );
                    dependents.push(preset);
                }
            }
        }
        dependents
    }

    /// Every named configure preset with its dependents.
    ///
    /// When names repeat, the first declaration is kept.
    pub fn tree(&self) -> PresetTree {
        let mut tree = PresetTree::new();
        for preset in self.index.presets_of_type(PresetKind::Configure) {
            let Some(name) = preset.name().map(str::to_string) else {
                continue;
            };
            if tree.contains_key(&name) {
                tracing::debug!("Skipping duplicate configure preset '{}'", name);
                continue;
            }
            let dependents = self.dependents(PresetKind::Configure, &name);
            tree.insert(name, TreeNode { preset, dependents });
        }
        tree
    }

    /// Dependents of the configure preset `name`, optionally for one kind.
    ///
    /// `None` when no configure preset is called `name`.
    pub fn related(&self, name: &str, filter: Option<PresetKind>) -> Option<RelatedPresets> {
        let mut tree = self.tree();
        let Some(node) = tree.swap_remove(name) else {
            tracing::warn!("Configure preset '{}' not found", name);
            return None;
        };

        let kinds: Vec<PresetKind> = match filter {
            Some(kind) => vec![kind],
            None => PresetKind::DEPENDENT.to_vec(),
        };
        Some(
            kinds
                .into_iter()
                .map(|kind| (kind, node.dependents.get(kind).to_vec()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{IncludeGraph, LoadedDocuments};
    use presets_fs::{MemoryReader, NormalizedPath};
    use presets_schema::NoSchemaCheck;
    use serde_json::json;

    fn documents() -> LoadedDocuments {
        let reader = MemoryReader::new().with_file(
            "/src/CMakePresets.json",
            json!({
                "version": 4,
                "configurePresets": [{"name": "dev"}, {"name": "rel"}],
                "buildPresets": [
                    {"name": "b-base", "hidden": true, "configurePreset": "dev"},
                    {"name": "b-dev", "inherits": "b-base"},
                    {"name": "b-rel", "inherits": "b-base", "configurePreset": "rel"}
                ],
                "testPresets": [{"name": "t-dev", "configurePreset": "dev"}]
            })
            .to_string(),
        );
        IncludeGraph::new(&reader, &NoSchemaCheck)
            .load(&NormalizedPath::new("/src/CMakePresets.json"))
            .unwrap()
    }

    fn names(presets: &[Preset]) -> Vec<&str> {
        presets.iter().filter_map(Preset::name).collect()
    }

    #[test]
    fn direct_and_inherited_dependents() {
        let docs = documents();
        let mapper = DependencyMapper::new(PresetIndex::new(&docs));
        let deps = mapper.dependents(PresetKind::Configure, "dev");
        assert_eq!(names(&deps.build), vec!["b-base", "b-dev"]);
        assert_eq!(names(&deps.test), vec!["t-dev"]);
        assert!(deps.package.is_empty());
    }

    #[test]
    fn explicit_configure_preset_beats_inherited_one() {
        let docs = documents();
        let mapper = DependencyMapper::new(PresetIndex::new(&docs));
        let deps = mapper.dependents(PresetKind::Configure, "rel");
        assert_eq!(names(&deps.build), vec!["b-rel"]);
    }

    #[test]
    fn non_configure_kinds_have_no_dependents() {
        let docs = documents();
        let mapper = DependencyMapper::new(PresetIndex::new(&docs));
        assert!(mapper.dependents(PresetKind::Build, "b-base").is_empty());
    }

    #[test]
    fn related_filters_by_kind() {
        let docs = documents();
        let mapper = DependencyMapper::new(PresetIndex::new(&docs));
        let related = mapper.related("dev", Some(PresetKind::Test)).unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(names(&related[&PresetKind::Test]), vec!["t-dev"]);
        assert!(mapper.related("nope", None).is_none());
    }
}
