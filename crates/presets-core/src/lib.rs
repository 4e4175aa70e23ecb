//! Preset resolution engine for CMake presets
//!
//! This crate turns a `CMakePresets.json` tree into a queryable set of
//! presets, implementing:
//!
//! - **Loading**: the main document, `CMakeUserPresets.json` and every
//!   document reachable through `include`, with a version gate and schema
//!   validation on the main document
//! - **Indexing**: presets by kind and name across all documents
//! - **Inheritance**: `inherits` chains and flattening under the merge policy
//! - **Dependencies**: build, test and package presets of a configure preset
//! - **Macros**: `${...}`, `$env{...}` and `$penv{...}` expansion
//!
//! # Architecture
//!
//! `presets-core` sits above the Layer 0 crates and below the CLI:
//!
//! ```text
//!                      CLI
//!                       |
//!                 presets-core
//!                       |
//!            +----------+----------+
//!            |                     |
//!       presets-fs          presets-schema
//! ```
//!
//! Inside the crate, data flows one way:
//!
//! ```text
//! IncludeGraph -> LoadedDocuments -> PresetIndex -> InheritanceResolver -> MacroResolver
//!                                         \-------> DependencyMapper
//! ```
//!
//! # Example
//!
//! ```ignore
//! use presets_core::{PresetKind, PresetSet, Result};
//!
//! fn example() -> Result<()> {
//!     let presets = PresetSet::load("path/to/project")?;
//!     for preset in presets.configure_presets() {
//!         println!("{:?}", preset.name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod dependency;
pub mod environment;
pub mod error;
pub mod index;
pub mod inheritance;
pub mod loader;
pub mod macros;
pub mod model;
pub mod presets;
pub mod version;

pub use dependency::{DependencyMapper, Dependents, PresetTree, RelatedPresets, TreeNode};
pub use environment::EnvironmentSnapshot;
pub use error::{Error, Result};
pub use index::PresetIndex;
pub use inheritance::{InheritanceResolver, merge_chain};
pub use loader::{DocumentLoader, IncludeGraph, LoadedDocuments};
pub use macros::{MacroContext, MacroDiagnostic, MacroResolver, ResolvedPreset};
pub use model::{Document, Inherits, Preset, PresetKind, PropertyMap, UnknownPresetKind};
pub use presets::{PresetSet, PresetSetBuilder};
pub use version::VersionGate;
