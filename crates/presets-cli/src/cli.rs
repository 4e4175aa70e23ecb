//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, Subcommand, ValueEnum};
use presets_core::PresetKind;

/// cmakepresets - Inspect CMakePresets.json files
#[derive(Parser, Debug)]
#[command(name = "cmakepresets")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "directory"])))]
pub struct Cli {
    /// Path to a CMakePresets.json file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory containing CMakePresets.json
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Increase log verbosity (-v warnings, -vv info, -vvv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding cached CMakePresets JSON schemas
    #[arg(long, value_name = "DIR", env = "CMAKEPRESETS_SCHEMA_CACHE")]
    pub schema_cache: Option<PathBuf>,

    /// Skip JSON schema validation
    #[arg(long)]
    pub no_schema: bool,

    /// Ignore CMakeUserPresets.json
    #[arg(long)]
    pub no_user_presets: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List presets
    ///
    /// Without a type filter, configure presets are grouped with the build
    /// and test presets that use them.
    ///
    /// Examples:
    ///   cmakepresets -d . list
    ///   cmakepresets -d . list --type build --show-hidden
    List {
        /// Preset type to list
        #[arg(short = 't', long = "type", value_enum, default_value_t = ListType::All)]
        kind: ListType,

        /// Include hidden presets
        #[arg(long)]
        show_hidden: bool,

        /// Plain per-type listing instead of the grouped view
        #[arg(long)]
        flat: bool,
    },

    /// Show a single preset
    Show {
        /// Name of the preset
        preset_name: String,

        /// Restrict the lookup to one preset type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Merge the inheritance chain into one preset
        #[arg(long)]
        flatten: bool,

        /// Flatten and expand macros
        #[arg(long)]
        resolve: bool,
    },

    /// Show presets that depend on a configure preset
    Related {
        /// Name of the configure preset
        configure_preset: String,

        /// Only show one dependent type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<DependentKindArg>,
    },
}

/// Preset type accepted by `--type`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Configure,
    Build,
    Test,
    Package,
    Workflow,
}

impl From<KindArg> for PresetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Configure => PresetKind::Configure,
            KindArg::Build => PresetKind::Build,
            KindArg::Test => PresetKind::Test,
            KindArg::Package => PresetKind::Package,
            KindArg::Workflow => PresetKind::Workflow,
        }
    }
}

/// `--type` for `list`, which also takes `all`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    All,
    Configure,
    Build,
    Test,
    Package,
    Workflow,
}

impl ListType {
    /// `None` for `all`.
    pub fn kind(self) -> Option<PresetKind> {
        match self {
            ListType::All => None,
            ListType::Configure => Some(PresetKind::Configure),
            ListType::Build => Some(PresetKind::Build),
            ListType::Test => Some(PresetKind::Test),
            ListType::Package => Some(PresetKind::Package),
            ListType::Workflow => Some(PresetKind::Workflow),
        }
    }
}

/// Preset types that reference a configure preset.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentKindArg {
    Build,
    Test,
    Package,
}

impl From<DependentKindArg> for PresetKind {
    fn from(kind: DependentKindArg) -> Self {
        match kind {
            DependentKindArg::Build => PresetKind::Build,
            DependentKindArg::Test => PresetKind::Test,
            DependentKindArg::Package => PresetKind::Package,
        }
    }
}
