//! Command implementations for presets-cli
//!
//! Each command renders into a `String` first so the output can be
//! asserted on without capturing stdout.

pub mod list;
pub mod related;
pub mod show;

pub use list::run_list;
pub use related::run_related;
pub use show::{ShowOptions, run_show};

use colored::Colorize;
use presets_core::{Preset, PresetKind};
use serde_json::Value;

/// `configure` -> `Configure`
pub(crate) fn kind_label(kind: PresetKind) -> String {
    let name = kind.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn is_default(preset: &Preset) -> bool {
    preset.get("default").and_then(Value::as_bool).unwrap_or(false)
}

/// Name with its `[D]` marker, uncolored.
pub(crate) fn plain_label(preset: &Preset) -> String {
    let name = preset.name().unwrap_or("<unnamed>");
    if is_default(preset) {
        format!("{name} [D]")
    } else {
        name.to_string()
    }
}

/// Name colored by visibility, with default and hidden markers.
pub(crate) fn styled_label(preset: &Preset) -> String {
    let name = preset.name().unwrap_or("<unnamed>");
    let mut label = if preset.hidden() {
        format!("{}", name.dimmed())
    } else {
        format!("{}", name.green())
    };
    if is_default(preset) {
        label.push_str(&format!(" {}", "[D]".yellow()));
    }
    if preset.hidden() {
        label.push_str(&format!(" {}", "(hidden)".dimmed()));
    }
    label
}

pub(crate) fn finish(lines: Vec<String>) -> String {
    let mut output = lines.join("\n");
    output.push('\n');
    output
}
