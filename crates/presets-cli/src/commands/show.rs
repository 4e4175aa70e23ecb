//! Show command: one preset with its inheritance and properties

use std::collections::{BTreeMap, HashMap};

use colored::Colorize;
use presets_core::{Inherits, MacroDiagnostic, Preset, PresetKind, PresetSet, PropertyMap};
use serde_json::Value;

use super::{finish, kind_label, styled_label};
use crate::error::{CliError, Result};

/// How `show` presents a preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowOptions {
    /// Only look in presets of this kind
    pub kind: Option<PresetKind>,
    pub json: bool,
    /// Print the merged chain instead of the preset as written
    pub flatten: bool,
    /// Flatten, then expand macros
    pub resolve: bool,
}

/// Run the show command
pub fn run_show(presets: &PresetSet, name: &str, options: ShowOptions) -> Result<()> {
    print!("{}", render_show(presets, name, options)?);
    Ok(())
}

pub fn render_show(presets: &PresetSet, name: &str, options: ShowOptions) -> Result<String> {
    let found = match options.kind {
        Some(kind) => presets.preset_by_name(kind, name),
        None => presets.find_preset(name),
    };
    let Some(preset) = found else {
        let message = match options.kind {
            Some(kind) => format!("{} preset '{name}' not found", kind_label(kind)),
            None => format!("Preset '{name}' not found"),
        };
        return Err(CliError::user(message));
    };
    let kind = preset.kind();

    if options.resolve {
        let resolved = presets.resolve_macros(kind, name, &BTreeMap::new());
        if options.json {
            return to_json(&resolved.preset);
        }
        let mut lines = header(&preset, "resolved");
        push_properties(&resolved.preset, &HashMap::new(), &mut lines);
        if !resolved.diagnostics.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}", "Warnings:".yellow().bold()));
            for diagnostic in &resolved.diagnostics {
                lines.push(format!("  {} {}", "!".yellow(), describe(diagnostic)));
            }
        }
        return Ok(finish(lines));
    }

    if options.flatten {
        let flattened = presets.flatten_preset(kind, name);
        if options.json {
            return to_json(&flattened);
        }
        let mut lines = header(&preset, "flattened");
        push_properties(&flattened, &HashMap::new(), &mut lines);
        return Ok(finish(lines));
    }

    if options.json {
        return to_json(preset.fields());
    }

    let mut lines = header(&preset, "");
    if preset.has("inherits") {
        lines.push(format!("{}", "Inheritance:".bold()));
        push_inheritance_tree(presets, &preset, &mut lines);
        lines.push(String::new());
    }

    // Effective values, annotated with the ancestor that supplied them
    let flattened = presets.flatten_preset(kind, name);
    let mut chain = presets.inheritance_chain(kind, name);
    chain.push(preset.clone());
    let sources: HashMap<String, String> = flattened
        .keys()
        .filter_map(|key| {
            let owner = chain.iter().rev().find(|p| p.has(key))?.name()?;
            (owner != name).then(|| (key.clone(), owner.to_string()))
        })
        .collect();

    lines.push(format!("{}", "Properties:".bold()));
    push_properties(&flattened, &sources, &mut lines);
    Ok(finish(lines))
}

fn to_json(fields: &PropertyMap) -> Result<String> {
    let mut output = serde_json::to_string_pretty(fields)?;
    output.push('\n');
    Ok(output)
}

fn header(preset: &Preset, view: &str) -> Vec<String> {
    let mut title = format!(
        "{} {} ({})",
        "Preset:".bold(),
        styled_label(preset),
        preset.kind().as_str().cyan()
    );
    if !view.is_empty() {
        title.push_str(&format!(" {}", format!("[{view}]").dimmed()));
    }

    let mut lines = vec![title];
    if let Some(display) = preset.display_name() {
        lines.push(format!("  {}", display));
    }
    if let Some(description) = preset.description() {
        lines.push(format!("  {}", description.dimmed()));
    }
    lines.push(format!("  {} {}", "Defined in:".dimmed(), preset.origin()));
    lines.push(String::new());
    lines
}

fn describe(diagnostic: &MacroDiagnostic) -> String {
    match diagnostic {
        MacroDiagnostic::VendorMacro { value, names } => {
            format!("vendor macros left unexpanded ({}) in '{value}'", names.join(", "))
        }
        MacroDiagnostic::DepthExceeded { value } => {
            format!("macro expansion did not settle in '{value}'")
        }
    }
}

fn push_inheritance_tree(presets: &PresetSet, preset: &Preset, lines: &mut Vec<String>) {
    let name = preset.name().unwrap_or_default();
    lines.push(format!("{}", name.green().bold()));
    let mut path = vec![name.to_string()];
    push_parents(presets, preset, "", &mut path, lines);
}

fn push_parents(presets: &PresetSet, preset: &Preset, prefix: &str, path: &mut Vec<String>, lines: &mut Vec<String>) {
    let parents = match preset.inherits() {
        Inherits::Names(names) => names,
        Inherits::Absent => return,
        Inherits::Malformed(value) => {
            lines.push(format!("{prefix}└── {} {value}", "invalid inherits:".red()));
            return;
        }
    };

    for (i, parent) in parents.iter().enumerate() {
        let (branch, extend) = if i + 1 == parents.len() {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        if path.iter().any(|p| p == parent) {
            lines.push(format!("{prefix}{branch}{} {}", parent, "(cycle)".red()));
            continue;
        }
        match presets.preset_by_name(preset.kind(), parent) {
            Some(found) => {
                lines.push(format!("{prefix}{branch}{}", parent.cyan()));
                path.push(parent.to_string());
                push_parents(presets, &found, &format!("{prefix}{extend}"), path, lines);
                path.pop();
            }
            None => lines.push(format!("{prefix}{branch}{} {}", parent, "(not found)".red())),
        }
    }
}

fn push_properties(fields: &PropertyMap, sources: &HashMap<String, String>, lines: &mut Vec<String>) {
    if fields.is_empty() {
        lines.push(format!("  {}", "(none)".dimmed()));
        return;
    }
    for (key, value) in fields {
        let source = sources
            .get(key)
            .map(|owner| format!(" {}", format!("(from {owner})").dimmed()))
            .unwrap_or_default();
        match value {
            Value::Object(map) if !map.is_empty() => {
                lines.push(format!("  {}:{source}", key.bold()));
                push_nested(map, 2, lines);
            }
            _ => lines.push(format!("  {}: {}{source}", key.bold(), format_scalar(value))),
        }
    }
}

fn push_nested(map: &PropertyMap, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (key, value) in map {
        match value {
            Value::Object(inner) if !inner.is_empty() => {
                lines.push(format!("{indent}{key}:"));
                push_nested(inner, depth + 1, lines);
            }
            _ => lines.push(format!("{indent}{key}: {}", format_scalar(value))),
        }
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => format!("{}", "true".green()),
        Value::Bool(false) => format!("{}", "false".red()),
        Value::Null => format!("{}", "null".dimmed()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::project;

    #[test]
    fn test_show_plain_includes_tree_and_sources() {
        let project = project();
        let output = render_show(&project.presets, "dev", ShowOptions::default()).unwrap();

        assert!(output.contains("Preset: dev [D] (configure)"));
        assert!(output.contains("Defined in: CMakePresets.json"));
        assert!(output.contains("└── base"));
        assert!(output.contains("generator: Ninja (from base)"));
        assert!(output.contains("CMAKE_BUILD_TYPE: Debug"));
        assert!(output.contains("    CMAKE_EXPORT_COMPILE_COMMANDS: true"));
    }

    #[test]
    fn test_show_json_is_the_preset_as_written() {
        let project = project();
        let options = ShowOptions {
            json: true,
            ..Default::default()
        };
        let output = render_show(&project.presets, "dev", options).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["inherits"], "base");
        assert!(value.get("generator").is_none());
    }

    #[test]
    fn test_show_flatten_json_merges_chain() {
        let project = project();
        let options = ShowOptions {
            json: true,
            flatten: true,
            ..Default::default()
        };
        let output = render_show(&project.presets, "dev", options).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["generator"], "Ninja");
        assert_eq!(value["cacheVariables"]["CMAKE_EXPORT_COMPILE_COMMANDS"], true);
        assert!(value.get("inherits").is_none());
    }

    #[test]
    fn test_show_resolve_expands_macros_and_reports_vendor() {
        let project = project();
        let options = ShowOptions {
            resolve: true,
            ..Default::default()
        };
        let output = render_show(&project.presets, "release", options).unwrap();
        let source_dir = project.presets.root().source_dir().to_string();

        assert!(output.contains(&format!("binaryDir: {source_dir}/build/release")));
        assert!(output.contains("Warnings:"));
        assert!(output.contains("vendor macros left unexpanded (ide)"));
    }

    #[test]
    fn test_show_with_type_filter() {
        let project = project();
        let options = ShowOptions {
            kind: Some(PresetKind::Build),
            ..Default::default()
        };
        let output = render_show(&project.presets, "build-dev-verbose", options).unwrap();
        assert!(output.contains("configurePreset: dev (from build-dev)"));

        let err = render_show(&project.presets, "dev", options).unwrap_err();
        assert_eq!(err.to_string(), "Build preset 'dev' not found");
    }

    #[test]
    fn test_show_unknown_preset() {
        let project = project();
        let err = render_show(&project.presets, "ghost", ShowOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Preset 'ghost' not found");
    }
}
