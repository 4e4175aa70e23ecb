//! Macro expansion over strings and whole presets

use std::collections::BTreeMap;

use presets_fs::NormalizedPath;
use serde::Serialize;
use serde_json::Value;

use super::context::{MacroContext, host_system_name, path_list_separator};
use super::scanner::{Segment, has_pending_macros, scan, vendor_macros};
use crate::environment::EnvironmentSnapshot;
use crate::model::PropertyMap;

/// Extra passes allowed after the first before expansion gives up.
pub const MAX_RESOLUTION_DEPTH: usize = 10;

/// Something worth reporting about a resolved string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MacroDiagnostic {
    /// `$vendor{...}` tokens were left in place.
    VendorMacro { value: String, names: Vec<String> },
    /// Expansion kept changing the text past the depth ceiling.
    DepthExceeded { value: String },
}

/// A preset with its macros expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPreset {
    pub preset: PropertyMap,
    pub diagnostics: Vec<MacroDiagnostic>,
}

/// Expands macros for presets of one source tree.
#[derive(Debug, Clone)]
pub struct MacroResolver {
    source_dir: NormalizedPath,
    environment: EnvironmentSnapshot,
}

impl MacroResolver {
    pub fn new(source_dir: NormalizedPath, environment: EnvironmentSnapshot) -> Self {
        Self {
            source_dir,
            environment,
        }
    }

    pub fn source_dir(&self) -> &NormalizedPath {
        &self.source_dir
    }

    /// Context for resolving `preset`.
    ///
    /// `document_key` is the key of the document declaring the preset and
    /// sets `fileDir`; without one it falls back to the source directory.
    /// `overrides` win over both the preset's `environment` and the
    /// process environment in `$env{}`. An `environment` entry set to
    /// `null` removes the variable.
    pub fn build_context(
        &self,
        preset: &PropertyMap,
        document_key: Option<&str>,
        overrides: &BTreeMap<String, String>,
    ) -> MacroContext {
        let name = preset.get("name").and_then(Value::as_str).unwrap_or_default();

        let mut ctx = MacroContext::new()
            .with_source_dir(&self.source_dir)
            .with_value("presetName", name)
            .with_value("hostSystemName", host_system_name())
            .with_value("dollar", "$")
            .with_value("pathListSep", path_list_separator());

        if let Some(generator) = preset.get("generator") {
            ctx = ctx.with_value("generator", stringify(generator));
        }

        let file_dir = document_key
            .and_then(|key| self.source_dir.join(key).normalize().parent())
            .unwrap_or_else(|| self.source_dir.clone());
        ctx = ctx.with_value("fileDir", file_dir.as_str());

        let penv = self.environment.vars().clone();
        let mut env = penv.clone();
        if let Some(Value::Object(preset_env)) = preset.get("environment") {
            for (key, value) in preset_env {
                match value {
                    Value::Null => {
                        env.remove(key);
                    }
                    other => {
                        env.insert(key.clone(), stringify(other));
                    }
                }
            }
        }
        env.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        ctx.with_env(env).with_penv(penv)
    }

    /// Expand every macro in `value`, logging diagnostics.
    pub fn resolve_string(&self, value: &str, ctx: &MacroContext) -> String {
        let mut diagnostics = Vec::new();
        self.expand(value, ctx, &mut diagnostics)
    }

    /// Resolve every string in `preset`.
    ///
    /// `cacheVariables` go first: `CMAKE_HOST_SYSTEM_NAME` and
    /// `CMAKE_SOURCE_DIR` found there replace `hostSystemName` and
    /// `sourceDir` while the remaining fields are resolved.
    pub fn resolve_in_preset(
        &self,
        preset: &PropertyMap,
        document_key: Option<&str>,
        overrides: &BTreeMap<String, String>,
    ) -> ResolvedPreset {
        let mut resolved = preset.clone();
        let mut diagnostics = Vec::new();
        let mut ctx = self.build_context(preset, document_key, overrides);

        if let Some(cache) = resolved.get_mut("cacheVariables") {
            self.resolve_value(cache, &ctx, &mut diagnostics);
            ctx = apply_cache_overrides(ctx, cache);
        }

        for (key, value) in resolved.iter_mut() {
            if key != "cacheVariables" {
                self.resolve_value(value, &ctx, &mut diagnostics);
            }
        }

        ResolvedPreset {
            preset: resolved,
            diagnostics,
        }
    }

    fn resolve_value(&self, value: &mut Value, ctx: &MacroContext, diagnostics: &mut Vec<MacroDiagnostic>) {
        match value {
            Value::String(text) => *text = self.expand(text, ctx, diagnostics),
            Value::Array(items) => {
                for item in items {
                    self.resolve_value(item, ctx, diagnostics);
                }
            }
            Value::Object(fields) => {
                for (_, field) in fields.iter_mut() {
                    self.resolve_value(field, ctx, diagnostics);
                }
            }
            _ => {}
        }
    }

    fn expand(&self, value: &str, ctx: &MacroContext, diagnostics: &mut Vec<MacroDiagnostic>) -> String {
        let mut current = value.to_string();
        let mut vendor_reported = false;
        let mut depth = 0;

        loop {
            let next = substitute(&current, ctx);

            if !vendor_reported {
                let names = vendor_macros(&next);
                if !names.is_empty() {
                    tracing::warn!(
                        "String contains vendor macros which cannot be resolved: {:?}",
                        names
                    );
                    diagnostics.push(MacroDiagnostic::VendorMacro {
                        value: value.to_string(),
                        names: names.into_iter().map(str::to_string).collect(),
                    });
                    vendor_reported = true;
                }
            }

            if next == current || !has_pending_macros(&next) {
                return next;
            }

            depth += 1;
            if depth > MAX_RESOLUTION_DEPTH {
                tracing::warn!("Maximum macro resolution depth reached for: {}", value);
                diagnostics.push(MacroDiagnostic::DepthExceeded {
                    value: value.to_string(),
                });
                return next;
            }
            current = next;
        }
    }
}

/// One substitution pass followed by path cleanup.
fn substitute(input: &str, ctx: &MacroContext) -> String {
    let mut output = String::with_capacity(input.len());
    for segment in scan(input) {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Macro {
                namespace,
                name,
                raw,
            } => output.push_str(ctx.lookup(namespace, name).unwrap_or(raw)),
        }
    }

    let output = normalize_relative_segments(output, ctx);
    match output.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => output,
    }
}

/// Fold `..` in strings that look like paths.
///
/// Relative paths are anchored at the context's `sourceDir`.
fn normalize_relative_segments(text: String, ctx: &MacroContext) -> String {
    if !text.contains('/') || !text.contains("../") || text.starts_with('$') {
        return text;
    }
    let path = NormalizedPath::new(&text);
    let anchored = match ctx.source_dir() {
        Some(source_dir) if !path.is_absolute() => NormalizedPath::new(source_dir).join(&text),
        _ => path,
    };
    anchored.normalize().as_str().to_string()
}

/// Fold `CMAKE_HOST_SYSTEM_NAME` / `CMAKE_SOURCE_DIR` into the context.
fn apply_cache_overrides(mut ctx: MacroContext, cache: &Value) -> MacroContext {
    if let Some(host) = cache.get("CMAKE_HOST_SYSTEM_NAME").and_then(cache_value) {
        tracing::debug!("hostSystemName overridden by cacheVariables: {}", host);
        ctx = ctx.with_value("hostSystemName", host);
    }
    if let Some(source_dir) = cache.get("CMAKE_SOURCE_DIR").and_then(cache_value) {
        if !source_dir.is_empty() {
            tracing::debug!("sourceDir overridden by cacheVariables: {}", source_dir);
            ctx = ctx.with_source_dir(&NormalizedPath::new(source_dir));
        }
    }
    ctx
}

/// A cache variable as text, accepting the `{ "type", "value" }` form.
fn cache_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(true) => Some("TRUE".to_string()),
        Value::Bool(false) => Some("FALSE".to_string()),
        Value::Object(fields) => fields.get("value").and_then(cache_value),
        _ => None,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
