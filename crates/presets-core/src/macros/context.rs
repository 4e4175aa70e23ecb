//! Values available to macro expansion

use std::collections::BTreeMap;

use presets_fs::NormalizedPath;

use super::scanner::MacroNamespace;

/// Lookup tables for one preset's resolution.
///
/// `values` backs `${name}`, `env` backs `$env{name}` and `penv` backs
/// `$penv{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroContext {
    values: BTreeMap<String, String>,
    env: BTreeMap<String, String>,
    penv: BTreeMap<String, String>,
}

impl MacroContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set `sourceDir` along with `sourceParentDir` and `sourceDirName`.
    pub fn with_source_dir(self, source_dir: &NormalizedPath) -> Self {
        let parent = source_dir
            .parent()
            .map(|parent| parent.as_str().to_string())
            .unwrap_or_default();
        let name = source_dir.file_name().unwrap_or_default().to_string();
        self.with_value("sourceDir", source_dir.as_str())
            .with_value("sourceParentDir", parent)
            .with_value("sourceDirName", name)
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_penv(mut self, penv: BTreeMap<String, String>) -> Self {
        self.penv = penv;
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn env(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    pub fn penv(&self, name: &str) -> Option<&str> {
        self.penv.get(name).map(String::as_str)
    }

    pub fn source_dir(&self) -> Option<&str> {
        self.value("sourceDir")
    }

    /// Value of a macro; vendor macros never resolve.
    pub fn lookup(&self, namespace: MacroNamespace, name: &str) -> Option<&str> {
        match namespace {
            MacroNamespace::Standard => self.value(name),
            MacroNamespace::Env => self.env(name),
            MacroNamespace::ParentEnv => self.penv(name),
            MacroNamespace::Vendor => None,
        }
    }
}

/// CMake's spelling of the host operating system.
pub fn host_system_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        "android" => "Android",
        "ios" => "iOS",
        other => other,
    }
}

/// Separator for path lists in environment variables.
pub fn path_list_separator() -> &'static str {
    if cfg!(windows) { ";" } else { ":" }
}
