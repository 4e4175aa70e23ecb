//! Related command: presets that use a configure preset

use colored::Colorize;
use presets_core::{PresetKind, PresetSet};

use super::{finish, kind_label, styled_label};
use crate::error::{CliError, Result};

/// Run the related command
pub fn run_related(presets: &PresetSet, configure: &str, kind: Option<PresetKind>) -> Result<()> {
    print!("{}", render_related(presets, configure, kind)?);
    Ok(())
}

pub fn render_related(presets: &PresetSet, configure: &str, kind: Option<PresetKind>) -> Result<String> {
    let Some(related) = presets.related_presets(configure, kind) else {
        return Err(CliError::user(format!("Configure preset '{configure}' not found")));
    };

    let mut lines = vec![format!(
        "{} {}",
        "Presets using configure preset".bold(),
        configure.green().bold()
    )];
    for (kind, dependents) in &related {
        lines.push(String::new());
        lines.push(format!("{}:", format!("{} Presets", kind_label(*kind)).cyan().bold()));
        if dependents.is_empty() {
            lines.push(format!("  {}", "(none)".dimmed()));
        }
        for preset in dependents {
            lines.push(format!("  • {}", styled_label(preset)));
        }
    }
    Ok(finish(lines))
}
