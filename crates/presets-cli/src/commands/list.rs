//! List command: flat per-type listing or the grouped configure view

use colored::Colorize;
use presets_core::{Preset, PresetKind, PresetSet};

use super::{finish, kind_label, plain_label, styled_label};
use crate::error::Result;

/// Run the list command
///
/// A type filter or `--flat` selects the per-type listing; otherwise
/// configure presets are grouped with their build and test presets.
pub fn run_list(presets: &PresetSet, kind: Option<PresetKind>, show_hidden: bool, flat: bool) -> Result<()> {
    let output = if flat || kind.is_some() {
        render_flat(presets, kind, show_hidden)
    } else {
        render_grouped(presets, show_hidden)
    };
    print!("{output}");
    Ok(())
}

pub fn render_flat(presets: &PresetSet, kind: Option<PresetKind>, show_hidden: bool) -> String {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => PresetKind::ALL.to_vec(),
    };

    let mut lines = vec![format!("{}", "CMake Presets".bold())];
    let mut found = false;
    for kind in kinds {
        let visible: Vec<Preset> = presets
            .presets_of_type(kind)
            .into_iter()
            .filter(|p| show_hidden || !p.hidden())
            .collect();
        if visible.is_empty() {
            continue;
        }
        found = true;

        lines.push(String::new());
        lines.push(format!("{}:", format!("{} Presets", kind_label(kind)).cyan().bold()));
        for preset in &visible {
            let mut line = format!("  • {}", styled_label(preset));
            if let Some(display) = preset.display_name() {
                line.push_str(&format!(" {}", format!("({display})").dimmed()));
            }
            lines.push(line);
            if let Some(description) = preset.description() {
                lines.push(format!("      {}", description.dimmed()));
            }
        }
    }

    if !found {
        lines.push(String::new());
        lines.push(format!("{}", "No presets found matching your criteria".yellow()));
    }
    finish(lines)
}

/// One table cell; padding is computed on the plain text.
struct Cell {
    text: String,
    dim: bool,
}

impl Cell {
    fn blank() -> Self {
        Self {
            text: String::new(),
            dim: false,
        }
    }

    fn of(preset: &Preset) -> Self {
        Self {
            text: plain_label(preset),
            dim: preset.hidden(),
        }
    }

    fn render(&self, width: usize) -> String {
        let padded = format!("{:<width$}", self.text);
        if self.dim {
            format!("{}", padded.dimmed())
        } else {
            padded
        }
    }
}

type Row = [Cell; 3];

pub fn render_grouped(presets: &PresetSet, show_hidden: bool) -> String {
    let tree = presets.preset_tree();
    let visible = |p: &&Preset| show_hidden || !p.hidden();

    let mut groups: Vec<Vec<Row>> = Vec::new();
    for node in tree.values() {
        if !visible(&&node.preset) {
            continue;
        }
        let builds: Vec<&Preset> = node.dependents.build.iter().filter(visible).collect();
        let tests: Vec<&Preset> = node.dependents.test.iter().filter(visible).collect();

        let mut configure = Cell::of(&node.preset);
        if builds.len() > 1 || tests.len() > 1 {
            configure
                .text
                .push_str(&format!(" ({} builds, {} tests)", builds.len(), tests.len()));
        }

        let height = builds.len().max(tests.len()).max(1);
        let mut rows = Vec::with_capacity(height);
        let mut first = Some(configure);
        for i in 0..height {
            rows.push([
                first.take().unwrap_or_else(Cell::blank),
                builds.get(i).map_or_else(Cell::blank, |p| Cell::of(p)),
                tests.get(i).map_or_else(Cell::blank, |p| Cell::of(p)),
            ]);
        }
        groups.push(rows);
    }

    if groups.is_empty() {
        return finish(vec![format!("{}", "No configure presets found".yellow())]);
    }

    let headers = ["Configure", "Build", "Test"];
    let mut widths = headers.map(str::len);
    for row in groups.iter().flatten() {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    let rule: String = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("──");
    let header = format!(
        "{:<w0$}  {:<w1$}  {}",
        headers[0],
        headers[1],
        headers[2],
        w0 = widths[0],
        w1 = widths[1]
    );

    let mut lines = vec![
        format!("{}", "CMake Presets".bold()),
        String::new(),
        format!("{}", header.bold()),
        rule.clone(),
    ];
    for (index, rows) in groups.iter().enumerate() {
        if index > 0 {
            lines.push(format!("{}", rule.dimmed()));
        }
        for row in rows {
            let line = format!(
                "{}  {}  {}",
                row[0].render(widths[0]),
                row[1].render(widths[1]),
                row[2].render(0)
            );
            lines.push(line.trim_end().to_string());
        }
    }
    lines.push(String::new());
    lines.push(format!("{}", "[D] = default preset".dimmed()));
    finish(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::project;

    #[test]
    fn test_flat_listing_hides_hidden_presets() {
        let project = project();
        let output = render_flat(&project.presets, None, false);
        assert!(output.contains("Configure Presets:"));
        assert!(output.contains("• dev [D]"));
        assert!(output.contains("Developer build"));
        assert!(!output.contains("base"));
        assert!(output.contains("Package Presets:"));
        assert!(!output.contains("Workflow Presets:"));
    }

    #[test]
    fn test_flat_listing_with_hidden() {
        let project = project();
        let output = render_flat(&project.presets, Some(PresetKind::Configure), true);
        assert!(output.contains("• base (hidden)"));
        assert!(!output.contains("Build Presets:"));
    }

    #[test]
    fn test_flat_listing_without_matches() {
        let project = project();
        let output = render_flat(&project.presets, Some(PresetKind::Workflow), false);
        assert!(output.contains("No presets found matching your criteria"));
    }

    #[test]
    fn test_grouped_view_pairs_builds_and_tests() {
        let project = project();
        let output = render_grouped(&project.presets, false);
        let lines: Vec<&str> = output.lines().collect();

        let dev_row = lines.iter().find(|l| l.starts_with("dev [D]")).unwrap();
        assert!(dev_row.contains("build-dev"));
        assert!(dev_row.contains("test-dev"));
        assert!(dev_row.contains("(2 builds, 1 tests)"));
        assert!(lines.iter().any(|l| l.trim() == "build-dev-verbose"));

        let release_row = lines.iter().find(|l| l.starts_with("release")).unwrap();
        assert!(release_row.contains("build-release"));
        assert!(!output.contains("base"));
    }

    #[test]
    fn test_grouped_view_shows_hidden_on_request() {
        let project = project();
        let output = render_grouped(&project.presets, true);
        assert!(output.lines().any(|l| l.starts_with("base")));
    }
}
