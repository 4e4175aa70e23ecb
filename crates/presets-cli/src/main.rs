//! cmakepresets CLI
//!
//! Command-line interface for listing, inspecting and resolving CMake presets.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use presets_core::{PresetSet, PresetSetBuilder};
use presets_schema::{JsonSchemaChecker, NoSchemaCheck};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::filter::LevelFilter;

use cli::{Cli, Commands};
use commands::ShowOptions;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command.clone() else {
        println!("{} CMake presets inspector", "cmakepresets".green().bold());
        println!();
        println!("Run {} for available commands.", "cmakepresets --help".cyan());
        return Ok(());
    };

    let presets = load_presets(&cli)?;
    execute_command(&presets, command)
}

/// Map `-v` occurrences to a default level; `RUST_LOG` wins when set.
fn verbosity_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_filter(verbose).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 3)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} logging was already initialised", "warning:".yellow().bold());
    }
}

fn load_presets(cli: &Cli) -> Result<PresetSet> {
    let path = cli
        .file
        .as_deref()
        .or(cli.directory.as_deref())
        .ok_or_else(|| CliError::user("one of --file or --directory is required"))?;

    let mut builder: PresetSetBuilder = PresetSet::builder().user_presets(!cli.no_user_presets);
    if cli.no_schema {
        builder = builder.schema_checker(NoSchemaCheck);
    } else if let Some(cache) = &cli.schema_cache {
        builder = builder.schema_checker(JsonSchemaChecker::new(cache.clone()));
    }

    tracing::debug!(path = %path.display(), "Loading presets");
    Ok(builder.load(path)?)
}

fn execute_command(presets: &PresetSet, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            kind,
            show_hidden,
            flat,
        } => commands::run_list(presets, kind.kind(), show_hidden, flat),
        Commands::Show {
            preset_name,
            kind,
            json,
            flatten,
            resolve,
        } => commands::run_show(
            presets,
            &preset_name,
            ShowOptions {
                kind: kind.map(Into::into),
                json,
                flatten,
                resolve,
            },
        ),
        Commands::Related {
            configure_preset,
            kind,
        } => commands::run_related(presets, &configure_preset, kind.map(Into::into)),
    }
}
