//! Griddle - a terminal table editor with typed in-place cell editors.
//!
//! # Usage
//!
//! ```bash
//! griddle prices.csv
//! griddle --watch prices.csv
//! griddle --read-only --theme light prices.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use griddle::app::App;
use griddle::config::{
    ConfigFlags, EditorChrome, ThemeMode, clear_config_flags, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use griddle::ui::style::Theme;

/// A terminal table editor with typed in-place cell editors
#[derive(Parser, Debug)]
#[command(name = "griddle", version, about, long_about = None)]
struct Cli {
    /// Table file to open (CSV; an optional <stem>.griddle.json
    /// sidecar selects per-column editors)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Watch the file for external changes
    #[arg(short, long)]
    watch: bool,

    /// Open without editing
    #[arg(long)]
    read_only: bool,

    /// Color theme
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Inline-editor inset in columns (defaults to the cell padding)
    #[arg(long, value_name = "N")]
    inset: Option<u16>,

    /// Write debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in .griddlerc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .griddlerc
    #[arg(long)]
    clear: bool,
}

fn init_tracing(debug_log: Option<&PathBuf>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    if let Some(path) = debug_log {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create debug log {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("griddle=trace")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(effective.debug_log.as_ref())?;

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let theme = Theme::for_mode(effective.theme.unwrap_or(ThemeMode::Auto));
    let chrome = EditorChrome::resolve(&effective);

    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_read_only(effective.read_only)
        .with_theme(theme)
        .with_chrome(chrome)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
