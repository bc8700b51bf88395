//! Boardedit - edit the leaderboard and slideshow data of a static site.
//!
//! # Usage
//!
//! ```bash
//! boardedit                       # launcher menu
//! boardedit launcher              # same
//! boardedit leaderboard           # contestant editor
//! boardedit slides                # slideshow editor
//! boardedit restore               # delete and re-clone the site checkout
//! boardedit sync                  # commit and push without the TUI
//! boardedit --config site.json stamp-date
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use boardedit::app::App;
use boardedit::config::{Settings, global_config_path, local_override_path, resolve_config_path};
use boardedit::git::{self, SystemGit};
use boardedit::launch::Tool;
use boardedit::sidefiles::{self, DATE_FORMAT};

/// Edit the leaderboard and slideshow data of a static site
#[derive(Parser, Debug)]
#[command(name = "boardedit", version, about, long_about = None)]
struct Cli {
    /// Settings file (default: ./boardedit.json, then the user config dir)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Menu of the editing tools (the default)
    Launcher,
    /// Edit contestants and prize constants
    Leaderboard,
    /// Edit slideshow entries
    Slides,
    /// Delete the site checkout and clone it again
    Restore,
    /// Commit and push the site repository
    Sync,
    /// Write today's date into the date stamp file
    StampDate,
}

impl Command {
    const fn tool(self) -> Option<Tool> {
        match self {
            Self::Leaderboard => Some(Tool::Leaderboard),
            Self::Slides => Some(Tool::Slides),
            Self::Restore => Some(Tool::Restore),
            Self::Launcher | Self::Sync | Self::StampDate => None,
        }
    }
}

/// `RUST_LOG` directives when set and valid, otherwise warnings only.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_ansi(log_file.is_none())
        .with_writer(writer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(
        cli.config.as_deref(),
        &local_override_path(),
        &global_config_path(),
    )?;
    let settings = Settings::load(&config_path)?;

    init_logging(cli.log_file.as_deref().or(settings.log_file.as_deref()))?;
    tracing::info!(config = %config_path.display(), command = ?cli.command, "starting");

    match cli.command {
        Some(Command::Sync) => {
            let report = git::sync(
                &SystemGit,
                &settings.git_repo_path,
                &settings.sync_options(),
            )
            .with_context(|| format!("Sync of {} failed", settings.git_repo_path.display()))?;
            println!("{}", report.summary());
        }
        Some(Command::StampDate) => {
            let today = sidefiles::today();
            sidefiles::write_date_stamp(&settings.date_file, today)?;
            println!(
                "{}: {}",
                settings.date_file.display(),
                today.format(DATE_FORMAT)
            );
        }
        command => {
            App::new(settings)
                .with_tool(command.and_then(Command::tool))
                .run()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_honors_rust_log_level() {
        assert_eq!(
            log_filter(Some("info")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
        assert_eq!(
            log_filter(Some("boardedit=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["boardedit", "--config", "site.json", "slides"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.json")));
        assert_eq!(cli.command.and_then(Command::tool), Some(Tool::Slides));

        let cli = Cli::try_parse_from(["boardedit"]).unwrap();
        assert!(cli.command.is_none());
    }
}
