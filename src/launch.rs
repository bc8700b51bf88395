//! Starting the individual tools as separate processes.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// The tools the launcher can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tool {
    Leaderboard,
    Slides,
    Restore,
}

impl Tool {
    pub const ALL: [Self; 3] = [Self::Leaderboard, Self::Slides, Self::Restore];

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Leaderboard => "Contestant Management",
            Self::Slides => "Event & News Update",
            Self::Restore => "Restore Repository",
        }
    }

    /// CLI subcommand that opens this tool.
    pub const fn subcommand(self) -> &'static str {
        match self {
            Self::Leaderboard => "leaderboard",
            Self::Slides => "slides",
            Self::Restore => "restore",
        }
    }
}

/// Command line that runs `tool` from the executable at `exe`.
pub fn tool_command(exe: &Path, tool: Tool, config: &Path) -> Command {
    let mut cmd = Command::new(exe);
    cmd.arg("--config").arg(config).arg(tool.subcommand());
    cmd
}

/// Run `tool` as a child of the current executable and wait for it.
///
/// # Errors
///
/// Returns an error if the current executable cannot be located or the
/// child cannot be started.
pub fn run_tool(tool: Tool, config: &Path) -> io::Result<ExitStatus> {
    let exe = std::env::current_exe()?;
    tracing::info!(tool = tool.subcommand(), exe = %exe.display(), "launching tool");
    tool_command(&exe, tool, config).status()
}
