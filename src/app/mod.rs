//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod editor;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use editor::{EditorPane, FormRecord, PRICE_LABELS, RecordEditor, Submitted, prices_from_form};
pub use model::{Confirm, Focus, LeaderboardScreen, Model, Screen, ToastLevel};
pub use update::{Message, update};

use std::rc::Rc;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::git::{GitRunner, SystemGit};
use crate::launch::Tool;

/// Main application struct that owns the settings and runs the event loop.
pub struct App {
    settings: Settings,
    tool: Option<Tool>,
    git: Rc<dyn GitRunner>,
}

impl App {
    /// Create an application that opens the launcher menu.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tool: None,
            git: Rc::new(SystemGit),
        }
    }

    /// Open `tool` directly instead of the launcher.
    pub const fn with_tool(mut self, tool: Option<Tool>) -> Self {
        self.tool = tool;
        self
    }

    /// Replace the git backend.
    pub fn with_git_runner(mut self, git: Rc<dyn GitRunner>) -> Self {
        self.git = git;
        self
    }

    /// Build the starting state for the selected tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool's data file cannot be loaded or its
    /// settings are missing.
    pub fn initial_model(&self) -> Result<Model> {
        let settings = self.settings.clone();
        let model = match self.tool {
            None => Model::launcher(settings),
            Some(Tool::Leaderboard) => {
                let path = settings.leaderboard_file.display().to_string();
                Model::leaderboard(settings).with_context(|| format!("Failed to open {path}"))?
            }
            Some(Tool::Slides) => {
                let path = settings.slideshow_file()?.to_path_buf();
                Model::slides(settings, &path)
                    .with_context(|| format!("Failed to open {}", path.display()))?
            }
            Some(Tool::Restore) => {
                let restore = settings.restore()?.clone();
                Model::restore(settings, restore)
            }
        };
        Ok(model)
    }
}
