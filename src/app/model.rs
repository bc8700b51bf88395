use std::time::{Duration, Instant};

use crate::config::{RestoreSettings, Settings};
use crate::error::EditResult;
use crate::form::Form;
use crate::launch::Tool;
use crate::records::{Contestant, Slide};
use crate::sidefiles;

use super::editor::{EditorPane, PRICE_LABELS, RecordEditor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane of an editor receives key input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Form,
    /// The prize constants form (leaderboard only).
    Prices,
}

/// Actions that ask for a second key press before they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Quit,
    Reload,
    Restore,
}

#[derive(Debug, Clone)]
pub struct LeaderboardScreen {
    pub editor: RecordEditor<Contestant>,
    pub prices: Form,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Launcher { selected: usize },
    Leaderboard(LeaderboardScreen),
    Slides(RecordEditor<Slide>),
    Restore(RestoreSettings),
}

impl Default for Screen {
    fn default() -> Self {
        Self::Launcher { selected: 0 }
    }
}

/// The complete application state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub settings: Settings,
    pub screen: Screen,
    pub focus: Focus,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Action waiting for its confirming key press
    pub(super) pending_confirm: Option<Confirm>,
    /// Tool the event loop should start next
    pub pending_launch: Option<Tool>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    pub fn launcher(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Open the leaderboard editor, pre-filling the price form from the
    /// constants file when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the leaderboard file cannot be loaded, or the
    /// constants file exists but cannot be read.
    pub fn leaderboard(settings: Settings) -> EditResult<Self> {
        let editor = RecordEditor::open(&settings.leaderboard_file)?;
        let mut prices = Form::new(PRICE_LABELS);
        if let Some(config) = sidefiles::read_constants(&settings.constants_file)? {
            prices.set_values(&[
                config.pool_price.to_string(),
                config.price_per_hour.to_string(),
                config.total_hours.to_string(),
            ]);
        }
        Ok(Self {
            settings,
            screen: Screen::Leaderboard(LeaderboardScreen { editor, prices }),
            ..Self::default()
        })
    }

    /// Open the slideshow editor on `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slideshow file cannot be loaded.
    pub fn slides(settings: Settings, path: &std::path::Path) -> EditResult<Self> {
        let editor = RecordEditor::open(path)?;
        Ok(Self {
            settings,
            screen: Screen::Slides(editor),
            ..Self::default()
        })
    }

    pub fn restore(settings: Settings, restore: RestoreSettings) -> Self {
        Self {
            settings,
            screen: Screen::Restore(restore),
            ..Self::default()
        }
    }

    /// The active record editor, if the screen has one.
    pub fn editor(&self) -> Option<&dyn EditorPane> {
        match &self.screen {
            Screen::Leaderboard(screen) => Some(&screen.editor),
            Screen::Slides(editor) => Some(editor),
            Screen::Launcher { .. } | Screen::Restore(_) => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut dyn EditorPane> {
        match &mut self.screen {
            Screen::Leaderboard(screen) => Some(&mut screen.editor),
            Screen::Slides(editor) => Some(editor),
            Screen::Launcher { .. } | Screen::Restore(_) => None,
        }
    }

    /// The form that receives typing under the current focus.
    pub fn focused_form_mut(&mut self) -> Option<&mut Form> {
        match self.focus {
            Focus::Prices => match &mut self.screen {
                Screen::Leaderboard(screen) => Some(&mut screen.prices),
                _ => None,
            },
            Focus::Form => self.editor_mut().map(|editor| editor.form_mut()),
            Focus::List => None,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.editor().is_some_and(|editor| editor.is_dirty())
    }

    /// Whether `action` was just armed and still needs its confirming press.
    pub fn is_awaiting(&self, action: Confirm) -> bool {
        self.pending_confirm == Some(action)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
