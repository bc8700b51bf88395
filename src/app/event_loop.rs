use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::launch::{self, Tool};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be loaded, the terminal
    /// cannot be initialized, or the event loop hits an I/O failure.
    pub fn run(&self) -> Result<()> {
        let mut model = self.initial_model()?;
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: boardedit requires an interactive terminal")?;

        let result = self.event_loop(&mut terminal, &mut model);

        ratatui::restore();
        result
    }

    /// Apply one message: pure update, then its side effects.
    pub(super) fn dispatch(&self, model: &mut Model, msg: Message) {
        tracing::debug!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model, &side_msg);
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    self.dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        self.dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if let Some(tool) = model.pending_launch.take() {
                Self::launch(terminal, model, tool)?;
                needs_render = true;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Hand the terminal to a child tool and take it back when it exits.
    fn launch(terminal: &mut DefaultTerminal, model: &mut Model, tool: Tool) -> Result<()> {
        ratatui::restore();
        let status = launch::run_tool(tool, &model.settings.source);
        *terminal = ratatui::try_init().context("Failed to re-initialize terminal")?;
        terminal.clear()?;

        match status {
            Ok(status) if status.success() => {
                model.show_toast(ToastLevel::Info, format!("{} closed", tool.label()));
            }
            Ok(status) => {
                tracing::warn!(tool = tool.subcommand(), %status, "tool exited with failure");
                model.show_toast(
                    ToastLevel::Warning,
                    format!("{} exited with {status}", tool.label()),
                );
            }
            Err(err) => {
                tracing::warn!(tool = tool.subcommand(), %err, "failed to start tool");
                model.show_toast(
                    ToastLevel::Error,
                    format!("Could not start {}: {err}", tool.label()),
                );
            }
        }
        Ok(())
    }
}
