//! Terminal UI components.
//!
//! Rendering is a pure function of the [`Model`](crate::app::Model):
//! - [`render`]: screen layout, record list and forms
//! - `status`: status bar and toast line
//! - `overlays`: help popup

mod overlays;
mod render;
mod status;

pub use render::{render, split_editor_columns};

pub const LIST_WIDTH_PERCENT: u16 = 45;
pub const FORM_WIDTH_PERCENT: u16 = 55;

#[cfg(test)]
mod tests;
