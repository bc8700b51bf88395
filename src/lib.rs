// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. git::GitError)
    clippy::module_name_repetitions
)]

//! # Boardedit
//!
//! A terminal editor for the data files behind a static leaderboard and
//! news slideshow site.
//!
//! Boardedit edits record lists that live inside TypeScript/TSX source
//! files:
//! - Contestants of a leaderboard, ranked by hours
//! - Slideshow entries, in display order
//! - Prize constants and the "last updated" date stamp
//! - Committing and pushing the site repository with git
//!
//! ## Architecture
//!
//! The editors use The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`block`]: Finding, parsing and rewriting the record block in a file
//! - [`records`]: The contestant and slide record types
//! - [`sidefiles`]: Prize constants and date stamp files
//! - [`git`]: Repository sync and restore
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`form`]: Form fields and input validation
//! - [`config`]: Settings file loading
//! - [`launch`]: Starting tools from the launcher

pub mod app;
pub mod block;
pub mod config;
pub mod error;
pub mod form;
pub mod git;
pub mod launch;
pub mod records;
pub mod sidefiles;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::block::{Block, BlockRecord, DataFile, RecordStore};
    pub use crate::error::{EditError, EditResult, ValidationError};
    pub use crate::records::{Contestant, PicType, Slide};
}
