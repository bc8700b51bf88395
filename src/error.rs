//! Error types shared by the editing operations.
//!
//! Validation problems are recoverable: the operator fixes the input and
//! tries again. Everything else aborts the triggering action.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::block::BlockError;
use crate::git::GitError;

/// Rejected operator input. The in-memory state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be a whole number, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },
    #[error("no record selected")]
    NoSelection,
    #[error("record {index} does not exist (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure of an editing action.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Block {
        path: PathBuf,
        #[source]
        source: BlockError,
    },
    #[error(transparent)]
    Git(#[from] GitError),
}

impl EditError {
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the operator can retry after correcting their input.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_recoverable() {
        let err = EditError::from(ValidationError::MissingField("Name"));
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_io_errors_are_not_recoverable() {
        let err = EditError::io(
            "read",
            Path::new("data.ts"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "failed to read data.ts: gone");
    }
}
