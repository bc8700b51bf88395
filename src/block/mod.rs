//! Structured array blocks embedded in source-like data files.
//!
//! A data file is treated as three parts:
//! - a prologue of pass-through lines (imports, comments, anything)
//! - one array block opened by a marker declaration and closed by `];`
//! - an epilogue of pass-through lines after the block
//!
//! [`scanner`] splits the text, a [`BlockRecord`] implementation extracts
//! fields from each `{ ... }` chunk, and [`Block::render`] writes the whole
//! file back out deterministically.

mod scanner;
mod store;

pub use scanner::{ScannedBlock, is_marker_line, scan};
pub use store::RecordStore;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::{EditError, EditResult};

/// Structural problems found while scanning a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("no `{marker}` declaration found")]
    MissingMarker { marker: &'static str },
    #[error("unexpected `}}` outside a record on line {line}")]
    StrayClosingBrace { line: usize },
    #[error("block opened on line {line} is never closed with `];`")]
    Unterminated { line: usize },
}

/// A record type stored in a block.
pub trait BlockRecord: Clone + std::fmt::Debug {
    /// Declaration that opens the block, without any `export` prefix.
    const MARKER: &'static str;

    /// Extract fields from one `{ ... }` chunk. Missing fields keep their
    /// default values.
    fn from_chunk(chunk: &str) -> Self;

    /// Append the serialized record, including its trailing newline.
    fn write_to(&self, out: &mut String);

    /// Canonical ordering. Records that compare equal keep their relative
    /// order.
    fn order(a: &Self, b: &Self) -> std::cmp::Ordering;

    /// Assign the position-derived fields from list order.
    fn reposition(records: &mut [Self]);

    /// Short label for list displays.
    fn label(&self) -> String;
}

/// Closing line written after the last record.
pub const CLOSE_LINE: &str = "];";

/// A parsed data file: pass-through text around an ordered record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<R> {
    prologue: Vec<String>,
    open_line: String,
    records: RecordStore<R>,
    epilogue: Vec<String>,
    /// `"\r\n"` when the source file used CRLF line endings.
    line_ending: &'static str,
}

impl<R: BlockRecord> Block<R> {
    /// Parse file text.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError`] if the block cannot be located or is malformed.
    pub fn parse(text: &str) -> Result<Self, BlockError> {
        let scanned = scan(text, R::MARKER)?;
        let records = scanned.chunks.iter().map(|c| R::from_chunk(c)).collect();
        Ok(Self {
            prologue: scanned.prologue,
            open_line: scanned.open_line,
            records: RecordStore::from_parsed(records),
            epilogue: scanned.epilogue,
            line_ending: if text.contains("\r\n") { "\r\n" } else { "\n" },
        })
    }

    /// A block with no surrounding text, using the canonical opening line.
    pub fn from_records(open_line: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            prologue: Vec::new(),
            open_line: open_line.into(),
            records: RecordStore::from_parsed(records),
            epilogue: Vec::new(),
            line_ending: "\n",
        }
    }

    /// Serialize the whole file, keeping the source's line endings.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.prologue {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.open_line);
        out.push('\n');
        for record in &self.records {
            record.write_to(&mut out);
        }
        out.push_str(CLOSE_LINE);
        out.push('\n');
        for line in &self.epilogue {
            out.push_str(line);
            out.push('\n');
        }
        if self.line_ending == "\n" {
            out
        } else {
            out.replace('\n', self.line_ending)
        }
    }

    pub fn prologue(&self) -> &[String] {
        &self.prologue
    }

    pub fn epilogue(&self) -> &[String] {
        &self.epilogue
    }

    pub fn open_line(&self) -> &str {
        &self.open_line
    }

    pub const fn records(&self) -> &RecordStore<R> {
        &self.records
    }

    pub const fn records_mut(&mut self) -> &mut RecordStore<R> {
        &mut self.records
    }
}

/// A block bound to the file it was loaded from.
#[derive(Debug, Clone)]
pub struct DataFile<R> {
    path: PathBuf,
    block: Block<R>,
    dirty: bool,
}

impl<R: BlockRecord> DataFile<R> {
    /// Read and parse `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Io`] if the file cannot be read and
    /// [`EditError::Block`] if its block is malformed.
    pub fn load(path: &Path) -> EditResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EditError::io("read", path, e))?;
        let block = Block::parse(&text).map_err(|source| EditError::Block {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            records = block.records().len(),
            "loaded data file"
        );
        Ok(Self {
            path: path.to_path_buf(),
            block,
            dirty: false,
        })
    }

    /// Overwrite the backing file with the current records.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Io`] if the file cannot be written.
    pub fn save(&mut self) -> EditResult<()> {
        let text = self.block.render();
        std::fs::write(&self.path, text).map_err(|e| EditError::io("write", &self.path, e))?;
        tracing::info!(
            path = %self.path.display(),
            records = self.block.records().len(),
            "saved data file"
        );
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn block(&self) -> &Block<R> {
        &self.block
    }

    pub const fn records(&self) -> &RecordStore<R> {
        self.block.records()
    }

    /// Mutable access to the records. Marks the file as having unsaved edits.
    pub const fn records_mut(&mut self) -> &mut RecordStore<R> {
        self.dirty = true;
        self.block.records_mut()
    }

    /// Whether there are edits not yet written to disk.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}
