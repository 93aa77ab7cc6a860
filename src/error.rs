//! Error taxonomy for tree operations.
//!
//! Every variant aborts the current interaction only. The event loop logs
//! it and moves on to the next event.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the text buffer.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The address names a line before the first or after the last line.
    #[error("address out of range: {0}")]
    OutOfRange(String),
    /// A span does not fit the current body (it was edited underneath us).
    #[error("invalid span {start}..{end} (body has {len} chars)")]
    BadSpan { start: usize, end: usize, len: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure of a single tree operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing the buffer failed.
    #[error("buffer: {0}")]
    Buffer(#[from] BufferError),

    /// Stat failed for a reason other than the entry having vanished.
    #[error("{}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    /// The directory itself could not be listed.
    #[error("{}: cannot list directory: {source}", path.display())]
    List { path: PathBuf, source: io::Error },

    /// Scanning upward for a parent ran off the top of the buffer.
    #[error("corrupt tree: no line shallower than depth {depth} above position {pos}")]
    Corrupt { pos: usize, depth: usize },

    /// The interaction landed on a line that carries no entry.
    #[error("no entry on the line at position {0}")]
    BlankLine(usize),

    /// The path could not be written where the user sees it.
    #[error("{}: cannot announce: {source}", path.display())]
    Announce { path: PathBuf, source: io::Error },

    /// A helper program could not be started.
    #[error("{}: cannot launch: {source}", program.display())]
    Launch { program: PathBuf, source: io::Error },

    /// No program is configured for the requested tool.
    #[error("no program configured for {0}")]
    ToolUnavailable(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
