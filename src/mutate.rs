//! Tree mutation: expand a directory into the buffer, or collapse it.

use crate::buffer::{append, insertion_after, lines_after, read_line, TextBuffer};
use crate::codec::{decode, encode};
use crate::error::{BufferError, Error, Result};
use crate::fs::FileSystem;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Names starting with this are hidden unless the session shows them.
pub const HIDDEN_PREFIX: char = '.';

/// Blank lines written after the root listing. Addresses one line past the
/// last entry (fold checks, collapse scans) must still resolve.
pub const ROOT_TRAILER: &str = "\n\n\n";

/// Render the children of `dir` as buffer lines at `depth`.
///
/// Entries are sorted by name. Hidden names are dropped unless
/// `show_hidden` is set. An entry that vanished between listing and stat is
/// skipped with a warning; any other stat failure aborts the listing.
pub fn render_listing<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    depth: usize,
    show_hidden: bool,
) -> Result<String> {
    let mut names = fs.list(dir).map_err(|source| Error::List {
        path: dir.to_path_buf(),
        source,
    })?;
    names.sort();

    let mut out = String::new();
    for name in names {
        if !show_hidden && name.starts_with(HIDDEN_PREFIX) {
            continue;
        }
        let path = dir.join(&name);
        match fs.stat(&path) {
            Ok(kind) => out.push_str(&encode(kind, depth, &name)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "skipping stale entry: {e}");
            }
            Err(source) => return Err(Error::Stat { path, source }),
        }
    }
    Ok(out)
}

/// The full root listing, blank trailer included.
pub fn root_listing<F: FileSystem + ?Sized>(fs: &F, root: &Path, show_hidden: bool) -> Result<String> {
    let mut text = render_listing(fs, root, 0, show_hidden)?;
    text.push_str(ROOT_TRAILER);
    Ok(text)
}

/// Write the listing of `root` at the end of the (normally empty) body.
pub fn render_root<B, F>(buf: &mut B, fs: &F, root: &Path, show_hidden: bool) -> Result<()>
where
    B: TextBuffer + ?Sized,
    F: FileSystem + ?Sized,
{
    let text = root_listing(fs, root, show_hidden)?;
    append(buf, &text)?;
    Ok(())
}

/// Insert the listing of `dir` right after the line containing `pos`.
///
/// `depth` is the depth of the directory's own line; children land one
/// level deeper. Returns the number of lines inserted.
pub fn expand<B, F>(
    buf: &mut B,
    fs: &F,
    pos: usize,
    dir: &Path,
    depth: usize,
    show_hidden: bool,
) -> Result<usize>
where
    B: TextBuffer + ?Sized,
    F: FileSystem + ?Sized,
{
    let text = render_listing(fs, dir, depth + 1, show_hidden)?;
    if !text.is_empty() {
        let at = insertion_after(buf, pos)?;
        buf.write(at, &text)?;
    }
    let count = text.lines().count();
    debug!(dir = %dir.display(), count, "expanded");
    Ok(count)
}

/// Number of contiguous lines after `pos` that are deeper than `depth`.
///
/// The scan stops at the first line that is not deeper, at a blank line,
/// or at the end of the body.
pub fn subtree_len<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize, depth: usize) -> Result<usize> {
    let mut count = 0;
    loop {
        let text = match read_line(buf, pos, count as isize + 1) {
            Ok(text) => text,
            Err(BufferError::OutOfRange(_)) => break,
            Err(e) => return Err(e.into()),
        };
        match decode(&text) {
            Some(line) if line.depth > depth => count += 1,
            _ => break,
        }
    }
    Ok(count)
}

/// Delete the rendered subtree of the directory at `pos`, keeping its own
/// line. Returns the number of lines removed.
pub fn collapse<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize, depth: usize) -> Result<usize> {
    let count = subtree_len(buf, pos, depth)?;
    if count > 0 {
        let span = lines_after(buf, pos, count)?;
        buf.write(span, "")?;
    }
    debug!(pos, count, "collapsed");
    Ok(count)
}
