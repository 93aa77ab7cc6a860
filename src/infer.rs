//! Tree inference: recover a node's identity, path and fold state from text.
//!
//! There is no tree in memory. Each function here re-reads the lines it
//! needs from the buffer on every call, so out-of-band edits between
//! interactions are always seen.

use crate::buffer::{line_back, next_line, own_line, TextBuffer};
use crate::codec::{decode, depth_of, Kind, Line};
use crate::error::{BufferError, Error, Result};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A filesystem entry as currently rendered at some position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub depth: usize,
    pub name: String,
    pub path: PathBuf,
    pub kind: Kind,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        self.kind == Kind::Directory
    }
}

/// Decode the line containing `pos`.
pub fn node_line<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize) -> Result<Line> {
    let text = own_line(buf, pos)?;
    decode(&text).ok_or(Error::BlankLine(pos))
}

/// Whether the directory at `pos` has its children hidden.
///
/// Two reads: the node's own line and the one after it. The node is folded
/// unless the next line is strictly deeper.
pub fn is_folded<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize) -> Result<bool> {
    let depth = node_line(buf, pos)?.depth;
    let next = next_line(buf, pos)?;
    Ok(match depth_of(&next) {
        Some(next_depth) => next_depth <= depth,
        None => true,
    })
}

/// Path of the ancestors of the node at `pos`, relative to the root.
///
/// Scans upward one line at a time. Each line shallower than the depth
/// still being looked for is the next ancestor. Running off the top of the
/// buffer before reaching depth 0 means the text no longer describes a tree.
pub fn parents<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize, depth: usize) -> Result<PathBuf> {
    let mut names = Vec::new();
    let mut wanted = depth;
    let mut back = 1;
    while wanted > 0 {
        let text = match line_back(buf, pos, back) {
            Ok(text) => text,
            Err(BufferError::OutOfRange(_)) => {
                return Err(Error::Corrupt { pos, depth: wanted });
            }
            Err(e) => return Err(e.into()),
        };
        match decode(&text) {
            Some(line) if line.depth < wanted => {
                debug!(back, depth = line.depth, name = %line.name, "found ancestor");
                wanted = line.depth;
                names.push(line.name);
            }
            Some(_) => {}
            None => debug!(back, "skipping blank line during parent scan"),
        }
        back += 1;
    }
    Ok(names.into_iter().rev().collect())
}

/// Decode the node at `pos` and rebuild its absolute path under `root`.
pub fn full_path<B: TextBuffer + ?Sized>(
    buf: &mut B,
    root: &Path,
    pos: usize,
) -> Result<(Line, PathBuf)> {
    let line = node_line(buf, pos)?;
    let path = root.join(parents(buf, pos, line.depth)?).join(&line.name);
    Ok((line, path))
}

/// Resolve the node at `pos`, asking the filesystem what it is.
pub fn resolve<B, F>(buf: &mut B, fs: &F, root: &Path, pos: usize) -> Result<Node>
where
    B: TextBuffer + ?Sized,
    F: FileSystem + ?Sized,
{
    let (line, path) = full_path(buf, root, pos)?;
    let kind = fs.stat(&path).map_err(|source| Error::Stat {
        path: path.clone(),
        source,
    })?;
    Ok(Node {
        depth: line.depth,
        name: line.name,
        path,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MemBuffer;

    /// root/a/b/c fully expanded, with siblings around it.
    fn nested() -> MemBuffer {
        MemBuffer::with_body(concat!(
            "+ a\n",
            "+ \tb\n",
            "  \t\tx.txt\n",
            "  \t\ty.txt\n",
            "+ \t\tc\n",
            "  \tz.txt\n",
            "  top.txt\n",
            "\n",
            "\n",
            "\n",
        ))
    }

    #[test]
    fn node_line_decodes_own_line() {
        let mut buf = nested();
        let pos = buf.line_start(4).unwrap();
        assert_eq!(node_line(&mut buf, pos).unwrap(), Line::new(Kind::Directory, 2, "c"));
    }

    #[test]
    fn path_of_deep_node() {
        let mut buf = nested();
        let pos = buf.line_start(4).unwrap() + 3;
        let (_, path) = full_path(&mut buf, Path::new("/root"), pos).unwrap();
        assert_eq!(path, PathBuf::from("/root/a/b/c"));
    }

    #[test]
    fn path_skips_deeper_siblings_of_ancestors() {
        let mut buf = nested();
        let pos = buf.line_start(5).unwrap();
        let (_, path) = full_path(&mut buf, Path::new("/root"), pos).unwrap();
        assert_eq!(path, PathBuf::from("/root/a/z.txt"));
    }

    #[test]
    fn depth_zero_has_no_parents() {
        let mut buf = nested();
        let pos = buf.line_start(6).unwrap();
        assert_eq!(parents(&mut buf, pos, 0).unwrap(), PathBuf::new());
        let (_, path) = full_path(&mut buf, Path::new("/root"), pos).unwrap();
        assert_eq!(path, PathBuf::from("/root/top.txt"));
    }

    #[test]
    fn fold_state_from_next_line() {
        let mut buf = nested();
        let a = buf.line_start(0).unwrap();
        let b = buf.line_start(1).unwrap();
        let c = buf.line_start(4).unwrap();
        assert!(!is_folded(&mut buf, a).unwrap());
        assert!(!is_folded(&mut buf, b).unwrap());
        assert!(is_folded(&mut buf, c).unwrap());
    }

    #[test]
    fn node_before_blank_trailer_is_folded() {
        let mut buf = nested();
        let top = buf.line_start(6).unwrap();
        assert!(is_folded(&mut buf, top).unwrap());
    }

    #[test]
    fn blank_line_is_not_a_node() {
        let mut buf = nested();
        let blank = buf.line_start(8).unwrap();
        assert!(matches!(node_line(&mut buf, blank), Err(Error::BlankLine(p)) if p == blank));
    }

    #[test]
    fn missing_ancestor_is_corruption() {
        let mut buf = MemBuffer::with_body("  \t\torphan\n\n");
        let err = full_path(&mut buf, Path::new("/r"), 0).unwrap_err();
        assert!(matches!(err, Error::Corrupt { pos: 0, depth: 2 }));
    }

    #[test]
    fn blank_lines_inside_tree_are_skipped() {
        let mut buf = MemBuffer::with_body("+ a\n\n  \tf\n");
        let pos = buf.line_start(2).unwrap();
        let (_, path) = full_path(&mut buf, Path::new("/r"), pos).unwrap();
        assert_eq!(path, PathBuf::from("/r/a/f"));
    }

    #[test]
    fn edits_between_calls_are_seen() {
        let mut buf = nested();
        let pos = buf.line_start(4).unwrap();
        let (_, before) = full_path(&mut buf, Path::new("/r"), pos).unwrap();
        assert_eq!(before, PathBuf::from("/r/a/b/c"));

        // Rename "b" by hand; same position now resolves through the new name.
        let span = crate::buffer::Span::new(buf.line_start(1).unwrap(), buf.line_start(2).unwrap());
        buf.write(span, "+ \tbee\n").unwrap();
        let pos = buf.line_start(4).unwrap();
        let (_, after) = full_path(&mut buf, Path::new("/r"), pos).unwrap();
        assert_eq!(after, PathBuf::from("/r/a/bee/c"));
    }
}
