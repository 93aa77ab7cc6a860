//! Line codec: one buffer line <-> (kind, depth, name).
//!
//! A line is a two-character flag, `depth` indentation units, the entry
//! name, and a terminator:
//!
//! ```text
//! "+ \t\tsrc\n"   directory "src" at depth 2
//! "  README.md\n" plain entry "README.md" at depth 0
//! ```

/// Flag written in front of directories.
pub const DIR_FLAG: &str = "+ ";
/// Flag written in front of everything else. Same width as `DIR_FLAG`.
pub const PLAIN_FLAG: &str = "  ";
/// One level of indentation.
pub const INDENT: &str = "\t";
/// Line terminator.
pub const NEWLINE: char = '\n';

const FLAG_WIDTH: usize = 2;

/// What a line says about the entry it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Directory,
    Plain,
}

/// Decoded view of a single buffer line. Never stored beyond one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: Kind,
    pub depth: usize,
    pub name: String,
}

impl Line {
    pub fn new(kind: Kind, depth: usize, name: impl Into<String>) -> Self {
        Self {
            kind,
            depth,
            name: name.into(),
        }
    }

    pub fn encode(&self) -> String {
        encode(self.kind, self.depth, &self.name)
    }
}

/// Encode an entry as a full buffer line, terminator included.
pub fn encode(kind: Kind, depth: usize, name: &str) -> String {
    let flag = match kind {
        Kind::Directory => DIR_FLAG,
        Kind::Plain => PLAIN_FLAG,
    };
    let mut line = String::with_capacity(FLAG_WIDTH + depth * INDENT.len() + name.len() + 1);
    line.push_str(flag);
    for _ in 0..depth {
        line.push_str(INDENT);
    }
    line.push_str(name);
    line.push(NEWLINE);
    line
}

/// Decode raw line text (with or without its terminator).
///
/// Returns `None` for a line too short to carry a flag, such as the blank
/// lines trailing the root listing. Such a line has no meaningful depth.
pub fn decode(text: &str) -> Option<Line> {
    let text = text.strip_suffix(NEWLINE).unwrap_or(text);
    if text.chars().count() < FLAG_WIDTH {
        return None;
    }
    let (flag, rest) = text.split_at(flag_len(text));
    let kind = if flag == DIR_FLAG {
        Kind::Directory
    } else {
        Kind::Plain
    };
    let name = rest.trim_start_matches(INDENT);
    let depth = (rest.len() - name.len()) / INDENT.len();
    Some(Line::new(kind, depth, name))
}

/// Byte length of the first `FLAG_WIDTH` characters.
fn flag_len(text: &str) -> usize {
    text.char_indices()
        .nth(FLAG_WIDTH)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Depth of a line, or `None` when it is blank.
pub fn depth_of(text: &str) -> Option<usize> {
    decode(text).map(|line| line.depth)
}
