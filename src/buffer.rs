//! Buffer access: structural addresses over an external, line-oriented body.
//!
//! The text buffer is owned by someone else (an editor window, a test
//! fixture) and can change between any two calls. Nothing here caches line
//! positions: every helper resolves its address against the body as it is
//! right now.

use crate::error::BufferError;
use std::fmt;

/// Half-open range of character offsets into the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty span at `at`, used for insertion.
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

/// A structural address, relative to the line containing `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// The whole line `delta` lines away from the one containing `anchor`.
    Line { anchor: usize, delta: isize },
    /// From the start of line `first` through the end of line `last`.
    Lines {
        anchor: usize,
        first: isize,
        last: isize,
    },
    /// The entire body.
    All,
    /// The empty span at the end of the body.
    End,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Address::Line { anchor, delta } => write!(f, "#{anchor}{delta:+}"),
            Address::Lines {
                anchor,
                first,
                last,
            } => write!(f, "#{anchor}{first:+},#{anchor}{last:+}"),
            Address::All => f.write_str("0,$"),
            Address::End => f.write_str("$"),
        }
    }
}

/// The text-buffer collaborator.
pub trait TextBuffer {
    /// Resolve an address against the current body.
    fn resolve(&mut self, addr: Address) -> Result<Span, BufferError>;
    /// Read the text inside a span.
    fn read(&mut self, span: Span) -> Result<String, BufferError>;
    /// Replace a span with `text`. An empty span inserts; empty text deletes.
    fn write(&mut self, span: Span, text: &str) -> Result<(), BufferError>;
    fn set_title(&mut self, title: &str) -> Result<(), BufferError>;
    fn set_tag(&mut self, tag: &str) -> Result<(), BufferError>;
    /// Mark the body clean, discarding any pending expansion state.
    fn clean(&mut self) -> Result<(), BufferError>;
}

/// Read the line `delta` lines away from the one containing `anchor`.
pub fn read_line<B: TextBuffer + ?Sized>(
    buf: &mut B,
    anchor: usize,
    delta: isize,
) -> Result<String, BufferError> {
    let span = buf.resolve(Address::Line { anchor, delta })?;
    buf.read(span)
}

/// The line containing `pos`.
pub fn own_line<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize) -> Result<String, BufferError> {
    read_line(buf, pos, 0)
}

/// The line following the one containing `pos`.
pub fn next_line<B: TextBuffer + ?Sized>(buf: &mut B, pos: usize) -> Result<String, BufferError> {
    read_line(buf, pos, 1)
}

/// The line `back` lines above the one containing `pos`.
pub fn line_back<B: TextBuffer + ?Sized>(
    buf: &mut B,
    pos: usize,
    back: usize,
) -> Result<String, BufferError> {
    read_line(buf, pos, -(back as isize))
}

/// Empty span just past the terminator of the line containing `pos`.
pub fn insertion_after<B: TextBuffer + ?Sized>(
    buf: &mut B,
    pos: usize,
) -> Result<Span, BufferError> {
    let own = buf.resolve(Address::Line { anchor: pos, delta: 0 })?;
    Ok(Span::point(own.end))
}

/// The `count` lines following the one containing `pos`.
pub fn lines_after<B: TextBuffer + ?Sized>(
    buf: &mut B,
    pos: usize,
    count: usize,
) -> Result<Span, BufferError> {
    if count == 0 {
        return insertion_after(buf, pos);
    }
    buf.resolve(Address::Lines {
        anchor: pos,
        first: 1,
        last: count as isize,
    })
}

/// Append text at the end of the body.
pub fn append<B: TextBuffer + ?Sized>(buf: &mut B, text: &str) -> Result<(), BufferError> {
    let end = buf.resolve(Address::End)?;
    buf.write(end, text)
}

/// Delete the whole body.
pub fn clear<B: TextBuffer + ?Sized>(buf: &mut B) -> Result<(), BufferError> {
    let all = buf.resolve(Address::All)?;
    buf.write(all, "")
}

/// In-memory text buffer with character addressing.
#[derive(Debug, Default, Clone)]
pub struct MemBuffer {
    body: String,
    title: String,
    tag: String,
    modified: bool,
}

impl MemBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(body: &str) -> Self {
        Self {
            body: body.to_string(),
            ..Self::default()
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Character offset of the start of line `index` (0-based), if present.
    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.lines().get(index).map(|span| span.start)
    }

    /// Character spans of every line, terminators included.
    fn lines(&self) -> Vec<Span> {
        let mut lines = Vec::new();
        let mut start = 0;
        let mut len = 0;
        for (i, c) in self.body.chars().enumerate() {
            len = i + 1;
            if c == '\n' {
                lines.push(Span::new(start, i + 1));
                start = i + 1;
            }
        }
        if start < len {
            lines.push(Span::new(start, len));
        }
        lines
    }

    fn char_len(&self) -> usize {
        self.body.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.body
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.body.len())
    }

    fn line_index(&self, lines: &[Span], anchor: usize, addr: Address) -> Result<usize, BufferError> {
        if anchor > self.char_len() || lines.is_empty() {
            return Err(BufferError::OutOfRange(addr.to_string()));
        }
        Ok(lines
            .iter()
            .position(|span| anchor < span.end)
            .unwrap_or(lines.len() - 1))
    }

    fn relative(lines: &[Span], index: usize, delta: isize, addr: Address) -> Result<Span, BufferError> {
        index
            .checked_add_signed(delta)
            .and_then(|i| lines.get(i).copied())
            .ok_or_else(|| BufferError::OutOfRange(addr.to_string()))
    }

    fn check(&self, span: Span) -> Result<(), BufferError> {
        let len = self.char_len();
        if span.start > span.end || span.end > len {
            return Err(BufferError::BadSpan {
                start: span.start,
                end: span.end,
                len,
            });
        }
        Ok(())
    }
}

impl TextBuffer for MemBuffer {
    fn resolve(&mut self, addr: Address) -> Result<Span, BufferError> {
        match addr {
            Address::All => Ok(Span::new(0, self.char_len())),
            Address::End => Ok(Span::point(self.char_len())),
            Address::Line { anchor, delta } => {
                let lines = self.lines();
                let index = self.line_index(&lines, anchor, addr)?;
                Self::relative(&lines, index, delta, addr)
            }
            Address::Lines {
                anchor,
                first,
                last,
            } => {
                let lines = self.lines();
                let index = self.line_index(&lines, anchor, addr)?;
                let from = Self::relative(&lines, index, first, addr)?;
                let to = Self::relative(&lines, index, last, addr)?;
                if to.end < from.start {
                    return Err(BufferError::OutOfRange(addr.to_string()));
                }
                Ok(Span::new(from.start, to.end))
            }
        }
    }

    fn read(&mut self, span: Span) -> Result<String, BufferError> {
        self.check(span)?;
        Ok(self
            .body
            .chars()
            .skip(span.start)
            .take(span.end - span.start)
            .collect())
    }

    fn write(&mut self, span: Span, text: &str) -> Result<(), BufferError> {
        self.check(span)?;
        let start = self.byte_offset(span.start);
        let end = self.byte_offset(span.end);
        self.body.replace_range(start..end, text);
        self.modified = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), BufferError> {
        self.title = title.to_string();
        Ok(())
    }

    fn set_tag(&mut self, tag: &str) -> Result<(), BufferError> {
        self.tag = tag.to_string();
        Ok(())
    }

    fn clean(&mut self) -> Result<(), BufferError> {
        self.modified = false;
        Ok(())
    }
}
