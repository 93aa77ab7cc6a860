//! Window hosting: a text buffer that can show itself.
//!
//! `StdioWindow` keeps the body in memory and prints a frame after every
//! event that changed it:
//!
//! ```text
//! --- buftree-/tmp/x
//!   f.txt
//! + sub
//!
//!
//!
//! ```

use crate::buffer::{Address, MemBuffer, Span, TextBuffer};
use crate::error::BufferError;
use std::io::{self, Write};

/// A text buffer attached to something the user looks at.
pub trait Window: TextBuffer {
    /// Bring the display up to date with the buffer.
    fn present(&mut self) -> io::Result<()>;
}

impl Window for MemBuffer {
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory window drawn as plain-text frames on a writer.
pub struct StdioWindow<W: Write> {
    buffer: MemBuffer,
    out: W,
    dirty: bool,
}

impl<W: Write> StdioWindow<W> {
    pub fn new(out: W) -> Self {
        Self {
            buffer: MemBuffer::new(),
            out,
            dirty: false,
        }
    }

    pub fn buffer(&self) -> &MemBuffer {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextBuffer for StdioWindow<W> {
    fn resolve(&mut self, addr: Address) -> Result<Span, BufferError> {
        self.buffer.resolve(addr)
    }

    fn read(&mut self, span: Span) -> Result<String, BufferError> {
        self.buffer.read(span)
    }

    fn write(&mut self, span: Span, text: &str) -> Result<(), BufferError> {
        self.buffer.write(span, text)?;
        self.dirty = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), BufferError> {
        self.buffer.set_title(title)?;
        self.dirty = true;
        Ok(())
    }

    fn set_tag(&mut self, tag: &str) -> Result<(), BufferError> {
        self.buffer.set_tag(tag)
    }

    fn clean(&mut self) -> Result<(), BufferError> {
        self.buffer.clean()
    }
}

impl<W: Write> Window for StdioWindow<W> {
    fn present(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        writeln!(self.out, "--- {}", self.buffer.title())?;
        self.out.write_all(self.buffer.body().as_bytes())?;
        self.out.flush()?;
        self.dirty = false;
        Ok(())
    }
}
