//! Side effects outside the buffer: opening files, announcing paths,
//! launching helper programs. All fire-and-forget.

use crate::error::{Error, Result};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// Kind tag attached to every opened path.
pub const OPEN_KIND: &str = "text";

/// The non-buffer collaborators the controller talks to.
pub trait Actions {
    /// Hand a file to whatever opens things of `kind`.
    fn open(&mut self, path: &Path, kind: &str) -> Result<()>;
    /// Make a full path visible to the user.
    fn announce(&mut self, path: &Path) -> Result<()>;
    /// Start `program` with `dir` as its working directory.
    fn launch(&mut self, program: &Path, dir: &Path) -> Result<()>;
}

/// Desktop opener, stderr announcements, detached child processes.
pub struct SystemActions<W: Write = io::Stderr> {
    announce_to: W,
}

impl SystemActions {
    pub fn new() -> Self {
        Self {
            announce_to: io::stderr(),
        }
    }
}

impl Default for SystemActions {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> SystemActions<W> {
    /// Announce paths to `writer` instead of stderr.
    pub fn with_writer(writer: W) -> Self {
        Self {
            announce_to: writer,
        }
    }

    pub fn into_writer(self) -> W {
        self.announce_to
    }
}

impl<W: Write> Actions for SystemActions<W> {
    fn open(&mut self, path: &Path, kind: &str) -> Result<()> {
        info!(path = %path.display(), kind, "opening");
        open::that_detached(path).map_err(|source| Error::Launch {
            program: path.to_path_buf(),
            source,
        })
    }

    fn announce(&mut self, path: &Path) -> Result<()> {
        writeln!(self.announce_to, "{}", path.display())
            .and_then(|()| self.announce_to.flush())
            .map_err(|source| Error::Announce {
                path: path.to_path_buf(),
                source,
            })
    }

    fn launch(&mut self, program: &Path, dir: &Path) -> Result<()> {
        info!(program = %program.display(), dir = %dir.display(), "launching");
        Command::new(program)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map(drop)
            .map_err(|source| Error::Launch {
                program: program.to_path_buf(),
                source,
            })
    }
}
