//! Filesystem collaborator: one-level listings and stat.

use crate::codec::Kind;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// What the tree needs from the filesystem.
pub trait FileSystem {
    /// Names of the direct children of `dir`, in no particular order.
    fn list(&self, dir: &Path) -> io::Result<Vec<String>>;
    /// Classify `path`, following symlinks. A vanished entry reports
    /// `io::ErrorKind::NotFound`.
    fn stat(&self, path: &Path) -> io::Result<Kind>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }

    fn stat(&self, path: &Path) -> io::Result<Kind> {
        let meta = std::fs::metadata(path)?;
        Ok(if meta.is_dir() {
            Kind::Directory
        } else {
            Kind::Plain
        })
    }
}
