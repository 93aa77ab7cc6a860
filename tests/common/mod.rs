#![allow(dead_code)]

use buftree::actions::Actions;
use buftree::buffer::MemBuffer;
use buftree::error::Result;
use buftree::fs::LocalFs;
use buftree::session::{Controller, Session, Tools};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Actions double that remembers every request.
#[derive(Debug, Default)]
pub struct Recorder {
    pub opened: Vec<(PathBuf, String)>,
    pub announced: Vec<PathBuf>,
    pub launched: Vec<(PathBuf, PathBuf)>,
}

impl Actions for Recorder {
    fn open(&mut self, path: &Path, kind: &str) -> Result<()> {
        self.opened.push((path.to_path_buf(), kind.to_string()));
        Ok(())
    }

    fn announce(&mut self, path: &Path) -> Result<()> {
        self.announced.push(path.to_path_buf());
        Ok(())
    }

    fn launch(&mut self, program: &Path, dir: &Path) -> Result<()> {
        self.launched.push((program.to_path_buf(), dir.to_path_buf()));
        Ok(())
    }
}

pub type TestController = Controller<MemBuffer, LocalFs, Recorder>;

/// Controller over an in-memory buffer, already showing `root`.
pub fn started(root: &Path, tools: Tools) -> TestController {
    let mut controller = Controller::new(
        Session::new(root, false),
        MemBuffer::new(),
        LocalFs,
        Recorder::default(),
        tools,
    );
    controller.start().unwrap();
    controller
}

/// Character offset of the first line whose entry name is `name`.
pub fn pos_of(controller: &TestController, name: &str) -> usize {
    let body = controller.buffer().body();
    let index = body
        .lines()
        .position(|line| line.trim_start_matches(['+', ' ', '\t']) == name)
        .unwrap_or_else(|| panic!("{name} not in buffer:\n{body}"));
    controller.buffer().line_start(index).unwrap()
}

/// Body lines without the blank trailer.
pub fn entries(controller: &TestController) -> Vec<String> {
    controller
        .buffer()
        .body()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
