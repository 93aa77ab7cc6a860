//! Session state and the controller that reacts to window events.

use crate::actions::{Actions, OPEN_KIND};
use crate::buffer::{append, clear, TextBuffer};
use crate::error::{Error, Result};
use crate::event::{Event, EventClass, Tool};
use crate::fs::FileSystem;
use crate::infer::{full_path, is_folded, resolve};
use crate::mutate::{collapse, expand, render_root, root_listing};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Commands offered in the window tag.
pub const TAG: &str = "DotDot Win Xplor Hidden";

/// Prefix of the window title.
pub const TITLE_PREFIX: &str = "buftree-";

/// Everything that survives between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Absolute directory whose children are rendered at depth 0.
    pub root: PathBuf,
    /// Whether future listings include dotfiles.
    pub show_hidden: bool,
}

impl Session {
    pub fn new(root: impl Into<PathBuf>, show_hidden: bool) -> Self {
        Self {
            root: root.into(),
            show_hidden,
        }
    }

    /// Window title for the current root.
    pub fn title(&self) -> String {
        sanitize_title(&format!("{TITLE_PREFIX}{}", self.root.display()))
    }

    /// Move the root one level up. The root of the filesystem stays put.
    pub fn ascend(&mut self) {
        if let Some(parent) = self.root.parent() {
            self.root = parent.to_path_buf();
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
    }
}

/// Remove control characters that would garble the window title.
fn sanitize_title(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect()
}

/// Programs started by `Event::Launch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tools {
    pub terminal: Option<PathBuf>,
    pub browser: Option<PathBuf>,
}

impl Tools {
    pub fn program(&self, tool: Tool) -> Option<&Path> {
        match tool {
            Tool::Terminal => self.terminal.as_deref(),
            Tool::Browser => self.browser.as_deref(),
        }
    }
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reacts to one event at a time, re-reading the buffer for each.
pub struct Controller<B, F, A> {
    session: Session,
    buffer: B,
    fs: F,
    actions: A,
    tools: Tools,
}

impl<B, F, A> Controller<B, F, A>
where
    B: TextBuffer,
    F: FileSystem,
    A: Actions,
{
    pub fn new(session: Session, buffer: B, fs: F, actions: A, tools: Tools) -> Self {
        Self {
            session,
            buffer,
            fs,
            actions,
            tools,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Set up the window and render the root listing.
    pub fn start(&mut self) -> Result<()> {
        self.buffer.set_title(&self.session.title())?;
        self.buffer.set_tag(TAG)?;
        render_root(
            &mut self.buffer,
            &self.fs,
            &self.session.root,
            self.session.show_hidden,
        )
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: Event) -> Result<Flow> {
        debug!(?event, "handling");
        match event {
            Event::NavigateUp => self.navigate_up()?,
            Event::ToggleHidden => {
                self.session.toggle_hidden();
                info!(show_hidden = self.session.show_hidden, "toggled hidden files");
            }
            Event::Activate(pos) => {
                self.buffer.clean()?;
                self.activate(pos)?;
            }
            Event::Inspect(pos) => {
                let (_, path) = full_path(&mut self.buffer, &self.session.root, pos)?;
                self.actions.announce(&path)?;
            }
            Event::Launch { tool, at } => self.launch(tool, at)?,
            Event::Close => return Ok(Flow::Quit),
            Event::Passthrough(raw) => {
                if raw.class == EventClass::BodyClick {
                    self.buffer.clean()?;
                }
                debug!(?raw, "left to the host");
            }
        }
        Ok(Flow::Continue)
    }

    /// The parent is listed before anything is touched, so a failed listing
    /// leaves the root, title and body as they were.
    fn navigate_up(&mut self) -> Result<()> {
        let mut parent = self.session.clone();
        parent.ascend();
        let listing = root_listing(&self.fs, &parent.root, parent.show_hidden)?;

        clear(&mut self.buffer)?;
        self.session = parent;
        info!(root = %self.session.root.display(), "new root");
        self.buffer.set_title(&self.session.title())?;
        self.buffer.set_tag(TAG)?;
        append(&mut self.buffer, &listing)?;
        Ok(())
    }

    fn activate(&mut self, pos: usize) -> Result<()> {
        let node = resolve(&mut self.buffer, &self.fs, &self.session.root, pos)?;
        if !node.is_dir() {
            return self.actions.open(&node.path, OPEN_KIND);
        }
        if is_folded(&mut self.buffer, pos)? {
            expand(
                &mut self.buffer,
                &self.fs,
                pos,
                &node.path,
                node.depth,
                self.session.show_hidden,
            )?;
        } else {
            collapse(&mut self.buffer, pos, node.depth)?;
        }
        Ok(())
    }

    fn launch(&mut self, tool: Tool, at: Option<usize>) -> Result<()> {
        let program = self
            .tools
            .program(tool)
            .ok_or(Error::ToolUnavailable(tool.name()))?
            .to_path_buf();
        let dir = match at {
            None => self.session.root.clone(),
            Some(pos) => match resolve(&mut self.buffer, &self.fs, &self.session.root, pos) {
                Ok(node) if node.is_dir() => node.path,
                Ok(node) => node
                    .path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.session.root.clone()),
                Err(Error::BlankLine(_)) => self.session.root.clone(),
                Err(e) => return Err(e),
            },
        };
        self.actions.launch(&program, &dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MemBuffer;
    use crate::codec::Kind;
    use std::io;

    #[test]
    fn title_names_the_root() {
        let session = Session::new("/home/user/src", false);
        assert_eq!(session.title(), "buftree-/home/user/src");
    }

    #[test]
    fn title_drops_control_characters() {
        let session = Session::new("/tmp/we\x07ird\nname", false);
        assert_eq!(session.title(), "buftree-/tmp/weirdname");
    }

    #[test]
    fn ascend_stops_at_filesystem_root() {
        let mut session = Session::new("/tmp/x", false);
        session.ascend();
        assert_eq!(session.root, PathBuf::from("/tmp"));
        session.ascend();
        assert_eq!(session.root, PathBuf::from("/"));
        session.ascend();
        assert_eq!(session.root, PathBuf::from("/"));
    }

    #[test]
    fn toggle_hidden_flips() {
        let mut session = Session::new("/", false);
        session.toggle_hidden();
        assert!(session.show_hidden);
        session.toggle_hidden();
        assert!(!session.show_hidden);
    }

    #[test]
    fn tools_by_kind() {
        let tools = Tools {
            terminal: Some(PathBuf::from("/opt/plan9/bin/win")),
            browser: None,
        };
        assert_eq!(
            tools.program(Tool::Terminal),
            Some(Path::new("/opt/plan9/bin/win"))
        );
        assert_eq!(tools.program(Tool::Browser), None);
    }

    /// `/r/sub` holds one file; `/r` cannot be listed.
    struct LockedParent;

    impl FileSystem for LockedParent {
        fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
            if dir == Path::new("/r/sub") {
                Ok(vec!["inner.txt".to_string()])
            } else {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            }
        }

        fn stat(&self, _: &Path) -> io::Result<Kind> {
            Ok(Kind::Plain)
        }
    }

    struct Inert;

    impl Actions for Inert {
        fn open(&mut self, _: &Path, _: &str) -> Result<()> {
            Ok(())
        }

        fn announce(&mut self, _: &Path) -> Result<()> {
            Ok(())
        }

        fn launch(&mut self, _: &Path, _: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_navigate_up_keeps_the_window() {
        let mut c = Controller::new(
            Session::new("/r/sub", false),
            MemBuffer::new(),
            LockedParent,
            Inert,
            Tools::default(),
        );
        c.start().unwrap();
        let body = c.buffer().body().to_string();

        let err = c.handle(Event::NavigateUp).unwrap_err();
        assert!(matches!(err, Error::List { ref path, .. } if path == Path::new("/r")));
        assert_eq!(c.session().root, PathBuf::from("/r/sub"));
        assert_eq!(c.buffer().body(), body);
        assert_eq!(c.buffer().title(), "buftree-/r/sub");
    }
}
