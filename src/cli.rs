use clap::Parser;
use std::path::{Component, Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "buftree",
    version,
    about = "Browse a directory tree kept inside a text buffer",
    after_help = "Events are read from stdin, one per line: <class> <q0> <q1> [text] [loc]\n\n\
Examples:\n  echo 'L 0 0' | buftree ~/src     unfold the first entry\n  \
echo 'x 0 6 DotDot' | buftree      show the parent directory"
)]
pub struct Args {
    /// Directory to browse (default: current directory)
    pub path: Option<PathBuf>,

    /// Show hidden files (dotfiles) from the start
    #[arg(short = 'a', long = "all")]
    pub show_hidden: bool,

    /// Program started by the Win command (default: $PLAN9/bin/win)
    #[arg(long = "terminal")]
    pub terminal: Option<PathBuf>,

    /// More diagnostics (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        if self.terminal.is_none() {
            if let Some(plan9) = std::env::var_os("PLAN9") {
                self.terminal = Some(PathBuf::from(plan9).join("bin/win"));
            }
        }
        self
    }

    /// Absolute, lexically cleaned root directory.
    pub fn root(&self, cwd: &Path) -> PathBuf {
        match &self.path {
            Some(path) => clean_path(&cwd.join(path)),
            None => clean_path(cwd),
        }
    }
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_resolves_dots() {
        assert_eq!(clean_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean_path(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(clean_path(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn relative_root_joins_cwd() {
        let args = Args::parse_from(["buftree", "../y"]);
        assert_eq!(args.root(Path::new("/tmp/x")), PathBuf::from("/tmp/y"));
    }

    #[test]
    fn absolute_root_ignores_cwd() {
        let args = Args::parse_from(["buftree", "/srv/data/"]);
        assert_eq!(args.root(Path::new("/tmp/x")), PathBuf::from("/srv/data"));
    }

    #[test]
    fn missing_path_is_cwd() {
        let args = Args::parse_from(["buftree"]);
        assert_eq!(args.root(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn quiet_resets_verbose() {
        let args = Args::parse_from(["buftree", "-vv", "-q"]).validated();
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn explicit_terminal_is_kept() {
        let args = Args::parse_from(["buftree", "--terminal", "/usr/bin/xterm"]).validated();
        assert_eq!(args.terminal, Some(PathBuf::from("/usr/bin/xterm")));
    }
}
