//! Window events: wire decoding and the typed events the controller handles.
//!
//! The host delivers one event per line:
//!
//! ```text
//! <class> <q0> <q1> [text] [loc]
//! ```
//!
//! where `class` is `x` (command in the tag), `X` (command in the body),
//! `l` (look in the tag) or `L` (look in the body). `loc` is only meaningful
//! for tag commands and carries the position of a chorded selection.

use std::fmt;
use std::str::FromStr;

/// Which part of the window was touched, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    TagCommand,
    BodyCommand,
    TagClick,
    BodyClick,
}

impl EventClass {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Self::TagCommand),
            'X' => Some(Self::BodyCommand),
            'l' => Some(Self::TagClick),
            'L' => Some(Self::BodyClick),
            _ => None,
        }
    }
}

/// An event exactly as the host reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub class: EventClass,
    pub q0: usize,
    pub q1: usize,
    pub text: String,
    pub loc: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEventError(String);

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed event: {}", self.0)
    }
}

impl std::error::Error for ParseEventError {}

impl FromStr for RawEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseEventError(s.to_string());
        let mut fields = s.split_whitespace();

        let class = fields
            .next()
            .and_then(|f| {
                let mut chars = f.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => EventClass::from_char(c),
                    _ => None,
                }
            })
            .ok_or_else(bad)?;
        let q0: usize = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
        let q1: usize = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
        if q1 < q0 {
            return Err(bad());
        }

        let rest: Vec<&str> = fields.collect();
        let (text, loc) = match class {
            EventClass::TagCommand => {
                let loc = match rest.get(1) {
                    Some(f) => Some(f.parse().map_err(|_| bad())?),
                    None => None,
                };
                if rest.len() > 2 {
                    return Err(bad());
                }
                (rest.first().copied().unwrap_or_default().to_string(), loc)
            }
            _ => (rest.join(" "), None),
        };

        Ok(RawEvent {
            class,
            q0,
            q1,
            text,
            loc,
        })
    }
}

/// Helper programs that can be started from the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// A terminal window.
    Terminal,
    /// Another browser instance.
    Browser,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Terminal => "terminal",
            Tool::Browser => "browser",
        }
    }
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Replace the root with its parent and redraw.
    NavigateUp,
    ToggleHidden,
    /// Open a file, or fold/unfold a directory, at this position.
    Activate(usize),
    /// Announce the full path of the entry at this position.
    Inspect(usize),
    /// Start a tool in the directory at this position, or in the root.
    Launch { tool: Tool, at: Option<usize> },
    /// The window was closed.
    Close,
    /// Not ours; left to the host.
    Passthrough(RawEvent),
}

impl Event {
    /// Decode a raw host event into what it means for the tree.
    pub fn from_raw(raw: RawEvent) -> Self {
        match raw.class {
            EventClass::TagCommand => match raw.text.as_str() {
                "DotDot" => Event::NavigateUp,
                "Hidden" => Event::ToggleHidden,
                "Win" => Event::Launch {
                    tool: Tool::Terminal,
                    at: raw.loc,
                },
                "Xplor" => Event::Launch {
                    tool: Tool::Browser,
                    at: raw.loc,
                },
                "Del" => Event::Close,
                _ => Event::Passthrough(raw),
            },
            EventClass::BodyCommand => Event::Inspect(raw.q0),
            EventClass::TagClick => Event::Passthrough(raw),
            EventClass::BodyClick if raw.q0 != raw.q1 => Event::Passthrough(raw),
            EventClass::BodyClick => Event::Activate(raw.q0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(line: &str) -> Event {
        Event::from_raw(line.parse().unwrap())
    }

    #[test]
    fn tag_commands() {
        assert_eq!(decode("x 0 6 DotDot"), Event::NavigateUp);
        assert_eq!(decode("x 7 13 Hidden"), Event::ToggleHidden);
        assert_eq!(decode("x 0 3 Del"), Event::Close);
        assert_eq!(
            decode("x 0 3 Win"),
            Event::Launch {
                tool: Tool::Terminal,
                at: None
            }
        );
        assert_eq!(
            decode("x 0 5 Xplor 42"),
            Event::Launch {
                tool: Tool::Browser,
                at: Some(42)
            }
        );
    }

    #[test]
    fn unknown_tag_command_passes_through() {
        assert!(matches!(decode("x 0 3 Put"), Event::Passthrough(_)));
        assert!(matches!(decode("l 0 3 whatever"), Event::Passthrough(_)));
    }

    #[test]
    fn body_events() {
        assert_eq!(decode("L 12 12"), Event::Activate(12));
        assert_eq!(decode("L 12 12 some name"), Event::Activate(12));
        assert_eq!(decode("X 30 34 name"), Event::Inspect(30));
    }

    #[test]
    fn body_click_on_a_selection_is_ignored() {
        assert!(matches!(decode("L 3 9 sub"), Event::Passthrough(_)));
    }

    #[test]
    fn body_text_keeps_spaces() {
        let raw: RawEvent = "L 4 4 my file.txt".parse().unwrap();
        assert_eq!(raw.text, "my file.txt");
        assert_eq!(raw.loc, None);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        for line in ["", "Q 1 1", "L", "L a 1", "L 5 2", "xx 0 0 Win", "x 0 3 Win nope"] {
            assert!(line.parse::<RawEvent>().is_err(), "accepted {line:?}");
        }
    }
}
