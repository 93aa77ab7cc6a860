#![forbid(unsafe_code)]
//! buftree — a directory tree browser whose only tree is the text it shows.
//!
//! Structure (depth, parent, fold state) is read back from the buffer on
//! every interaction, so the user may edit the text freely in between.

pub mod actions;
pub mod buffer;
pub mod cli;
pub mod codec;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod fs;
pub mod host;
pub mod infer;
pub mod logging;
pub mod mutate;
pub mod session;
