#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use buftree::actions::SystemActions;
use buftree::cli::Args;
use buftree::event_loop;
use buftree::fs::LocalFs;
use buftree::host::StdioWindow;
use buftree::logging;
use buftree::session::{Controller, Session, Tools};
use clap::Parser;
use std::io::{self, BufReader};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("buftree: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    logging::init(args.verbose, args.quiet);

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let root = args.root(&cwd);
    let meta = std::fs::metadata(&root)
        .with_context(|| format!("{}: failed to resolve path", root.display()))?;
    anyhow::ensure!(meta.is_dir(), "{}: Not a directory", root.display());

    let tools = Tools {
        terminal: args.terminal.clone(),
        browser: std::env::current_exe().ok(),
    };
    let session = Session::new(root, args.show_hidden);
    let window = StdioWindow::new(io::stdout());
    let mut controller = Controller::new(session, window, LocalFs, SystemActions::new(), tools);
    controller
        .start()
        .context("failed to render the root directory")?;

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .context("failed to install Ctrl-C handler")?;

    // The reader stays blocked on stdin after a Del; it is not joined.
    let (events, _reader) = event_loop::spawn_reader(BufReader::new(io::stdin()));
    event_loop::run(&mut controller, events, shutdown_rx);
    Ok(())
}
