//! Main event loop: one consumer handling window events in order.

use crate::actions::Actions;
use crate::error::Error;
use crate::event::{Event, RawEvent};
use crate::fs::FileSystem;
use crate::host::Window;
use crate::session::{Controller, Flow};
use crossbeam_channel::{select, Receiver};
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// Events waiting to be handled. The reader blocks once this many are queued.
pub const QUEUE_DEPTH: usize = 10;

/// Read wire events from `input` on a separate thread.
///
/// The returned receiver disconnects when the input ends.
pub fn spawn_reader<R>(input: R) -> (Receiver<Event>, JoinHandle<()>)
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(QUEUE_DEPTH);
    let handle = thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("reading events: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<RawEvent>() {
                Ok(raw) => {
                    if tx.send(Event::from_raw(raw)).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
        debug!("event source closed");
    });
    (rx, handle)
}

/// Run the controller until the window closes, the event source ends, or
/// `shutdown` fires. A failed event is logged and never stops the loop.
pub fn run<B, F, A>(controller: &mut Controller<B, F, A>, events: Receiver<Event>, shutdown: Receiver<()>)
where
    B: Window,
    F: FileSystem,
    A: Actions,
{
    present(controller);
    loop {
        select! {
            recv(events) -> msg => {
                let Ok(event) = msg else {
                    break;
                };
                match controller.handle(event) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e @ Error::BlankLine(_)) => warn!("{e}"),
                    Err(e) => error!("{e}"),
                }
                present(controller);
            }
            recv(shutdown) -> _ => break,
        }
    }
}

fn present<B: Window, F: FileSystem, A: Actions>(controller: &mut Controller<B, F, A>) {
    if let Err(e) = controller.buffer_mut().present() {
        error!("presenting window: {e}");
    }
}
