//! Settles a stream of keystrokes into a single search term.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Quiet period the search box waits for before filtering.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Publishes the latest input only after `window` has passed without a new
/// one. Every push restarts the window.
///
/// Dropping the debouncer aborts its timer task, so a pending term never
/// lands after teardown.
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
    settled: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        let (input, receiver) = mpsc::unbounded_channel();
        let (publisher, settled) = watch::channel(String::new());
        let task = tokio::spawn(settle(receiver, publisher, window));
        Self {
            input,
            settled,
            task,
        }
    }

    /// Records a keystroke; the full current text of the field is passed.
    pub fn push(&self, text: impl Into<String>) {
        let _ = self.input.send(text.into());
    }

    /// The last settled term.
    pub fn settled(&self) -> String {
        self.settled.borrow().clone()
    }

    /// A receiver that is notified whenever the settled term changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.settled.clone()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn settle(
    mut input: mpsc::UnboundedReceiver<String>,
    publisher: watch::Sender<String>,
    window: Duration,
) {
    let mut pending: Option<String> = None;
    loop {
        match pending.take() {
            None => match input.recv().await {
                Some(text) => pending = Some(text),
                None => break,
            },
            Some(text) => {
                tokio::select! {
                    next = input.recv() => match next {
                        Some(newer) => {
                            trace!("Debounce window restarted");
                            pending = Some(newer);
                        }
                        None => break,
                    },
                    () = tokio::time::sleep(window) => {
                        debug!(term = %text, "Search term settled");
                        publisher.send_if_modified(|current| {
                            if *current == text {
                                false
                            } else {
                                *current = text;
                                true
                            }
                        });
                    }
                }
            }
        }
    }
}
