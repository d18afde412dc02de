//! Debounced input values.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::watch;

/// Quiet period before a search edit is propagated.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// An input whose settled value lags edits by a quiet period.
///
/// [`value`](Self::value) echoes every edit immediately. The settled value
/// changes only once no edit has arrived for the quiet period; each edit
/// restarts the timer. The last edit is never dropped, only superseded.
///
/// Must be created inside a tokio runtime: the timer runs on a spawned task
/// that ends when the input is dropped, publishing any pending edit first.
///
/// # Example
///
/// ```ignore
/// let mut search = Debounced::new(String::new(), SEARCH_DEBOUNCE);
/// search.set("a".to_string());
/// search.set("an".to_string());
/// search.set("ann".to_string());
/// assert_eq!(search.changed().await.as_deref(), Some("ann"));
/// ```
#[derive(Debug)]
pub struct Debounced<T> {
    value: T,
    edits: mpsc::UnboundedSender<Edit<T>>,
    settled: watch::Receiver<T>,
}

#[derive(Debug)]
enum Edit<T> {
    /// Restarts the quiet period with a new pending value.
    Set(T),
    /// Publishes the value now and drops any pending edit.
    Settle(T),
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an input whose echo and settled values both start at `initial`.
    pub fn new(initial: T, quiet: Duration) -> Self {
        let (edits, rx) = mpsc::unbounded_channel();
        let (tx, settled) = watch::channel(initial.clone());
        tokio::spawn(run(rx, tx, quiet));
        Self {
            value: initial,
            edits,
            settled,
        }
    }

    /// Records an edit.
    pub fn set(&mut self, value: T) {
        self.value = value.clone();
        self.send(Edit::Set(value));
    }

    /// Makes `value` both the echo and the settled value without waiting.
    ///
    /// Later edits are compared against it, so reverting to the previous
    /// settled value still propagates.
    pub fn settle_now(&mut self, value: T) {
        self.value = value.clone();
        self.send(Edit::Settle(value));
    }

    fn send(&self, edit: Edit<T>) {
        if self.edits.send(edit).is_err() {
            log::warn!("debounce timer stopped; edit not propagated");
        }
    }

    /// Returns the latest edit.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the last propagated value.
    pub fn settled(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Waits for the next propagated value.
    ///
    /// Returns `None` once the timer task has stopped. Cancel safe.
    pub async fn changed(&mut self) -> Option<T> {
        self.settled.changed().await.ok()?;
        Some(self.settled.borrow_and_update().clone())
    }
}

async fn run<T: PartialEq>(mut edits: mpsc::UnboundedReceiver<Edit<T>>, settled: watch::Sender<T>, quiet: Duration) {
    while let Some(edit) = edits.recv().await {
        let mut pending = match edit {
            Edit::Set(value) => value,
            Edit::Settle(value) => {
                publish(&settled, value);
                continue;
            }
        };
        loop {
            tokio::select! {
                next = edits.recv() => match next {
                    Some(Edit::Set(value)) => pending = value,
                    Some(Edit::Settle(value)) => {
                        publish(&settled, value);
                        break;
                    }
                    None => {
                        publish(&settled, pending);
                        return;
                    }
                },
                _ = tokio::time::sleep(quiet) => {
                    publish(&settled, pending);
                    break;
                }
            }
        }
    }
}

/// Publishes `value` unless it equals what is already settled.
fn publish<T: PartialEq>(settled: &watch::Sender<T>, value: T) {
    settled.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}
