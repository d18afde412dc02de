//! URL sync target.

use std::sync::Mutex;
use std::sync::PoisonError;

/// Receives the page URL whenever the query state changes.
pub trait Navigator: Send + Sync {
    /// Makes `url` the current location. List state updates pass
    /// `scroll: false` so the view keeps its scroll position.
    fn push(&self, url: &str, scroll: bool);
}

/// A navigator that records pushed URLs in memory.
///
/// Consecutive pushes of the same URL are collapsed into one entry.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<String>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently pushed URL.
    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    /// Returns all pushed URLs, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for MemoryHistory {
    fn push(&self, url: &str, _scroll: bool) {
        let mut entries = self.lock();
        if entries.last().map(String::as_str) != Some(url) {
            entries.push(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let history = MemoryHistory::new();
        history.push("/a", false);
        history.push("/a", false);
        history.push("/b", false);
        assert_eq!(history.entries(), vec!["/a", "/b"]);
        assert_eq!(history.current().as_deref(), Some("/b"));
    }
}
