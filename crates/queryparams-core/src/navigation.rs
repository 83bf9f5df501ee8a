//! Navigation capability: where the current URL comes from and where new
//! URLs go.
//!
//! The store never touches a global URL. It is handed a [`Navigator`], which
//! in a browser wraps `window.location` / `window.history` and everywhere else
//! is a [`MemoryNavigator`].

use std::cell::RefCell;

use crate::error::Result;
use crate::query::query_of;

/// Read/write access to the ambient URL and navigation history.
pub trait Navigator {
    /// Returns the full current URL.
    fn current_url(&self) -> String;

    /// Returns the query string of the current URL, without the leading `?`.
    fn current_query(&self) -> String {
        query_of(&self.current_url()).to_string()
    }

    /// Adds a new history entry for `url` and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Navigation`] if the entry cannot be added.
    fn push_url(&self, url: &str) -> Result<()>;

    /// Replaces the current history entry with `url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Navigation`] if the entry cannot be replaced.
    fn replace_url(&self, url: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
struct HistoryState {
    entries: Vec<String>,
    cursor: usize,
}

/// In-memory navigation history.
///
/// Behaves like a browser tab: pushing while positioned in the middle of the
/// history discards the forward entries.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: RefCell<HistoryState>,
}

impl MemoryNavigator {
    /// Creates a history whose only entry is `initial_url`.
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            state: RefCell::new(HistoryState {
                entries: vec![initial_url.into()],
                cursor: 0,
            }),
        }
    }

    /// Moves one entry back. Returns false when already at the first entry.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cursor == 0 {
            return false;
        }
        state.cursor -= 1;
        true
    }

    /// Moves one entry forward. Returns false when already at the last entry.
    pub fn forward(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cursor + 1 >= state.entries.len() {
            return false;
        }
        state.cursor += 1;
        true
    }

    /// Returns every history entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.state.borrow().entries.clone()
    }

    /// Number of history entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Always false: a history holds at least its initial entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Index of the current entry in [`MemoryNavigator::entries`].
    #[must_use]
    pub fn position(&self) -> usize {
        self.state.borrow().cursor
    }
}

impl Navigator for MemoryNavigator {
    fn current_url(&self) -> String {
        let state = self.state.borrow();
        state.entries[state.cursor].clone()
    }

    fn push_url(&self, url: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let keep = state.cursor + 1;
        state.entries.truncate(keep);
        state.entries.push(url.to_string());
        state.cursor = keep;
        Ok(())
    }

    fn replace_url(&self, url: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let cursor = state.cursor;
        state.entries[cursor] = url.to_string();
        Ok(())
    }
}
