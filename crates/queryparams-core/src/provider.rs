//! Change provider: the context every store writes through.
//!
//! `update(url)` appends the URL to the navigation record and synchronously
//! calls each subscriber, in registration order. The record only exists so
//! that "a write happened" is observable; nothing reads meaning into it.
//!
//! Subscribers are cloned out of the list before they run, so a subscriber
//! may subscribe, unsubscribe or write again from inside its callback.
//! A subscriber that fails is logged and skipped.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::Error;

/// Callback invoked with the composed URL after every write.
pub type Observer = Rc<dyn Fn(&str) -> anyhow::Result<()>>;

/// Handle returned by [`QueryParamsProvider::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubscriptionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Holds the navigation record and the change subscribers.
#[derive(Default)]
pub struct QueryParamsProvider {
    history: RefCell<Vec<String>>,
    subscribers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_id: Cell<u64>,
}

impl QueryParamsProvider {
    /// Creates a provider with an empty record and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`, returning the id used to unsubscribe it.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&str) -> anyhow::Result<()> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let observer: Observer = Rc::new(observer);
        self.subscribers.borrow_mut().push((id, observer));
        id
    }

    /// Removes a subscriber. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() < before
    }

    /// Records `url` and notifies every subscriber.
    pub fn update(&self, url: &str) {
        self.history.borrow_mut().push(url.to_string());

        let observers: Vec<(SubscriptionId, Observer)> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();

        for (id, observer) in observers {
            if let Err(e) = observer(url) {
                let err = Error::Observer(format!("{e:#}"));
                tracing::warn!(
                    subscription = id.get(),
                    code = err.code(),
                    error = %err,
                    "Query params observer failed"
                );
            }
        }
    }

    /// Returns every URL passed to [`QueryParamsProvider::update`], oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl fmt::Debug for QueryParamsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParamsProvider")
            .field("history", &self.history.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
