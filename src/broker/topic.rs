//! Topic management
//!
//! A `Topic` holds the ordered subscriptions registered against one topic
//! name. Subscriptions are kept in insertion order and the same callback may
//! be registered more than once; each registration gets its own token.
//!
//! Concurrency note: callers must synchronize access to `Topic` (for example
//! via the broker lock) when modifying subscriptions.

use std::fmt;
use std::sync::Arc;

use crate::broker::token::Token;

/// Callback invoked with `(topic, payload)` on every publish to its topic.
pub type Callback<P> = dyn Fn(&str, &P) + Send + Sync;

/// One registration of a callback on a topic.
pub struct Subscription<P> {
    pub token: Token,
    pub callback: Arc<Callback<P>>,
}

impl<P> Clone for Subscription<P> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<P> fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Topic<P> {
    pub name: String,
    pub subscriptions: Vec<Subscription<P>>,
}

impl<P> Topic<P> {
    /// Create a new topic with the given name and no subscriptions.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscriptions: Vec::new(),
        }
    }

    /// Append a subscription to the end of the topic's list.
    pub fn subscribe(&mut self, subscription: Subscription<P>) {
        self.subscriptions.push(subscription);
    }

    /// Remove the subscription carrying `token`, if present.
    pub fn unsubscribe(&mut self, token: &Token) -> Option<Subscription<P>> {
        let pos = self.subscriptions.iter().position(|s| &s.token == token)?;
        Some(self.subscriptions.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
