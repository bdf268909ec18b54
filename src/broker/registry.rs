//! Subscription registry
//!
//! Maps topic names to their `Topic` entries. Topics are created on first
//! subscription and are never dropped, so the registration order kept in
//! `topics` is stable and gives `unsubscribe` a deterministic scan order.

use std::collections::HashMap;

use crate::broker::token::Token;
use crate::broker::topic::{Subscription, Topic};

#[derive(Debug)]
pub struct SubscriptionRegistry<P> {
    topics: Vec<Topic<P>>,
    index: HashMap<String, usize>,
}

impl<P> SubscriptionRegistry<P> {
    pub fn new() -> Self {
        Self {
            topics: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `subscription` to `topic`, creating the topic if needed.
    pub fn insert(&mut self, topic: &str, subscription: Subscription<P>) {
        let pos = match self.index.get(topic) {
            Some(&pos) => pos,
            None => {
                self.topics.push(Topic::new(topic));
                let pos = self.topics.len() - 1;
                self.index.insert(topic.to_string(), pos);
                pos
            }
        };
        self.topics[pos].subscribe(subscription);
    }

    /// Removes the first subscription carrying `token`, scanning topics in
    /// registration order. Returns the name of the topic it was removed from.
    pub fn remove(&mut self, token: &Token) -> Option<(String, Subscription<P>)> {
        self.topics.iter_mut().find_map(|topic| {
            topic
                .unsubscribe(token)
                .map(|sub| (topic.name.clone(), sub))
        })
    }

    pub fn get(&self, topic: &str) -> Option<&Topic<P>> {
        self.index.get(topic).map(|&pos| &self.topics[pos])
    }

    /// Copies the current subscriptions of `topic` (cheap: token clone plus
    /// an `Arc` bump per entry).
    pub fn snapshot(&self, topic: &str) -> Vec<Subscription<P>> {
        self.get(topic)
            .map(|t| t.subscriptions.clone())
            .unwrap_or_default()
    }

    /// Topic names in registration order, including empty topics.
    pub fn topic_names(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.name.clone()).collect()
    }

    /// Total number of subscriptions across all topics.
    pub fn len(&self) -> usize {
        self.topics.iter().map(Topic::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for SubscriptionRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
