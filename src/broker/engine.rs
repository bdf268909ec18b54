//! Broker engine
//!
//! This module contains the in-process broker responsible for:
//! - managing topics and their ordered subscription lists
//! - issuing broker-unique tokens for every subscription
//! - delivering published payloads to subscribers, synchronously and in order
//!
//! Concurrency and usage notes:
//! - All methods take `&self`; the registry sits behind a single
//!   `parking_lot::Mutex`. Share a broker across threads with `Arc<Broker<P>>`.
//! - `publish` copies the topic's subscriptions under the lock and releases it
//!   before invoking any callback, so callbacks may subscribe or unsubscribe on
//!   the same broker. Subscriptions added during a publish are not reached by
//!   it; subscriptions removed during a publish still receive its payload.
//! - A panicking callback is caught and recorded in the `PublishReport`; the
//!   remaining callbacks still run.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::broker::registry::SubscriptionRegistry;
use crate::broker::token::{Token, TokenAllocator};
use crate::broker::topic::Subscription;
use crate::config::{BrokerSettings, TokenFormat};
use crate::utils::error::SubscriberFailure;

/// Outcome of one `publish` call.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub topic: String,
    /// Number of callbacks invoked, including ones that panicked.
    pub delivered: usize,
    pub failures: Vec<SubscriberFailure>,
    pub published_at: DateTime<Utc>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct Broker<P> {
    registry: Mutex<SubscriptionRegistry<P>>,
    tokens: TokenAllocator,
}

impl<P> Broker<P> {
    pub fn new() -> Self {
        Self::with_token_format(TokenFormat::default())
    }

    pub fn with_token_format(format: TokenFormat) -> Self {
        Self {
            registry: Mutex::new(SubscriptionRegistry::new()),
            tokens: TokenAllocator::new(format),
        }
    }

    pub fn from_settings(settings: &BrokerSettings) -> Self {
        Self::with_token_format(settings.token_format)
    }

    /// Registers `callback` on `topic`, creating the topic if it doesn't exist.
    pub fn subscribe<F>(&self, topic: &str, callback: F) -> Token
    where
        F: Fn(&str, &P) + Send + Sync + 'static,
    {
        let token = self.tokens.allocate();
        self.registry.lock().insert(
            topic,
            Subscription {
                token: token.clone(),
                callback: Arc::new(callback),
            },
        );
        debug!(%token, topic, "subscribed");
        token
    }

    /// Removes the subscription identified by `token`.
    ///
    /// Returns the token on success and `None` when no topic holds it.
    pub fn unsubscribe(&self, token: &Token) -> Option<Token> {
        let removed = self.registry.lock().remove(token);
        match removed {
            Some((topic, sub)) => {
                debug!(%token, topic = %topic, "unsubscribed");
                Some(sub.token)
            }
            None => {
                debug!(%token, "unsubscribe: unknown token");
                None
            }
        }
    }

    /// Delivers `payload` to every current subscriber of `topic`, in
    /// subscription order.
    ///
    /// Publishing to a topic nobody subscribed to is a no-op with
    /// `delivered == 0`.
    pub fn publish(&self, topic: &str, payload: &P) -> PublishReport {
        let snapshot = self.registry.lock().snapshot(topic);
        let published_at = Utc::now();

        if snapshot.is_empty() {
            trace!(topic, "publish: no subscribers");
        }

        let mut failures = Vec::new();
        for sub in &snapshot {
            trace!(token = %sub.token, topic, "delivering");
            let callback = &sub.callback;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| callback(topic, payload))) {
                let failure = SubscriberFailure::from_panic(sub.token.as_str(), panic);
                warn!(token = %sub.token, topic, error = %failure.message, "subscriber panicked");
                failures.push(failure);
            }
        }

        PublishReport {
            topic: topic.to_string(),
            delivered: snapshot.len(),
            failures,
            published_at,
        }
    }

    /// Topic names in registration order, including topics whose
    /// subscriptions have all been removed.
    pub fn topics(&self) -> Vec<String> {
        self.registry.lock().topic_names()
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.registry.lock().get(topic).is_some()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.registry.lock().get(topic).map_or(0, |t| t.len())
    }

    pub fn token_format(&self) -> TokenFormat {
        self.tokens.format()
    }
}

impl<P> Default for Broker<P> {
    fn default() -> Self {
        Self::new()
    }
}
