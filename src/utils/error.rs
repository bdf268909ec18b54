//! The `error` module defines the error types used within `topicbus`.
//!
//! Lookups that simply find nothing (an unknown token, an observer that was
//! never added, a topic nobody subscribed to) are not errors here; they are
//! reported through `Option`, `bool` or a zero delivery count instead.

use std::any::Any;

use thiserror::Error;

/// Errors returned by fallible `topicbus` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// A positional operation addressed an index past the end of a list.
    #[error("index {index} out of bounds for observer list of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::OutOfBounds { .. } => "out_of_bounds",
            Error::Config(_) => "config",
        }
    }
}

/// A subscriber or observer that panicked while being notified.
///
/// Failures are collected per publish/notify call; they never abort delivery
/// to the remaining subscribers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("subscriber '{target}' failed: {message}")]
pub struct SubscriberFailure {
    /// Token (broker) or observer name (subject) of the failing party.
    pub target: String,
    /// Panic message, when the payload carried one.
    pub message: String,
}

impl SubscriberFailure {
    pub(crate) fn from_panic(target: impl Into<String>, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self {
            target: target.into(),
            message,
        }
    }
}
