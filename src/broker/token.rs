//! Subscription tokens
//!
//! A `Token` identifies one subscription for its whole lifetime and is the
//! only handle accepted by `Broker::unsubscribe`. Tokens are unique across a
//! broker instance, not merely within a topic.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::config::TokenFormat;

/// Opaque, printable subscription handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Issues tokens for a single broker.
///
/// Sequential tokens come from a monotonically increasing counter, so they
/// never repeat within one allocator. UUID tokens are random v4 ids.
#[derive(Debug)]
pub struct TokenAllocator {
    format: TokenFormat,
    next: AtomicU64,
}

impl TokenAllocator {
    pub fn new(format: TokenFormat) -> Self {
        Self {
            format,
            next: AtomicU64::new(1),
        }
    }

    pub fn format(&self) -> TokenFormat {
        self.format
    }

    /// Returns a token no earlier call on this allocator has returned.
    pub fn allocate(&self) -> Token {
        match self.format {
            TokenFormat::Sequential => {
                let n = self.next.fetch_add(1, Ordering::Relaxed);
                Token(n.to_string())
            }
            TokenFormat::Uuid => Token(Uuid::new_v4().to_string()),
        }
    }
}

impl Default for TokenAllocator {
    fn default() -> Self {
        Self::new(TokenFormat::default())
    }
}
