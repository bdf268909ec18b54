//! # topicbus
//!
//! `topicbus` is a minimalist, in-process publish/subscribe library. Callbacks
//! subscribe to named topics and receive every payload published to them,
//! synchronously and in subscription order.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `broker`: The multi-topic broker: topics, subscription tokens and delivery.
//! - `observer`: The single-subject variant, an indexed observer list owned by a `Subject`.
//! - `config`: Handles loading and managing configuration.
//! - `utils`: Shared error types and logging initialisation.
//!
//! ## Example
//!
//! ```rust
//! use topicbus::broker::Broker;
//!
//! let broker: Broker<String> = Broker::new();
//! let token = broker.subscribe("greetings", |topic, payload| {
//!     println!("{topic}: {payload}");
//! });
//!
//! assert_eq!(broker.publish("greetings", &"hello".to_string()).delivered, 1);
//! assert_eq!(broker.unsubscribe(&token), Some(token));
//! assert_eq!(broker.publish("greetings", &"again".to_string()).delivered, 0);
//! ```

pub mod broker;
pub mod config;
pub mod observer;
pub mod utils;

pub use broker::{Broker, PublishReport, Token};
pub use observer::{IndexedObserverList, NotifyReport, Observer, Subject};
pub use utils::error::{Error, SubscriberFailure};

#[cfg(test)]
mod tests;
