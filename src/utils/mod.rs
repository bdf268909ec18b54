//! The `utils` module provides the shared pieces used across `topicbus`:
//! the error taxonomy and logging initialisation.

pub mod error;
pub mod logging;
