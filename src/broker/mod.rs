pub mod engine;
pub mod registry;
pub mod token;
pub mod topic;

pub use engine::{Broker, PublishReport};
pub use token::Token;
