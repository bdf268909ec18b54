//! Crate-level scenarios exercising the broker and subject together, the way
//! an application would wire them.
