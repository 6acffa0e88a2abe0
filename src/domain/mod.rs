//! Storage-agnostic domain types for the recommendation engine.

pub mod basket;
pub mod error;
pub mod id;
pub mod period;
pub mod recommendation;
pub mod rule;
pub mod transaction;
