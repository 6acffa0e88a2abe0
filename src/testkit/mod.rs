//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for transaction lines and baskets.
//! - [`memory`] - In-memory feed, catalog and store adapters.

pub mod domain;
pub mod memory;
