//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the data the engine reads (transaction feed,
//! product catalog) and the recommendations it writes.

pub mod feed;
pub mod store;
