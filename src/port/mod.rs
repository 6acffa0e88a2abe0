//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!   CLI / scheduler ─▶  Recommendation service ├──▶ RecommendationStore
//!   (inbound)        │  (application)          ├──▶ TransactionFeed
//!                    │                         ├──▶ ProductCatalog
//!                    └─────────────────────────┘     (outbound)
//! ```
//!
//! Outbound ports are implemented by the SQLite adapters and, for tests, by
//! the in-memory adapters in `testkit`.

pub mod inbound;
pub mod outbound;
