//! SQLite persistence adapters.
//!
//! Reads the transaction ledger and stores computed recommendations using
//! Diesel ORM.

pub mod database;
pub mod feed;
pub mod store;

pub use feed::{SqliteProductCatalog, SqliteTransactionFeed};
pub use store::SqliteRecommendationStore;
