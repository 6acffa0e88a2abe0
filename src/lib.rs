//! Basketry - product co-purchase recommendations from transaction history.
//!
//! Transaction lines are grouped into baskets, then turned into
//! "customers who bought X also bought Y" recommendations along one of two
//! paths, persisted per owner and lookback period.
//!
//! # Architecture
//!
//! - **Rules path** - support counts, then association rules ranked by
//!   confidence x lift
//! - **Clustering path** - co-occurrence feature vectors, k-means, then
//!   same-cluster co-purchase counts
//! - **Insights** - dashboard rules with explanations, computed on the fly
//!
//! # Modules
//!
//! - [`domain`] - Identifiers, transaction lines, baskets, periods, rules
//! - [`application`] - Mining and clustering stages plus the recommendation service
//! - [`port`] - Traits for the transaction feed, catalog and recommendation store
//! - [`adapter`] - SQLite persistence and the command-line interface
//! - [`infrastructure`] - Configuration, logging and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use basketry::application::basket::BasketBuilder;
//! use basketry::application::mining::{AssociationMiner, MinerConfig};
//! use basketry::application::support::SupportCounts;
//!
//! let baskets = BasketBuilder::default().build(&[]);
//! let counts = SupportCounts::count(&baskets);
//! let miner = AssociationMiner::new(MinerConfig::dashboard()).unwrap();
//! assert!(miner.mine(&counts).is_empty());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
