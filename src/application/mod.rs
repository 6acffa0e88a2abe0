//! Application services (use cases).
//!
//! The pure mining and clustering stages live here next to the service
//! that wires them to the feed, catalog and store ports.

pub mod basket;
pub mod cluster;
pub mod feature;
pub mod mining;
pub mod recommend;
pub mod support;
