//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`recommend`]: recompute, query and insight use-cases driven by the CLI
//!   and the scheduled batch job

pub mod recommend;
