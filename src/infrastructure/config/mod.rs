//! Infrastructure configuration modules.

pub mod engine;
pub mod logging;
pub mod recompute;
pub mod schedule;
pub mod settings;
