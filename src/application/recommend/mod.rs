//! Recommendation use-cases and the periodic batch job.

pub mod batch;
pub mod service;

pub use batch::{BatchJob, BatchReport};
pub use service::{EngineSettings, RecommendationService, DEFAULT_QUERY_LIMIT};
