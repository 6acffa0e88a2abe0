//! Clustering path: k-means over feature vectors, then same-cluster scoring.

pub mod kmeans;
pub mod scorer;

pub use kmeans::{KMeans, KMeansConfig, KMeansFit};
pub use scorer::{ClusterAssignment, ClusterScorer, ScoredPair};
