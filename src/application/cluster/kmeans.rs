//! K-means clustering (Lloyd's algorithm) over Euclidean distance.
//!
//! # Algorithm
//!
//! 1. Clamp `k` to `min(k, max(1, n / 2))`
//! 2. Seed centroids with random rows, retrying to avoid duplicate seeds
//! 3. Assign each row to the nearest centroid (squared distance, first wins ties)
//! 4. Move each centroid to the mean of its rows; re-seed empty clusters
//! 5. Stop when no row changes cluster or after `max_iter` passes
//!
//! Seeding is random. Pass a `seed` to make runs reproducible.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::domain::error::DomainError;

/// Parameters for [`KMeans`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeansConfig {
    /// Requested cluster count before clamping.
    pub k: usize,
    pub max_iter: usize,
    /// Extra draws allowed when a seed duplicates an existing centroid.
    pub init_retries: usize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iter: 80,
            init_retries: 10,
            seed: None,
        }
    }
}

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster label per input row, each in `0..centroids.len()`.
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
    /// True if assignments stabilised before `max_iter`.
    pub converged: bool,
}

impl KMeansFit {
    fn empty() -> Self {
        Self {
            labels: Vec::new(),
            centroids: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }

    /// Number of distinct labels actually used.
    #[must_use]
    pub fn distinct_clusters(&self) -> usize {
        self.labels.iter().collect::<BTreeSet<_>>().len()
    }
}

/// Lloyd's k-means with seedable initialisation.
#[derive(Debug, Clone)]
pub struct KMeans {
    config: KMeansConfig,
    rng: StdRng,
}

impl KMeans {
    /// Create a clusterer.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroClusters`] if `k` is 0.
    pub fn new(config: KMeansConfig) -> Result<Self, DomainError> {
        if config.k == 0 {
            return Err(DomainError::ZeroClusters);
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Cluster count actually used for `n` rows.
    #[must_use]
    pub fn effective_k(&self, n: usize) -> usize {
        self.config.k.min((n / 2).max(1))
    }

    /// Cluster `data`, one row per item.
    ///
    /// # Errors
    /// Returns [`DomainError::DimensionMismatch`] if rows differ in length.
    pub fn fit(&mut self, data: &[Vec<f64>]) -> Result<KMeansFit, DomainError> {
        let Some(first) = data.first() else {
            return Ok(KMeansFit::empty());
        };
        let dims = first.len();
        if let Some((index, row)) = data.iter().enumerate().find(|(_, r)| r.len() != dims) {
            return Err(DomainError::DimensionMismatch {
                index,
                expected: dims,
                actual: row.len(),
            });
        }

        let k = self.effective_k(data.len());
        let mut centroids = self.seed_centroids(data, k);
        let mut labels = vec![usize::MAX; data.len()];
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.config.max_iter.max(1) {
            iterations += 1;

            let mut changed = false;
            for (label, row) in labels.iter_mut().zip(data) {
                let nearest = nearest_centroid(row, &centroids);
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            self.update_centroids(data, &labels, &mut centroids);
        }

        trace!(rows = data.len(), k, iterations, converged, "K-means finished");
        Ok(KMeansFit {
            labels,
            centroids,
            iterations,
            converged,
        })
    }

    fn random_row<'a>(&mut self, data: &'a [Vec<f64>]) -> &'a Vec<f64> {
        &data[self.rng.gen_range(0..data.len())]
    }

    fn seed_centroids(&mut self, data: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
        let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
        for _ in 0..k {
            let mut candidate = self.random_row(data);
            let mut retries = 0;
            while retries < self.config.init_retries && centroids.contains(candidate) {
                candidate = self.random_row(data);
                retries += 1;
            }
            centroids.push(candidate.clone());
        }
        centroids
    }

    fn update_centroids(&mut self, data: &[Vec<f64>], labels: &[usize], centroids: &mut [Vec<f64>]) {
        let dims = centroids.first().map_or(0, Vec::len);
        let mut sums = vec![vec![0.0; dims]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];

        for (row, &label) in data.iter().zip(labels) {
            counts[label] += 1;
            for (sum, value) in sums[label].iter_mut().zip(row) {
                *sum += value;
            }
        }

        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            if counts[cluster] == 0 {
                *centroid = self.random_row(data).clone();
                continue;
            }
            let n = counts[cluster] as f64;
            for (value, sum) in centroid.iter_mut().zip(&sums[cluster]) {
                *value = sum / n;
            }
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(row, centroid);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
