//! Persistence port for computed recommendations.

use std::future::Future;

use crate::domain::id::{OwnerId, ProductId};
use crate::domain::recommendation::Recommendation;
use crate::error::Result;

/// Storage operations for recommendations.
pub trait RecommendationStore: Send + Sync {
    /// Replace every row for `(owner, period_tag)` with `rows`.
    ///
    /// Implementations must not leave a mix of two runs visible. Returns
    /// the number of rows written.
    fn replace(
        &self,
        owner: OwnerId,
        period_tag: &str,
        rows: &[Recommendation],
    ) -> impl Future<Output = Result<usize>> + Send;

    /// List up to `limit` rows for `owner`, highest score first, optionally
    /// restricted to one source product.
    fn list(
        &self,
        owner: OwnerId,
        product: Option<ProductId>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Recommendation>>> + Send;
}
