//! In-memory port adapters.
//!
//! [`MemoryFeed`], [`MemoryCatalog`] and [`MemoryStore`] mirror the SQLite
//! adapters closely enough for service tests. [`FailingStore`] rejects every
//! write.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::id::{OwnerId, ProductId, StoreId};
use crate::domain::recommendation::Recommendation;
use crate::domain::transaction::TransactionLine;
use crate::error::{Error, Result};
use crate::port::outbound::feed::{ProductCatalog, TransactionFeed};
use crate::port::outbound::store::RecommendationStore;

/// Owners, their stores, and a flat list of lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    stores: BTreeMap<OwnerId, Vec<StoreId>>,
    lines: Vec<TransactionLine>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owner with no stores.
    #[must_use]
    pub fn with_owner(mut self, owner: i64) -> Self {
        self.stores.entry(OwnerId::new(owner)).or_default();
        self
    }

    #[must_use]
    pub fn with_store(mut self, owner: i64, store: i64) -> Self {
        self.stores
            .entry(OwnerId::new(owner))
            .or_default()
            .push(StoreId::new(store));
        self
    }

    #[must_use]
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = TransactionLine>) -> Self {
        self.lines.extend(lines);
        self
    }
}

impl TransactionFeed for MemoryFeed {
    async fn owners(&self) -> Result<Vec<OwnerId>> {
        Ok(self.stores.keys().copied().collect())
    }

    async fn stores(&self, owner: OwnerId) -> Result<Vec<StoreId>> {
        Ok(self.stores.get(&owner).cloned().unwrap_or_default())
    }

    async fn lines(&self, stores: &[StoreId], since: DateTime<Utc>) -> Result<Vec<TransactionLine>> {
        Ok(self
            .lines
            .iter()
            .filter(|l| stores.contains(&l.store_id) && l.transaction_date >= since)
            .cloned()
            .collect())
    }
}

/// Product names by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    names: HashMap<ProductId, String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product(mut self, id: i64, name: &str) -> Self {
        self.names.insert(ProductId::new(id), name.to_string());
        self
    }
}

impl ProductCatalog for MemoryCatalog {
    async fn names(&self, products: &[ProductId]) -> Result<HashMap<ProductId, String>> {
        Ok(products
            .iter()
            .filter_map(|p| self.names.get(p).map(|n| (*p, n.clone())))
            .collect())
    }
}

/// Recommendation rows held in a shared vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<Recommendation>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row.
    pub async fn rows(&self) -> Vec<Recommendation> {
        self.rows.lock().await.clone()
    }
}

impl RecommendationStore for MemoryStore {
    async fn replace(
        &self,
        owner: OwnerId,
        period_tag: &str,
        rows: &[Recommendation],
    ) -> Result<usize> {
        let mut stored = self.rows.lock().await;
        stored.retain(|r| !(r.owner_id == owner && r.period_tag == period_tag));
        stored.extend_from_slice(rows);
        Ok(rows.len())
    }

    async fn list(
        &self,
        owner: OwnerId,
        product: Option<ProductId>,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let stored = self.rows.lock().await;
        let mut rows: Vec<Recommendation> = stored
            .iter()
            .filter(|r| r.owner_id == owner && product.map_or(true, |p| r.product_id == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.product_id.cmp(&b.product_id))
                .then(a.recommended_product_id.cmp(&b.recommended_product_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

/// Store whose writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl RecommendationStore for FailingStore {
    async fn replace(&self, _owner: OwnerId, _period_tag: &str, _rows: &[Recommendation]) -> Result<usize> {
        Err(Error::Database("insert failed".into()))
    }

    async fn list(
        &self,
        _owner: OwnerId,
        _product: Option<ProductId>,
        _limit: usize,
    ) -> Result<Vec<Recommendation>> {
        Ok(Vec::new())
    }
}
