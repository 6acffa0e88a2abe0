//! Read-only ports onto the transaction ledger and product catalog.
//!
//! The engine never writes through these; they are owned by the wider
//! loyalty system.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::id::{OwnerId, ProductId, StoreId};
use crate::domain::transaction::TransactionLine;
use crate::error::Result;

/// Source of owners, their stores, and transaction lines.
pub trait TransactionFeed: Send + Sync {
    /// All owners with at least one store, ascending.
    fn owners(&self) -> impl Future<Output = Result<Vec<OwnerId>>> + Send;

    /// Stores operated by `owner`.
    fn stores(&self, owner: OwnerId) -> impl Future<Output = Result<Vec<StoreId>>> + Send;

    /// Lines for `stores` dated at or after `since`, oldest first.
    fn lines(
        &self,
        stores: &[StoreId],
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<TransactionLine>>> + Send;
}

/// Product metadata lookup.
pub trait ProductCatalog: Send + Sync {
    /// Names for the given products. Unknown ids are simply absent.
    fn names(
        &self,
        products: &[ProductId],
    ) -> impl Future<Output = Result<HashMap<ProductId, String>>> + Send;
}
