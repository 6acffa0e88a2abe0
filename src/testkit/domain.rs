//! Builders for domain primitives used across tests.
//!
//! Keeps tests focused on assertions rather than construction boilerplate.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::basket::{BasketKey, Baskets};
use crate::domain::id::{ProductId, StoreId, UserId};
use crate::domain::transaction::TransactionLine;

/// Timestamp used by [`line`]: 2024-01-01T00:00:00Z.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A line for `product` in store 1, anonymous, at [`epoch`].
pub fn line(product: i64, reference: Option<&str>) -> TransactionLine {
    TransactionLine {
        product_id: ProductId::new(product),
        basket_ref: reference.map(str::to_string),
        quantity: 1,
        total: Decimal::ONE,
        user_id: None,
        store_id: StoreId::new(1),
        transaction_date: epoch(),
    }
}

/// A line without a basket reference, grouped by store, user and time.
pub fn line_at(product: i64, store: i64, user: Option<i64>, at: DateTime<Utc>) -> TransactionLine {
    TransactionLine {
        product_id: ProductId::new(product),
        basket_ref: None,
        quantity: 1,
        total: Decimal::ONE,
        user_id: user.map(UserId::new),
        store_id: StoreId::new(store),
        transaction_date: at,
    }
}

/// Baskets keyed `B0`, `B1`, ... holding the given product ids.
pub fn baskets(contents: &[&[i64]]) -> Baskets {
    contents
        .iter()
        .enumerate()
        .flat_map(|(i, products)| {
            products
                .iter()
                .map(move |&p| (BasketKey::Reference(format!("B{i}")), ProductId::new(p)))
        })
        .collect()
}
