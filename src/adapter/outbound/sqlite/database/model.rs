//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{products, recommendations, stores, transactions};

/// Database row for a store.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = stores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoreRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
}

/// Database row for a product.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
}

/// Database row for a transaction line.
///
/// `total` is a decimal string and `transaction_date` is RFC 3339.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub id: i64,
    pub product_id: i64,
    pub reference_no: Option<String>,
    pub quantity: i32,
    pub total: String,
    pub user_id: Option<i64>,
    pub store_id: i64,
    pub transaction_date: String,
}

/// Database row for a stored recommendation.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = recommendations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecommendationRow {
    pub owner_id: i64,
    pub product_id: i64,
    pub recommended_product_id: i64,
    pub period_tag: String,
    pub score: f64,
    pub computed_at: String,
}
