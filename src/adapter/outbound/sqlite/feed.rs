//! SQLite transaction feed and product catalog.
//!
//! Reads the ledger tables (`stores`, `products`, `transactions`) that an
//! external system owns. Nothing here writes to them.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{ProductRow, TransactionRow};
use crate::adapter::outbound::sqlite::database::schema::{products, stores, transactions};
use crate::domain::id::{OwnerId, ProductId, StoreId, UserId};
use crate::domain::transaction::TransactionLine;
use crate::error::{Error, Result};
use crate::port::outbound::feed::{ProductCatalog, TransactionFeed};

/// Parse a stored timestamp: RFC 3339, or `YYYY-MM-DD HH:MM:SS` taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::Parse(format!("invalid timestamp '{raw}': {e}")))
}

/// Reads stores and transaction lines.
#[derive(Clone)]
pub struct SqliteTransactionFeed {
    pool: DbPool,
}

impl SqliteTransactionFeed {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn from_row(row: TransactionRow) -> Result<TransactionLine> {
        let total = Decimal::from_str(row.total.trim())
            .map_err(|e| Error::Parse(format!("invalid total '{}': {e}", row.total)))?;
        Ok(TransactionLine {
            product_id: ProductId::new(row.product_id),
            basket_ref: row.reference_no,
            quantity: row.quantity,
            total,
            user_id: row.user_id.map(UserId::new),
            store_id: StoreId::new(row.store_id),
            transaction_date: parse_timestamp(&row.transaction_date)?,
        })
    }
}

impl TransactionFeed for SqliteTransactionFeed {
    async fn owners(&self) -> Result<Vec<OwnerId>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let ids: Vec<i64> = stores::table
            .select(stores::owner_id)
            .distinct()
            .order(stores::owner_id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(ids.into_iter().map(OwnerId::new).collect())
    }

    async fn stores(&self, owner: OwnerId) -> Result<Vec<StoreId>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let ids: Vec<i64> = stores::table
            .filter(stores::owner_id.eq(owner.get()))
            .select(stores::id)
            .order(stores::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(ids.into_iter().map(StoreId::new).collect())
    }

    async fn lines(&self, store_ids: &[StoreId], since: DateTime<Utc>) -> Result<Vec<TransactionLine>> {
        if store_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = store_ids.iter().map(|s| s.get()).collect();
        // Stored text carries its own offset, so its date can trail the UTC
        // cutoff by up to a day. The exact cutoff is applied after parsing.
        let day = (since - Duration::days(1)).format("%Y-%m-%d").to_string();

        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<TransactionRow> = transactions::table
            .filter(transactions::store_id.eq_any(&ids))
            .filter(transactions::transaction_date.ge(&day))
            .order(transactions::id.asc())
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match Self::from_row(row) {
                Ok(line) if line.transaction_date >= since => lines.push(line),
                Ok(_) => {}
                Err(e) => warn!(transaction = id, error = %e, "Skipping unreadable transaction"),
            }
        }
        Ok(lines)
    }
}

/// Resolves product names.
#[derive(Clone)]
pub struct SqliteProductCatalog {
    pool: DbPool,
}

impl SqliteProductCatalog {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductCatalog for SqliteProductCatalog {
    async fn names(&self, product_ids: &[ProductId]) -> Result<HashMap<ProductId, String>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<i64> = product_ids.iter().map(|p| p.get()).collect();

        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::id.eq_any(&ids))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| (ProductId::new(row.id), row.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
    use crate::adapter::outbound::sqlite::database::model::StoreRow;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn setup_test_db() -> DbPool {
        let pool = create_pool(":memory:").expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        pool
    }

    fn seed(pool: &DbPool) {
        let mut conn = pool.get().unwrap();
        diesel::insert_into(stores::table)
            .values(&vec![
                StoreRow { id: 10, owner_id: 1, name: "Main".into() },
                StoreRow { id: 11, owner_id: 1, name: "Kiosk".into() },
                StoreRow { id: 20, owner_id: 2, name: "Other".into() },
            ])
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(products::table)
            .values(&vec![
                ProductRow { id: 1, store_id: 10, name: "Coffee".into() },
                ProductRow { id: 2, store_id: 10, name: "Croissant".into() },
            ])
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(transactions::table)
            .values(&vec![
                tx(1, 1, Some("R-1"), "12.50", 10, "2024-05-20T09:00:00+00:00"),
                tx(2, 2, Some("R-1"), "3.00", 10, "2024-05-20 09:00:30"),
                tx(3, 1, None, "2.00", 11, "2024-05-31T23:59:00Z"),
                tx(4, 2, None, "2.00", 20, "2024-05-25T10:00:00+00:00"),
                tx(5, 1, None, "2.00", 10, "2024-01-01T10:00:00+00:00"),
                tx(6, 2, None, "not-a-number", 10, "2024-05-26T10:00:00+00:00"),
            ])
            .execute(&mut conn)
            .unwrap();
    }

    fn tx(id: i64, product: i64, reference: Option<&str>, total: &str, store: i64, at: &str) -> TransactionRow {
        TransactionRow {
            id,
            product_id: product,
            reference_no: reference.map(str::to_string),
            quantity: 1,
            total: total.into(),
            user_id: Some(7),
            store_id: store,
            transaction_date: at.into(),
        }
    }

    fn since() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn owners_and_stores_come_from_the_store_table() {
        let pool = setup_test_db();
        seed(&pool);
        let feed = SqliteTransactionFeed::new(pool);

        assert_eq!(feed.owners().await.unwrap(), vec![OwnerId::new(1), OwnerId::new(2)]);
        assert_eq!(
            feed.stores(OwnerId::new(1)).await.unwrap(),
            vec![StoreId::new(10), StoreId::new(11)]
        );
        assert!(feed.stores(OwnerId::new(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lines_are_scoped_to_stores_and_period() {
        let pool = setup_test_db();
        seed(&pool);
        let feed = SqliteTransactionFeed::new(pool);

        let lines = feed
            .lines(&[StoreId::new(10), StoreId::new(11)], since())
            .await
            .unwrap();

        let ids: Vec<i64> = lines.iter().map(|l| l.product_id.get()).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(lines[0].total, dec!(12.50));
        assert_eq!(lines[0].reference(), Some("R-1"));
        assert_eq!(lines[1].transaction_date, Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 30).unwrap());
    }

    #[tokio::test]
    async fn negative_offset_rows_inside_the_window_are_kept() {
        let pool = setup_test_db();
        seed(&pool);
        {
            let mut conn = pool.get().unwrap();
            diesel::insert_into(transactions::table)
                .values(&vec![
                    tx(7, 1, None, "1.00", 10, "2024-04-30T23:00:00-05:00"),
                    tx(8, 2, None, "1.00", 10, "2024-04-30T20:00:00-05:00"),
                ])
                .execute(&mut conn)
                .unwrap();
        }
        let feed = SqliteTransactionFeed::new(pool);
        let cutoff = Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap();

        let lines = feed.lines(&[StoreId::new(10)], cutoff).await.unwrap();

        let late: Vec<_> = lines
            .iter()
            .filter(|l| l.transaction_date < Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap())
            .collect();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].transaction_date, Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn no_stores_reads_nothing() {
        let pool = setup_test_db();
        seed(&pool);
        let feed = SqliteTransactionFeed::new(pool);

        assert!(feed.lines(&[], since()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn catalog_returns_known_names_only() {
        let pool = setup_test_db();
        seed(&pool);
        let catalog = SqliteProductCatalog::new(pool);

        let names = catalog
            .names(&[ProductId::new(1), ProductId::new(2), ProductId::new(3)])
            .await
            .unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[&ProductId::new(1)], "Coffee");
    }

    #[test]
    fn parses_both_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-20T09:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-20T11:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-20 09:00:00").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }
}
