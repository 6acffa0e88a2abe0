use std::path::{Path, PathBuf};

use basketry::adapter::outbound::sqlite::database::connection::DbPool;
use basketry::adapter::outbound::sqlite::database::model::{ProductRow, StoreRow, TransactionRow};
use basketry::adapter::outbound::sqlite::database::schema::{products, stores, transactions};
use basketry::infrastructure::bootstrap::open_database;
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use tempfile::TempDir;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TempLedger {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
    next_line: i64,
}

impl TempLedger {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("basketry.db");
        let pool = open_database(&path).expect("open database");
        Self {
            _dir: dir,
            path,
            pool,
            next_line: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn store(&self, id: i64, owner: i64) -> &Self {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(stores::table)
            .values(&StoreRow {
                id,
                owner_id: owner,
                name: format!("Store {id}"),
            })
            .execute(&mut conn)
            .expect("insert store");
        self
    }

    pub fn product(&self, id: i64, store: i64, name: &str) -> &Self {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(products::table)
            .values(&ProductRow {
                id,
                store_id: store,
                name: name.to_string(),
            })
            .execute(&mut conn)
            .expect("insert product");
        self
    }

    /// One receipt holding `items`, all stamped at `at`.
    pub fn receipt(&mut self, store: i64, reference: &str, items: &[i64], at: DateTime<Utc>) {
        let rows: Vec<TransactionRow> = items
            .iter()
            .map(|&product| {
                let id = self.next_line;
                self.next_line += 1;
                TransactionRow {
                    id,
                    product_id: product,
                    reference_no: Some(reference.to_string()),
                    quantity: 1,
                    total: "4.50".to_string(),
                    user_id: None,
                    store_id: store,
                    transaction_date: at.to_rfc3339(),
                }
            })
            .collect();

        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(transactions::table)
            .values(&rows)
            .execute(&mut conn)
            .expect("insert transactions");
    }

    /// Repeat `items` as `count` separate receipts.
    pub fn receipts(&mut self, store: i64, prefix: &str, items: &[i64], count: usize, at: DateTime<Utc>) {
        for i in 0..count {
            let reference = format!("{prefix}-{i}");
            self.receipt(store, &reference, items, at + Duration::minutes(i as i64));
        }
    }
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// Owner 1 runs store 10 with four products:
///
/// - 6 receipts of coffee + croissant
/// - 3 receipts of coffee + juice
/// - 2 receipts of juice + bagel
/// - 1 coffee + bagel receipt from long before any default period
///
/// Owner 2 has a store and no transactions. Owner 3 has no stores.
pub fn cafe() -> TempLedger {
    let mut ledger = TempLedger::create();
    ledger.store(10, 1).store(20, 2);
    ledger
        .product(1, 10, "Coffee")
        .product(2, 10, "Croissant")
        .product(3, 10, "Juice")
        .product(4, 10, "Bagel");

    ledger.receipts(10, "CC", &[1, 2], 6, days_ago(2));
    ledger.receipts(10, "CJ", &[1, 3], 3, days_ago(3));
    ledger.receipts(10, "JB", &[3, 4], 2, days_ago(4));
    ledger.receipt(10, "OLD", &[1, 4], days_ago(400));
    ledger
}
