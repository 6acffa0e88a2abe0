//! SQLite recommendation store implementation.
//!
//! Rows for one `(owner, period)` scope are replaced inside a single
//! transaction, so readers never observe a half-written scope.

use chrono::Utc;
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::RecommendationRow;
use crate::adapter::outbound::sqlite::database::schema::recommendations;
use crate::domain::id::{OwnerId, ProductId};
use crate::domain::recommendation::Recommendation;
use crate::error::{Error, Result};
use crate::port::outbound::store::RecommendationStore;

/// Rows per INSERT statement, well under SQLite's bound-variable limit.
const INSERT_CHUNK: usize = 500;

/// SQLite-backed recommendation store.
#[derive(Clone)]
pub struct SqliteRecommendationStore {
    pool: DbPool,
}

impl SqliteRecommendationStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(recommendation: &Recommendation, computed_at: &str) -> RecommendationRow {
        RecommendationRow {
            owner_id: recommendation.owner_id.get(),
            product_id: recommendation.product_id.get(),
            recommended_product_id: recommendation.recommended_product_id.get(),
            period_tag: recommendation.period_tag.clone(),
            score: recommendation.score,
            computed_at: computed_at.to_string(),
        }
    }

    fn from_row(row: RecommendationRow) -> Recommendation {
        Recommendation {
            owner_id: OwnerId::new(row.owner_id),
            product_id: ProductId::new(row.product_id),
            recommended_product_id: ProductId::new(row.recommended_product_id),
            score: row.score,
            period_tag: row.period_tag,
        }
    }
}

impl RecommendationStore for SqliteRecommendationStore {
    async fn replace(
        &self,
        owner: OwnerId,
        period_tag: &str,
        rows: &[Recommendation],
    ) -> Result<usize> {
        let computed_at = Utc::now().to_rfc3339();
        let new_rows: Vec<RecommendationRow> = rows
            .iter()
            .map(|r| Self::to_row(r, &computed_at))
            .collect();

        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(
                recommendations::table
                    .filter(recommendations::owner_id.eq(owner.get()))
                    .filter(recommendations::period_tag.eq(period_tag)),
            )
            .execute(conn)?;

            let mut written = 0;
            for chunk in new_rows.chunks(INSERT_CHUNK) {
                written += diesel::replace_into(recommendations::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(written)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn list(
        &self,
        owner: OwnerId,
        product: Option<ProductId>,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let mut query = recommendations::table
            .filter(recommendations::owner_id.eq(owner.get()))
            .into_boxed();
        if let Some(product) = product {
            query = query.filter(recommendations::product_id.eq(product.get()));
        }

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<RecommendationRow> = query
            .order((
                recommendations::score.desc(),
                recommendations::product_id.asc(),
                recommendations::recommended_product_id.asc(),
            ))
            .limit(limit)
            .select(RecommendationRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};

    fn setup_test_db() -> DbPool {
        let pool = create_pool(":memory:").expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        pool
    }

    fn rec(owner: i64, product: i64, recommended: i64, score: f64, tag: &str) -> Recommendation {
        Recommendation {
            owner_id: OwnerId::new(owner),
            product_id: ProductId::new(product),
            recommended_product_id: ProductId::new(recommended),
            score,
            period_tag: tag.to_string(),
        }
    }

    #[tokio::test]
    async fn replace_then_list_orders_by_score() {
        let store = SqliteRecommendationStore::new(setup_test_db());
        let rows = vec![rec(1, 1, 2, 10.0, "30d"), rec(1, 1, 3, 50.0, "30d"), rec(1, 2, 1, 20.0, "30d")];

        assert_eq!(store.replace(OwnerId::new(1), "30d", &rows).await.unwrap(), 3);

        let listed = store.list(OwnerId::new(1), None, 200).await.unwrap();
        let scores: Vec<f64> = listed.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![50.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn replace_only_touches_its_scope() {
        let store = SqliteRecommendationStore::new(setup_test_db());
        store
            .replace(OwnerId::new(1), "30d", &[rec(1, 1, 2, 1.0, "30d")])
            .await
            .unwrap();
        store
            .replace(OwnerId::new(1), "7d", &[rec(1, 1, 3, 1.0, "7d")])
            .await
            .unwrap();
        store
            .replace(OwnerId::new(2), "30d", &[rec(2, 5, 6, 1.0, "30d")])
            .await
            .unwrap();

        store
            .replace(OwnerId::new(1), "30d", &[rec(1, 4, 5, 2.0, "30d")])
            .await
            .unwrap();

        let owner_one = store.list(OwnerId::new(1), None, 200).await.unwrap();
        assert_eq!(owner_one.len(), 2);
        assert!(owner_one.iter().any(|r| r.period_tag == "7d"));
        assert!(!owner_one.iter().any(|r| r.product_id == ProductId::new(1) && r.period_tag == "30d"));
        assert_eq!(store.list(OwnerId::new(2), None, 200).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replacing_with_nothing_clears_the_scope() {
        let store = SqliteRecommendationStore::new(setup_test_db());
        store
            .replace(OwnerId::new(1), "30d", &[rec(1, 1, 2, 1.0, "30d")])
            .await
            .unwrap();

        assert_eq!(store.replace(OwnerId::new(1), "30d", &[]).await.unwrap(), 0);
        assert!(store.list(OwnerId::new(1), None, 200).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_product_and_limits() {
        let store = SqliteRecommendationStore::new(setup_test_db());
        let rows: Vec<Recommendation> = (2..10).map(|i| rec(1, 1, i, i as f64, "30d")).collect();
        store.replace(OwnerId::new(1), "30d", &rows).await.unwrap();
        store
            .replace(OwnerId::new(1), "7d", &[rec(1, 2, 1, 100.0, "7d")])
            .await
            .unwrap();

        let product_one = store
            .list(OwnerId::new(1), Some(ProductId::new(1)), 3)
            .await
            .unwrap();
        assert_eq!(product_one.len(), 3);
        assert!(product_one.iter().all(|r| r.product_id == ProductId::new(1)));
        assert_eq!(product_one[0].recommended_product_id, ProductId::new(9));
    }

    #[tokio::test]
    async fn large_replace_spans_several_statements() {
        let store = SqliteRecommendationStore::new(setup_test_db());
        let rows: Vec<Recommendation> = (0..1200).map(|i| rec(1, i, i + 1, 1.0, "30d")).collect();

        assert_eq!(store.replace(OwnerId::new(1), "30d", &rows).await.unwrap(), 1200);
        assert_eq!(store.list(OwnerId::new(1), None, 5000).await.unwrap().len(), 1200);
    }

    #[tokio::test]
    async fn failed_insert_keeps_previous_rows() {
        let pool = setup_test_db();
        let store = SqliteRecommendationStore::new(pool.clone());
        store
            .replace(OwnerId::new(1), "30d", &[rec(1, 1, 2, 7.0, "30d")])
            .await
            .unwrap();

        {
            let mut conn = pool.get().unwrap();
            diesel::sql_query(
                "CREATE TRIGGER reject_recommendations BEFORE INSERT ON recommendations \
                 BEGIN SELECT RAISE(ABORT, 'insert rejected'); END",
            )
            .execute(&mut conn)
            .unwrap();
        }

        let err = store
            .replace(OwnerId::new(1), "30d", &[rec(1, 3, 4, 9.0, "30d")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(_)));

        let kept = store.list(OwnerId::new(1), None, 200).await.unwrap();
        assert_eq!(kept, vec![rec(1, 1, 2, 7.0, "30d")]);
    }

    #[tokio::test]
    async fn missing_table_surfaces_database_error() {
        let pool = create_pool(":memory:").unwrap();
        let store = SqliteRecommendationStore::new(pool);

        let err = store
            .replace(OwnerId::new(1), "30d", &[rec(1, 1, 2, 1.0, "30d")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }
}
