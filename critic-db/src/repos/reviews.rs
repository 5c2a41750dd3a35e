//! Review repository for create/list/delete on stored reviews

use crate::error::{Error, Result};
use crate::models::{NewReview, ReviewRecord};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

/// Maximum number of records returned by a history listing
pub const HISTORY_LIMIT: u32 = 100;

/// Repository for managing stored reviews
pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new review and return the persisted record
    pub async fn create(&self, review: NewReview) -> Result<ReviewRecord> {
        let created_at = review.created_at.unwrap_or_else(Utc::now);

        let result = sqlx::query(
            r#"
            INSERT INTO reviews (code, response, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&review.code)
        .bind(&review.response)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Inserted review");

        self.get(id).await
    }

    /// Get a review by its identifier
    pub async fn get(&self, id: i64) -> Result<ReviewRecord> {
        sqlx::query_as::<_, ReviewRecord>(
            "SELECT id, code, response, created_at FROM reviews WHERE id = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => Error::ReviewNotFound(id),
            e => e.into(),
        })
    }

    /// List the most recent reviews, newest first
    ///
    /// Ties on the timestamp are broken by identifier so the order is total.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<ReviewRecord>> {
        sqlx::query_as::<_, ReviewRecord>(
            r#"
            SELECT id, code, response, created_at FROM reviews
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a review by identifier
    ///
    /// Returns whether a record was removed. Unknown identifiers are not an error.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count stored reviews
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    async fn setup_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open(&db_path).await.unwrap();
        (db, temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_get_review() {
        let (db, _temp) = setup_test_db().await;
        let repo = db.reviews();

        let record = repo.create(NewReview::new("x=1", "Use a descriptive name")).await.unwrap();
        assert!(record.id > 0);
        assert_eq!(record.code, "x=1");
        assert_eq!(record.response, "Use a descriptive name");

        let fetched = repo.get(record.id).await.unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_identifiers_are_unique() {
        let (db, _temp) = setup_test_db().await;
        let repo = db.reviews();

        let a = repo.create(NewReview::new("a", "ra")).await.unwrap();
        let b = repo.create(NewReview::new("b", "rb")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_missing_review() {
        let db = Database::in_memory().await.unwrap();
        let err = db.reviews().get(999).await.unwrap_err();
        assert!(matches!(err, Error::ReviewNotFound(999)));
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let t2 = t1 + Duration::minutes(5);
        let t3 = t1 + Duration::hours(2);

        // Insert out of order so the result cannot just be insertion order
        repo.create(NewReview::new("second", "r2").with_created_at(t2)).await.unwrap();
        repo.create(NewReview::new("third", "r3").with_created_at(t3)).await.unwrap();
        repo.create(NewReview::new("first", "r1").with_created_at(t1)).await.unwrap();

        let listed = repo.list_recent(HISTORY_LIMIT).await.unwrap();
        let codes: Vec<_> = listed.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["third", "second", "first"]);
        assert_eq!(listed[0].created_at, t3);
    }

    #[tokio::test]
    async fn test_list_recent_breaks_ties_by_id() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        let a = repo.create(NewReview::new("a", "r").with_created_at(at)).await.unwrap();
        let b = repo.create(NewReview::new("b", "r").with_created_at(at)).await.unwrap();

        let listed = repo.list_recent(HISTORY_LIMIT).await.unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[tokio::test]
    async fn test_list_recent_is_capped() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        for i in 0..105 {
            let review = NewReview::new(format!("code {i}"), "ok")
                .with_created_at(start + Duration::seconds(i));
            repo.create(review).await.unwrap();
        }

        let listed = repo.list_recent(HISTORY_LIMIT).await.unwrap();
        assert_eq!(listed.len(), 100);
        assert_eq!(listed[0].code, "code 104");
        assert_eq!(listed[99].code, "code 5");
        assert_eq!(repo.count().await.unwrap(), 105);
    }

    #[tokio::test]
    async fn test_delete_review() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let keep = repo.create(NewReview::new("keep", "r")).await.unwrap();
        let gone = repo.create(NewReview::new("gone", "r")).await.unwrap();

        assert!(repo.delete(gone.id).await.unwrap());

        let listed = repo.list_recent(HISTORY_LIMIT).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_delete_unknown_review_is_not_an_error() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();
        repo.create(NewReview::new("a", "r")).await.unwrap();

        assert!(!repo.delete(12345).await.unwrap());
        assert_eq!(repo.list_recent(HISTORY_LIMIT).await.unwrap().len(), 1);
    }
}
