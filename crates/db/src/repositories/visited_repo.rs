//! Repository for the `visited_landmarks` table.

use sqlx::PgPool;
use waymark_core::search::{contains_pattern, non_blank};
use waymark_core::types::DbId;

use crate::models::visited::{CreateVisit, UpdateVisit, VisitFilter, VisitedLandmark};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, landmark_id, visited_date, visitor_name, notes, rating, \
                       created_at, updated_at";

/// Provides CRUD operations for visit records.
pub struct VisitedRepo;

impl VisitedRepo {
    /// Insert a new visit record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateVisit,
    ) -> Result<VisitedLandmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO visited_landmarks
                (user_id, landmark_id, visited_date, visitor_name, notes, rating)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisitedLandmark>(&query)
            .bind(user_id)
            .bind(input.landmark_id)
            .bind(input.visited_date)
            .bind(&input.visitor_name)
            .bind(&input.notes)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Find one of the user's visit records by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<VisitedLandmark>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM visited_landmarks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, VisitedLandmark>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the user's visit records, most recent visit first.
    ///
    /// Rows are returned whether or not their landmark still exists; pruning
    /// is the caller's job.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &VisitFilter,
    ) -> Result<Vec<VisitedLandmark>, sqlx::Error> {
        let (day_start, day_end) = filter.day.unzip();
        let query = format!(
            "SELECT {COLUMNS} FROM visited_landmarks
             WHERE user_id = $1
               AND ($2::TIMESTAMPTZ IS NULL OR visited_date >= $2)
               AND ($3::TIMESTAMPTZ IS NULL OR visited_date < $3)
               AND ($4::TEXT IS NULL OR visitor_name ILIKE $4 ESCAPE '\\')
               AND ($5::INTEGER IS NULL OR rating = $5)
             ORDER BY visited_date DESC, id DESC"
        );
        sqlx::query_as::<_, VisitedLandmark>(&query)
            .bind(user_id)
            .bind(day_start)
            .bind(day_end)
            .bind(non_blank(filter.visitor.as_deref()).map(contains_pattern))
            .bind(filter.rating)
            .fetch_all(pool)
            .await
    }

    /// List the user's visits to one landmark, most recent visit first.
    pub async fn list_for_landmark(
        pool: &PgPool,
        user_id: DbId,
        landmark_id: DbId,
    ) -> Result<Vec<VisitedLandmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visited_landmarks
             WHERE user_id = $1 AND landmark_id = $2
             ORDER BY visited_date DESC, id DESC"
        );
        sqlx::query_as::<_, VisitedLandmark>(&query)
            .bind(user_id)
            .bind(landmark_id)
            .fetch_all(pool)
            .await
    }

    /// Update a visit record. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no visit record with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateVisit,
    ) -> Result<Option<VisitedLandmark>, sqlx::Error> {
        let query = format!(
            "UPDATE visited_landmarks SET
                visited_date = COALESCE($3, visited_date),
                visitor_name = COALESCE($4, visitor_name),
                notes = COALESCE($5, notes),
                rating = COALESCE($6, rating)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisitedLandmark>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.visited_date)
            .bind(&input.visitor_name)
            .bind(&input.notes)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's visit records. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM visited_landmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several of the user's visit records, returning how many went.
    pub async fn delete_many(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result =
            sqlx::query("DELETE FROM visited_landmarks WHERE user_id = $1 AND id = ANY($2)")
                .bind(user_id)
                .bind(ids)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
