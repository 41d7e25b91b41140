//! Repository for the `landmarks` table.
//!
//! Every query is scoped by `user_id`; a landmark owned by someone else is
//! indistinguishable from one that does not exist.

use sqlx::PgPool;
use waymark_core::search::{contains_pattern, non_blank};
use waymark_core::types::DbId;

use crate::models::landmark::{CreateLandmark, Landmark, LandmarkFilter, UpdateLandmark};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, latitude, longitude, description, category, \
                       created_at, updated_at";

/// Provides CRUD operations for landmarks.
pub struct LandmarkRepo;

impl LandmarkRepo {
    /// Insert a new landmark, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateLandmark,
    ) -> Result<Landmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO landmarks (user_id, name, latitude, longitude, description, category)
             VALUES ($1, $2, $3, $4, COALESCE($5, ''), COALESCE($6, 'other'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Landmark>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.location.latitude)
            .bind(&input.location.longitude)
            .bind(&input.description)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Find one of the user's landmarks by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Landmark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM landmarks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Landmark>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the user's landmarks among `ids`. Missing ids are skipped.
    pub async fn find_many(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Landmark>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("SELECT {COLUMNS} FROM landmarks WHERE user_id = $1 AND id = ANY($2)");
        sqlx::query_as::<_, Landmark>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Subset of `ids` naming landmarks that exist and belong to the user.
    pub async fn live_ids(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>("SELECT id FROM landmarks WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List the user's landmarks, most recently created first.
    ///
    /// `name` and `description` match case-insensitive substrings, `category`
    /// matches exactly. Blank filters are ignored.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &LandmarkFilter,
    ) -> Result<Vec<Landmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM landmarks
             WHERE user_id = $1
               AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\\')
               AND ($3::TEXT IS NULL OR description ILIKE $3 ESCAPE '\\')
               AND ($4::TEXT IS NULL OR category = $4)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Landmark>(&query)
            .bind(user_id)
            .bind(non_blank(filter.name.as_deref()).map(contains_pattern))
            .bind(non_blank(filter.description.as_deref()).map(contains_pattern))
            .bind(non_blank(filter.category.as_deref()))
            .fetch_all(pool)
            .await
    }

    /// Update a landmark. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no landmark with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateLandmark,
    ) -> Result<Option<Landmark>, sqlx::Error> {
        let query = format!(
            "UPDATE landmarks SET
                name = COALESCE($3, name),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                description = COALESCE($6, description),
                category = COALESCE($7, category)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Landmark>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.latitude())
            .bind(input.longitude())
            .bind(&input.description)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's landmarks. Returns `true` if a row was removed.
    ///
    /// Dependent plans and visits are not touched here.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM landmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
