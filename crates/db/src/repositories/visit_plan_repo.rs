//! Repository for the `visit_plans` and `visit_plan_entries` tables.

use std::collections::HashMap;

use sqlx::PgPool;
use waymark_core::plan::PlanEntry;
use waymark_core::types::DbId;

use crate::models::visit_plan::{
    CreateVisitPlan, PlanEntryRow, UpdateVisitPlan, VisitPlan, VisitPlanWithEntries,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, planned_date, overall_notes, created_at, updated_at";

const ENTRY_COLUMNS: &str = "plan_id, position, landmark_id, notes";

/// Provides CRUD operations for visit plans and their entries.
pub struct VisitPlanRepo;

impl VisitPlanRepo {
    /// Insert a plan and its entries in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateVisitPlan,
    ) -> Result<VisitPlanWithEntries, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO visit_plans (user_id, name, planned_date, overall_notes)
             VALUES ($1, $2, COALESCE($3, NOW()), COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        let plan = sqlx::query_as::<_, VisitPlan>(&insert_query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.planned_date)
            .bind(&input.overall_notes)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_entries_inner(&mut tx, plan.id, &input.entries).await?;

        tx.commit().await?;
        Ok(VisitPlanWithEntries {
            plan,
            entries: input.entries.clone(),
        })
    }

    /// Find one of the user's plans by ID, with entries.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<VisitPlanWithEntries>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visit_plans WHERE id = $1 AND user_id = $2");
        let plan = sqlx::query_as::<_, VisitPlan>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        match plan {
            Some(plan) => {
                let entries = Self::entries_for_plan(pool, plan.id).await?;
                Ok(Some(VisitPlanWithEntries { plan, entries }))
            }
            None => Ok(None),
        }
    }

    /// List the user's plans with entries, most recently created first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<VisitPlanWithEntries>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visit_plans
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        let plans = sqlx::query_as::<_, VisitPlan>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        if plans.is_empty() {
            return Ok(Vec::new());
        }

        let plan_ids: Vec<DbId> = plans.iter().map(|p| p.id).collect();
        let entry_query = format!(
            "SELECT {ENTRY_COLUMNS} FROM visit_plan_entries
             WHERE plan_id = ANY($1)
             ORDER BY plan_id, position"
        );
        let rows = sqlx::query_as::<_, PlanEntryRow>(&entry_query)
            .bind(&plan_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<PlanEntry>> = HashMap::new();
        for row in rows {
            grouped.entry(row.plan_id).or_default().push(row.into());
        }

        Ok(plans
            .into_iter()
            .map(|plan| {
                let entries = grouped.remove(&plan.id).unwrap_or_default();
                VisitPlanWithEntries { plan, entries }
            })
            .collect())
    }

    /// Update a plan. Only non-`None` fields in `input` are applied; a new
    /// entry list replaces the old one in the same transaction.
    ///
    /// Returns `None` if the user has no plan with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateVisitPlan,
    ) -> Result<Option<VisitPlanWithEntries>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE visit_plans SET
                name = COALESCE($3, name),
                planned_date = COALESCE($4, planned_date),
                overall_notes = COALESCE($5, overall_notes)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let plan = sqlx::query_as::<_, VisitPlan>(&update_query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.planned_date)
            .bind(&input.overall_notes)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        if let Some(entries) = &input.entries {
            Self::set_entries_inner(&mut tx, plan.id, entries).await?;
        }

        tx.commit().await?;

        let entries = match &input.entries {
            Some(entries) => entries.clone(),
            None => Self::entries_for_plan(pool, plan.id).await?,
        };
        Ok(Some(VisitPlanWithEntries { plan, entries }))
    }

    /// Delete one of the user's plans. Entries go with it.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM visit_plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several of the user's plans, returning how many went.
    pub async fn delete_many(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM visit_plans WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// IDs of the user's plans with at least one entry pointing at `landmark_id`.
    pub async fn ids_referencing_landmark(
        pool: &PgPool,
        user_id: DbId,
        landmark_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT p.id FROM visit_plans p
             JOIN visit_plan_entries e ON e.plan_id = p.id
             WHERE p.user_id = $1 AND e.landmark_id = $2
             ORDER BY p.id",
        )
        .bind(user_id)
        .bind(landmark_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Entry helpers
    // -----------------------------------------------------------------------

    /// Entries of one plan in order.
    pub async fn entries_for_plan(
        pool: &PgPool,
        plan_id: DbId,
    ) -> Result<Vec<PlanEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM visit_plan_entries
             WHERE plan_id = $1
             ORDER BY position"
        );
        let rows = sqlx::query_as::<_, PlanEntryRow>(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PlanEntry::from).collect())
    }

    async fn set_entries_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plan_id: DbId,
        entries: &[PlanEntry],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM visit_plan_entries WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&mut **tx)
            .await?;

        for (position, entry) in entries.iter().enumerate() {
            sqlx::query(
                "INSERT INTO visit_plan_entries (plan_id, position, landmark_id, notes)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(plan_id)
            .bind(position as i32)
            .bind(entry.landmark_id)
            .bind(&entry.notes)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
