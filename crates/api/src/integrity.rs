//! PostgreSQL-backed [`ReferenceStore`] used by the integrity rules.

use std::collections::HashSet;

use async_trait::async_trait;
use waymark_core::integrity::ReferenceStore;
use waymark_core::types::DbId;
use waymark_db::repositories::{LandmarkRepo, VisitPlanRepo, VisitedRepo};
use waymark_db::DbPool;

use crate::error::AppError;

/// Reference store over the repositories. Cloning the pool is cheap.
pub struct PgReferenceStore {
    pool: DbPool,
}

impl PgReferenceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceStore for PgReferenceStore {
    type Error = AppError;

    async fn live_landmark_ids(
        &self,
        owner: DbId,
        candidates: &[DbId],
    ) -> Result<HashSet<DbId>, AppError> {
        let live = LandmarkRepo::live_ids(&self.pool, owner, candidates).await?;
        Ok(live.into_iter().collect())
    }

    async fn plans_referencing(
        &self,
        owner: DbId,
        landmark_id: DbId,
    ) -> Result<Vec<DbId>, AppError> {
        Ok(VisitPlanRepo::ids_referencing_landmark(&self.pool, owner, landmark_id).await?)
    }

    async fn delete_landmark(&self, owner: DbId, landmark_id: DbId) -> Result<bool, AppError> {
        Ok(LandmarkRepo::delete(&self.pool, owner, landmark_id).await?)
    }

    async fn delete_plans(&self, owner: DbId, plan_ids: &[DbId]) -> Result<u64, AppError> {
        Ok(VisitPlanRepo::delete_many(&self.pool, owner, plan_ids).await?)
    }

    async fn delete_visits(&self, owner: DbId, visit_ids: &[DbId]) -> Result<u64, AppError> {
        Ok(VisitedRepo::delete_many(&self.pool, owner, visit_ids).await?)
    }
}
