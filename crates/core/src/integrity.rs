//! Referential integrity between landmarks and the records that point at them.
//!
//! Visit records and visit plan entries hold plain landmark ids, not foreign
//! keys, so a landmark can disappear underneath them. The rules applied here:
//!
//! - Deleting a landmark first collects every plan of the same owner that
//!   references it, deletes the landmark, then deletes those plans whole.
//!   Visit records are left alone on this path.
//! - Reading visit records or plans drops any dependent whose landmark no
//!   longer resolves and deletes it from the store as a side effect.
//! - Explicitly supplied plan entries and visit targets must all resolve
//!   (strict). Existing entries re-checked on a later save are filtered
//!   silently (lenient).
//!
//! The store is reached only through [`ReferenceStore`], so the rules can be
//! exercised without a database.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::plan::PlanEntry;
use crate::types::{DbId, LandmarkRef};

/// Entity label used in integrity errors.
pub const LANDMARK: &str = "Landmark";

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Store operations the integrity rules need. Every call is owner-scoped.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Error type of the backing store. Integrity failures are raised as
    /// [`CoreError`] and converted into it.
    type Error: From<CoreError> + Send;

    /// Subset of `candidates` that exist and belong to `owner`.
    async fn live_landmark_ids(
        &self,
        owner: DbId,
        candidates: &[DbId],
    ) -> Result<HashSet<DbId>, Self::Error>;

    /// Ids of the owner's plans with at least one entry pointing at `landmark_id`.
    async fn plans_referencing(
        &self,
        owner: DbId,
        landmark_id: DbId,
    ) -> Result<Vec<DbId>, Self::Error>;

    /// Delete one landmark. Returns `false` when it does not exist for `owner`.
    async fn delete_landmark(&self, owner: DbId, landmark_id: DbId) -> Result<bool, Self::Error>;

    /// Delete plans by id, returning how many rows went away.
    async fn delete_plans(&self, owner: DbId, plan_ids: &[DbId]) -> Result<u64, Self::Error>;

    /// Delete visit records by id, returning how many rows went away.
    async fn delete_visits(&self, owner: DbId, visit_ids: &[DbId]) -> Result<u64, Self::Error>;
}

/// Kind of record that depends on landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentKind {
    Visit,
    Plan,
}

/// A stored record holding landmark references.
pub trait LandmarkDependent {
    const KIND: DependentKind;

    /// Primary key of the dependent record itself.
    fn dependent_id(&self) -> DbId;

    /// Every landmark this record points at.
    fn landmark_ids(&self) -> Vec<DbId>;
}

/// Outcome of a cascading landmark delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub landmark_id: DbId,
    pub deleted_plans: u64,
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Split dependents into those whose references all resolve and the ids of
/// those with at least one dangling reference. Order of the kept records is
/// preserved.
pub fn partition_dangling<T: LandmarkDependent>(
    items: Vec<T>,
    live: &HashSet<DbId>,
) -> (Vec<T>, Vec<DbId>) {
    let mut kept = Vec::with_capacity(items.len());
    let mut dangling = Vec::new();
    for item in items {
        if item.landmark_ids().iter().all(|id| live.contains(id)) {
            kept.push(item);
        } else {
            dangling.push(item.dependent_id());
        }
    }
    (kept, dangling)
}

/// Distinct landmark ids referenced by a set of dependents.
fn referenced_ids<T: LandmarkDependent>(items: &[T]) -> Vec<DbId> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(LandmarkDependent::landmark_ids)
        .filter(|id| seen.insert(*id))
        .collect()
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Applies the integrity rules against a [`ReferenceStore`].
pub struct IntegrityService<S> {
    store: S,
}

impl<S: ReferenceStore> IntegrityService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Delete a landmark and every plan of the same owner that references it.
    ///
    /// Not atomic: if the process stops after the landmark is gone, the
    /// remaining plans are removed by the next plan listing.
    pub async fn delete_landmark(
        &self,
        owner: DbId,
        landmark_id: DbId,
    ) -> Result<CascadeReport, S::Error> {
        let affected = self.store.plans_referencing(owner, landmark_id).await?;

        if !self.store.delete_landmark(owner, landmark_id).await? {
            return Err(CoreError::NotFound { entity: LANDMARK }.into());
        }

        let deleted_plans = if affected.is_empty() {
            0
        } else {
            self.store.delete_plans(owner, &affected).await?
        };

        tracing::info!(
            user_id = owner,
            landmark_id,
            deleted_plans,
            "Landmark deleted with dependent plans",
        );

        Ok(CascadeReport {
            landmark_id,
            deleted_plans,
        })
    }

    /// Resolve references that must all exist, in order.
    ///
    /// The first reference that does not parse, does not exist, or belongs to
    /// another user fails the whole call with [`CoreError::MissingReference`]
    /// naming it as sent.
    pub async fn require_live_landmarks(
        &self,
        owner: DbId,
        refs: &[LandmarkRef],
    ) -> Result<Vec<DbId>, S::Error> {
        let resolved: Vec<Option<DbId>> = refs.iter().map(LandmarkRef::resolve).collect();
        let candidates: Vec<DbId> = resolved.iter().flatten().copied().collect();

        let live = if candidates.is_empty() {
            HashSet::new()
        } else {
            self.store.live_landmark_ids(owner, &candidates).await?
        };

        refs.iter()
            .zip(resolved)
            .map(|(raw, id)| match id {
                Some(id) if live.contains(&id) => Ok(id),
                _ => Err(CoreError::MissingReference {
                    entity: LANDMARK,
                    reference: raw.as_str().to_string(),
                }
                .into()),
            })
            .collect()
    }

    /// Drop plan entries whose landmark no longer resolves. Never fails on a
    /// dangling entry; applying it twice yields the same list.
    pub async fn prune_plan_entries(
        &self,
        owner: DbId,
        entries: Vec<PlanEntry>,
    ) -> Result<Vec<PlanEntry>, S::Error> {
        if entries.is_empty() {
            return Ok(entries);
        }
        let ids: Vec<DbId> = entries.iter().map(|e| e.landmark_id).collect();
        let live = self.store.live_landmark_ids(owner, &ids).await?;

        let before = entries.len();
        let kept: Vec<PlanEntry> = entries
            .into_iter()
            .filter(|e| live.contains(&e.landmark_id))
            .collect();

        if kept.len() < before {
            tracing::info!(
                user_id = owner,
                dropped = before - kept.len(),
                "Dropped plan entries referencing missing landmarks",
            );
        }
        Ok(kept)
    }

    /// Filter a freshly read set of dependents, deleting the dangling ones.
    ///
    /// This is the read path's self-healing step: callers must treat the
    /// read that invokes it as mutating.
    pub async fn prune_dangling<T>(&self, owner: DbId, items: Vec<T>) -> Result<Vec<T>, S::Error>
    where
        T: LandmarkDependent + Send,
    {
        let ids = referenced_ids(&items);
        if ids.is_empty() {
            return Ok(items);
        }
        let live = self.store.live_landmark_ids(owner, &ids).await?;
        let (kept, dangling) = partition_dangling(items, &live);

        if !dangling.is_empty() {
            let removed = match T::KIND {
                DependentKind::Visit => self.store.delete_visits(owner, &dangling).await?,
                DependentKind::Plan => self.store.delete_plans(owner, &dangling).await?,
            };
            tracing::info!(
                user_id = owner,
                kind = ?T::KIND,
                removed,
                "Removed records referencing deleted landmarks",
            );
        }
        Ok(kept)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
