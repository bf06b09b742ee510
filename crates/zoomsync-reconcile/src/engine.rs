//! Reconciliation run orchestration.
//!
//! A run is fetch → plan → apply. The fetch phase fails fast: any upstream
//! error aborts the run before a single mutation is issued. The apply phase
//! is best-effort: each batch and each removal is attempted regardless of
//! earlier failures, and failures are accumulated into the report.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use zoomsync_connector::{ZoomClient, ZoomResult};

use crate::{MembershipSnapshot, MutationFailure, ReconciliationPlan, ReconciliationReport};

/// Zoom rejects add-members calls with more than 30 members.
pub const DEFAULT_BATCH_SIZE: usize = 30;

/// Group wiring and batching for the reconciler.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// The group kept in sync.
    pub target_group_id: String,
    /// Groups whose members are excluded from the target group.
    pub exempt_group_ids: Vec<String>,
    /// Maximum members per add-members call.
    pub batch_size: usize,
}

impl ReconcileConfig {
    /// Creates a configuration with the default batch size.
    #[must_use]
    pub fn new(target_group_id: impl Into<String>, exempt_group_ids: Vec<String>) -> Self {
        Self {
            target_group_id: target_group_id.into(),
            exempt_group_ids,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the add-members batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// Runs fetch → plan → apply cycles against the Zoom API.
#[derive(Debug)]
pub struct Reconciler {
    client: Arc<ZoomClient>,
    config: ReconcileConfig,
}

impl Reconciler {
    /// Creates a reconciler over an existing client.
    #[must_use]
    pub fn new(client: Arc<ZoomClient>, config: ReconcileConfig) -> Self {
        Self { client, config }
    }

    /// Returns the reconciler configuration.
    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Executes one full reconciliation run.
    ///
    /// # Errors
    ///
    /// Returns an error if any membership fetch fails; no mutation has been
    /// issued at that point. Apply-phase failures do not error — they are
    /// reported in the returned [`ReconciliationReport`].
    #[instrument(skip(self), fields(target_group = %self.config.target_group_id))]
    pub async fn run(&self) -> ZoomResult<ReconciliationReport> {
        let started_at = Utc::now();

        let snapshot = self.fetch_snapshot().await?;
        let plan = ReconciliationPlan::compute(&snapshot);

        info!(
            to_add = plan.to_add.len(),
            to_remove = plan.to_remove.len(),
            "Computed reconciliation plan"
        );

        let failures = self.apply(&plan).await;

        if !failures.is_empty() {
            warn!(count = failures.len(), "Run completed with failed mutations");
        }

        Ok(ReconciliationReport::new(
            snapshot,
            plan,
            failures,
            started_at,
            Utc::now(),
        ))
    }

    /// Fetches all membership sets for a run.
    ///
    /// Fetches are sequential and each failure aborts the whole snapshot.
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self) -> ZoomResult<MembershipSnapshot> {
        let all_users = self.client.list_user_ids().await?.into_iter().collect();

        let target_members = self
            .client
            .fetch_group_member_ids(&self.config.target_group_id)
            .await?
            .into_iter()
            .collect();

        let mut exempt_members = Vec::with_capacity(self.config.exempt_group_ids.len());
        for group_id in &self.config.exempt_group_ids {
            let members = self
                .client
                .fetch_group_member_ids(group_id)
                .await?
                .into_iter()
                .collect();
            exempt_members.push((group_id.clone(), members));
        }

        Ok(MembershipSnapshot {
            all_users,
            target_members,
            exempt_members,
        })
    }

    /// Applies a plan, accumulating failures without aborting.
    async fn apply(&self, plan: &ReconciliationPlan) -> Vec<MutationFailure> {
        let mut failures = Vec::new();

        let to_add: Vec<String> = plan.to_add.iter().cloned().collect();
        for (batch_index, batch) in to_add.chunks(self.config.batch_size).enumerate() {
            if let Err(e) = self
                .client
                .add_group_members(&self.config.target_group_id, batch)
                .await
            {
                warn!(batch_index, error = %e, "Failed to add member batch");
                failures.push(MutationFailure::Batch {
                    batch_index,
                    member_ids: batch.to_vec(),
                    status: e.upstream_status(),
                    message: e.to_string(),
                });
            }
        }

        for member_id in &plan.to_remove {
            if let Err(e) = self
                .client
                .remove_group_member(&self.config.target_group_id, member_id)
                .await
            {
                warn!(member_id = %member_id, error = %e, "Failed to remove member");
                failures.push(MutationFailure::Single {
                    member_id: member_id.clone(),
                    status: e.upstream_status(),
                    message: e.to_string(),
                });
            }
        }

        failures
    }
}
