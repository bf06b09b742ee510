//! Structured reconciliation run results.
//!
//! Apply-phase failures are accumulated and returned to the caller instead
//! of being logged and dropped; a run with partial mutation failures is
//! still a completed run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{MembershipSnapshot, ReconciliationPlan};

/// A single failed mutation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MutationFailure {
    /// An add-members batch call failed; the whole batch was rejected.
    Batch {
        /// Zero-based index of the batch within the add sequence.
        batch_index: usize,
        /// Members the batch carried.
        member_ids: Vec<String>,
        /// Upstream status code, if the call completed.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        /// Error description.
        message: String,
    },
    /// A single remove-member call failed.
    Single {
        /// The member that could not be removed.
        member_id: String,
        /// Upstream status code, if the call completed.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        /// Error description.
        message: String,
    },
}

/// The raw membership sets a run was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipSets {
    /// Every user in the account.
    pub all_users: Vec<String>,
    /// Members of the target group at fetch time.
    pub target_members: Vec<String>,
    /// Members of each exempt group, keyed by group ID.
    pub exempt_members: BTreeMap<String, Vec<String>>,
}

/// Terminal result of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Users the plan added to the target group.
    pub to_add: Vec<String>,
    /// Users the plan removed from the target group.
    pub to_remove: Vec<String>,
    /// The fetched membership sets, for observability.
    pub memberships: MembershipSets,
    /// Mutation calls that failed; empty on a clean run.
    pub failures: Vec<MutationFailure>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
}

impl ReconciliationReport {
    /// Assembles the report from the run's snapshot, plan and failures.
    #[must_use]
    pub fn new(
        snapshot: MembershipSnapshot,
        plan: ReconciliationPlan,
        failures: Vec<MutationFailure>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            to_add: plan.to_add.into_iter().collect(),
            to_remove: plan.to_remove.into_iter().collect(),
            memberships: MembershipSets {
                all_users: snapshot.all_users.into_iter().collect(),
                target_members: snapshot.target_members.into_iter().collect(),
                exempt_members: snapshot
                    .exempt_members
                    .into_iter()
                    .map(|(group_id, members)| (group_id, members.into_iter().collect()))
                    .collect(),
            },
            failures,
            started_at,
            completed_at,
        }
    }

    /// Returns true if every mutation call succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_report_serialization() {
        let snapshot = MembershipSnapshot {
            all_users: BTreeSet::from(["a".to_string(), "b".to_string()]),
            target_members: BTreeSet::from(["b".to_string()]),
            exempt_members: vec![("e1".to_string(), BTreeSet::new())],
        };
        let plan = ReconciliationPlan {
            to_add: BTreeSet::from(["a".to_string()]),
            to_remove: BTreeSet::new(),
        };

        let report = ReconciliationReport::new(snapshot, plan, Vec::new(), Utc::now(), Utc::now());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["to_add"], serde_json::json!(["a"]));
        assert!(json["memberships"]["exempt_members"]
            .as_object()
            .unwrap()
            .contains_key("e1"));
        assert!(report.is_clean());
    }

    #[test]
    fn test_failure_tagging() {
        let failure = MutationFailure::Batch {
            batch_index: 1,
            member_ids: vec!["x".to_string()],
            status: Some(429),
            message: "too many requests".to_string(),
        };

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "batch");
        assert_eq!(json["batch_index"], 1);

        let failure = MutationFailure::Single {
            member_id: "y".to_string(),
            status: None,
            message: "connection reset".to_string(),
        };

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "single");
        assert!(json.get("status").is_none());
    }
}
