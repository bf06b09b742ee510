//! Membership snapshot and plan computation.
//!
//! The plan is a pure function of the fetched membership sets: a user should
//! be in the target group exactly when they are a known user and not covered
//! by any exempt group.

use std::collections::BTreeSet;

/// Membership sets fetched for one reconciliation run.
///
/// Built fresh on every run; never cached across runs. `BTreeSet` keeps the
/// derived plan, batch contents and report output deterministic.
#[derive(Debug, Clone, Default)]
pub struct MembershipSnapshot {
    /// IDs of every user in the account.
    pub all_users: BTreeSet<String>,
    /// Current members of the target group.
    pub target_members: BTreeSet<String>,
    /// Members of each exempt group, keyed by group ID.
    pub exempt_members: Vec<(String, BTreeSet<String>)>,
}

impl MembershipSnapshot {
    /// Union of all exempt group memberships.
    #[must_use]
    pub fn exempt_union(&self) -> BTreeSet<String> {
        self.exempt_members
            .iter()
            .flat_map(|(_, members)| members.iter().cloned())
            .collect()
    }
}

/// The set of additions and removals derived from a snapshot.
///
/// `to_add` and `to_remove` are disjoint by construction: additions are drawn
/// from users outside the target group, removals from users inside it.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationPlan {
    /// Users to add to the target group.
    pub to_add: BTreeSet<String>,
    /// Users to remove from the target group.
    pub to_remove: BTreeSet<String>,
}

impl ReconciliationPlan {
    /// Computes the plan from a snapshot.
    ///
    /// A user is added when they exist, are not exempt, and are not already a
    /// target member. A user is removed when they are a target member covered
    /// by an exempt group.
    #[must_use]
    pub fn compute(snapshot: &MembershipSnapshot) -> Self {
        let exempt_union = snapshot.exempt_union();

        let to_add = snapshot
            .all_users
            .difference(&exempt_union)
            .filter(|id| !snapshot.target_members.contains(*id))
            .cloned()
            .collect();

        let to_remove = snapshot
            .target_members
            .intersection(&exempt_union)
            .cloned()
            .collect();

        Self { to_add, to_remove }
    }

    /// Returns true if the plan requires no mutation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
