//! Group membership reconciliation for zoomsync
//!
//! Keeps a mandatory target group in sync against the full user population:
//! a user belongs to the target group exactly when they exist in the account
//! and are not a member of any exempt group.
//!
//! The run is a single fetch → plan → apply cycle:
//! - fetch drains all membership lists and fails fast before any mutation;
//! - planning is pure set algebra over the fetched sets;
//! - apply issues batched adds and sequential removes, tolerating and
//!   reporting individual failures.

mod engine;
mod plan;
mod report;

// Re-exports
pub use engine::{ReconcileConfig, Reconciler, DEFAULT_BATCH_SIZE};
pub use plan::{MembershipSnapshot, ReconciliationPlan};
pub use report::{MembershipSets, MutationFailure, ReconciliationReport};
