//! Request handlers for the synchronization API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use zoomsync_connector::{dummy_user_request, CreateUserRequest, CreatedUser, GroupMember, ZoomUser};
use zoomsync_reconcile::ReconciliationReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Drained membership of a single group.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupMembersResponse {
    /// The group that was listed.
    pub group_id: String,
    /// Number of members found.
    pub total: usize,
    /// Full member records.
    #[schema(value_type = Vec<Object>)]
    pub members: Vec<GroupMember>,
}

/// One failed dummy-user creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct DummyUserFailure {
    /// Email of the generated user that could not be created.
    pub email: String,
    /// Upstream status code, if the call completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error description.
    pub message: String,
}

/// Outcome of a dummy-user generation request.
#[derive(Debug, Serialize, ToSchema)]
pub struct DummyUserReport {
    /// How many users were requested.
    pub requested: u32,
    /// Users that were created.
    #[schema(value_type = Vec<Object>)]
    pub created: Vec<CreatedUser>,
    /// Creations that failed.
    pub failures: Vec<DummyUserFailure>,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Lists every user in the Zoom account, draining all pages.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Full user list"),
        (status = 400, description = "Token acquisition failed"),
        (status = "4XX", description = "Upstream fetch failure (status propagated)"),
    ),
    tag = "Users"
)]
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ZoomUser>>, ApiError> {
    let users = state.client.list_users().await?;

    tracing::info!(count = users.len(), "Listed users");

    Ok(Json(users))
}

/// Lists the full membership of one group, draining all pages.
#[utoipa::path(
    get,
    path = "/groups/{group_id}/members",
    params(("group_id" = String, Path, description = "Zoom group ID")),
    responses(
        (status = 200, description = "Full member list", body = GroupMembersResponse),
        (status = 400, description = "Token acquisition failed"),
        (status = "4XX", description = "Upstream fetch failure (status propagated)"),
    ),
    tag = "Groups"
)]
pub async fn list_group_members_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupMembersResponse>, ApiError> {
    let members = state.client.list_group_members(&group_id).await?;

    Ok(Json(GroupMembersResponse {
        total: members.len(),
        group_id,
        members,
    }))
}

/// Runs a full reconciliation cycle: fetch all memberships, compute the
/// plan, apply it.
///
/// A run with failed mutation calls still answers 200; callers must inspect
/// the `failures` list in the body to detect partial application.
#[utoipa::path(
    post,
    path = "/reconcile",
    responses(
        (status = 200, description = "Run completed; body carries the plan, the fetched sets and any mutation failures"),
        (status = 400, description = "Token acquisition failed"),
        (status = "4XX", description = "Upstream fetch failure (status propagated); nothing was mutated"),
    ),
    tag = "Reconciliation"
)]
pub async fn reconcile_handler(
    State(state): State<AppState>,
) -> Result<Json<ReconciliationReport>, ApiError> {
    let report = state.reconciler.run().await?;

    tracing::info!(
        added = report.to_add.len(),
        removed = report.to_remove.len(),
        failures = report.failures.len(),
        "Reconciliation run completed"
    );

    Ok(Json(report))
}

/// Creates `count` random test users in the Zoom account.
///
/// Creations run sequentially; individual failures are reported in the body
/// and do not stop the remaining creations.
#[utoipa::path(
    post,
    path = "/users/dummy/{count}",
    params(("count" = i64, Path, description = "Number of users to create (>= 1)")),
    responses(
        (status = 200, description = "Generation completed", body = DummyUserReport),
        (status = 400, description = "Count below 1 or token acquisition failed"),
    ),
    tag = "Users"
)]
pub async fn create_dummy_users_handler(
    State(state): State<AppState>,
    Path(count): Path<i64>,
) -> Result<Json<DummyUserReport>, ApiError> {
    // Validate before any network call.
    if count < 1 {
        return Err(ApiError::InvalidCount);
    }
    let count = u32::try_from(count).map_err(|_| ApiError::InvalidCount)?;

    let mut created = Vec::new();
    let mut failures = Vec::new();

    for _ in 0..count {
        let request = next_dummy_request();
        match state.client.create_user(&request).await {
            Ok(user) => created.push(user),
            Err(e) => {
                // Token failure means every remaining creation would also
                // fail; surface it as the run's error.
                if let zoomsync_connector::ZoomError::Auth(msg) = &e {
                    return Err(ApiError::Auth(msg.clone()));
                }
                tracing::warn!(email = %request.user_info.email, error = %e, "Failed to create dummy user");
                failures.push(DummyUserFailure {
                    email: request.user_info.email.clone(),
                    status: e.upstream_status(),
                    message: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        requested = count,
        created = created.len(),
        failures = failures.len(),
        "Dummy user generation completed"
    );

    Ok(Json(DummyUserReport {
        requested: count,
        created,
        failures,
    }))
}

/// Draws a fresh randomized creation request.
fn next_dummy_request() -> CreateUserRequest {
    let mut rng = rand::thread_rng();
    dummy_user_request(&mut rng)
}
