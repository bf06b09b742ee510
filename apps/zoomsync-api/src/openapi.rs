//! OpenAPI document for the synchronization API.

use axum::Json;
use utoipa::OpenApi;

use crate::error::ProblemDetails;
use crate::handlers::{DummyUserFailure, DummyUserReport, GroupMembersResponse, HealthResponse};

/// OpenAPI documentation root.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "zoomsync API",
        description = "Zoom group membership synchronization: reconciliation runs, \
                       read-only inspection and test-data generation."
    ),
    paths(
        crate::handlers::health_handler,
        crate::handlers::list_users_handler,
        crate::handlers::list_group_members_handler,
        crate::handlers::reconcile_handler,
        crate::handlers::create_dummy_users_handler,
    ),
    components(schemas(
        HealthResponse,
        GroupMembersResponse,
        DummyUserReport,
        DummyUserFailure,
        ProblemDetails,
    )),
    tags(
        (name = "Health", description = "Liveness probes"),
        (name = "Users", description = "Account user listing and test-data generation"),
        (name = "Groups", description = "Group membership inspection"),
        (name = "Reconciliation", description = "Target group reconciliation runs"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document as JSON.
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
