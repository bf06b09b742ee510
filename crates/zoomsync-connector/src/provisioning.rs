//! Outbound user provisioning and dummy-user generation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{ZoomClient, ZoomResult};

/// Name pools for generated test users.
const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Chris", "Sara", "Mike", "Laura", "James", "Mary", "Robert", "Patricia",
    "Michael", "Linda", "William", "Elizabeth", "David", "Jennifer", "Joseph", "Susan", "Thomas",
    "Jessica",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia",
    "Martinez", "Robinson",
];

/// Request to create a user in Zoom.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    /// Creation action (`create` provisions directly, `custCreate` skips activation email).
    pub action: String,
    /// User profile fields.
    pub user_info: UserInfo,
}

/// Profile fields for user creation.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// Email address (must be unique in the account).
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Display name.
    pub display_name: String,
    /// License type (1 = basic).
    #[serde(rename = "type")]
    pub user_type: u8,
}

/// Created user response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUser {
    /// Zoom user ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Builds a creation request for a random basic-license test user.
///
/// Names are drawn from fixed pools; the email is made unique with a random
/// four-digit suffix.
pub fn dummy_user_request<R: Rng>(rng: &mut R) -> CreateUserRequest {
    let first_name = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last_name = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    let suffix: u16 = rng.gen_range(1000..10000);

    CreateUserRequest {
        action: "create".to_string(),
        user_info: UserInfo {
            email: format!(
                "{}.{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                suffix
            ),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            display_name: format!("{first_name} {last_name}"),
            user_type: 1,
        },
    }
}

impl ZoomClient {
    /// Creates a user in the Zoom account.
    #[instrument(skip(self, request), fields(email = %request.user_info.email))]
    pub async fn create_user(&self, request: &CreateUserRequest) -> ZoomResult<CreatedUser> {
        let created: CreatedUser = self.post("/users", request).await?;

        info!(id = %created.id, "User created");

        Ok(created)
    }
}
