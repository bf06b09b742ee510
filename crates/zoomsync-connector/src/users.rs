//! User listing from the Zoom API.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{ZoomClient, ZoomResult};

/// A Zoom user record as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomUser {
    /// Zoom user ID.
    pub id: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// License type (1 = basic, 2 = licensed).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<u8>,
    /// Account status (active, inactive, pending).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ZoomClient {
    /// Fetches all users in the account, draining every page.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ZoomResult<Vec<ZoomUser>> {
        let mut users = Vec::new();

        self.get_paginated("/users", "users", |page: Vec<ZoomUser>| {
            users.extend(page);
            Ok(())
        })
        .await?;

        info!(count = users.len(), "Fetched all users");

        Ok(users)
    }

    /// Fetches the IDs of all users in the account.
    #[instrument(skip(self))]
    pub async fn list_user_ids(&self) -> ZoomResult<Vec<String>> {
        let mut ids = Vec::new();

        self.get_paginated("/users", "users", |page: Vec<serde_json::Value>| {
            for value in page {
                if let Some(id) = value.get("id").and_then(|v| v.as_str()) {
                    ids.push(id.to_string());
                }
            }
            Ok(())
        })
        .await?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_parsing_full() {
        let json = serde_json::json!({
            "id": "u-123",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "type": 2,
            "status": "active"
        });

        let user: ZoomUser = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, "u-123");
        assert_eq!(user.user_type, Some(2));
        assert_eq!(user.status.as_deref(), Some("active"));
    }

    #[test]
    fn test_user_parsing_minimal() {
        let json = serde_json::json!({"id": "u-456"});

        let user: ZoomUser = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, "u-456");
        assert!(user.email.is_none());
    }
}
