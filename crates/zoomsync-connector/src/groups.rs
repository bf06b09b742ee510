//! Group membership listing and mutation.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{ZoomClient, ZoomResult};

/// A group member record as returned by the members endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
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
    /// License type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<u8>,
}

/// Request body for the add-members call.
#[derive(Debug, Serialize)]
struct AddMembersRequest<'a> {
    members: Vec<MemberRef<'a>>,
}

/// A member reference by ID.
#[derive(Debug, Serialize)]
struct MemberRef<'a> {
    id: &'a str,
}

impl ZoomClient {
    /// Fetches all member records of a group, draining every page.
    ///
    /// A group with no members yields an empty list, not an error.
    #[instrument(skip(self))]
    pub async fn list_group_members(&self, group_id: &str) -> ZoomResult<Vec<GroupMember>> {
        let path = format!("/groups/{group_id}/members");
        let mut members = Vec::new();

        self.get_paginated(&path, "members", |page: Vec<GroupMember>| {
            members.extend(page);
            Ok(())
        })
        .await?;

        info!(group_id, count = members.len(), "Fetched group members");

        Ok(members)
    }

    /// Fetches the member IDs of a group.
    #[instrument(skip(self))]
    pub async fn fetch_group_member_ids(&self, group_id: &str) -> ZoomResult<Vec<String>> {
        let path = format!("/groups/{group_id}/members");
        let mut member_ids = Vec::new();

        self.get_paginated(&path, "members", |page: Vec<serde_json::Value>| {
            for value in page {
                if let Some(id) = value.get("id").and_then(|v| v.as_str()) {
                    member_ids.push(id.to_string());
                }
            }
            Ok(())
        })
        .await?;

        Ok(member_ids)
    }

    /// Adds a batch of members to a group in a single call.
    ///
    /// The Zoom API limits one call to 30 members; callers are responsible
    /// for chunking larger sets.
    #[instrument(skip(self, member_ids), fields(count = member_ids.len()))]
    pub async fn add_group_members(&self, group_id: &str, member_ids: &[String]) -> ZoomResult<()> {
        let path = format!("/groups/{group_id}/members");
        let request = AddMembersRequest {
            members: member_ids.iter().map(|id| MemberRef { id }).collect(),
        };

        let _: serde_json::Value = self.post(&path, &request).await?;

        info!(group_id, count = member_ids.len(), "Added members to group");

        Ok(())
    }

    /// Removes a single member from a group.
    #[instrument(skip(self))]
    pub async fn remove_group_member(&self, group_id: &str, member_id: &str) -> ZoomResult<()> {
        let path = format!("/groups/{group_id}/members/{member_id}");

        self.delete(&path).await?;

        info!(group_id, member_id, "Removed member from group");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_member_parsing() {
        let json = serde_json::json!({
            "id": "m-1",
            "email": "m1@example.com",
            "type": 1
        });

        let member: GroupMember = serde_json::from_value(json).unwrap();
        assert_eq!(member.id, "m-1");
        assert_eq!(member.user_type, Some(1));
    }

    #[test]
    fn test_add_members_request_shape() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let request = AddMembersRequest {
            members: ids.iter().map(|id| MemberRef { id }).collect(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["members"][0]["id"], "a");
        assert_eq!(json["members"][1]["id"], "b");
    }
}
