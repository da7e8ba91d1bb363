// Host group endpoints
//
// Group CRUD plus membership management.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiHostGroup, GroupCreate, GroupUpdate};

impl ApiClient {
    /// List all host groups.
    ///
    /// `GET /api/groups`
    pub async fn list_groups(&self) -> Result<Vec<ApiHostGroup>, Error> {
        let url = self.api_url("groups");
        debug!("listing groups");
        self.get(url).await
    }

    /// Get a single group by id.
    ///
    /// `GET /api/groups/{id}`
    pub async fn get_group(&self, group_id: &str) -> Result<ApiHostGroup, Error> {
        let url = self.api_url(&format!("groups/{group_id}"));
        self.get(url).await
    }

    /// Create a group. The backend assigns id and timestamps.
    ///
    /// `POST /api/groups`
    pub async fn create_group(&self, group: &GroupCreate) -> Result<ApiHostGroup, Error> {
        let url = self.api_url("groups");
        debug!(name = %group.name, "creating group");
        self.post(url, group).await
    }

    /// Apply a partial update to a group, returning the updated record.
    ///
    /// `PATCH /api/groups/{id}`
    pub async fn update_group(
        &self,
        group_id: &str,
        update: &GroupUpdate,
    ) -> Result<ApiHostGroup, Error> {
        let url = self.api_url(&format!("groups/{group_id}"));
        debug!(group_id, "updating group");
        self.patch(url, update).await
    }

    /// Delete a group. Member hosts are left ungrouped, not removed.
    ///
    /// `DELETE /api/groups/{id}`
    pub async fn delete_group(&self, group_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("groups/{group_id}"));
        debug!(group_id, "deleting group");
        self.delete(url).await
    }

    /// Add a host to a group.
    ///
    /// `POST /api/groups/{id}/hosts` with `{"hostId": "..."}`
    pub async fn add_host_to_group(&self, group_id: &str, host_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("groups/{group_id}/hosts"));
        debug!(group_id, host_id, "adding host to group");
        let _: serde_json::Value = self.post(url, &json!({ "hostId": host_id })).await?;
        Ok(())
    }

    /// Remove a host from a group.
    ///
    /// `DELETE /api/groups/{id}/hosts/{hostId}`
    pub async fn remove_host_from_group(
        &self,
        group_id: &str,
        host_id: &str,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("groups/{group_id}/hosts/{host_id}"));
        debug!(group_id, host_id, "removing host from group");
        self.delete(url).await
    }
}
