// Host endpoints
//
// Host inventory reads plus rename/regroup/delete management calls.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiHost, HostUpdate};

impl ApiClient {
    /// List all monitored hosts.
    ///
    /// `GET /api/hosts`
    pub async fn list_hosts(&self) -> Result<Vec<ApiHost>, Error> {
        let url = self.api_url("hosts");
        debug!("listing hosts");
        self.get(url).await
    }

    /// Get a single host by id.
    ///
    /// `GET /api/hosts/{id}`
    pub async fn get_host(&self, host_id: &str) -> Result<ApiHost, Error> {
        let url = self.api_url(&format!("hosts/{host_id}"));
        self.get(url).await
    }

    /// Apply a partial update to a host, returning the updated record.
    ///
    /// `PATCH /api/hosts/{id}`
    pub async fn update_host(&self, host_id: &str, update: &HostUpdate) -> Result<ApiHost, Error> {
        let url = self.api_url(&format!("hosts/{host_id}"));
        debug!(host_id, "updating host");
        self.patch(url, update).await
    }

    /// Remove a host from the inventory.
    ///
    /// `DELETE /api/hosts/{id}`
    pub async fn delete_host(&self, host_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("hosts/{host_id}"));
        debug!(host_id, "deleting host");
        self.delete(url).await
    }
}
