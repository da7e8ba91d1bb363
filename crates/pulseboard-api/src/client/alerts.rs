// Alert endpoints
//
// Paginated alert history plus read/resolve state changes.

use tracing::debug;

use crate::client::ApiClient;
use crate::envelope::Page;
use crate::error::Error;
use crate::models::ApiAlert;

impl ApiClient {
    /// List alerts, most recent first.
    ///
    /// `GET /api/alerts?page={page}&limit={limit}`
    pub async fn list_alerts(&self, page: u32, limit: u32) -> Result<Page<ApiAlert>, Error> {
        let url = self.api_url("alerts");
        debug!(page, limit, "listing alerts");
        self.get_paged(
            url,
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Mark a single alert as read.
    ///
    /// `PATCH /api/alerts/{id}/read`
    pub async fn mark_alert_read(&self, alert_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("alerts/{alert_id}/read"));
        debug!(alert_id, "marking alert read");
        self.patch_empty(url).await
    }

    /// Mark every alert as read.
    ///
    /// `PATCH /api/alerts/read-all`
    pub async fn mark_all_alerts_read(&self) -> Result<(), Error> {
        let url = self.api_url("alerts/read-all");
        debug!("marking all alerts read");
        self.patch_empty(url).await
    }

    /// Resolve an alert.
    ///
    /// `PATCH /api/alerts/{id}/resolve`
    pub async fn resolve_alert(&self, alert_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("alerts/{alert_id}/resolve"));
        debug!(alert_id, "resolving alert");
        self.patch_empty(url).await
    }
}
