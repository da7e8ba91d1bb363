// Analytics and activity endpoints
//
// Read-only display data: per-host metrics, group rollups, raw activity
// events, and the realtime snapshot. None of this lands in the store.

use tracing::debug;

use crate::client::ApiClient;
use crate::envelope::Page;
use crate::error::Error;
use crate::models::{ActivityEvent, GroupAnalytics, HealthStatus, HostMetrics, TimeRange};

impl ApiClient {
    /// Fetch productivity metrics for one host over a time range.
    ///
    /// `GET /api/hosts/{id}/metrics?start=...&end=...`
    pub async fn host_metrics(
        &self,
        host_id: &str,
        range: &TimeRange,
    ) -> Result<HostMetrics, Error> {
        let url = self.api_url(&format!("hosts/{host_id}/metrics"));
        debug!(host_id, "fetching host metrics");
        self.get_query(url, &range_query(range)).await
    }

    /// Fetch the aggregated analytics rollup for a group.
    ///
    /// `GET /api/groups/{id}/analytics?start=...&end=...`
    pub async fn group_analytics(
        &self,
        group_id: &str,
        range: &TimeRange,
    ) -> Result<GroupAnalytics, Error> {
        let url = self.api_url(&format!("groups/{group_id}/analytics"));
        debug!(group_id, "fetching group analytics");
        self.get_query(url, &range_query(range)).await
    }

    /// List raw activity events, optionally filtered by host, group,
    /// and time range.
    ///
    /// `GET /api/activity/events`
    pub async fn activity_events(
        &self,
        host_id: Option<&str>,
        group_id: Option<&str>,
        range: Option<&TimeRange>,
        page: u32,
        limit: u32,
    ) -> Result<Page<ActivityEvent>, Error> {
        let url = self.api_url("activity/events");

        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(id) = host_id {
            query.push(("hostId", id.to_string()));
        }
        if let Some(id) = group_id {
            query.push(("groupId", id.to_string()));
        }
        if let Some(range) = range {
            query.extend(range_query(range));
        }

        debug!(?host_id, ?group_id, page, limit, "listing activity events");
        self.get_paged(url, &query).await
    }

    /// Fetch the current realtime metrics snapshot. The shape varies by
    /// scope, so the payload stays raw JSON.
    ///
    /// `GET /api/realtime/metrics`
    pub async fn realtime_metrics(
        &self,
        host_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let url = self.api_url("realtime/metrics");

        let mut query = Vec::new();
        if let Some(id) = host_id {
            query.push(("hostId", id.to_string()));
        }
        if let Some(id) = group_id {
            query.push(("groupId", id.to_string()));
        }

        self.get_query(url, &query).await
    }

    /// Backend liveness probe.
    ///
    /// `GET /api/health`
    pub async fn health_check(&self) -> Result<HealthStatus, Error> {
        let url = self.api_url("health");
        self.get(url).await
    }
}

fn range_query(range: &TimeRange) -> [(&'static str, String); 2] {
    [
        ("start", range.start.to_rfc3339()),
        ("end", range.end.to_rfc3339()),
    ]
}
