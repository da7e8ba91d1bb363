// Backend response envelopes
//
// Every REST endpoint wraps its payload in `ApiResponse<T>`; list endpoints
// that page additionally carry a `pagination` block. The client strips the
// envelope before the caller sees the payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Standard backend response envelope.
///
/// ```json
/// { "data": ..., "success": true, "message": "optional", "timestamp": "..." }
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Envelope for paginated list endpoints: `ApiResponse` plus a
/// `pagination` block.
#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// An unwrapped page of results: payload plus paging metadata.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl Pagination {
    /// Whether another page exists after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
