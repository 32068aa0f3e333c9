//! Shared query parameter types for API handlers.

use iotwatch_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&pageSize=`).
///
/// Kept as raw strings so that non-numeric values fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.page_size.as_deref())
    }
}
