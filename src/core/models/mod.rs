//! Wire types exchanged with the HR backend.
//!
//! Field names follow the backend's camelCase JSON with `_id` identifiers.
//! Dates are kept as the ISO strings the backend sends.

mod attendance;
mod dashboard;
mod document;
mod employee;
mod leave;
mod organization;
mod payroll;
mod performance;
mod recruitment;
mod user;

pub use attendance::*;
pub use dashboard::*;
pub use document::*;
pub use employee::*;
pub use leave::*;
pub use organization::*;
pub use payroll::*;
pub use performance::*;
pub use recruitment::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Uniform `{success, message, data}` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Envelope for responses that carry no payload (delete, password actions)
pub type Acknowledgement = ApiResponse<Option<serde_json::Value>>;

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

impl<T> Page<T> {
    /// Number of pages given `limit`, at least 1
    pub fn page_count(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total_count.div_ceil(u64::from(self.limit)).max(1)
    }
}

/// `{success, message, data:{items, totalCount, page, limit}}`
pub type PaginatedResponse<T> = ApiResponse<Page<T>>;
