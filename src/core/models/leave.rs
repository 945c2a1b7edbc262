use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[display("pending")]
    Pending,
    #[display("approved")]
    Approved,
    #[display("rejected")]
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub employee_id: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Remaining allowance for one leave type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    #[serde(rename = "type")]
    pub leave_type: String,
    pub total: f64,
    pub used: f64,
    pub remaining: f64,
}

/// New leave request; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of approve/reject
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaveDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
