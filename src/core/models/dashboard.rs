use serde::{Deserialize, Serialize};

use super::{AttendanceSummary, LeaveBalance};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: u32,
    pub present_today: u32,
    pub on_leave: u32,
    pub open_positions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[display("low")]
    Low,
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

/// Pending work item on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub count: u32,
    pub priority: TaskPriority,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReview {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub review_type: String,
    pub review_date: String,
    pub reviewer_id: String,
    pub reviewer_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDashboardData {
    pub attendance_summary: AttendanceSummary,
    #[serde(default)]
    pub leave_balance: Vec<LeaveBalance>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub upcoming_reviews: Vec<UpcomingReview>,
}
