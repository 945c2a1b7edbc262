use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ReviewType {
    #[serde(rename = "1-on-1")]
    #[display("1-on-1")]
    OneOnOne,
    #[serde(rename = "quarterly-review")]
    #[display("quarterly-review")]
    Quarterly,
    #[serde(rename = "performance-review")]
    #[display("performance-review")]
    Performance,
    #[serde(rename = "probation-review")]
    #[display("probation-review")]
    Probation,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[display("completed")]
    Completed,
    #[display("pending")]
    Pending,
    #[display("missed")]
    Missed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    #[display("not-started")]
    NotStarted,
    #[display("in-progress")]
    InProgress,
    #[display("completed")]
    Completed,
    #[display("overdue")]
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetric {
    pub name: String,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewGoal {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub employee_id: String,
    pub reviewer_id: String,
    pub review_date: String,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    #[serde(default)]
    pub metrics: Vec<ReviewMetric>,
    #[serde(default)]
    pub overall_rating: Option<f32>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub goals: Vec<ReviewGoal>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub review_type: Option<ReviewType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<ReviewGoal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PUT /performance/:id/complete`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCompletion {
    pub metrics: Vec<ReviewMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas_for_improvement: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
