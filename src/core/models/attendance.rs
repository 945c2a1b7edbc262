use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    #[display("present")]
    Present,
    #[display("absent")]
    Absent,
    #[display("half-day")]
    HalfDay,
    #[display("work-from-home")]
    WorkFromHome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub employee_id: String,
    pub date: String,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub work_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    pub fn is_checked_in(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub half_day: u32,
    pub work_from_home: u32,
    pub total_work_hours: f64,
}

/// Body of `POST /attendance/mark`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkAttendance {
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of check-in / check-out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial attendance record for corrections
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
