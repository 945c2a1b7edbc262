use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[display("pending")]
    Pending,
    #[display("paid")]
    Paid,
    #[display("cancelled")]
    Cancelled,
}

/// Allowance or deduction line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub employee_id: String,
    pub month: u32,
    pub year: u32,
    pub basic_salary: f64,
    #[serde(default)]
    pub allowances: Vec<PayComponent>,
    #[serde(default)]
    pub deductions: Vec<PayComponent>,
    pub net_salary: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub generated_by: String,
    #[serde(default)]
    pub generated_at: String,
}

impl PayrollRecord {
    pub fn total_allowances(&self) -> f64 {
        self.allowances.iter().map(|a| a.amount).sum()
    }

    pub fn total_deductions(&self) -> f64 {
        self.deductions.iter().map(|d| d.amount).sum()
    }
}

/// Body of `POST /payroll/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePayroll {
    pub month: u32,
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollGenerated {
    pub generated_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollCancellation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
