use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[display("full-time")]
    FullTime,
    #[display("part-time")]
    PartTime,
    #[display("contract")]
    Contract,
    #[display("intern")]
    Intern,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    #[display("active")]
    Active,
    #[display("on-leave")]
    OnLeave,
    #[display("terminated")]
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Employee directory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub department: String,
    pub position: String,
    pub joining_date: String,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub employment_type: EmploymentType,
    pub status: EmployeeStatus,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial employee for create/update; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employee_input_omits_unset_fields() {
        let input = EmployeeInput {
            department: Some("Finance".into()),
            status: Some(EmployeeStatus::OnLeave),
            ..Default::default()
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"department": "Finance", "status": "on-leave"}));
    }

    #[test]
    fn test_employee_decodes_with_optional_sections() {
        let employee: Employee = serde_json::from_value(json!({
            "_id": "e-1",
            "employeeId": "EMP-001",
            "userId": "u-1",
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "phone": "555-0100",
            "department": "Engineering",
            "position": "Engineer",
            "joiningDate": "2021-03-01",
            "address": {"street": "1 Main", "city": "Arlington", "state": "VA",
                        "zipCode": "22201", "country": "US"},
            "employmentType": "full-time",
            "status": "active"
        }))
        .unwrap();

        assert_eq!(employee.full_name(), "Grace Hopper");
        assert_eq!(employee.employment_type, EmploymentType::FullTime);
        assert_eq!(employee.address.unwrap().zip_code, "22201");
        assert!(employee.emergency_contact.is_none());
        assert!(employee.documents.is_empty());
    }
}
