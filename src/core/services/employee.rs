use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, FileUpload, MultipartForm, Transport};
use crate::core::models::{Acknowledgement, Employee, EmployeeInput, EmployeeStatus, PaginatedResponse};
use crate::core::query::{QueryParams, ToQuery, segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SortOrder {
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilters {
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ToQuery for EmployeeFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("department", self.department.as_deref())
            .push_opt("position", self.position.as_deref())
            .push_opt("status", self.status)
            .push_opt("search", self.search.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
            .push_opt("sortBy", self.sort_by.as_deref())
            .push_opt("sortOrder", self.sort_order)
    }
}

pub struct EmployeeService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> EmployeeService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &EmployeeFilters) -> ApiResult<PaginatedResponse<Employee>> {
        self.client
            .fetch_page(ApiRequest::get("/employees").with_query(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Employee> {
        self.client
            .fetch_data(ApiRequest::get(format!("/employees/{}", segment(id))))
            .await
    }

    pub async fn create(&self, input: &EmployeeInput) -> ApiResult<Employee> {
        self.client
            .fetch_data(ApiRequest::post("/employees").json(input))
            .await
    }

    pub async fn update(&self, id: &str, input: &EmployeeInput) -> ApiResult<Employee> {
        self.client
            .fetch_data(ApiRequest::put(format!("/employees/{}", segment(id))).json(input))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/employees/{}", segment(id))))
            .await
    }

    /// Employee record of the logged-in user
    pub async fn me(&self) -> ApiResult<Employee> {
        self.client.fetch_data(ApiRequest::get("/employees/me")).await
    }

    pub async fn upload_profile_image(&self, id: &str, file: FileUpload) -> ApiResult<Employee> {
        let form = MultipartForm::new().file("profileImage", file);
        self.client
            .fetch_data(ApiRequest::post(format!("/employees/{}/upload-profile", segment(id))).multipart(form))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_set_filters_are_sent() {
        let filters = EmployeeFilters {
            department: Some("Engineering".into()),
            status: Some(EmployeeStatus::OnLeave),
            search: Some(String::new()),
            page: Some(2),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };

        let query = filters.to_query();
        assert_eq!(query.get("department"), Some("Engineering"));
        assert_eq!(query.get("status"), Some("on-leave"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("sortOrder"), Some("desc"));
        assert!(query.get("search").is_none());
        assert!(query.get("limit").is_none());
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn test_default_filters_are_empty() {
        assert!(EmployeeFilters::default().to_query().is_empty());
    }
}

#[cfg(all(test, feature = "ssr"))]
mod http_tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::core::test_support::TestHarness;

    fn employee_json(id: &str) -> serde_json::Value {
        json!({
            "_id": id, "employeeId": "EMP-1", "firstName": "Grace", "lastName": "Hopper",
            "email": "g@x.io", "department": "Engineering", "position": "Engineer",
            "joiningDate": "2021-01-01", "employmentType": "full-time", "status": "active"
        })
    }

    #[tokio::test]
    async fn test_list_sends_filters_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .and(query_param("search", "grace"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "",
                "data": {"items": [employee_json("e-1")], "totalCount": 1, "page": 1, "limit": 20}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let page = harness
            .client
            .employees()
            .list(&EmployeeFilters {
                search: Some("grace".into()),
                limit: Some(20),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.data.items.len(), 1);
        assert_eq!(page.data.items[0].full_name(), "Grace Hopper");
        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("search=grace&limit=20"));
    }

    #[tokio::test]
    async fn test_update_sends_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/employees/e-1"))
            .and(body_json(json!({"position": "Staff Engineer"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": employee_json("e-1")})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let employee = harness
            .client
            .employees()
            .update(
                "e-1",
                &EmployeeInput {
                    position: Some("Staff Engineer".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(employee.id, "e-1");
    }

    #[tokio::test]
    async fn test_upload_profile_image_uses_form_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/employees/e-1/upload-profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": employee_json("e-1")})))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness
            .client
            .employees()
            .upload_profile_image("e-1", FileUpload::new("me.png", "image/png", vec![0x89, 0x50]))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        let raw = String::from_utf8_lossy(&received[0].body);
        assert!(raw.contains("name=\"profileImage\""));
        assert!(raw.contains("filename=\"me.png\""));
    }
}
