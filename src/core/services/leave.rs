use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{LeaveBalance, LeaveDecision, LeaveRequest, LeaveRequestInput, LeaveStatus, PaginatedResponse};
use crate::core::query::{QueryParams, ToQuery, segment};

use super::EMPLOYEE_ID_PARAM;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveFilters {
    pub employee_id: Option<String>,
    pub status: Option<LeaveStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for LeaveFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt(EMPLOYEE_ID_PARAM, self.employee_id.as_deref())
            .push_opt("status", self.status)
            .push_opt("startDate", self.start_date.as_deref())
            .push_opt("endDate", self.end_date.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

pub struct LeaveService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> LeaveService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &LeaveFilters) -> ApiResult<PaginatedResponse<LeaveRequest>> {
        self.client
            .fetch_page(ApiRequest::get("/leaves").with_query(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<LeaveRequest> {
        self.client
            .fetch_data(ApiRequest::get(format!("/leaves/{}", segment(id))))
            .await
    }

    pub async fn create(&self, input: &LeaveRequestInput) -> ApiResult<LeaveRequest> {
        self.client
            .fetch_data(ApiRequest::post("/leaves").json(input))
            .await
    }

    pub async fn approve(&self, id: &str, comments: Option<String>) -> ApiResult<LeaveRequest> {
        self.client
            .fetch_data(ApiRequest::put(format!("/leaves/{}/approve", segment(id))).json(&LeaveDecision { comments }))
            .await
    }

    pub async fn reject(&self, id: &str, comments: Option<String>) -> ApiResult<LeaveRequest> {
        self.client
            .fetch_data(ApiRequest::put(format!("/leaves/{}/reject", segment(id))).json(&LeaveDecision { comments }))
            .await
    }

    pub async fn cancel(&self, id: &str) -> ApiResult<LeaveRequest> {
        self.client
            .fetch_data(ApiRequest::put(format!("/leaves/{}/cancel", segment(id))).json(&serde_json::json!({})))
            .await
    }

    pub async fn balance(&self, employee_id: &str) -> ApiResult<Vec<LeaveBalance>> {
        self.client
            .fetch_data(ApiRequest::get(format!("/leaves/balance/{}", segment(employee_id))))
            .await
    }

    /// Leaves of the logged-in employee; `employee_id` in the filters is ignored
    pub async fn my_leaves(&self, filters: &LeaveFilters) -> ApiResult<PaginatedResponse<LeaveRequest>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get("/leaves/my-leaves").with_query(&query))
            .await
    }

    pub async fn my_balance(&self) -> ApiResult<Vec<LeaveBalance>> {
        self.client
            .fetch_data(ApiRequest::get("/leaves/my-balance"))
            .await
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::core::test_support::TestHarness;

    fn leave_json(status: &str) -> serde_json::Value {
        json!({
            "_id": "l-1", "employeeId": "e-1", "leaveType": "annual",
            "startDate": "2024-07-01", "endDate": "2024-07-05",
            "reason": "Holiday", "status": status
        })
    }

    #[tokio::test]
    async fn test_my_leaves_drops_employee_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves/my-leaves"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [leave_json("pending")], "totalCount": 1, "page": 1, "limit": 10}
            })))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness
            .client
            .leaves()
            .my_leaves(&LeaveFilters {
                employee_id: Some("someone-else".into()),
                status: Some(LeaveStatus::Pending),
                ..Default::default()
            })
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("status=pending"));
    }

    #[tokio::test]
    async fn test_approve_and_reject_send_comments() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/leaves/l-1/approve"))
            .and(body_json(json!({"comments": "Enjoy"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": leave_json("approved")})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/leaves/l-1/reject"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": leave_json("rejected")})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let leaves = harness.client.leaves();

        let approved = leaves.approve("l-1", Some("Enjoy".into())).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);

        let rejected = leaves.reject("l-1", None).await.unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
    }

    #[tokio::test]
    async fn test_balance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves/balance/e-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"type": "annual", "total": 20, "used": 5, "remaining": 15}]
            })))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let balance = harness.client.leaves().balance("e-1").await.unwrap();
        assert_eq!(balance[0].leave_type, "annual");
        assert_eq!(balance[0].remaining, 15.0);
    }

    #[tokio::test]
    async fn test_id_is_encoded_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves/l%2F1%3Fx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": leave_json("pending")})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.client.leaves().get("l/1?x").await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.path(), "/leaves/l%2F1%3Fx");
        assert_eq!(received[0].url.query(), None);
    }
}
