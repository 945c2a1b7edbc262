use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{
    AttendanceNote, AttendanceRecord, AttendanceStatus, AttendanceSummary, AttendanceUpdate,
    MarkAttendance, PaginatedResponse,
};
use crate::core::query::{QueryParams, ToQuery, segment};

use super::EMPLOYEE_ID_PARAM;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilters {
    pub employee_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for AttendanceFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt(EMPLOYEE_ID_PARAM, self.employee_id.as_deref())
            .push_opt("startDate", self.start_date.as_deref())
            .push_opt("endDate", self.end_date.as_deref())
            .push_opt("status", self.status)
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

pub struct AttendanceService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AttendanceService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &AttendanceFilters) -> ApiResult<PaginatedResponse<AttendanceRecord>> {
        self.client
            .fetch_page(ApiRequest::get("/attendance").with_query(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<AttendanceRecord> {
        self.client
            .fetch_data(ApiRequest::get(format!("/attendance/{}", segment(id))))
            .await
    }

    pub async fn mark(&self, mark: &MarkAttendance) -> ApiResult<AttendanceRecord> {
        self.client
            .fetch_data(ApiRequest::post("/attendance/mark").json(mark))
            .await
    }

    pub async fn check_in(&self, notes: Option<String>) -> ApiResult<AttendanceRecord> {
        self.client
            .fetch_data(ApiRequest::post("/attendance/check-in").json(&AttendanceNote { notes }))
            .await
    }

    pub async fn check_out(&self, notes: Option<String>) -> ApiResult<AttendanceRecord> {
        self.client
            .fetch_data(ApiRequest::post("/attendance/check-out").json(&AttendanceNote { notes }))
            .await
    }

    pub async fn update(&self, id: &str, input: &AttendanceUpdate) -> ApiResult<AttendanceRecord> {
        self.client
            .fetch_data(ApiRequest::put(format!("/attendance/{}", segment(id))).json(input))
            .await
    }

    pub async fn summary(&self, employee_id: &str, month: u32, year: u32) -> ApiResult<AttendanceSummary> {
        let query = QueryParams::new().push("month", month).push("year", year);
        self.client
            .fetch_data(ApiRequest::get(format!("/attendance/summary/{}", segment(employee_id))).with_query(&query))
            .await
    }

    pub async fn my_attendance(
        &self,
        filters: &AttendanceFilters,
    ) -> ApiResult<PaginatedResponse<AttendanceRecord>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get("/attendance/my-attendance").with_query(&query))
            .await
    }

    pub async fn my_summary(&self, month: u32, year: u32) -> ApiResult<AttendanceSummary> {
        let query = QueryParams::new().push("month", month).push("year", year);
        self.client
            .fetch_data(ApiRequest::get("/attendance/my-summary").with_query(&query))
            .await
    }

    /// Today's record of the logged-in employee, `None` before check-in
    pub async fn today(&self) -> ApiResult<Option<AttendanceRecord>> {
        self.client
            .fetch_data(ApiRequest::get("/attendance/today"))
            .await
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::test_support::TestHarness;

    #[tokio::test]
    async fn test_today_may_be_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/today"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        assert!(harness.client.attendance().today().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_check_in_without_notes_sends_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/attendance/check-in"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
                "_id": "a-1", "employeeId": "e-1", "date": "2024-05-02",
                "checkInTime": "2024-05-02T09:00:00Z", "status": "present"
            }})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let record = harness.client.attendance().check_in(None).await.unwrap();
        assert!(record.is_checked_in());
    }

    #[tokio::test]
    async fn test_summary_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/summary/e-9"))
            .and(query_param("month", "3"))
            .and(query_param("year", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
                "present": 18, "absent": 1, "halfDay": 1, "workFromHome": 2, "totalWorkHours": 160.5
            }})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let summary = harness.client.attendance().summary("e-9", 3, 2024).await.unwrap();
        assert_eq!(summary.present, 18);
        assert_eq!(summary.work_from_home, 2);
    }
}
