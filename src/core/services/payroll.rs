use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{
    Acknowledgement, GeneratePayroll, PaginatedResponse, PaymentStatus, PayrollCancellation,
    PayrollGenerated, PayrollRecord,
};
use crate::core::query::{QueryParams, ToQuery, segment};

use super::EMPLOYEE_ID_PARAM;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayrollFilters {
    pub employee_id: Option<String>,
    pub month: Option<u32>,
    pub year: Option<u32>,
    pub status: Option<PaymentStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for PayrollFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt(EMPLOYEE_ID_PARAM, self.employee_id.as_deref())
            .push_opt("month", self.month)
            .push_opt("year", self.year)
            .push_opt("status", self.status)
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

pub struct PayrollService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> PayrollService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &PayrollFilters) -> ApiResult<PaginatedResponse<PayrollRecord>> {
        self.client
            .fetch_page(ApiRequest::get("/payroll").with_query(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<PayrollRecord> {
        self.client
            .fetch_data(ApiRequest::get(format!("/payroll/{}", segment(id))))
            .await
    }

    pub async fn generate(&self, request: &GeneratePayroll) -> ApiResult<PayrollGenerated> {
        self.client
            .fetch_data(ApiRequest::post("/payroll/generate").json(request))
            .await
    }

    pub async fn approve(&self, id: &str) -> ApiResult<PayrollRecord> {
        self.client
            .fetch_data(ApiRequest::put(format!("/payroll/{}/approve", segment(id))).json(&serde_json::json!({})))
            .await
    }

    pub async fn cancel(&self, id: &str, reason: Option<String>) -> ApiResult<PayrollRecord> {
        self.client
            .fetch_data(
                ApiRequest::put(format!("/payroll/{}/cancel", segment(id))).json(&PayrollCancellation { reason }),
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/payroll/{}", segment(id))))
            .await
    }

    pub async fn employee_history(
        &self,
        employee_id: &str,
        filters: &PayrollFilters,
    ) -> ApiResult<PaginatedResponse<PayrollRecord>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get(format!("/payroll/employee/{}", segment(employee_id))).with_query(&query))
            .await
    }

    pub async fn my_payroll(&self, filters: &PayrollFilters) -> ApiResult<PaginatedResponse<PayrollRecord>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get("/payroll/my-payroll").with_query(&query))
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

    #[tokio::test]
    async fn test_generate_returns_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payroll/generate"))
            .and(body_json(json!({"month": 6, "year": 2024, "departmentIds": ["d-1"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "message": "Generated", "data": {"generatedCount": 14}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let generated = harness
            .client
            .payroll()
            .generate(&GeneratePayroll {
                month: 6,
                year: 2024,
                employee_ids: None,
                department_ids: Some(vec!["d-1".into()]),
            })
            .await
            .unwrap();
        assert_eq!(generated.generated_count, 14);
    }

    #[test]
    fn test_filters_query() {
        let filters = PayrollFilters {
            employee_id: Some("e-1".into()),
            month: Some(1),
            status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query().to_query_string(),
            "employeeId=e-1&month=1&status=paid"
        );
        assert_eq!(
            filters.to_query().without(EMPLOYEE_ID_PARAM).to_query_string(),
            "month=1&status=paid"
        );
    }
}
