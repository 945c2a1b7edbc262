use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{
    Acknowledgement, PaginatedResponse, PerformanceReview, ReviewCompletion, ReviewInput,
    ReviewStatus, ReviewType,
};
use crate::core::query::{QueryParams, ToQuery, segment};

use super::EMPLOYEE_ID_PARAM;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceFilters {
    pub employee_id: Option<String>,
    pub reviewer_id: Option<String>,
    pub review_type: Option<ReviewType>,
    pub status: Option<ReviewStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for PerformanceFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt(EMPLOYEE_ID_PARAM, self.employee_id.as_deref())
            .push_opt("reviewerId", self.reviewer_id.as_deref())
            .push_opt("type", self.review_type)
            .push_opt("status", self.status)
            .push_opt("startDate", self.start_date.as_deref())
            .push_opt("endDate", self.end_date.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

pub struct PerformanceService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> PerformanceService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &PerformanceFilters) -> ApiResult<PaginatedResponse<PerformanceReview>> {
        self.client
            .fetch_page(ApiRequest::get("/performance").with_query(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<PerformanceReview> {
        self.client
            .fetch_data(ApiRequest::get(format!("/performance/{}", segment(id))))
            .await
    }

    pub async fn create(&self, input: &ReviewInput) -> ApiResult<PerformanceReview> {
        self.client
            .fetch_data(ApiRequest::post("/performance").json(input))
            .await
    }

    pub async fn update(&self, id: &str, input: &ReviewInput) -> ApiResult<PerformanceReview> {
        self.client
            .fetch_data(ApiRequest::put(format!("/performance/{}", segment(id))).json(input))
            .await
    }

    pub async fn complete(&self, id: &str, completion: &ReviewCompletion) -> ApiResult<PerformanceReview> {
        self.client
            .fetch_data(ApiRequest::put(format!("/performance/{}/complete", segment(id))).json(completion))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/performance/{}", segment(id))))
            .await
    }

    pub async fn employee_reviews(
        &self,
        employee_id: &str,
        filters: &PerformanceFilters,
    ) -> ApiResult<PaginatedResponse<PerformanceReview>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get(format!("/performance/employee/{}", segment(employee_id))).with_query(&query))
            .await
    }

    pub async fn my_reviews(&self, filters: &PerformanceFilters) -> ApiResult<PaginatedResponse<PerformanceReview>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get("/performance/my-reviews").with_query(&query))
            .await
    }
}


#[cfg(all(test, feature = "ssr"))]
mod http_tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::core::models::ReviewMetric;
    use crate::core::test_support::TestHarness;

    #[tokio::test]
    async fn test_complete_review() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/performance/r-1/complete"))
            .and(body_json(json!({
                "metrics": [{"name": "Delivery", "rating": 4.0}],
                "overallRating": 4.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
                "_id": "r-1", "employeeId": "e-1", "reviewerId": "u-1",
                "reviewDate": "2024-06-30", "type": "quarterly-review", "status": "completed",
                "metrics": [{"name": "Delivery", "rating": 4.0}], "overallRating": 4.0
            }})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let review = harness
            .client
            .performance()
            .complete(
                "r-1",
                &ReviewCompletion {
                    metrics: vec![ReviewMetric {
                        name: "Delivery".into(),
                        rating: 4.0,
                        comment: None,
                    }],
                    overall_rating: Some(4.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(review.status, ReviewStatus::Completed);
        assert_eq!(review.review_type, ReviewType::Quarterly);
    }

    #[tokio::test]
    async fn test_my_reviews_passes_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/performance/my-reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [], "totalCount": 0, "page": 1, "limit": 10}
            })))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness
            .client
            .performance()
            .my_reviews(&PerformanceFilters {
                status: Some(ReviewStatus::Pending),
                page: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("status=pending&page=1"));
    }
}
