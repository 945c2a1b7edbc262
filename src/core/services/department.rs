use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{
    Acknowledgement, Department, DepartmentInput, PaginatedResponse, Position, PositionInput,
};
use crate::core::query::{QueryParams, segment};

/// Departments and the positions inside them
pub struct DepartmentService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> DepartmentService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<PaginatedResponse<Department>> {
        let query = QueryParams::new().push("page", page).push("limit", limit);
        self.client
            .fetch_page(ApiRequest::get("/departments").with_query(&query))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Department> {
        self.client
            .fetch_data(ApiRequest::get(format!("/departments/{}", segment(id))))
            .await
    }

    pub async fn create(&self, input: &DepartmentInput) -> ApiResult<Department> {
        self.client
            .fetch_data(ApiRequest::post("/departments").json(input))
            .await
    }

    pub async fn update(&self, id: &str, input: &DepartmentInput) -> ApiResult<Department> {
        self.client
            .fetch_data(ApiRequest::put(format!("/departments/{}", segment(id))).json(input))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/departments/{}", segment(id))))
            .await
    }

    pub async fn list_positions(&self, department_id: Option<&str>) -> ApiResult<Vec<Position>> {
        let query = QueryParams::new().push_opt("departmentId", department_id);
        self.client
            .fetch_data(ApiRequest::get("/positions").with_query(&query))
            .await
    }

    pub async fn get_position(&self, id: &str) -> ApiResult<Position> {
        self.client
            .fetch_data(ApiRequest::get(format!("/positions/{}", segment(id))))
            .await
    }

    pub async fn create_position(&self, input: &PositionInput) -> ApiResult<Position> {
        self.client
            .fetch_data(ApiRequest::post("/positions").json(input))
            .await
    }

    pub async fn update_position(&self, id: &str, input: &PositionInput) -> ApiResult<Position> {
        self.client
            .fetch_data(ApiRequest::put(format!("/positions/{}", segment(id))).json(input))
            .await
    }

    pub async fn delete_position(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/positions/{}", segment(id))))
            .await
    }
}
