use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{DashboardData, EmployeeDashboardData};

pub struct DashboardService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> DashboardService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn admin(&self) -> ApiResult<DashboardData> {
        self.client.fetch_data(ApiRequest::get("/dashboard/admin")).await
    }

    pub async fn employee(&self) -> ApiResult<EmployeeDashboardData> {
        self.client
            .fetch_data(ApiRequest::get("/dashboard/employee"))
            .await
    }
}
