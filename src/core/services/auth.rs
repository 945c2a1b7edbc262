use serde::Serialize;

use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, Transport};
use crate::core::models::{Acknowledgement, AuthSession};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Selects the employee login endpoint
    #[serde(skip)]
    pub is_employee: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Credential endpoints.
///
/// Login, register and reset-password never trigger a token refresh (a 401
/// there means bad credentials) and leave notifications to the session store.
/// This service does not persist anything; see [`SessionStore`](crate::core::session::SessionStore).
pub struct AuthService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        let path = if request.is_employee {
            "/auth/employee/login"
        } else {
            "/auth/login"
        };
        self.client
            .fetch_data(ApiRequest::post(path).json(request).without_refresh().quiet())
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthSession> {
        self.client
            .fetch_data(
                ApiRequest::post("/auth/register")
                    .json(request)
                    .without_refresh()
                    .quiet(),
            )
            .await
    }

    pub async fn reset_password(&self, email: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(
                ApiRequest::post("/auth/reset-password")
                    .json(&serde_json::json!({ "email": email }))
                    .without_refresh()
                    .quiet(),
            )
            .await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::post("/auth/change-password").json(request))
            .await
    }
}
