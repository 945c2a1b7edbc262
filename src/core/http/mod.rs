//! HTTP plumbing: request/response types, the [`Transport`] seam and the
//! [`ApiClient`] that adds bearer auth, token refresh and error surfacing.

mod client;
#[cfg(feature = "hydrate")]
mod browser;
#[cfg(feature = "ssr")]
mod native;

pub use client::{ApiClient, REFRESH_TOKEN_PATH, RefreshedSession};
#[cfg(feature = "hydrate")]
pub use browser::FetchTransport;
#[cfg(feature = "ssr")]
pub use native::ReqwestTransport;

use serde::Serialize;

use crate::core::error::TransportError;
use crate::core::query::{QueryParams, ToQuery};

/// Transport used by the current build
#[cfg(feature = "ssr")]
pub type PlatformTransport = ReqwestTransport;
#[cfg(all(feature = "hydrate", not(feature = "ssr")))]
pub type PlatformTransport = FetchTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Method {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("PATCH")]
    Patch,
    #[display("DELETE")]
    Delete,
}

/// Binary payload for a multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// `multipart/form-data` body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn text_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// Request as built by a service, before the client resolves the URL and
/// attaches credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `/employees/42`
    pub path: String,
    pub query: QueryParams,
    pub body: RequestBody,
    refresh_budget: u8,
    surface_errors: bool,
    encode_error: Option<String>,
}

impl ApiRequest {
    /// Most requests may trigger one token refresh
    pub const MAX_REFRESH_ATTEMPTS: u8 = 1;

    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: RequestBody::Empty,
            refresh_budget: Self::MAX_REFRESH_ATTEMPTS,
            surface_errors: true,
            encode_error: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// JSON body. A payload that cannot be serialized fails the request
    /// before anything is sent.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = RequestBody::Json(value),
            Err(e) => self.encode_error = Some(e.to_string()),
        }
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn with_query(mut self, query: &impl ToQuery) -> Self {
        self.query = query.to_query();
        self
    }

    /// Do not try to refresh the session on 401 (credential endpoints)
    pub fn without_refresh(mut self) -> Self {
        self.refresh_budget = 0;
        self
    }

    /// Refresh budget, clamped to [`Self::MAX_REFRESH_ATTEMPTS`]
    pub fn with_refresh_budget(mut self, budget: u8) -> Self {
        self.refresh_budget = budget.min(Self::MAX_REFRESH_ATTEMPTS);
        self
    }

    /// Leave error notifications to the caller
    pub fn quiet(mut self) -> Self {
        self.surface_errors = false;
        self
    }

    pub fn refresh_budget(&self) -> u8 {
        self.refresh_budget
    }

    pub fn surfaces_errors(&self) -> bool {
        self.surface_errors
    }

    pub(crate) fn encode_error(&self) -> Option<&str> {
        self.encode_error.as_deref()
    }

    /// Path plus query string
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}

/// A request paired with the number of refreshes already spent on it
#[derive(Debug, Clone)]
pub(crate) struct Attempt {
    pub request: ApiRequest,
    pub retry_count: u8,
}

impl Attempt {
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            retry_count: 0,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.retry_count < self.request.refresh_budget
    }
}

/// Fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest<'a> {
    pub method: Method,
    pub url: String,
    /// Access token for the `Authorization: Bearer` header
    pub bearer: Option<String>,
    pub body: &'a RequestBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `message` field of a JSON error body, if any
    pub fn error_message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Sends one HTTP exchange. Implementations do no retries and no status
/// interpretation; any response, including 4xx/5xx, is `Ok`.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: OutgoingRequest<'_>) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_is_one() {
        let request = ApiRequest::get("/employees");
        assert_eq!(request.refresh_budget(), 1);
        assert!(request.surfaces_errors());
    }

    #[test]
    fn test_budget_is_clamped() {
        assert_eq!(ApiRequest::get("/x").with_refresh_budget(5).refresh_budget(), 1);
        assert_eq!(ApiRequest::get("/x").without_refresh().refresh_budget(), 0);
    }

    #[test]
    fn test_attempt_allows_single_refresh() {
        let mut attempt = Attempt::new(ApiRequest::get("/employees"));
        assert!(attempt.can_refresh());
        attempt.retry_count += 1;
        assert!(!attempt.can_refresh());

        let auth = Attempt::new(ApiRequest::post("/auth/login").without_refresh());
        assert!(!auth.can_refresh());
    }

    #[test]
    fn test_path_and_query() {
        let request = ApiRequest::get("/employees")
            .with_query(&QueryParams::new().push("search", "ada").push("page", 1));
        assert_eq!(request.path_and_query(), "/employees?search=ada&page=1");
        assert_eq!(ApiRequest::get("/employees").path_and_query(), "/employees");
    }

    #[test]
    fn test_json_body() {
        let request = ApiRequest::post("/auth/login")
            .json(&serde_json::json!({"email": "a@b.c", "password": "pw"}));
        assert_eq!(
            request.body,
            RequestBody::Json(serde_json::json!({"email": "a@b.c", "password": "pw"}))
        );
        assert!(request.encode_error().is_none());
    }

    #[test]
    fn test_unserializable_body_is_recorded() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "value");
        let request = ApiRequest::post("/x").json(&map);
        assert!(request.encode_error().is_some());
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_error_message_from_body() {
        let response = RawResponse {
            status: 400,
            body: br#"{"success":false,"message":"Email is required"}"#.to_vec(),
        };
        assert_eq!(response.error_message().as_deref(), Some("Email is required"));

        let html = RawResponse {
            status: 502,
            body: b"<html>Bad gateway</html>".to_vec(),
        };
        assert!(html.error_message().is_none());

        let blank = RawResponse {
            status: 500,
            body: br#"{"message":"  "}"#.to_vec(),
        };
        assert!(blank.error_message().is_none());
    }

    #[test]
    fn test_multipart_builder() {
        let form = MultipartForm::new()
            .text("title", "Contract")
            .text_opt("description", None::<String>)
            .file("file", FileUpload::new("c.pdf", "application/pdf", vec![1, 2, 3]));

        assert_eq!(form.parts().len(), 2);
        assert_eq!(form.get_text("title"), Some("Contract"));
        assert_eq!(form.parts()[1].name(), "file");
    }
}
