use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use futures::lock::Mutex;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApiRequest, Attempt, Method, OutgoingRequest, RawResponse, RequestBody, Transport};
use crate::core::config::Config;
use crate::core::error::{ApiError, ApiResult};
use crate::core::models::{Acknowledgement, ApiResponse, PaginatedResponse};
use crate::core::navigation::{self, Navigator};
use crate::core::notify::{Notification, Notifier};
use crate::core::storage::CredentialStore;

/// Endpoint exchanging a refresh token for a new access token
pub const REFRESH_TOKEN_PATH: &str = "/auth/refresh-token";

type ExpiryHook = Arc<dyn Fn() + Send + Sync>;
type RefreshHook = Arc<dyn Fn(&RefreshedSession) + Send + Sync>;

struct ClientInner<T> {
    config: Config,
    transport: T,
    credentials: CredentialStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    expiry_hooks: RwLock<Vec<ExpiryHook>>,
    refresh_hooks: RwLock<Vec<RefreshHook>>,
    /// Held while a refresh is in flight
    refresh_gate: Mutex<()>,
    /// Bumped each time a refresh settles, successfully or not
    generation: AtomicU64,
}

/// Tokens stored by a successful refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedSession {
    pub access_token: String,
    /// Present only when the backend rotated it
    pub refresh_token: Option<String>,
}

/// Client for the HR backend.
///
/// Attaches the stored access token to every request. On a 401 it refreshes
/// the token once and replays the request; if that is impossible the session
/// is ended: credentials are cleared, the app is sent to the login page and
/// registered expiry hooks run. Other failures are shown as an error
/// notification and returned.
///
/// Only one refresh runs at a time. Requests that hit a 401 while another
/// request is refreshing wait for it and reuse its outcome.
pub struct ApiClient<T> {
    inner: Arc<ClientInner<T>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshedTokens {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// The backend has answered refresh both with and without the envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum RefreshPayload {
    Enveloped { data: RefreshedTokens },
    Bare(RefreshedTokens),
}

impl RefreshPayload {
    fn into_tokens(self) -> RefreshedTokens {
        match self {
            RefreshPayload::Enveloped { data } => data,
            RefreshPayload::Bare(tokens) => tokens,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        config: Config,
        transport: T,
        credentials: CredentialStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                credentials,
                notifier,
                navigator,
                expiry_hooks: RwLock::new(Vec::new()),
                refresh_hooks: RwLock::new(Vec::new()),
                refresh_gate: Mutex::new(()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.inner.notifier
    }

    pub(crate) fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    /// Run `hook` whenever a failed refresh ends the session
    pub fn on_session_expired(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.inner
            .expiry_hooks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(hook));
    }

    /// Run `hook` after every successful refresh, once the new tokens are stored
    pub fn on_tokens_refreshed(&self, hook: impl Fn(&RefreshedSession) + Send + Sync + 'static) {
        self.inner
            .refresh_hooks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(hook));
    }

    /// Send a request through the auth/refresh pipeline and return the raw
    /// 2xx response.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        if let Some(reason) = request.encode_error() {
            let err = ApiError::Encode(reason.to_string());
            self.surface(&request, &err);
            return Err(err);
        }

        let mut attempt = Attempt::new(request);
        loop {
            let url = self.inner.config.endpoint(&attempt.request.path_and_query());
            let bearer = self.inner.credentials.access_token();
            let generation = self.inner.generation.load(Ordering::SeqCst);
            tracing::debug!(
                method = %attempt.request.method,
                url = %url,
                retry = attempt.retry_count,
                authenticated = bearer.is_some(),
                "sending request"
            );

            let outgoing = OutgoingRequest {
                method: attempt.request.method,
                url,
                bearer,
                body: &attempt.request.body,
            };
            let response = match self.inner.transport.send(outgoing).await {
                Ok(response) => response,
                Err(e) => {
                    let err = ApiError::from(e);
                    self.surface(&attempt.request, &err);
                    return Err(err);
                }
            };

            if response.is_success() {
                return Ok(response);
            }

            if response.status == 401 && attempt.can_refresh() {
                attempt.retry_count += 1;
                self.renew_session(generation).await?;
                continue;
            }

            let err = ApiError::Http {
                status: response.status,
                message: response.error_message(),
            };
            tracing::debug!(status = response.status, path = %attempt.request.path, "request failed");
            self.surface(&attempt.request, &err);
            return Err(err);
        }
    }

    /// Decode a 2xx JSON body
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let surface = request.surfaces_errors();
        let response = self.execute(request).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            let err = ApiError::from(e);
            if surface {
                self.inner
                    .notifier
                    .notify(Notification::error("Error", err.user_message()));
            }
            err
        })
    }

    /// `data` of an [`ApiResponse`] envelope
    pub async fn fetch_data<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        Ok(self.send_json::<ApiResponse<R>>(request).await?.data)
    }

    pub async fn fetch_page<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<PaginatedResponse<R>> {
        self.send_json(request).await
    }

    /// For endpoints whose success body may be empty or carry `data: null`
    pub async fn acknowledge(&self, request: ApiRequest) -> ApiResult<Acknowledgement> {
        let surface = request.surfaces_errors();
        let response = self.execute(request).await?;
        if response.is_empty() {
            return Ok(Acknowledgement {
                success: true,
                message: String::new(),
                data: None,
            });
        }
        serde_json::from_slice(&response.body).map_err(|e| {
            let err = ApiError::from(e);
            if surface {
                self.inner
                    .notifier
                    .notify(Notification::error("Error", err.user_message()));
            }
            err
        })
    }

    /// Raw body, e.g. a document download
    pub async fn fetch_bytes(&self, request: ApiRequest) -> ApiResult<Vec<u8>> {
        Ok(self.execute(request).await?.body)
    }

    /// Refresh the access token unless a refresh settled after `seen` was
    /// read, in which case its outcome is reused.
    async fn renew_session(&self, seen: u64) -> ApiResult<()> {
        let _gate = self.inner.refresh_gate.lock().await;

        if self.inner.generation.load(Ordering::SeqCst) != seen {
            return match self.inner.credentials.access_token() {
                Some(_) => Ok(()),
                None => Err(ApiError::SessionExpired),
            };
        }

        let outcome = self.refresh_access_token().await;
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        match outcome {
            Ok(refreshed) => {
                let hooks = self
                    .inner
                    .refresh_hooks
                    .read()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .clone();
                for hook in hooks {
                    hook(&refreshed);
                }
                Ok(())
            }
            Err(reason) => {
                tracing::warn!("token refresh failed: {}", reason);
                Err(self.expire_session())
            }
        }
    }

    async fn refresh_access_token(&self) -> Result<RefreshedSession, String> {
        let refresh_token = self
            .inner
            .credentials
            .refresh_token()
            .ok_or_else(|| "no refresh token stored".to_string())?;

        let body = RequestBody::Json(serde_json::json!({ "refreshToken": refresh_token }));
        let outgoing = OutgoingRequest {
            method: Method::Post,
            url: self.inner.config.endpoint(REFRESH_TOKEN_PATH),
            bearer: None,
            body: &body,
        };
        let response = self
            .inner
            .transport
            .send(outgoing)
            .await
            .map_err(|e| e.to_string())?;

        if !response.is_success() {
            return Err(format!("refresh rejected with status {}", response.status));
        }

        let tokens = serde_json::from_slice::<RefreshPayload>(&response.body)
            .map_err(|e| format!("unreadable refresh response: {e}"))?
            .into_tokens();
        if tokens.access_token.is_empty() {
            return Err("refresh response has no access token".to_string());
        }

        let refresh_token = tokens.refresh_token.filter(|t| !t.is_empty());
        self.inner.credentials.set_access_token(&tokens.access_token);
        if let Some(refresh_token) = &refresh_token {
            self.inner.credentials.set_refresh_token(refresh_token);
        }
        tracing::info!(rotated = refresh_token.is_some(), "access token refreshed");
        Ok(RefreshedSession {
            access_token: tokens.access_token,
            refresh_token,
        })
    }

    fn expire_session(&self) -> ApiError {
        self.inner.credentials.clear();
        self.inner.navigator.navigate(navigation::LOGIN);
        self.inner
            .notifier
            .notify(Notification::error("Session expired", "Please log in again"));

        let hooks = self
            .inner
            .expiry_hooks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for hook in hooks {
            hook();
        }
        ApiError::SessionExpired
    }

    fn surface(&self, request: &ApiRequest, err: &ApiError) {
        if request.surfaces_errors() {
            self.inner
                .notifier
                .notify(Notification::error("Error", err.user_message()));
        }
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::core::error::GENERIC_ERROR_MESSAGE;
    use crate::core::models::Department;
    use crate::core::notify::NotificationKind;
    use crate::core::test_support::TestHarness;

    fn departments_body() -> serde_json::Value {
        json!({
            "success": true,
            "message": "ok",
            "data": [{"_id": "d-1", "name": "Engineering"}]
        })
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .and(header("authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(departments_body()))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("access-1");

        let departments: Vec<Department> = harness
            .client
            .fetch_data(ApiRequest::get("/departments"))
            .await
            .unwrap();
        assert_eq!(departments[0].name, "Engineering");
    }

    #[tokio::test]
    async fn test_no_bearer_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(departments_body()))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let _: Vec<Department> = harness
            .client
            .fetch_data(ApiRequest::get("/departments"))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_401_refreshes_and_replays_with_new_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .and(body_json(json!({"refreshToken": "refresh-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"accessToken": "fresh", "refreshToken": "refresh-2"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(departments_body()))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");

        let result: Vec<Department> = harness
            .client
            .fetch_data(ApiRequest::get("/employees"))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(harness.credentials.access_token().as_deref(), Some("fresh"));
        assert_eq!(harness.credentials.refresh_token().as_deref(), Some("refresh-2"));
        assert!(harness.notifier.is_empty());
        assert!(harness.navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_request_carries_no_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");

        let _ = harness.client.execute(ApiRequest::get("/employees")).await;

        let requests = server.received_requests().await.unwrap();
        let refresh: Vec<&Request> = requests
            .iter()
            .filter(|r| r.url.path() == "/auth/refresh-token")
            .collect();
        assert_eq!(refresh.len(), 1);
        assert!(!refresh[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_bare_refresh_response_accepted_and_refresh_token_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/admin"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dashboard/admin"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": 5})))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");

        let value: u32 = harness
            .client
            .fetch_data(ApiRequest::get("/dashboard/admin"))
            .await
            .unwrap();

        assert_eq!(value, 5);
        assert_eq!(harness.credentials.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_second_401_is_terminal_and_refresh_runs_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Not allowed"})))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"accessToken": "fresh"}})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");

        let err = harness
            .client
            .execute(ApiRequest::get("/employees"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Http {
                status: 401,
                message: Some("Not allowed".into())
            }
        );
        let notes = harness.notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Error");
        assert_eq!(notes[0].message, "Not allowed");
    }

    #[tokio::test]
    async fn test_failed_refresh_expires_session_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "revoked"})))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");
        let hook_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hook_calls);
        harness.client.on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = harness
            .client
            .execute(ApiRequest::get("/employees"))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::SessionExpired);
        assert!(harness.credentials.access_token().is_none());
        assert!(harness.credentials.refresh_token().is_none());
        assert!(harness.credentials.user().is_none());
        assert_eq!(harness.navigator.visited(), vec![navigation::LOGIN.to_string()]);
        assert_eq!(hook_calls.load(Ordering::SeqCst), 1);

        let notes = harness.notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Session expired");
        assert_eq!(notes[0].message, "Please log in again");
    }

    #[tokio::test]
    async fn test_concurrent_401s_expire_session_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");
        let hook_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hook_calls);
        harness.client.on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let (first, second) = tokio::join!(
            harness.client.execute(ApiRequest::get("/employees")),
            harness.client.execute(ApiRequest::get("/employees")),
        );

        assert_eq!(first.unwrap_err(), ApiError::SessionExpired);
        assert_eq!(second.unwrap_err(), ApiError::SessionExpired);
        assert_eq!(harness.navigator.visited(), vec![navigation::LOGIN.to_string()]);
        assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
        let notes = harness.notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Session expired");
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_one_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .and(body_json(json!({"refreshToken": "refresh-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"accessToken": "fresh", "refreshToken": "refresh-2"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(departments_body()))
            .expect(2)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");
        let refreshed = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = Arc::clone(&refreshed);
        harness.client.on_tokens_refreshed(move |tokens| {
            seen.lock().unwrap().push(tokens.clone());
        });

        let (first, second) = tokio::join!(
            harness.client.fetch_data::<Vec<Department>>(ApiRequest::get("/departments")),
            harness.client.fetch_data::<Vec<Department>>(ApiRequest::get("/departments")),
        );

        assert_eq!(first.unwrap().len(), 1);
        assert_eq!(second.unwrap().len(), 1);
        assert_eq!(
            *refreshed.lock().unwrap(),
            vec![RefreshedSession {
                access_token: "fresh".into(),
                refresh_token: Some("refresh-2".into()),
            }]
        );
        assert_eq!(harness.credentials.refresh_token().as_deref(), Some("refresh-2"));
        assert!(harness.notifier.is_empty());
        assert!(harness.navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_missing_refresh_token_expires_without_calling_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");

        let err = harness
            .client
            .execute(ApiRequest::get("/leaves"))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::SessionExpired);
        assert_eq!(harness.navigator.visited(), vec![navigation::LOGIN.to_string()]);
    }

    #[tokio::test]
    async fn test_refresh_without_access_token_counts_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaves"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_access_token("stale");
        harness.credentials.set_refresh_token("refresh-1");

        let err = harness
            .client
            .execute(ApiRequest::get("/leaves"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
    }

    #[tokio::test]
    async fn test_401_without_refresh_budget_is_plain_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        harness.credentials.set_refresh_token("refresh-1");

        let err = harness
            .client
            .execute(ApiRequest::post("/auth/login").without_refresh().quiet())
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert!(harness.notifier.is_empty());
        assert!(harness.navigator.visited().is_empty());
        assert_eq!(harness.credentials.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_server_error_notifies_with_generic_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/employees/e-1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let err = harness
            .client
            .acknowledge(ApiRequest::delete("/employees/e-1"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        let notes = harness.notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].message, GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let err = harness
            .client
            .fetch_data::<Vec<Department>>(ApiRequest::get("/departments"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(harness.notifier.take().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_acknowledgement_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/positions/p-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let harness = TestHarness::new(&server.uri());
        let ack = harness
            .client
            .acknowledge(ApiRequest::delete("/positions/p-1"))
            .await
            .unwrap();
        assert!(ack.success);
        assert!(ack.data.is_none());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port once the listener is dropped
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let harness = TestHarness::new(&uri);
        let err = harness
            .client
            .execute(ApiRequest::get("/departments"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_) | ApiError::Timeout));
        assert_eq!(harness.notifier.take().len(), 1);
    }

    #[tokio::test]
    async fn test_encode_error_sends_nothing() {
        let server = MockServer::start().await;
        let harness = TestHarness::new(&server.uri());
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), 3);

        let err = harness
            .client
            .execute(ApiRequest::post("/departments").json(&map))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Encode(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
