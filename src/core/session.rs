//! Authenticated session state.
//!
//! [`SessionStore`] owns the in-memory session, mirrors it to persisted
//! credentials and drives login/logout/register. The UI gets it through the
//! auth context and follows changes with [`SessionStore::subscribe`].

use std::sync::{Arc, RwLock};

use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, Transport};
use crate::core::models::{AuthSession, Role, User};
use crate::core::navigation;
use crate::core::notify::Notification;
use crate::core::services::{LoginRequest, RegisterRequest};

const LOGIN_FAILED_FALLBACK: &str = "Invalid credentials. Please try again.";
const REGISTER_FAILED_FALLBACK: &str = "Failed to create account. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_loading: bool,
}

impl Default for Session {
    /// Loading until restored from storage
    fn default() -> Self {
        Self {
            user: None,
            access_token: None,
            refresh_token: None,
            is_loading: true,
        }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_employee(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_employee)
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.user.as_ref().is_some_and(|u| roles.contains(&u.role))
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    fn signed_out() -> Self {
        Self {
            is_loading: false,
            ..Self::default()
        }
    }
}

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

pub struct SessionStore<T> {
    client: ApiClient<T>,
    state: Arc<RwLock<Session>>,
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T: Transport> SessionStore<T> {
    /// Build a store around `client`. Token refreshes in the client are
    /// mirrored into the session; a failed refresh signs the store out.
    pub fn new(client: ApiClient<T>) -> Self {
        let store = Self {
            client,
            state: Arc::new(RwLock::new(Session::default())),
            listeners: Arc::new(RwLock::new(Vec::new())),
        };

        let state = Arc::clone(&store.state);
        let listeners = Arc::clone(&store.listeners);
        store.client.on_session_expired(move || {
            tracing::info!("session expired, signing out");
            publish(&state, &listeners, Session::signed_out());
        });

        let state = Arc::clone(&store.state);
        let listeners = Arc::clone(&store.listeners);
        store.client.on_tokens_refreshed(move |tokens| {
            let mut next = state
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone();
            next.access_token = Some(tokens.access_token.clone());
            if let Some(refresh_token) = &tokens.refresh_token {
                next.refresh_token = Some(refresh_token.clone());
            }
            publish(&state, &listeners, next);
        });

        store
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Call `listener` after every change
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        self.listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(listener));
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn is_employee(&self) -> bool {
        self.snapshot().is_employee()
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.snapshot().has_role(roles)
    }

    /// Restore the session from persisted credentials. No network call.
    pub fn initialize(&self) {
        let credentials = self.client.credentials();
        let session = Session {
            user: credentials.user(),
            access_token: credentials.access_token(),
            refresh_token: credentials.refresh_token(),
            is_loading: false,
        };
        tracing::info!(authenticated = session.is_authenticated(), "session restored");
        self.set(session);
    }

    pub async fn login(&self, email: &str, password: &str, is_employee: bool) -> ApiResult<User> {
        self.update(|s| s.is_loading = true);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            is_employee,
        };
        let result = self.client.auth().login(&request).await;

        match result {
            Ok(auth) => {
                let user = auth.user.clone();
                self.establish(auth);
                tracing::info!(user = %user.email, role = %user.role, "logged in");

                let home = if is_employee {
                    navigation::EMPLOYEE_PORTAL
                } else {
                    navigation::ADMIN_DASHBOARD
                };
                self.client.navigator().navigate(home);
                self.client.notifier().notify(Notification::success(
                    "Login successful",
                    format!("Welcome back, {}!", user.first_name),
                ));
                Ok(user)
            }
            Err(err) => {
                tracing::info!("login failed: {}", err);
                self.update(|s| s.is_loading = false);
                self.client.notifier().notify(Notification::error(
                    "Login failed",
                    err.server_message().unwrap_or(LOGIN_FAILED_FALLBACK),
                ));
                Err(err)
            }
        }
    }

    /// Sign out locally. Works without an active session.
    pub fn logout(&self) {
        self.client.credentials().clear();
        self.set(Session::signed_out());
        tracing::info!("logged out");

        self.client.navigator().navigate(navigation::LOGIN);
        self.client.notifier().notify(Notification::success(
            "Logged out",
            "You have been successfully logged out.",
        ));
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        self.update(|s| s.is_loading = true);

        match self.client.auth().register(request).await {
            Ok(auth) => {
                let user = auth.user.clone();
                self.establish(auth);
                tracing::info!(user = %user.email, "registered");

                self.client.navigator().navigate(navigation::ADMIN_DASHBOARD);
                self.client.notifier().notify(Notification::success(
                    "Registration successful",
                    "Your account has been created successfully.",
                ));
                Ok(user)
            }
            Err(err) => {
                tracing::info!("registration failed: {}", err);
                self.update(|s| s.is_loading = false);
                self.client.notifier().notify(Notification::error(
                    "Registration failed",
                    err.server_message().unwrap_or(REGISTER_FAILED_FALLBACK),
                ));
                Err(err)
            }
        }
    }

    fn establish(&self, auth: AuthSession) {
        self.client.credentials().save_session(&auth);
        self.set(Session {
            user: Some(auth.user),
            access_token: Some(auth.access_token),
            refresh_token: Some(auth.refresh_token),
            is_loading: false,
        });
    }

    fn set(&self, session: Session) {
        publish(&self.state, &self.listeners, session);
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let mut next = self.snapshot();
        f(&mut next);
        self.set(next);
    }
}

/// Store `session` and notify every listener
fn publish(state: &RwLock<Session>, listeners: &RwLock<Vec<Listener>>, session: Session) {
    *state.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = session.clone();

    let listeners = listeners
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    for listener in listeners {
        listener(&session);
    }
}
