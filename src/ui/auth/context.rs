//! Auth context
//!
//! [`AuthProvider`] builds the API client and [`SessionStore`] for the
//! component tree and mirrors the session into a signal. Components reach it
//! through [`use_auth_context`]; nothing in the UI touches stored credentials
//! directly.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::core::config::Config;
use crate::core::http::{ApiClient, PlatformTransport};
use crate::core::models::{Role, User};
use crate::core::navigation::Navigator;
use crate::core::services::RegisterRequest;
use crate::core::session::{Session, SessionStore};
use crate::core::storage::CredentialStore;
use crate::ui::notifications::use_notifications;

pub type PortalClient = ApiClient<PlatformTransport>;

/// Queues a route change for the router; the provider performs it
#[derive(Clone, Copy)]
pub struct RouterNavigator {
    pending: RwSignal<Option<String>>,
}

impl RouterNavigator {
    fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
        }
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, path: &str) {
        if self.pending.try_set(Some(path.to_string())).is_some() {
            tracing::debug!(path, "navigation dropped after unmount");
        }
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    store: StoredValue<SessionStore<PlatformTransport>>,
}

impl AuthContext {
    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.session.with(f)
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(|s| s.is_loading)
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn is_employee(&self) -> bool {
        self.session.with(Session::is_employee)
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.session.with(|s| s.has_role(roles))
    }

    /// Shared API client, for pages to call services with
    pub fn client(&self) -> PortalClient {
        self.store.with_value(|store| store.client().clone())
    }

    /// Outcome is reported through notifications and the session signal
    pub fn login(&self, email: String, password: String, is_employee: bool) {
        let store = self.store.get_value();
        spawn_local(async move {
            let _ = store.login(&email, &password, is_employee).await;
        });
    }

    pub fn register(&self, request: RegisterRequest) {
        let store = self.store.get_value();
        spawn_local(async move {
            let _ = store.register(&request).await;
        });
    }

    pub fn logout(&self) {
        self.store.with_value(SessionStore::logout);
    }
}

/// Must sit inside `<Router>` and below the notification context
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let notifier = use_notifications();
    let navigator = RouterNavigator::new();

    let config = Config::from_env();
    let client = ApiClient::new(
        config.clone(),
        PlatformTransport::new(&config),
        CredentialStore::platform_default(),
        Arc::new(notifier),
        Arc::new(navigator),
    );
    let store = SessionStore::new(client);

    let session = RwSignal::new(store.snapshot());
    store.subscribe(move |s| {
        let _ = session.try_set(s.clone());
    });

    let store = StoredValue::new(store);
    provide_context(AuthContext { session, store });

    // Client only: restore the persisted session after hydration
    Effect::new(move |_| store.with_value(SessionStore::initialize));

    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(path) = navigator.pending.get() {
            navigator.pending.set(None);
            navigate(&path, Default::default());
        }
    });

    children()
}

pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
