//! Recording test doubles for the notification and navigation sinks.

use std::sync::{Arc, Mutex};

use crate::core::navigation::Navigator;
use crate::core::notify::{Notification, Notifier};

#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Drain everything notified so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().unwrap().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

/// Client wired to a mock server with in-memory credentials
#[cfg(feature = "ssr")]
pub(crate) struct TestHarness {
    pub client: crate::core::http::ApiClient<crate::core::http::ReqwestTransport>,
    pub credentials: crate::core::storage::CredentialStore,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

#[cfg(feature = "ssr")]
impl TestHarness {
    pub fn new(api_url: &str) -> Self {
        use crate::core::config::Config;
        use crate::core::http::{ApiClient, ReqwestTransport};
        use crate::core::storage::CredentialStore;

        let config = Config::with_api_url(api_url);
        let credentials = CredentialStore::in_memory();
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = ApiClient::new(
            config.clone(),
            ReqwestTransport::new(&config),
            credentials.clone(),
            notifier.clone(),
            navigator.clone(),
        );

        Self {
            client,
            credentials,
            notifier,
            navigator,
        }
    }
}
