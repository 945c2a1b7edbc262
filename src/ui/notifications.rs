//! Toast notifications
//!
//! [`NotificationManager`] is the UI side of the core [`Notifier`] sink. It
//! keeps a bounded queue of toasts that [`NotificationsContainer`] renders in
//! the top-right corner.

use std::collections::VecDeque;

use leptos::prelude::*;

use crate::core::notify::{Notification, NotificationKind, Notifier};

/// Maximum number of toasts on screen; the oldest is dropped first
const MAX_NOTIFICATIONS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationItem {
    pub id: u64,
    pub notification: Notification,
}

fn push_bounded(queue: &mut VecDeque<NotificationItem>, item: NotificationItem) {
    queue.push_back(item);
    while queue.len() > MAX_NOTIFICATIONS {
        queue.pop_front();
    }
}

#[derive(Clone, Copy)]
pub struct NotificationManager {
    items: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn items(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.items
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|n| n.retain(|i| i.id != id));
    }

    pub fn clear(&self) {
        self.items.set(VecDeque::new());
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationManager {
    fn notify(&self, notification: Notification) {
        let Some(id) = self.next_id.try_update(|next| {
            *next += 1;
            *next
        }) else {
            tracing::debug!(title = %notification.title, "notification dropped after unmount");
            return;
        };

        self.items
            .try_update(|n| push_bounded(n, NotificationItem { id, notification }));
    }
}

/// Create the manager and put it in context
pub fn provide_notifications() -> NotificationManager {
    let manager = NotificationManager::new();
    provide_context(manager);
    manager
}

pub fn use_notifications() -> NotificationManager {
    expect_context::<NotificationManager>()
}

#[component]
pub fn NotificationsContainer() -> impl IntoView {
    let manager = use_notifications();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm">
            <For
                each=move || manager.items().get()
                key=|item| item.id
                children=move |item| view! { <NotificationToast item=item manager=manager /> }
            />
        </div>
    }
}

fn palette(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Success => ("bg-green-50 border-green-300", "text-green-600"),
        NotificationKind::Error => ("bg-red-50 border-red-300", "text-red-600"),
        NotificationKind::Warning => ("bg-yellow-50 border-yellow-300", "text-yellow-600"),
        NotificationKind::Info => ("bg-blue-50 border-blue-300", "text-blue-600"),
    }
}

#[component]
fn NotificationToast(item: NotificationItem, manager: NotificationManager) -> impl IntoView {
    let id = item.id;
    let notification = item.notification;
    let is_exiting = RwSignal::new(false);

    if let Some(_ms) = notification.auto_dismiss_ms {
        #[cfg(feature = "hydrate")]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                is_exiting.try_set(true);
                // exit animation
                TimeoutFuture::new(300).await;
                manager.items().try_update(|n| n.retain(|i| i.id != id));
            });
        }
    }

    let (surface, accent) = palette(notification.kind);
    let class = format!(
        "flex items-start gap-3 p-4 rounded-lg border shadow-lg transition-all duration-300 {surface}"
    );

    view! {
        <div
            class=class
            role="status"
            style=move || if is_exiting.get() { "opacity: 0; transform: translateX(1rem);" } else { "opacity: 1;" }
        >
            <div class=format!("flex-1 min-w-0 {accent}")>
                <h4 class="text-sm font-semibold">{notification.title}</h4>
                <p class="text-xs text-gray-700 mt-0.5">{notification.message}</p>
            </div>
            <button
                class="text-gray-400 hover:text-gray-700"
                aria-label="Dismiss"
                on:click=move |_| manager.dismiss(id)
            >
                "×"
            </button>
        </div>
    }
}
