//! Leave management for HR: review and decide on leave requests.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::cache::QueryCache;
use crate::core::models::{LeaveRequest, LeaveStatus, PaginatedResponse};
use crate::core::notify::{Notification, Notifier};
use crate::core::services::LeaveFilters;
use crate::ui::auth::use_auth_context;
use crate::ui::layout::StaffLayout;
use crate::ui::notifications::use_notifications;
use crate::ui::query::{QueryState, load};
use crate::ui::spinner::LoadingSpinner;

const LEAVES_PREFIX: &str = "leaves:";

/// One cache entry per status tab
fn requests_key(status: Option<LeaveStatus>) -> String {
    match status {
        Some(status) => format!("{LEAVES_PREFIX}{status}"),
        None => format!("{LEAVES_PREFIX}all"),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Decision {
    Approve,
    Reject,
}

fn status_class(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "bg-yellow-100 text-yellow-700",
        LeaveStatus::Approved => "bg-green-100 text-green-700",
        LeaveStatus::Rejected => "bg-red-100 text-red-700",
    }
}

#[component]
pub fn LeavePage() -> impl IntoView {
    let auth = use_auth_context();
    let notifications = use_notifications();
    let cache = StoredValue::new(QueryCache::<PaginatedResponse<LeaveRequest>>::new());
    let state = RwSignal::new(QueryState::Loading);
    let status = RwSignal::new(Some(LeaveStatus::Pending));
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        let status = status.get();
        let filters = LeaveFilters {
            status,
            ..Default::default()
        };
        let client = auth.client();
        cache.with_value(|cache| {
            load(cache, &requests_key(status), state, async move {
                client.leaves().list(&filters).await
            })
        });
    });

    let decide = move |id: String, decision: Decision| {
        let client = auth.client();
        spawn_local(async move {
            let leaves = client.leaves();
            let result = match decision {
                Decision::Approve => leaves.approve(&id, None).await,
                Decision::Reject => leaves.reject(&id, None).await,
            };
            // failures were already reported by the client
            if result.is_ok() {
                let verb = if decision == Decision::Approve { "approved" } else { "rejected" };
                notifications.notify(Notification::success(
                    "Leave updated",
                    format!("The request was {verb}."),
                ));
                // the request moved between tabs, so every tab is stale
                cache.with_value(|cache| cache.invalidate_prefix(LEAVES_PREFIX));
                reload.update(|n| *n += 1);
            }
        });
    };

    let tab = move |label: &'static str, value: Option<LeaveStatus>| {
        view! {
            <button
                class=move || if status.get() == value {
                    "px-3 py-1.5 rounded-lg text-sm font-medium bg-blue-600 text-white"
                } else {
                    "px-3 py-1.5 rounded-lg text-sm font-medium text-gray-700 hover:bg-gray-100"
                }
                on:click=move |_| status.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <StaffLayout title="Leave Management">
            <div class="flex gap-2 mb-4">
                {tab("Pending", Some(LeaveStatus::Pending))}
                {tab("Approved", Some(LeaveStatus::Approved))}
                {tab("Rejected", Some(LeaveStatus::Rejected))}
                {tab("All", None)}
            </div>

            {move || match state.get() {
                QueryState::Loading => view! { <LoadingSpinner message="Loading requests...".to_string() /> }.into_any(),
                QueryState::Failed(message) => view! { <p class="text-red-600">{message}</p> }.into_any(),
                QueryState::Ready(response) if response.data.items.is_empty() => {
                    view! { <p class="text-gray-500">"No leave requests."</p> }.into_any()
                }
                QueryState::Ready(response) => view! {
                    <div class="bg-white rounded-xl border border-gray-200 divide-y divide-gray-100">
                        {response.data.items.into_iter().map(|leave| {
                            let pending = leave.status == LeaveStatus::Pending;
                            let approve_id = leave.id.clone();
                            let reject_id = leave.id.clone();
                            view! {
                                <div class="p-4 flex items-start justify-between gap-4">
                                    <div>
                                        <p class="font-medium text-gray-900 capitalize">{leave.leave_type}" leave"</p>
                                        <p class="text-sm text-gray-600">{format!("{} to {}", leave.start_date, leave.end_date)}</p>
                                        <p class="text-sm text-gray-500 mt-1">{leave.reason}</p>
                                    </div>
                                    <div class="flex items-center gap-2">
                                        <span class=format!("px-2 py-0.5 rounded-full text-xs font-medium {}", status_class(leave.status))>
                                            {leave.status.to_string()}
                                        </span>
                                        <Show when=move || pending>
                                            <button
                                                class="px-3 py-1 text-sm rounded bg-green-600 text-white"
                                                on:click={
                                                    let id = approve_id.clone();
                                                    move |_| decide(id.clone(), Decision::Approve)
                                                }
                                            >
                                                "Approve"
                                            </button>
                                            <button
                                                class="px-3 py-1 text-sm rounded bg-red-600 text-white"
                                                on:click={
                                                    let id = reject_id.clone();
                                                    move |_| decide(id.clone(), Decision::Reject)
                                                }
                                            >
                                                "Reject"
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any(),
            }}
        </StaffLayout>
    }
}
