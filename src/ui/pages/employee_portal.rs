//! Self-service landing page for employees.

use leptos::prelude::*;

use crate::core::cache::QueryCache;
use crate::core::models::{EmployeeDashboardData, LeaveBalance};
use crate::ui::auth::use_auth_context;
use crate::ui::layout::PortalLayout;
use crate::ui::query::{QueryState, load};
use crate::ui::spinner::LoadingSpinner;

const PORTAL_KEY: &str = "dashboard:employee";

#[component]
fn BalanceCard(balance: LeaveBalance) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl border border-gray-200 p-4">
            <p class="text-sm text-gray-500 capitalize">{format!("{} leave", balance.leave_type)}</p>
            <p class="mt-1 text-2xl font-bold text-gray-900">{balance.remaining.to_string()}</p>
            <p class="text-xs text-gray-500">{format!("{} of {} used", balance.used, balance.total)}</p>
        </div>
    }
}

#[component]
fn PortalContent(data: EmployeeDashboardData) -> impl IntoView {
    let summary = data.attendance_summary;

    view! {
        <div class="space-y-6">
            <section>
                <h2 class="font-semibold text-gray-900 mb-3">"This month"</h2>
                <div class="grid grid-cols-2 sm:grid-cols-4 gap-4 text-center">
                    <div class="bg-white rounded-xl border p-4"><p class="text-2xl font-bold">{summary.present}</p><p class="text-xs text-gray-500">"Present"</p></div>
                    <div class="bg-white rounded-xl border p-4"><p class="text-2xl font-bold">{summary.absent}</p><p class="text-xs text-gray-500">"Absent"</p></div>
                    <div class="bg-white rounded-xl border p-4"><p class="text-2xl font-bold">{summary.work_from_home}</p><p class="text-xs text-gray-500">"Remote"</p></div>
                    <div class="bg-white rounded-xl border p-4"><p class="text-2xl font-bold">{format!("{:.1}", summary.total_work_hours)}</p><p class="text-xs text-gray-500">"Hours"</p></div>
                </div>
            </section>

            <section>
                <h2 class="font-semibold text-gray-900 mb-3">"Leave balance"</h2>
                <div class="grid grid-cols-2 sm:grid-cols-3 gap-4">
                    {data.leave_balance.into_iter().map(|b| view! { <BalanceCard balance=b /> }).collect_view()}
                </div>
            </section>

            <section class="bg-white rounded-xl border border-gray-200 p-5">
                <h2 class="font-semibold text-gray-900 mb-3">"Upcoming reviews"</h2>
                {if data.upcoming_reviews.is_empty() {
                    view! { <p class="text-sm text-gray-500">"No reviews scheduled."</p> }.into_any()
                } else {
                    view! {
                        <ul class="space-y-2">
                            {data.upcoming_reviews.into_iter().map(|r| view! {
                                <li class="text-sm text-gray-700">
                                    {format!("{} with {} on {}", r.review_type, r.reviewer_name, r.review_date)}
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </section>

            <section class="bg-white rounded-xl border border-gray-200 p-5">
                <h2 class="font-semibold text-gray-900 mb-3">"Announcements"</h2>
                {data.announcements.into_iter().map(|a| view! {
                    <div class="mb-2">
                        <p class="text-sm font-medium text-gray-900">{a.title}</p>
                        <p class="text-sm text-gray-600">{a.content}</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}

#[component]
pub fn EmployeePortalPage() -> impl IntoView {
    let auth = use_auth_context();
    let cache = StoredValue::new(QueryCache::<EmployeeDashboardData>::new());
    let state = RwSignal::new(QueryState::Loading);

    Effect::new(move |_| {
        let client = auth.client();
        cache.with_value(|cache| {
            load(cache, PORTAL_KEY, state, async move { client.dashboard().employee().await })
        });
    });

    let greeting = move || {
        auth.user()
            .map(|u| format!("Hello, {}", u.first_name))
            .unwrap_or_default()
    };

    view! {
        <PortalLayout>
            <h1 class="text-2xl font-bold text-gray-900 mb-6">{greeting}</h1>
            {move || match state.get() {
                QueryState::Loading => view! { <LoadingSpinner message="Loading your portal...".to_string() /> }.into_any(),
                QueryState::Failed(message) => view! { <p class="text-red-600">{message}</p> }.into_any(),
                QueryState::Ready(data) => view! { <PortalContent data=data /> }.into_any(),
            }}
        </PortalLayout>
    }
}
