//! Admin dashboard: headcount stats, pending tasks and announcements.

use leptos::prelude::*;

use crate::core::cache::QueryCache;
use crate::core::models::{DashboardData, TaskPriority};
use crate::ui::auth::use_auth_context;
use crate::ui::layout::StaffLayout;
use crate::ui::query::{QueryState, load};
use crate::ui::spinner::LoadingSpinner;

const DASHBOARD_KEY: &str = "dashboard:admin";

#[component]
fn StatCard(label: &'static str, value: u32) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl border border-gray-200 p-5">
            <p class="text-sm text-gray-500">{label}</p>
            <p class="mt-1 text-3xl font-bold text-gray-900">{value}</p>
        </div>
    }
}

fn priority_class(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "bg-red-100 text-red-700",
        TaskPriority::Medium => "bg-yellow-100 text-yellow-700",
        TaskPriority::Low => "bg-gray-100 text-gray-700",
    }
}

#[component]
fn DashboardContent(data: DashboardData) -> impl IntoView {
    let stats = data.stats;

    view! {
        <div class="space-y-6">
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                <StatCard label="Total Employees" value=stats.total_employees />
                <StatCard label="Present Today" value=stats.present_today />
                <StatCard label="On Leave" value=stats.on_leave />
                <StatCard label="Open Positions" value=stats.open_positions />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <section class="bg-white rounded-xl border border-gray-200 p-5">
                    <h2 class="font-semibold text-gray-900 mb-3">"Pending Tasks"</h2>
                    {if data.tasks.is_empty() {
                        view! { <p class="text-sm text-gray-500">"Nothing waiting on you."</p> }.into_any()
                    } else {
                        view! {
                            <ul class="divide-y divide-gray-100">
                                {data.tasks.into_iter().map(|task| view! {
                                    <li class="py-2 flex items-center justify-between">
                                        <span class="text-sm text-gray-800">{task.title}</span>
                                        <span class=format!("px-2 py-0.5 rounded text-xs font-medium {}", priority_class(task.priority))>
                                            {task.count}
                                        </span>
                                    </li>
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }}
                </section>

                <section class="bg-white rounded-xl border border-gray-200 p-5">
                    <h2 class="font-semibold text-gray-900 mb-3">"Announcements"</h2>
                    <ul class="space-y-3">
                        {data.announcements.into_iter().map(|a| view! {
                            <li>
                                <p class="text-sm font-medium text-gray-900">{a.title}</p>
                                <p class="text-sm text-gray-600">{a.content}</p>
                            </li>
                        }).collect_view()}
                    </ul>
                </section>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();
    let cache = StoredValue::new(QueryCache::<DashboardData>::new());
    let state = RwSignal::new(QueryState::Loading);

    Effect::new(move |_| {
        let client = auth.client();
        cache.with_value(|cache| {
            load(cache, DASHBOARD_KEY, state, async move { client.dashboard().admin().await })
        });
    });

    view! {
        <StaffLayout title="Dashboard">
            {move || match state.get() {
                QueryState::Loading => view! { <LoadingSpinner message="Loading dashboard...".to_string() /> }.into_any(),
                QueryState::Failed(message) => view! { <p class="text-red-600">{message}</p> }.into_any(),
                QueryState::Ready(data) => view! { <DashboardContent data=data /> }.into_any(),
            }}
        </StaffLayout>
    }
}
