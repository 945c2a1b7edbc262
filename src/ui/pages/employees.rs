//! Employee directory with search, status filter and paging.

use leptos::prelude::*;

use crate::core::cache::QueryCache;
use crate::core::models::{Employee, EmployeeStatus, Page, PaginatedResponse};
use crate::core::services::EmployeeFilters;
use crate::ui::auth::use_auth_context;
use crate::ui::layout::StaffLayout;
use crate::ui::query::{QueryState, load};
use crate::ui::spinner::LoadingSpinner;

const PAGE_SIZE: u32 = 10;

/// Cache key for one combination of filters and page
fn directory_key(search: &str, status: &str, page: u32) -> String {
    format!("employees:{search}:{status}:{page}")
}

fn parse_status(raw: &str) -> Option<EmployeeStatus> {
    match raw {
        "active" => Some(EmployeeStatus::Active),
        "on-leave" => Some(EmployeeStatus::OnLeave),
        "terminated" => Some(EmployeeStatus::Terminated),
        _ => None,
    }
}

fn status_badge(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => "bg-green-100 text-green-700",
        EmployeeStatus::OnLeave => "bg-yellow-100 text-yellow-700",
        EmployeeStatus::Terminated => "bg-gray-100 text-gray-600",
    }
}

#[component]
fn EmployeeRow(employee: Employee) -> impl IntoView {
    let name = employee.full_name();
    view! {
        <tr class="border-t border-gray-100">
            <td class="px-4 py-3">
                <p class="font-medium text-gray-900">{name}</p>
                <p class="text-xs text-gray-500">{employee.email}</p>
            </td>
            <td class="px-4 py-3 text-sm text-gray-700">{employee.position}</td>
            <td class="px-4 py-3 text-sm text-gray-700">{employee.department}</td>
            <td class="px-4 py-3">
                <span class=format!("px-2 py-0.5 rounded-full text-xs font-medium {}", status_badge(employee.status))>
                    {employee.status.to_string()}
                </span>
            </td>
            <td class="px-4 py-3 text-sm text-gray-500">{employee.joining_date}</td>
        </tr>
    }
}

#[component]
fn DirectoryTable(page: Page<Employee>, current: RwSignal<u32>) -> impl IntoView {
    let page_count = page.page_count();
    let total = page.total_count;

    view! {
        <div class="bg-white rounded-xl border border-gray-200 overflow-hidden">
            <table class="w-full text-left">
                <thead class="bg-gray-50 text-xs uppercase text-gray-500">
                    <tr>
                        <th class="px-4 py-2">"Employee"</th>
                        <th class="px-4 py-2">"Position"</th>
                        <th class="px-4 py-2">"Department"</th>
                        <th class="px-4 py-2">"Status"</th>
                        <th class="px-4 py-2">"Joined"</th>
                    </tr>
                </thead>
                <tbody>
                    {page.items.into_iter().map(|employee| view! { <EmployeeRow employee=employee /> }).collect_view()}
                </tbody>
            </table>
            <div class="flex items-center justify-between px-4 py-3 border-t border-gray-100 text-sm text-gray-600">
                <span>{format!("{total} employees")}</span>
                <div class="flex items-center gap-2">
                    <button
                        class="px-3 py-1 border rounded disabled:opacity-40"
                        disabled=move || current.get() <= 1
                        on:click=move |_| current.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "Previous"
                    </button>
                    <span>{move || format!("Page {} of {}", current.get(), page_count)}</span>
                    <button
                        class="px-3 py-1 border rounded disabled:opacity-40"
                        disabled=move || u64::from(current.get()) >= page_count
                        on:click=move |_| current.update(|p| *p += 1)
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let auth = use_auth_context();
    let cache = StoredValue::new(QueryCache::<PaginatedResponse<Employee>>::new());
    let state = RwSignal::new(QueryState::Loading);

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let current = RwSignal::new(1u32);

    // Every change of the inputs issues a new query; older responses are dropped
    Effect::new(move |_| {
        let (search, status, page) = (search.get(), status.get(), current.get());
        let key = directory_key(&search, &status, page);
        let filters = EmployeeFilters {
            search: Some(search),
            status: parse_status(&status),
            page: Some(page),
            limit: Some(PAGE_SIZE),
            ..Default::default()
        };
        let client = auth.client();
        cache.with_value(|cache| {
            load(cache, &key, state, async move {
                client.employees().list(&filters).await
            })
        });
    });

    view! {
        <StaffLayout title="Employees">
            <div class="flex flex-col sm:flex-row gap-3 mb-4">
                <input
                    type="search"
                    placeholder="Search by name, position or department"
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-lg"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        current.set(1);
                    }
                />
                <select
                    class="px-3 py-2 border border-gray-300 rounded-lg"
                    on:change=move |ev| {
                        status.set(event_target_value(&ev));
                        current.set(1);
                    }
                >
                    <option value="">"All statuses"</option>
                    <option value="active">"Active"</option>
                    <option value="on-leave">"On leave"</option>
                    <option value="terminated">"Terminated"</option>
                </select>
            </div>

            {move || match state.get() {
                QueryState::Loading => view! { <LoadingSpinner message="Loading employees...".to_string() /> }.into_any(),
                QueryState::Failed(message) => view! { <p class="text-red-600">{message}</p> }.into_any(),
                QueryState::Ready(response) => view! { <DirectoryTable page=response.data current=current /> }.into_any(),
            }}
        </StaffLayout>
    }
}
