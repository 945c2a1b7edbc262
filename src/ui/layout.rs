//! Page chrome: the staff sidebar layout and the employee portal layout.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::core::navigation;
use crate::ui::auth::use_auth_context;

const STAFF_MENU: &[(&str, &str)] = &[
    ("Dashboard", navigation::ADMIN_DASHBOARD),
    ("Employees", navigation::EMPLOYEES),
    ("Leave", navigation::LEAVE),
];

#[component]
fn UserBadge() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <div class="flex items-center gap-3">
            {move || auth.user().map(|user| view! {
                <div class="text-right">
                    <p class="text-sm font-medium text-gray-900">{user.full_name()}</p>
                    <p class="text-xs text-gray-500 capitalize">{user.role.to_string()}</p>
                </div>
            })}
            <button
                class="px-3 py-1.5 text-sm border border-gray-300 rounded-lg hover:bg-gray-100"
                on:click=move |_| auth.logout()
            >
                "Log out"
            </button>
        </div>
    }
}

/// Sidebar layout for admin and HR pages
#[component]
pub fn StaffLayout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <div class="min-h-screen flex bg-gray-50">
            <aside class="w-64 bg-white border-r border-gray-200 flex flex-col">
                <div class="h-16 flex items-center px-4 border-b border-gray-200">
                    <A href=navigation::ADMIN_DASHBOARD attr:class="text-xl font-bold text-blue-600">"HRCompass"</A>
                </div>
                <nav class="flex-1 px-2 py-4 space-y-1">
                    {STAFF_MENU.iter().map(|&(label, path)| view! {
                        <A
                            href=path
                            attr:class=move || if pathname.get() == path {
                                "block px-3 py-2 rounded-lg font-medium bg-blue-50 text-blue-700"
                            } else {
                                "block px-3 py-2 rounded-lg font-medium text-gray-700 hover:bg-gray-100"
                            }
                        >
                            {label}
                        </A>
                    }).collect_view()}
                </nav>
            </aside>

            <div class="flex-1 flex flex-col">
                <header class="h-16 bg-white border-b border-gray-200 flex items-center justify-between px-6">
                    <h1 class="text-lg font-semibold text-gray-900">{title}</h1>
                    <UserBadge />
                </header>
                <main class="flex-1 p-6">{children()}</main>
            </div>
        </div>
    }
}

/// Top-bar layout for the employee portal
#[component]
pub fn PortalLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50">
            <header class="h-16 bg-white border-b border-gray-200 flex items-center justify-between px-6">
                <A href=navigation::EMPLOYEE_PORTAL attr:class="text-xl font-bold text-blue-600">"Employee Portal"</A>
                <UserBadge />
            </header>
            <main class="max-w-5xl mx-auto p-6">{children()}</main>
        </div>
    }
}
