//! Login pages for HR staff and for employees.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::navigation;
use crate::ui::auth::{LoginForm, RegisterForm, use_auth_context};

/// Centered card with the product name above it
#[component]
fn AuthShell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50 flex flex-col items-center justify-center p-4">
            <h1 class="text-3xl font-bold text-blue-600 mb-8">"HRCompass"</h1>
            <div class="w-full max-w-md bg-white rounded-xl shadow-lg p-6 border border-gray-200">
                {children()}
            </div>
        </div>
    }
}

/// Send an already signed-in visitor to their home route
fn redirect_when_signed_in() {
    let auth = use_auth_context();
    let navigate = use_navigate();
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let home = if auth.is_employee() {
                navigation::EMPLOYEE_PORTAL
            } else {
                navigation::ADMIN_DASHBOARD
            };
            navigate(home, Default::default());
        }
    });
}

#[component]
pub fn LoginPage() -> impl IntoView {
    redirect_when_signed_in();

    view! {
        <AuthShell>
            <LoginForm />
        </AuthShell>
    }
}

#[component]
pub fn EmployeeLoginPage() -> impl IntoView {
    redirect_when_signed_in();

    view! {
        <AuthShell>
            <LoginForm employee=true />
        </AuthShell>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    redirect_when_signed_in();

    view! {
        <AuthShell>
            <RegisterForm />
        </AuthShell>
    }
}
