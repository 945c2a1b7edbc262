//! Login form shared by the staff and employee login pages.

use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::navigation;
use crate::ui::spinner::{Spinner, SpinnerSize};

pub(crate) fn validate_email(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some("Email is required")
    } else if !value.contains('@') || !value.contains('.') {
        Some("Please enter a valid email")
    } else {
        None
    }
}

pub(crate) fn validate_required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

#[component]
pub fn LoginForm(
    /// Sign in through the employee endpoint and land on the portal
    #[prop(default = false)]
    employee: bool,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email_error = RwSignal::new(None::<&'static str>);
    let password_error = RwSignal::new(None::<&'static str>);
    let submitted = RwSignal::new(false);
    let busy = move || submitted.get() && auth.is_loading();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        email_error.set(validate_email(&email.get_untracked()));
        password_error.set(validate_required(&password.get_untracked(), "Password is required"));
        if email_error.get_untracked().is_some() || password_error.get_untracked().is_some() {
            return;
        }

        submitted.set(true);
        auth.login(
            email.get_untracked().trim().to_string(),
            password.get_untracked(),
            employee,
        );
    };

    let (heading, subheading) = if employee {
        ("Employee Portal", "Sign in to view your attendance, leave and payslips")
    } else {
        ("Welcome Back", "Sign in to the HR administration console")
    };

    view! {
        <form on:submit=on_submit class="space-y-6">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">{heading}</h2>
                <p class="mt-2 text-sm text-gray-500">{subheading}</p>
            </div>

            <div>
                <label for="email" class="block text-sm font-medium text-gray-700 mb-1">"Email"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@company.com"
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                    class:border-red-500=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                />
                {move || email_error.get().map(|error| view! { <p class="mt-1 text-sm text-red-500">{error}</p> })}
            </div>

            <div>
                <label for="password" class="block text-sm font-medium text-gray-700 mb-1">"Password"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="current-password"
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                    class:border-red-500=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                />
                {move || password_error.get().map(|error| view! { <p class="mt-1 text-sm text-red-500">{error}</p> })}
            </div>

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg disabled:opacity-50"
                disabled=busy
            >
                {move || {
                    if busy() {
                        view! {
                            <span class="flex items-center justify-center gap-2">
                                <Spinner size=SpinnerSize::Small />
                                "Signing in..."
                            </span>
                        }.into_any()
                    } else {
                        view! { <span>"Sign In"</span> }.into_any()
                    }
                }}
            </button>

            <div class="text-center text-sm text-gray-500 space-y-1">
                {if employee {
                    view! {
                        <p>
                            "HR staff? "
                            <A href=navigation::LOGIN attr:class="text-blue-600 font-medium">"Admin login"</A>
                        </p>
                    }.into_any()
                } else {
                    view! {
                        <p>
                            "Don't have an account? "
                            <A href=navigation::REGISTER attr:class="text-blue-600 font-medium">"Sign up"</A>
                        </p>
                        <p>
                            "Employee? "
                            <A href=navigation::EMPLOYEE_LOGIN attr:class="text-blue-600 font-medium">"Employee portal"</A>
                        </p>
                    }.into_any()
                }}
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert_eq!(validate_email(""), Some("Email is required"));
        assert_eq!(validate_email("   "), Some("Email is required"));
        assert_eq!(validate_email("pat"), Some("Please enter a valid email"));
        assert_eq!(validate_email(" pat@example.com "), None);
    }

    #[test]
    fn test_required_validation() {
        assert_eq!(validate_required(" ", "Password is required"), Some("Password is required"));
        assert_eq!(validate_required("x", "Password is required"), None);
    }
}
