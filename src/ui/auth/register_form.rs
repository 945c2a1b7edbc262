//! Account registration form for HR administrators.

use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_auth_context;
use super::login_form::{validate_email, validate_required};
use crate::core::navigation;
use crate::core::services::RegisterRequest;
use crate::ui::spinner::{Spinner, SpinnerSize};

const MIN_PASSWORD_LEN: usize = 6;

fn validate_password(password: &str, confirm: &str) -> (Option<&'static str>, Option<&'static str>) {
    let password_error = if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    };
    let confirm_error = (password != confirm).then_some("Passwords do not match");
    (password_error, confirm_error)
}

#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
    error: RwSignal<Option<&'static str>>,
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
            <input
                type=kind
                id=id
                name=id
                class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                class:border-red-500=move || error.get().is_some()
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    error.set(None);
                }
            />
            {move || error.get().map(|e| view! { <p class="mt-1 text-sm text-red-500">{e}</p> })}
        </div>
    }
}

#[component]
pub fn RegisterForm() -> impl IntoView {
    let auth = use_auth_context();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let first_name_error = RwSignal::new(None);
    let last_name_error = RwSignal::new(None);
    let email_error = RwSignal::new(None);
    let password_error = RwSignal::new(None);
    let confirm_error = RwSignal::new(None);

    let submitted = RwSignal::new(false);
    let busy = move || submitted.get() && auth.is_loading();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        first_name_error.set(validate_required(&first_name.get_untracked(), "First name is required"));
        last_name_error.set(validate_required(&last_name.get_untracked(), "Last name is required"));
        email_error.set(validate_email(&email.get_untracked()));
        let (pw, cf) = validate_password(&password.get_untracked(), &confirm.get_untracked());
        password_error.set(pw);
        confirm_error.set(cf);

        let invalid = [first_name_error, last_name_error, email_error, password_error, confirm_error]
            .iter()
            .any(|e| e.get_untracked().is_some());
        if invalid {
            return;
        }

        submitted.set(true);
        auth.register(RegisterRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-5">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Create an account"</h2>
                <p class="mt-2 text-sm text-gray-500">"Set up HR administration for your company"</p>
            </div>

            <div class="grid grid-cols-2 gap-4">
                <Field id="firstName" label="First name" value=first_name error=first_name_error />
                <Field id="lastName" label="Last name" value=last_name error=last_name_error />
            </div>
            <Field id="email" label="Email" kind="email" value=email error=email_error />
            <Field id="password" label="Password" kind="password" value=password error=password_error />
            <Field id="confirmPassword" label="Confirm password" kind="password" value=confirm error=confirm_error />

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg disabled:opacity-50"
                disabled=busy
            >
                {move || if busy() {
                    view! {
                        <span class="flex items-center justify-center gap-2">
                            <Spinner size=SpinnerSize::Small />
                            "Creating account..."
                        </span>
                    }.into_any()
                } else {
                    view! { <span>"Sign Up"</span> }.into_any()
                }}
            </button>

            <p class="text-center text-sm text-gray-500">
                "Already have an account? "
                <A href=navigation::LOGIN attr:class="text-blue-600 font-medium">"Sign in"</A>
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password("", ""), (Some("Password is required"), None));
        assert_eq!(
            validate_password("abc", "abc"),
            (Some("Password must be at least 6 characters"), None)
        );
        assert_eq!(validate_password("secret1", "secret2"), (None, Some("Passwords do not match")));
        assert_eq!(validate_password("secret1", "secret1"), (None, None));
    }
}
