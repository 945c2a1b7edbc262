//! Route wrapper that applies the access policy before rendering.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::core::guard::{GuardDecision, RouteAccess, evaluate};
use crate::core::models::Role;
use crate::ui::auth::use_auth_context;
use crate::ui::spinner::LoadingSpinner;

#[component]
pub fn ProtectedRoute(
    /// Only accounts with the employee role may enter
    #[prop(default = false)]
    employee_only: bool,
    /// Allowed roles; empty admits any signed-in account
    #[prop(optional)]
    roles: Vec<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth_context();
    let pathname = use_location().pathname;
    let access = RouteAccess {
        employee_only,
        allowed_roles: roles,
    };

    let decision = Memo::new(move |_| auth.with_session(|s| evaluate(s, &access, &pathname.get())));

    move || match decision.get() {
        GuardDecision::Loading => view! { <LoadingSpinner message="Loading...".to_string() /> }.into_any(),
        redirect @ GuardDecision::Redirect { .. } => {
            let path = redirect.target().unwrap_or_default();
            tracing::debug!(%path, "route guard redirect");
            view! { <Redirect path=path /> }.into_any()
        }
        GuardDecision::Render => children().into_any(),
    }
}
