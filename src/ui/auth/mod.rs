//! Authentication UI: the auth context and the login/register forms.

mod context;
mod login_form;
mod register_form;

pub use context::{AuthContext, AuthProvider, PortalClient, RouterNavigator, use_auth_context};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
