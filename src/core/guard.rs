//! Render-time access policy for protected routes.
//!
//! [`evaluate`] walks [`POLICIES`] in order and returns the first decision a
//! policy makes; a session that passes every policy renders the route.

use crate::core::models::Role;
use crate::core::navigation;
use crate::core::session::Session;

/// What a protected route requires of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteAccess {
    pub employee_only: bool,
    /// Empty means any authenticated role
    pub allowed_roles: Vec<Role>,
}

impl RouteAccess {
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn employee_only() -> Self {
        Self {
            employee_only: true,
            allowed_roles: Vec::new(),
        }
    }

    pub fn roles(roles: &[Role]) -> Self {
        Self {
            employee_only: false,
            allowed_roles: roles.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Redirect { to: String, from: Option<String> },
    Render,
}

impl GuardDecision {
    fn redirect(to: &str) -> Self {
        Self::Redirect {
            to: to.to_string(),
            from: None,
        }
    }

    /// Location to navigate to, with `?from=` when the attempted path is kept
    pub fn target(&self) -> Option<String> {
        match self {
            Self::Redirect { to, from: Some(from) } => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("from", from)
                    .finish();
                Some(format!("{to}?{query}"))
            }
            Self::Redirect { to, from: None } => Some(to.clone()),
            Self::Loading | Self::Render => None,
        }
    }
}

pub type Policy = fn(&Session, &RouteAccess, &str) -> Option<GuardDecision>;

/// Checked top to bottom; the first `Some` wins
pub const POLICIES: [Policy; 4] = [
    still_loading,
    require_authentication,
    require_employee,
    require_role,
];

pub fn evaluate(session: &Session, access: &RouteAccess, path: &str) -> GuardDecision {
    POLICIES
        .iter()
        .find_map(|policy| policy(session, access, path))
        .unwrap_or(GuardDecision::Render)
}

fn still_loading(session: &Session, _: &RouteAccess, _: &str) -> Option<GuardDecision> {
    session.is_loading.then_some(GuardDecision::Loading)
}

fn require_authentication(session: &Session, _: &RouteAccess, path: &str) -> Option<GuardDecision> {
    if session.is_authenticated() {
        return None;
    }
    Some(GuardDecision::Redirect {
        to: navigation::LOGIN.to_string(),
        from: (!path.is_empty()).then(|| path.to_string()),
    })
}

fn require_employee(session: &Session, access: &RouteAccess, _: &str) -> Option<GuardDecision> {
    (access.employee_only && !session.is_employee())
        .then(|| GuardDecision::redirect(navigation::ADMIN_DASHBOARD))
}

fn require_role(session: &Session, access: &RouteAccess, _: &str) -> Option<GuardDecision> {
    if access.allowed_roles.is_empty() || session.has_role(&access.allowed_roles) {
        return None;
    }
    let home = if session.is_employee() {
        navigation::EMPLOYEE_PORTAL
    } else {
        navigation::ADMIN_DASHBOARD
    };
    Some(GuardDecision::redirect(home))
}
