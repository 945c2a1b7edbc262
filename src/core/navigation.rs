//! Client-side routes and the navigation sink the core redirects through.

pub const LOGIN: &str = "/login";
pub const EMPLOYEE_LOGIN: &str = "/employee/login";
pub const REGISTER: &str = "/register";
pub const ADMIN_DASHBOARD: &str = "/dashboard";
pub const EMPLOYEE_PORTAL: &str = "/employee/portal";
pub const EMPLOYEES: &str = "/employees";
pub const LEAVE: &str = "/leave";

/// Something that can move the application to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

