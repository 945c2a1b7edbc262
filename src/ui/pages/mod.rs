//! Routed pages: sign-in, the staff console and the employee portal.

mod dashboard;
mod employee_portal;
mod employees;
mod leave;
mod login;
mod not_found;

pub use dashboard::DashboardPage;
pub use employee_portal::EmployeePortalPage;
pub use employees::EmployeesPage;
pub use leave::LeavePage;
pub use login::{EmployeeLoginPage, LoginPage, RegisterPage};
pub use not_found::NotFoundPage;
