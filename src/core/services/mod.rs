//! Typed façades over the REST backend, one per resource.
//!
//! Services borrow the client; obtain them with `client.employees()`,
//! `client.leaves()` and so on. They do no error recovery of their own.

mod attendance;
mod auth;
mod dashboard;
mod department;
mod document;
mod employee;
mod leave;
mod payroll;
mod performance;
mod recruitment;

pub use attendance::{AttendanceFilters, AttendanceService};
pub use auth::{AuthService, ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use dashboard::DashboardService;
pub use department::DepartmentService;
pub use document::{DocumentFilters, DocumentService, DocumentUpload};
pub use employee::{EmployeeFilters, EmployeeService, SortOrder};
pub use leave::{LeaveFilters, LeaveService};
pub use payroll::{PayrollFilters, PayrollService};
pub use performance::{PerformanceFilters, PerformanceService};
pub use recruitment::{CandidateFilters, JobFilters, RecruitmentService};

use crate::core::http::{ApiClient, Transport};

/// Filter key the "my …" endpoints take from the session instead
pub(crate) const EMPLOYEE_ID_PARAM: &str = "employeeId";

impl<T: Transport> ApiClient<T> {
    pub fn auth(&self) -> AuthService<'_, T> {
        AuthService::new(self)
    }

    pub fn employees(&self) -> EmployeeService<'_, T> {
        EmployeeService::new(self)
    }

    pub fn leaves(&self) -> LeaveService<'_, T> {
        LeaveService::new(self)
    }

    pub fn attendance(&self) -> AttendanceService<'_, T> {
        AttendanceService::new(self)
    }

    pub fn payroll(&self) -> PayrollService<'_, T> {
        PayrollService::new(self)
    }

    pub fn documents(&self) -> DocumentService<'_, T> {
        DocumentService::new(self)
    }

    pub fn recruitment(&self) -> RecruitmentService<'_, T> {
        RecruitmentService::new(self)
    }

    pub fn performance(&self) -> PerformanceService<'_, T> {
        PerformanceService::new(self)
    }

    pub fn departments(&self) -> DepartmentService<'_, T> {
        DepartmentService::new(self)
    }

    pub fn dashboard(&self) -> DashboardService<'_, T> {
        DashboardService::new(self)
    }
}
