use crate::api::employee::{CreateEmployee, EmployeeDetail, EmployeeListResponse, EmployeeQuery};
use crate::api::leave_request::{DecideLeave, LeaveFilter, LeaveListResponse, SubmitLeave};
use crate::api::report::{ReportQuery, ReportResponse, ReportRow};
use crate::model::{Employee, LeaveRequest, LeaveStatus, LeaveType};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vacation Tracking API",
        version = "1.0.0",
        description = r#"
## Vacation Entitlement & Approval Service

Internal HR API for tracking employee vacation entitlements and routing
leave requests through a pending/approved/rejected workflow.

### 🔹 Key Features
- **Employee Management**
  - Register, list, and view employees with per-category leave quotas
- **Leave Management**
  - Submit requests with quota enforcement, approve/reject, view history
- **Reporting**
  - Year-scoped usage and remaining-balance report across all employees

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::submit_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::employee::register_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::employee_leave,

        crate::api::report::vacation_report
    ),
    components(
        schemas(
            LeaveType,
            LeaveStatus,
            LeaveRequest,
            LeaveFilter,
            LeaveListResponse,
            SubmitLeave,
            DecideLeave,
            CreateEmployee,
            Employee,
            EmployeeQuery,
            EmployeeDetail,
            EmployeeListResponse,
            ReportQuery,
            ReportRow,
            ReportResponse
        )
    ),
    tags(
        (name = "Leave", description = "Leave request APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Report", description = "Entitlement reporting APIs"),
    )
)]
pub struct ApiDoc;
