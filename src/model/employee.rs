use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::leave_request::LeaveType;

/// Default paid-leave quotas per calendar year; no accrual or carry-over.
pub const DEFAULT_ANNUAL_QUOTA: i64 = 14;
pub const DEFAULT_SICK_QUOTA: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "EMP001",
        "name": "Jane Doe",
        "email": "jane.doe@company.com",
        "department": "Engineering",
        "hire_date": "2023-01-15",
        "annual_leave_quota": 14,
        "sick_leave_quota": 30
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "EMP001")]
    pub employee_code: String,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "jane.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2023-01-15", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = 14)]
    pub annual_leave_quota: i64,

    #[schema(example = 30)]
    pub sick_leave_quota: i64,
}

impl Employee {
    /// Annual ceiling for a paid category; `None` for unpaid leave, which
    /// carries no quota.
    pub fn quota(&self, leave_type: LeaveType) -> Option<i64> {
        match leave_type {
            LeaveType::Annual => Some(self.annual_leave_quota),
            LeaveType::Sick => Some(self.sick_leave_quota),
            LeaveType::Unpaid => None,
        }
    }
}
