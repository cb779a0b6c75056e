use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
}

impl LeaveType {
    /// Paid categories are subject to a quota ceiling; unpaid leave is not.
    pub fn is_paid(&self) -> bool {
        matches!(self, LeaveType::Annual | LeaveType::Sick)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Remaining entitlement for one employee/category/year.
///
/// Unpaid leave has no ceiling; that is a tagged variant here rather than a
/// float infinity so comparisons stay integer-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingDays {
    Unlimited,
    Days(i64),
}

impl RemainingDays {
    pub fn allows(&self, requested: i64) -> bool {
        match self {
            RemainingDays::Unlimited => true,
            RemainingDays::Days(d) => requested <= *d,
        }
    }

    pub fn days(&self) -> Option<i64> {
        match self {
            RemainingDays::Unlimited => None,
            RemainingDays::Days(d) => Some(*d),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "leave_type": "annual",
        "start_date": "2024-01-01",
        "end_date": "2024-01-05",
        "days": 5,
        "reason": "family trip",
        "status": "pending",
        "created_at": "2024-01-01T00:00:00Z",
        "decided_by": null,
        "decided_at": null
    })
)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "annual")]
    pub leave_type: LeaveType,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    /// Inclusive; a one-day leave has `end_date == start_date`.
    #[schema(example = "2024-01-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = 5)]
    pub days: i64,

    #[schema(example = "family trip", nullable = true)]
    pub reason: Option<String>,

    #[schema(example = "pending")]
    pub status: LeaveStatus,

    #[schema(example = "2024-01-01T00:00:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    /// Set only when the request is approved or rejected.
    #[schema(example = "hr.manager", nullable = true)]
    pub decided_by: Option<String>,

    #[schema(example = "2024-01-02T00:00:00Z", value_type = String, format = "date-time", nullable = true)]
    pub decided_at: Option<DateTime<Utc>>,
}
