//! Entitlement calculator: remaining balance per employee, leave category
//! and calendar year, derived from approved history. Read-only.

use sqlx::{Executor, Sqlite};

use crate::model::{Employee, LeaveType, RemainingDays};

/// Approved days consumed by an employee in one category, scoped to the year
/// the leave STARTS in. A request spanning a year boundary counts entirely
/// against its start year.
pub async fn used_days<'e, E>(
    db: E,
    employee_id: i64,
    leave_type: LeaveType,
    year: i32,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let used: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT SUM(days) FROM leave_requests
        WHERE employee_id = ?
          AND leave_type = ?
          AND status = 'approved'
          AND strftime('%Y', start_date) = ?
        "#,
    )
    .bind(employee_id)
    .bind(leave_type)
    .bind(format!("{year:04}"))
    .fetch_one(db)
    .await?;

    Ok(used.unwrap_or(0))
}

/// Quota minus approved usage for the given year, floored at zero for paid
/// categories. Unpaid leave has no ceiling and skips the lookup entirely.
pub async fn remaining<'e, E>(
    db: E,
    employee: &Employee,
    leave_type: LeaveType,
    year: i32,
) -> Result<RemainingDays, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let Some(quota) = employee.quota(leave_type) else {
        return Ok(RemainingDays::Unlimited);
    };

    let used = used_days(db, employee.id, leave_type, year).await?;
    Ok(RemainingDays::Days((quota - used).max(0)))
}
