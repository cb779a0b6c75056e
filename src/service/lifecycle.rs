//! Request lifecycle manager: submission with quota enforcement, and the
//! one-way pending -> approved | rejected decision step.

use chrono::{Datelike, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::HrError;
use crate::model::{Employee, LeaveRequest, LeaveStatus, LeaveType};
use crate::service::entitlement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Validates and persists a new leave request in `pending` state.
///
/// The quota check and the insert run inside a single transaction so that
/// concurrent submissions for the same employee/category/year cannot jointly
/// overshoot the quota.
pub async fn submit(
    pool: &SqlitePool,
    employee_id: i64,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<String>,
) -> Result<LeaveRequest, HrError> {
    if end_date < start_date {
        return Err(HrError::InvalidDateRange);
    }
    // Inclusive span, always >= 1 past the date check above.
    let days = (end_date - start_date).num_days() + 1;

    let mut tx = pool.begin().await?;

    let employee: Employee = sqlx::query_as("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| HrError::NotFound(format!("employee {employee_id}")))?;

    // Quota is enforced against the year the leave starts in. Unpaid leave
    // comes back Unlimited and always passes.
    let remaining =
        entitlement::remaining(&mut *tx, &employee, leave_type, start_date.year()).await?;
    if !remaining.allows(days) {
        return Err(HrError::QuotaExceeded {
            remaining: remaining.days().unwrap_or(0),
        });
    }

    let id = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, leave_type, start_date, end_date, days, reason, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(leave_type)
    .bind(start_date)
    .bind(end_date)
    .bind(days)
    .bind(reason.as_deref())
    .bind(LeaveStatus::Pending)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let request: LeaveRequest = sqlx::query_as("SELECT * FROM leave_requests WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        request_id = request.id,
        employee_id,
        leave_type = %leave_type,
        days,
        "leave request submitted"
    );
    Ok(request)
}

/// Approves or rejects a pending request, stamping the caller-supplied
/// approver identity and the decision time.
///
/// Both outcomes are terminal: deciding a request that is no longer pending
/// fails with `AlreadyDecided` and leaves the record untouched. Quota is not
/// re-checked here; it was enforced at submission.
pub async fn decide(
    pool: &SqlitePool,
    request_id: i64,
    decision: Decision,
    decided_by: &str,
) -> Result<LeaveRequest, HrError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, decided_by = ?, decided_at = ?
        WHERE id = ? AND status = 'pending'
        "#,
    )
    .bind(decision.status())
    .bind(decided_by)
    .bind(Utc::now())
    .bind(request_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        // Zero rows touched is either an unknown id or a request that was
        // already decided; tell them apart for the caller.
        let existing: Option<LeaveRequest> =
            sqlx::query_as("SELECT * FROM leave_requests WHERE id = ?")
                .bind(request_id)
                .fetch_optional(&mut *tx)
                .await?;
        return Err(match existing {
            Some(request) => HrError::AlreadyDecided {
                status: request.status,
            },
            None => HrError::NotFound(format!("leave request {request_id}")),
        });
    }

    let request: LeaveRequest = sqlx::query_as("SELECT * FROM leave_requests WHERE id = ?")
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        request_id,
        decided_by,
        status = %request.status,
        "leave request decided"
    );
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_schema(&pool).await.unwrap();
        pool
    }

    async fn seed_employee(pool: &SqlitePool, code: &str) -> i64 {
        sqlx::query(
            r#"
            INSERT INTO employees
                (employee_code, name, email, department, hire_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(code)
        .bind("Test Person")
        .bind(format!("{code}@example.com"))
        .bind("QA")
        .bind(day(2023, 1, 15))
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn request_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM leave_requests")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn submit_rejects_inverted_date_range() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "EMP001").await;

        let err = submit(
            &pool,
            emp,
            LeaveType::Annual,
            day(2024, 3, 5),
            day(2024, 3, 1),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, HrError::InvalidDateRange));
        assert_eq!(request_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn submit_rejects_unknown_employee() {
        let pool = test_pool().await;

        let err = submit(
            &pool,
            999,
            LeaveType::Annual,
            day(2024, 1, 1),
            day(2024, 1, 1),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, HrError::NotFound(_)));
    }

    #[tokio::test]
    async fn quota_refusal_reports_remaining_balance() {
        // Quota 14, no history: a 5-day request goes through, approval drops
        // the balance to 9, and a following 10-day request is refused.
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "EMP001").await;

        let first = submit(
            &pool,
            emp,
            LeaveType::Annual,
            day(2024, 1, 1),
            day(2024, 1, 5),
            Some("family trip".into()),
        )
        .await
        .unwrap();
        assert_eq!(first.status, LeaveStatus::Pending);
        assert_eq!(first.days, 5);

        let approved = decide(&pool, first.id, Decision::Approve, "hr.manager")
            .await
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.decided_by.as_deref(), Some("hr.manager"));
        assert!(approved.decided_at.is_some());

        let err = submit(
            &pool,
            emp,
            LeaveType::Annual,
            day(2024, 2, 1),
            day(2024, 2, 10),
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HrError::QuotaExceeded { remaining: 9 }));

        // The refused submission wrote nothing.
        assert_eq!(request_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn pending_requests_do_not_block_submission() {
        // Only approved usage counts, so two pending requests can together
        // exceed the quota until one is approved.
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "EMP001").await;

        submit(&pool, emp, LeaveType::Annual, day(2024, 1, 1), day(2024, 1, 10), None)
            .await
            .unwrap();
        submit(&pool, emp, LeaveType::Annual, day(2024, 2, 1), day(2024, 2, 10), None)
            .await
            .unwrap();

        assert_eq!(request_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn unpaid_submission_skips_quota() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "EMP001").await;

        let request = submit(
            &pool,
            emp,
            LeaveType::Unpaid,
            day(2024, 1, 1),
            day(2024, 6, 30),
            None,
        )
        .await
        .unwrap();
        assert_eq!(request.days, 182);
    }

    #[tokio::test]
    async fn reject_stamps_approver_and_is_terminal() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "EMP001").await;

        let request = submit(
            &pool,
            emp,
            LeaveType::Sick,
            day(2024, 1, 1),
            day(2024, 1, 2),
            None,
        )
        .await
        .unwrap();

        let rejected = decide(&pool, request.id, Decision::Reject, "hr.manager")
            .await
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);

        // Rejected usage never counts against the quota.
        let used = crate::service::entitlement::used_days(&pool, emp, LeaveType::Sick, 2024)
            .await
            .unwrap();
        assert_eq!(used, 0);
    }

    #[tokio::test]
    async fn deciding_twice_fails_with_conflict() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "EMP001").await;

        let request = submit(
            &pool,
            emp,
            LeaveType::Annual,
            day(2024, 1, 1),
            day(2024, 1, 2),
            None,
        )
        .await
        .unwrap();
        decide(&pool, request.id, Decision::Reject, "hr.manager")
            .await
            .unwrap();

        // Approving an already-rejected request must not flip it.
        let err = decide(&pool, request.id, Decision::Approve, "someone.else")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HrError::AlreadyDecided {
                status: LeaveStatus::Rejected
            }
        ));

        let stored: LeaveRequest = sqlx::query_as("SELECT * FROM leave_requests WHERE id = ?")
            .bind(request.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored.status, LeaveStatus::Rejected);
        assert_eq!(stored.decided_by.as_deref(), Some("hr.manager"));
    }

    #[tokio::test]
    async fn deciding_unknown_request_fails_with_not_found() {
        let pool = test_pool().await;

        let err = decide(&pool, 42, Decision::Approve, "hr.manager")
            .await
            .unwrap_err();
        assert!(matches!(err, HrError::NotFound(_)));
    }
}
