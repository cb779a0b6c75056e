use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::error::HrError;
use crate::model::{LeaveRequest, LeaveType};
use crate::service::lifecycle::{self, Decision};

#[derive(Deserialize, ToSchema)]
pub struct SubmitLeave {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "annual")]
    pub leave_type: LeaveType,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "family trip", nullable = true)]
    pub reason: Option<String>,
}

/// Decision payload; the approver identity is always caller-supplied.
#[derive(Deserialize, ToSchema)]
pub struct DecideLeave {
    #[schema(example = "hr.manager")]
    pub decided_by: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by employee ID
    #[schema(example = 1)]
    pub employee_id: Option<i64>,
    /// Filter by leave status
    #[schema(example = "pending")]
    pub status: Option<String>,
    /// Pagination page number (1-based)
    #[schema(example = 1)]
    pub page: Option<u64>,
    /// Items per page
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    I64(i64),
    Str(&'a str),
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/* =========================
Submit leave request
========================= */
/// Submit a leave request
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = SubmitLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request created in pending state", body = LeaveRequest),
        (status = 400, description = "Invalid date range or quota exceeded", body = Object, example = json!({
            "message": "requested days exceed the remaining quota; 9 day(s) remaining",
            "remaining": 9
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SubmitLeave>,
) -> Result<HttpResponse, HrError> {
    let payload = payload.into_inner();
    let request = lifecycle::submit(
        pool.get_ref(),
        payload.employee_id,
        payload.leave_type,
        payload.start_date,
        payload.end_date,
        payload.reason,
    )
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Approve leave
========================= */
/// Approve a pending leave request
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to approve")
    ),
    request_body = DecideLeave,
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already decided", body = Object, example = json!({
            "message": "leave request is already rejected"
        }))
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<DecideLeave>,
) -> Result<HttpResponse, HrError> {
    let leave_id = path.into_inner();
    let request =
        lifecycle::decide(pool.get_ref(), leave_id, Decision::Approve, &payload.decided_by).await?;
    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Reject leave
========================= */
/// Reject a pending leave request
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to reject")
    ),
    request_body = DecideLeave,
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already decided")
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<DecideLeave>,
) -> Result<HttpResponse, HrError> {
    let leave_id = path.into_inner();
    let request =
        lifecycle::decide(pool.get_ref(), leave_id, Decision::Reject, &payload.decided_by).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// Get one leave request
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "leave request 42 not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HrError> {
    let leave_id = path.into_inner();

    let request: LeaveRequest = sqlx::query_as("SELECT * FROM leave_requests WHERE id = ?")
        .bind(leave_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| HrError::NotFound(format!("leave request {leave_id}")))?;

    Ok(HttpResponse::Ok().json(request))
}

/// List leave requests
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list, newest first", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    pool: web::Data<SqlitePool>,
    query: web::Query<LeaveFilter>,
) -> Result<HttpResponse, HrError> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::I64(emp_id));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::I64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }
    let total = count_q.fetch_one(pool.get_ref()).await?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT * FROM leave_requests
        {}
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let leaves = data_q
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data: leaves,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}
