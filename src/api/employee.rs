use actix_web::{HttpResponse, web};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, error, info};
use utoipa::{IntoParams, ToSchema};

use crate::error::{HrError, map_employee_insert_err};
use crate::model::employee::{DEFAULT_ANNUAL_QUOTA, DEFAULT_SICK_QUOTA};
use crate::model::{Employee, LeaveRequest, LeaveType};
use crate::service::entitlement;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001")]
    pub employee_code: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2023-01-15", format = "date", value_type = String)]
    pub hire_date: chrono::NaiveDate,
    /// Defaults to 14 when omitted.
    #[schema(example = 14, nullable = true)]
    pub annual_leave_quota: Option<i64>,
    /// Defaults to 30 when omitted.
    #[schema(example = 30, nullable = true)]
    pub sick_leave_quota: Option<i64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Pagination page number (1-based)
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Items per page
    #[schema(example = 20)]
    pub per_page: Option<u32>,
    /// Filter by department
    #[schema(example = "Engineering")]
    pub department: Option<String>,
    /// Search by name, email or employee code
    #[schema(example = "jane")]
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 3)]
    pub total: i64,
}

/// Employee record together with the current-year remaining balances for
/// both paid categories.
#[derive(Serialize, ToSchema)]
pub struct EmployeeDetail {
    pub employee: Employee,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 9)]
    pub remaining_annual: i64,
    #[schema(example = 30)]
    pub remaining_sick: i64,
}

/// Register a new employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee registered", body = Employee),
        (status = 400, description = "Duplicate employee code or email", body = Object, example = json!({
            "message": "an employee with this email already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn register_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, HrError> {
    let payload = payload.into_inner();
    let annual_quota = payload.annual_leave_quota.unwrap_or(DEFAULT_ANNUAL_QUOTA);
    let sick_quota = payload.sick_leave_quota.unwrap_or(DEFAULT_SICK_QUOTA);

    let id = sqlx::query(
        r#"
        INSERT INTO employees
            (employee_code, name, email, department, hire_date,
             annual_leave_quota, sick_leave_quota)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.employee_code)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.department)
    .bind(payload.hire_date)
    .bind(annual_quota)
    .bind(sick_quota)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_code = %payload.employee_code, "Failed to register employee");
        map_employee_insert_err(e)
    })?
    .last_insert_rowid();

    let employee: Employee = sqlx::query_as("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_one(pool.get_ref())
        .await?;

    info!(employee_id = id, employee_code = %employee.employee_code, "employee registered");
    Ok(HttpResponse::Ok().json(employee))
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, HrError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(department) = &query.department {
        conditions.push("department = ?");
        bindings.push(department.clone());
    }

    if let Some(search) = &query.search {
        conditions.push("(name LIKE ? OR email LIKE ? OR employee_code LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM employees {}", where_clause);
    debug!(sql = %count_sql, "Counting employees");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }
    let total = count_query.fetch_one(pool.get_ref()).await?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM employees {} ORDER BY id LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, per_page, "Fetching employees");

    let mut data_query = sqlx::query_as::<_, Employee>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    let employees = data_query
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: employees,
        page,
        per_page,
        total,
    }))
}

/// Get an employee with current-year remaining balances
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetail),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "employee 42 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();

    let employee: Employee = sqlx::query_as("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| HrError::NotFound(format!("employee {employee_id}")))?;

    let year = Utc::now().date_naive().year();
    let remaining_annual = entitlement::remaining(pool.get_ref(), &employee, LeaveType::Annual, year)
        .await?
        .days()
        .unwrap_or(0);
    let remaining_sick = entitlement::remaining(pool.get_ref(), &employee, LeaveType::Sick, year)
        .await?
        .days()
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(EmployeeDetail {
        employee,
        year,
        remaining_annual,
        remaining_sick,
    }))
}

/// Leave history for one employee, newest first
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/leave",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Leave requests ordered by creation time, descending", body = [LeaveRequest]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn employee_leave(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HrError> {
    let employee_id = path.into_inner();

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await?;
    if exists.is_none() {
        return Err(HrError::NotFound(format!("employee {employee_id}")));
    }

    let requests: Vec<LeaveRequest> = sqlx::query_as(
        r#"
        SELECT * FROM leave_requests
        WHERE employee_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}
