use actix_web::{HttpResponse, web};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::error::HrError;
use crate::model::{Employee, LeaveType};
use crate::service::entitlement;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    /// Target calendar year; defaults to the current year
    #[schema(example = 2024)]
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct ReportRow {
    pub employee: Employee,
    #[schema(example = 5)]
    pub annual_used: i64,
    #[schema(example = 9)]
    pub annual_remaining: i64,
    #[schema(example = 0)]
    pub sick_used: i64,
    #[schema(example = 30)]
    pub sick_remaining: i64,
    #[schema(example = 0)]
    pub unpaid_used: i64,
}

#[derive(Serialize, ToSchema)]
pub struct ReportResponse {
    #[schema(example = 2024)]
    pub year: i32,
    pub data: Vec<ReportRow>,
}

/// Year-scoped usage report across all employees
#[utoipa::path(
    get,
    path = "/api/v1/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Per-employee usage and remaining balances", body = ReportResponse)
    ),
    tag = "Report"
)]
pub async fn vacation_report(
    pool: web::Data<SqlitePool>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, HrError> {
    let year = query.year.unwrap_or_else(|| Utc::now().date_naive().year());

    let employees: Vec<Employee> = sqlx::query_as("SELECT * FROM employees ORDER BY id")
        .fetch_all(pool.get_ref())
        .await?;

    let mut data = Vec::with_capacity(employees.len());
    for employee in employees {
        let annual_used =
            entitlement::used_days(pool.get_ref(), employee.id, LeaveType::Annual, year).await?;
        let sick_used =
            entitlement::used_days(pool.get_ref(), employee.id, LeaveType::Sick, year).await?;
        let unpaid_used =
            entitlement::used_days(pool.get_ref(), employee.id, LeaveType::Unpaid, year).await?;

        data.push(ReportRow {
            annual_used,
            annual_remaining: (employee.annual_leave_quota - annual_used).max(0),
            sick_used,
            sick_remaining: (employee.sick_leave_quota - sick_used).max(0),
            unpaid_used,
            employee,
        });
    }

    Ok(HttpResponse::Ok().json(ReportResponse { year, data }))
}
