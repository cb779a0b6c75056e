use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_code      TEXT    NOT NULL UNIQUE,
        name               TEXT    NOT NULL,
        email              TEXT    NOT NULL UNIQUE,
        department         TEXT    NOT NULL,
        hire_date          DATE    NOT NULL,
        annual_leave_quota INTEGER NOT NULL DEFAULT 14,
        sick_leave_quota   INTEGER NOT NULL DEFAULT 30
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_requests (
        id          INTEGER  PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER  NOT NULL REFERENCES employees(id),
        leave_type  TEXT     NOT NULL,
        start_date  DATE     NOT NULL,
        end_date    DATE     NOT NULL,
        days        INTEGER  NOT NULL CHECK (days > 0),
        reason      TEXT,
        status      TEXT     NOT NULL DEFAULT 'pending',
        created_at  DATETIME NOT NULL,
        decided_by  TEXT,
        decided_at  DATETIME
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_leave_requests_employee
        ON leave_requests (employee_id, leave_type, status)
    "#,
];

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    init_schema(&pool).await.expect("Failed to create schema");
    pool
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
