use sqlx::{FromRow, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::User;
use crate::db::types::{UserRole, UserStatus};

const COLUMNS: &str =
    "id, name, email, password_hash, role, status, college_id, created_by, created_at";

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Master accounts are looked up without a college filter.
pub(crate) async fn find_master_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = $1 AND role = $2"
    ))
    .bind(email)
    .bind(UserRole::Master)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_in_college_by_email(
    pool: &PgPool,
    college_id: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = $1 AND college_id = $2 AND role <> $3"
    ))
    .bind(email)
    .bind(college_id)
    .bind(UserRole::Master)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn email_taken_in_college(
    pool: &PgPool,
    college_id: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND college_id = $2)",
    )
    .bind(email)
    .bind(college_id)
    .fetch_one(pool)
    .await
}

pub(crate) struct CreateUser<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password_hash: String,
    pub(crate) role: UserRole,
    pub(crate) status: UserStatus,
    pub(crate) college_id: Option<&'a str>,
    pub(crate) created_by: Option<&'a str>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (
            id, name, email, password_hash, role, status, college_id, created_by, created_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.name)
    .bind(params.email)
    .bind(params.password_hash)
    .bind(params.role)
    .bind(params.status)
    .bind(params.college_id)
    .bind(params.created_by)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn update_master_credentials(
    pool: &PgPool,
    id: &str,
    name: &str,
    password_hash: Option<String>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET name = $1, password_hash = COALESCE($2, password_hash)
         WHERE id = $3 AND role = $4",
    )
    .bind(name)
    .bind(password_hash)
    .bind(id)
    .bind(UserRole::Master)
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct StudentSummary {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_students(
    pool: &PgPool,
    college_id: &str,
    status: UserStatus,
) -> Result<Vec<StudentSummary>, sqlx::Error> {
    let order = match status {
        UserStatus::Pending => "created_at DESC",
        UserStatus::Approved => "name",
    };
    sqlx::query_as::<_, StudentSummary>(&format!(
        "SELECT id, name, email, created_at FROM users
         WHERE role = $1 AND status = $2 AND college_id = $3
         ORDER BY {order}"
    ))
    .bind(UserRole::Student)
    .bind(status)
    .bind(college_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn approve_student(
    pool: &PgPool,
    college_id: &str,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET status = $1
         WHERE id = $2 AND role = $3 AND college_id = $4 AND status = $5",
    )
    .bind(UserStatus::Approved)
    .bind(id)
    .bind(UserRole::Student)
    .bind(college_id)
    .bind(UserStatus::Pending)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn delete_student(
    pool: &PgPool,
    college_id: &str,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2 AND college_id = $3")
        .bind(id)
        .bind(UserRole::Student)
        .bind(college_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct AdminSummary {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) college_id: String,
    pub(crate) college_name: String,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_admins_created_by(
    pool: &PgPool,
    master_id: &str,
) -> Result<Vec<AdminSummary>, sqlx::Error> {
    sqlx::query_as::<_, AdminSummary>(
        "SELECT u.id, u.name, u.email, c.id AS college_id, c.name AS college_name, u.created_at
         FROM users u
         JOIN colleges c ON c.id = u.college_id
         WHERE u.role = $1 AND u.created_by = $2
         ORDER BY u.created_at DESC",
    )
    .bind(UserRole::Admin)
    .bind(master_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn delete_admin_created_by(
    pool: &PgPool,
    master_id: &str,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2 AND created_by = $3")
        .bind(id)
        .bind(UserRole::Admin)
        .bind(master_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
