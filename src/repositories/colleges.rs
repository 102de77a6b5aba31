use sqlx::PgPool;

use crate::db::models::College;

const COLUMNS: &str = "id, name, created_at";

pub(crate) async fn create(
    pool: &PgPool,
    id: &str,
    name: &str,
    created_at: time::PrimitiveDateTime,
) -> Result<College, sqlx::Error> {
    sqlx::query_as::<_, College>(&format!(
        "INSERT INTO colleges (id, name, created_at) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<College>, sqlx::Error> {
    sqlx::query_as::<_, College>(&format!("SELECT {COLUMNS} FROM colleges ORDER BY name"))
        .fetch_all(pool)
        .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<College>, sqlx::Error> {
    sqlx::query_as::<_, College>(&format!("SELECT {COLUMNS} FROM colleges WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM colleges WHERE lower(name) = lower($1))",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}
