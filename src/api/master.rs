use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::{is_unique_violation, ApiError};
use crate::api::guards::CurrentMaster;
use crate::api::validation::{normalize_email, validate_payload};
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::{UserRole, UserStatus};
use crate::repositories;
use crate::schemas::college::{
    AdminCreate, AdminCreatedResponse, AdminResponse, CollegeCreate, CollegeResponse,
};
use crate::schemas::MessageResponse;

const DUPLICATE_COLLEGE: &str = "A college with this name already exists.";
const DUPLICATE_ADMIN: &str = "An admin with this email already exists at this college.";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/colleges", post(create_college))
        .route("/admins", post(create_admin).get(list_admins))
        .route("/admins/:admin_id", delete(delete_admin))
}

async fn create_college(
    CurrentMaster(master): CurrentMaster,
    State(state): State<AppState>,
    Json(payload): Json<CollegeCreate>,
) -> Result<(StatusCode, Json<CollegeResponse>), ApiError> {
    validate_payload(&payload)?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Please provide a college name.".to_string()));
    }

    let exists = repositories::colleges::exists_by_name(state.db(), name)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check college name"))?;
    if exists {
        return Err(ApiError::Conflict(DUPLICATE_COLLEGE.to_string()));
    }

    let college = repositories::colleges::create(
        state.db(),
        &Uuid::new_v4().to_string(),
        name,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(DUPLICATE_COLLEGE.to_string())
        } else {
            ApiError::internal(e, "Failed to create college")
        }
    })?;

    tracing::info!(college_id = %college.id, master_id = %master.id, "College created");
    Ok((StatusCode::CREATED, Json(CollegeResponse::from_db(college))))
}

async fn create_admin(
    CurrentMaster(master): CurrentMaster,
    State(state): State<AppState>,
    Json(payload): Json<AdminCreate>,
) -> Result<(StatusCode, Json<AdminCreatedResponse>), ApiError> {
    validate_payload(&payload)?;
    let email = normalize_email(&payload.email);

    let college = repositories::colleges::find_by_id(state.db(), &payload.college_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load college"))?;
    if college.is_none() {
        return Err(ApiError::BadRequest("Selected college does not exist.".to_string()));
    }

    let taken = repositories::users::email_taken_in_college(state.db(), &payload.college_id, &email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing user"))?;
    if taken {
        return Err(ApiError::Conflict(DUPLICATE_ADMIN.to_string()));
    }

    let password_hash = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let admin = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.trim(),
            email: &email,
            password_hash,
            role: UserRole::Admin,
            status: UserStatus::Approved,
            college_id: Some(&payload.college_id),
            created_by: Some(&master.id),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(DUPLICATE_ADMIN.to_string())
        } else {
            ApiError::internal(e, "Failed to create admin")
        }
    })?;

    tracing::info!(admin_id = %admin.id, college_id = %payload.college_id, "Admin created");

    Ok((
        StatusCode::CREATED,
        Json(AdminCreatedResponse {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            role: admin.role,
            college_id: payload.college_id,
        }),
    ))
}

async fn list_admins(
    CurrentMaster(master): CurrentMaster,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminResponse>>, ApiError> {
    let admins = repositories::users::list_admins_created_by(state.db(), &master.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list admins"))?;

    Ok(Json(admins.into_iter().map(AdminResponse::from_db).collect()))
}

async fn delete_admin(
    Path(admin_id): Path<String>,
    CurrentMaster(master): CurrentMaster,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = repositories::users::delete_admin_created_by(state.db(), &master.id, &admin_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete admin"))?;

    if deleted == 0 {
        return Err(ApiError::NotFound(
            "Admin not found or you are not authorized to delete this user.".to_string(),
        ));
    }

    tracing::info!(admin_id = %admin_id, master_id = %master.id, "Admin deleted");
    Ok(Json(MessageResponse::new("Admin user deleted successfully.")))
}

#[cfg(test)]
mod tests;
