use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::state::AppState;
use crate::db::types::UserStatus;
use crate::repositories;
use crate::schemas::college::StudentResponse;
use crate::schemas::MessageResponse;

pub(in crate::api::admin) async fn list_pending(
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    list_with_status(&state, &admin, UserStatus::Pending).await
}

pub(in crate::api::admin) async fn list_approved(
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    list_with_status(&state, &admin, UserStatus::Approved).await
}

async fn list_with_status(
    state: &AppState,
    admin: &CurrentAdmin,
    status: UserStatus,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = repositories::users::list_students(state.db(), &admin.college_id, status)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list students"))?;

    Ok(Json(students.into_iter().map(StudentResponse::from_db).collect()))
}

pub(in crate::api::admin) async fn approve_student(
    Path(student_id): Path<String>,
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = repositories::users::approve_student(state.db(), &admin.college_id, &student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to approve student"))?;

    if updated == 0 {
        return Err(ApiError::NotFound(
            "Student not found in your college or already approved.".to_string(),
        ));
    }

    tracing::info!(student_id = %student_id, college_id = %admin.college_id, "Student approved");
    Ok(Json(MessageResponse::new("Student approved successfully.")))
}

/// Sessions and answers of the student go with them.
pub(in crate::api::admin) async fn delete_student(
    Path(student_id): Path<String>,
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = repositories::users::delete_student(state.db(), &admin.college_id, &student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete student"))?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Student not found in your college.".to_string()));
    }

    tracing::info!(student_id = %student_id, college_id = %admin.college_id, "Student deleted");
    Ok(Json(MessageResponse::new("Student deleted successfully.")))
}
