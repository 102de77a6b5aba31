use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::session::{DashboardResponse, PastScoreResponse, ScheduledTestResponse};

pub(in crate::api::student) async fn dashboard(
    student: CurrentStudent,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let scheduled = repositories::student_tests::list_scheduled_for_student(
        state.db(),
        &student.user.id,
        &student.college_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load scheduled tests"))?;

    let completed = repositories::student_tests::list_completed_for_student(
        state.db(),
        &student.user.id,
        &student.college_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load past scores"))?;

    Ok(Json(DashboardResponse {
        greeting: format!("Hello, {}", student.user.name),
        scheduled_tests: scheduled.into_iter().map(ScheduledTestResponse::from_db).collect(),
        past_scores: completed.into_iter().map(PastScoreResponse::from_db).collect(),
    }))
}
