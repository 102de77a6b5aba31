use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::test::{ResultResponse, StudentResultDetail};

pub(in crate::api::admin) async fn test_results(
    Path(test_id): Path<String>,
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ResultResponse>>, ApiError> {
    let test = repositories::tests::find_in_college(state.db(), &admin.college_id, &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load test"))?;
    if test.is_none() {
        return Err(ApiError::NotFound("Test not found".to_string()));
    }

    let rows =
        repositories::student_tests::list_completed_for_test(state.db(), &test_id, &admin.college_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load results"))?;

    Ok(Json(rows.into_iter().map(ResultResponse::from_db).collect()))
}

pub(in crate::api::admin) async fn student_result(
    Path((test_id, student_id)): Path<(String, String)>,
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<StudentResultDetail>, ApiError> {
    let overview = repositories::student_tests::find_overview(
        state.db(),
        &test_id,
        &student_id,
        &admin.college_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load submission"))?
    .ok_or_else(|| {
        ApiError::NotFound(
            "Test submission not found or you are not authorized to view it.".to_string(),
        )
    })?;

    let total_questions = repositories::tests::count_questions(state.db(), &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count questions"))?;

    let answers = repositories::student_answers::list_detail_for_session(
        state.db(),
        &overview.id,
        &admin.college_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load answers"))?;

    Ok(Json(StudentResultDetail::new(overview, total_questions, answers)))
}
