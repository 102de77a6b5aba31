use std::collections::HashSet;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::api::validation::validate_payload;
use crate::core::state::AppState;
use crate::core::time::{parse_timestamp, primitive_now_utc};
use crate::repositories;
use crate::schemas::test::{TestCreate, TestScheduledResponse, TestSummary};

/// Creates the test, links its questions and assigns it to every student
/// approved in the college right now, all in one transaction.
pub(in crate::api::admin) async fn schedule_test(
    admin: CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<TestCreate>,
) -> Result<(StatusCode, Json<TestScheduledResponse>), ApiError> {
    validate_payload(&payload)?;

    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let now = primitive_now_utc();
    let scheduled_at = parse_timestamp(&payload.scheduled_at)
        .ok_or_else(|| ApiError::BadRequest("scheduled_at is not a valid timestamp".to_string()))?;
    if scheduled_at <= now {
        return Err(ApiError::BadRequest("scheduled_at must be in the future".to_string()));
    }

    let mut seen = HashSet::new();
    let question_ids: Vec<String> =
        payload.question_ids.into_iter().filter(|id| seen.insert(id.clone())).collect();

    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let owned = repositories::questions::count_owned(&mut *tx, &admin.college_id, &question_ids)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check questions"))?;
    if owned != question_ids.len() as i64 {
        return Err(ApiError::BadRequest(
            "Some selected questions do not exist in your college.".to_string(),
        ));
    }

    let test_id = Uuid::new_v4().to_string();
    repositories::tests::create(
        &mut *tx,
        repositories::tests::CreateTest {
            id: &test_id,
            title,
            duration_minutes: payload.duration_minutes,
            scheduled_at,
            college_id: &admin.college_id,
            created_by: &admin.user.id,
            created_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create test"))?;

    repositories::tests::link_questions(&mut *tx, &test_id, &question_ids)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to link questions"))?;

    let assigned = repositories::student_tests::assign_to_approved_students(
        &mut *tx,
        &test_id,
        &admin.college_id,
        now,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to assign test"))?;

    tx.commit().await.map_err(|e| ApiError::internal(e, "Failed to commit transaction"))?;

    tracing::info!(
        test_id = %test_id,
        college_id = %admin.college_id,
        questions = question_ids.len(),
        assigned,
        "Test scheduled"
    );

    Ok((
        StatusCode::CREATED,
        Json(TestScheduledResponse {
            message: "Test scheduled successfully for your college.".to_string(),
            test_id,
            assigned_students: assigned,
        }),
    ))
}

pub(in crate::api::admin) async fn list_tests(
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<TestSummary>>, ApiError> {
    let tests = repositories::tests::list_for_college(state.db(), &admin.college_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list tests"))?;

    Ok(Json(tests.into_iter().map(TestSummary::from_db).collect()))
}
