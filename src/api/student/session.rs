//! Per-student session lifecycle: `scheduled -> inprogress -> completed`.
//!
//! Both transitions are status-guarded updates; an affected-row count of
//! zero means the session was not in the expected state and the call is
//! denied without saying why.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::SessionStatus;
use crate::repositories;
use crate::schemas::session::{BeginSessionResponse, SessionQuestion, SubmitRequest, SubmitResponse};
use crate::services::grading;

const BEGIN_DENIED: &str =
    "You are not authorized to take this test or it has already been taken.";
const SUBMIT_DENIED: &str =
    "You are not authorized to submit this test or it has already been submitted.";

pub(in crate::api::student) async fn begin_session(
    Path(test_id): Path<String>,
    student: CurrentStudent,
    State(state): State<AppState>,
) -> Result<Json<BeginSessionResponse>, ApiError> {
    let session = repositories::student_tests::find_for_student_test(
        state.db(),
        &test_id,
        &student.user.id,
        &student.college_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load session"))?
    .filter(|session| session.status == SessionStatus::Scheduled)
    .ok_or(ApiError::Forbidden(BEGIN_DENIED))?;

    let questions = repositories::questions::list_public_for_test(state.db(), &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load questions"))?;

    // Questions are loaded first so a failed read leaves the session scheduled.
    let started =
        repositories::student_tests::mark_started(state.db(), &session.id, primitive_now_utc())
            .await
            .map_err(|e| ApiError::internal(e, "Failed to start session"))?;
    if started == 0 {
        return Err(ApiError::Forbidden(BEGIN_DENIED));
    }
    metrics::record_session_transition(SessionStatus::Inprogress.as_str());

    tracing::info!(
        session_id = %session.id,
        test_id = %test_id,
        student_id = %student.user.id,
        "Session started"
    );

    Ok(Json(BeginSessionResponse {
        questions: questions.into_iter().map(SessionQuestion::from_db).collect(),
        student_test_id: session.id,
    }))
}

/// Grades and completes an in-progress session in one transaction.
pub(in crate::api::student) async fn submit_session(
    student: CurrentStudent,
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let session = repositories::student_tests::lock_owned(
        &mut *tx,
        &payload.student_test_id,
        &student.user.id,
        &student.college_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load session"))?
    .filter(|session| session.status == SessionStatus::Inprogress)
    .ok_or(ApiError::Forbidden(SUBMIT_DENIED))?;

    let questions = repositories::questions::list_for_test(&mut *tx, &session.test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load questions"))?;

    let outcome = grading::grade_submission(&questions, &payload.submitted_answers());
    let now = primitive_now_utc();

    repositories::student_answers::insert_graded(
        &mut *tx,
        &session.id,
        &student.college_id,
        &outcome.answers,
        now,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store answers"))?;

    let completed = repositories::student_tests::mark_completed(
        &mut *tx,
        &session.id,
        &student.user.id,
        outcome.score,
        now,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to complete session"))?;
    if completed == 0 {
        return Err(ApiError::Forbidden(SUBMIT_DENIED));
    }

    tx.commit().await.map_err(|e| ApiError::internal(e, "Failed to commit transaction"))?;
    metrics::record_session_transition(SessionStatus::Completed.as_str());

    tracing::info!(
        session_id = %session.id,
        student_id = %student.user.id,
        score = outcome.score,
        answers = outcome.answers.len(),
        "Session submitted"
    );

    Ok(Json(SubmitResponse { message: "Test submitted successfully!".to_string(), score: outcome.score }))
}
