use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::errors::{is_foreign_key_violation, ApiError};
use crate::api::guards::CurrentAdmin;
use crate::api::validation::rejected;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::CodeLanguage;
use crate::repositories;
use crate::schemas::question::{
    BulkImportRequest, QuestionPayload, QuestionResponse, VerifyRequest, VerifyResponse,
};
use crate::schemas::MessageResponse;
use crate::services::question_import;

pub(in crate::api::admin) async fn create_question(
    admin: CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<QuestionPayload>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let draft = payload.into_draft().map_err(|errors| rejected("Invalid question", errors))?;

    let question = repositories::questions::create(
        state.db(),
        repositories::questions::CreateQuestion {
            id: &Uuid::new_v4().to_string(),
            draft: &draft,
            college_id: &admin.college_id,
            created_by: &admin.user.id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create question"))?;

    Ok((StatusCode::CREATED, Json(QuestionResponse::from_db(question))))
}

pub(in crate::api::admin) async fn list_questions(
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let questions = repositories::questions::list_for_college(state.db(), &admin.college_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list questions"))?;

    Ok(Json(questions.into_iter().map(QuestionResponse::from_db).collect()))
}

pub(in crate::api::admin) async fn update_question(
    Path(question_id): Path<String>,
    admin: CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<QuestionPayload>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let draft = payload.into_draft().map_err(|errors| rejected("Invalid question", errors))?;

    let question = repositories::questions::update_in_college(
        state.db(),
        &admin.college_id,
        &question_id,
        &draft,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update question"))?
    .ok_or_else(|| {
        ApiError::NotFound(
            "Question not found or you are not authorized to edit it.".to_string(),
        )
    })?;

    Ok(Json(QuestionResponse::from_db(question)))
}

pub(in crate::api::admin) async fn delete_question(
    Path(question_id): Path<String>,
    admin: CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted =
        repositories::questions::delete_in_college(state.db(), &admin.college_id, &question_id)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    ApiError::Conflict("Question is used by a scheduled test".to_string())
                } else {
                    ApiError::internal(e, "Failed to delete question")
                }
            })?;

    if deleted == 0 {
        return Err(ApiError::NotFound(
            "Question not found or you are not authorized to delete it.".to_string(),
        ));
    }

    Ok(Json(MessageResponse::new("Question removed")))
}

pub(in crate::api::admin) async fn bulk_import(
    admin: CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<BulkImportRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if payload.questions.is_empty() {
        return Err(ApiError::BadRequest(
            "No questions provided or the format is incorrect.".to_string(),
        ));
    }

    let drafts = question_import::validate_rows(payload.questions)
        .map_err(|errors| rejected("Import rejected; no questions were saved.", errors))?;

    let inserted =
        question_import::import_questions(state.db(), &admin.college_id, &admin.user.id, &drafts)
            .await
            .map_err(|e| ApiError::internal(format!("{e:#}"), "Failed to import questions"))?;

    tracing::info!(college_id = %admin.college_id, inserted, "Question import committed");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Successfully added {inserted} questions."))),
    ))
}

pub(in crate::api::admin) async fn verify_question(
    _admin: CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let language = CodeLanguage::parse(&payload.language).ok_or_else(|| {
        ApiError::BadRequest(format!("Unsupported language '{}'", payload.language.trim()))
    })?;

    let verification = state
        .judge()
        .verify(language, &payload.code, &payload.expected_output)
        .await
        .map_err(|_| ApiError::ServiceUnavailable("Error executing code".to_string()))?;

    Ok(Json(VerifyResponse::new(verification, payload.expected_output)))
}
