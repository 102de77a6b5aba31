use axum::{extract::State, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::db::types::CodeLanguage;
use crate::schemas::exam::{RunCodeRequest, RunCodeResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/run", post(run_code))
}

/// Self-check run during a test. The result never feeds into grading.
async fn run_code(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<RunCodeRequest>,
) -> Result<Json<RunCodeResponse>, ApiError> {
    let language = CodeLanguage::parse(&payload.language).ok_or_else(|| {
        ApiError::BadRequest(format!("Unsupported language '{}'", payload.language.trim()))
    })?;

    let execution = state.judge().execute(language, &payload.code).await.map_err(|err| {
        tracing::warn!(user_id = %user.id, error = %err, "Code run failed");
        ApiError::ServiceUnavailable("Error executing code".to_string())
    })?;

    Ok(Json(RunCodeResponse::from_execution(execution)))
}

#[cfg(test)]
mod tests;
