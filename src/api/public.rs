use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::college::CollegeResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/colleges", get(list_colleges))
}

async fn list_colleges(State(state): State<AppState>) -> Result<Json<Vec<CollegeResponse>>, ApiError> {
    let colleges = repositories::colleges::list(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list colleges"))?;

    Ok(Json(colleges.into_iter().map(CollegeResponse::from_db).collect()))
}
