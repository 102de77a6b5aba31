mod dashboard;
mod session;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/test/submit", post(session::submit_session))
        .route("/test/:test_id", get(session::begin_session))
}
