mod questions;
mod results;
mod schedule;
mod students;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", post(questions::create_question).get(questions::list_questions))
        .route("/questions/verify", post(questions::verify_question))
        .route(
            "/questions/:question_id",
            put(questions::update_question).delete(questions::delete_question),
        )
        .route("/questions-bulk", post(questions::bulk_import))
        .route("/tests", post(schedule::schedule_test).get(schedule::list_tests))
        .route("/results/:test_id", get(results::test_results))
        .route("/results/:test_id/student/:student_id", get(results::student_result))
        .route("/students/pending", get(students::list_pending))
        .route("/students/approved", get(students::list_approved))
        .route("/students/approve/:student_id", put(students::approve_student))
        .route("/students/:student_id", axum::routing::delete(students::delete_student))
}
