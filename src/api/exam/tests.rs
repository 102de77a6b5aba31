use crate::db::types::UserStatus;
use crate::test_support::{self, JudgeStubReply};
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn run_proxies_to_judge_without_leaking_credentials() {
    let ctx = test_support::setup_test_context().await;
    let college = test_support::insert_college(ctx.state.db(), "Tech U").await;
    let student = test_support::insert_student(
        ctx.state.db(),
        &college.id,
        "student@example.com",
        UserStatus::Approved,
    )
    .await;
    let token = test_support::bearer_token(&student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/exam/run",
            Some(&token),
            Some(json!({ "language": "javascript", "code": "console.log('hi')" })),
        ))
        .await
        .expect("run");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["output"], "hi\n");
    assert_eq!(body["memory"], "7424");
    assert!(body.get("clientSecret").is_none());

    let seen = ctx.judge.last_request().expect("judge called");
    assert_eq!(seen["language"], "nodejs");
    assert_eq!(seen["clientSecret"], "test-secret");
}

#[tokio::test]
async fn run_requires_authentication_and_known_language() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/exam/run",
            None,
            Some(json!({ "language": "python3", "code": "print(1)" })),
        ))
        .await
        .expect("run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let college = test_support::insert_college(ctx.state.db(), "Tech U").await;
    let admin = test_support::insert_admin(ctx.state.db(), &college.id, "admin@example.com", None).await;
    let token = test_support::bearer_token(&admin, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/exam/run",
            Some(&token),
            Some(json!({ "language": "brainfuck", "code": "+" })),
        ))
        .await
        .expect("run");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.judge.last_request().is_none());
}

#[tokio::test]
async fn judge_failure_surfaces_as_execution_error() {
    let ctx = test_support::setup_test_context_with_judge(JudgeStubReply::Failure).await;
    let college = test_support::insert_college(ctx.state.db(), "Tech U").await;
    let admin = test_support::insert_admin(ctx.state.db(), &college.id, "admin@example.com", None).await;
    let token = test_support::bearer_token(&admin, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/exam/run",
            Some(&token),
            Some(json!({ "language": "python3", "code": "print(1)" })),
        ))
        .await
        .expect("run");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "response: {body}");
    assert_eq!(body["detail"], "Error executing code");
}
