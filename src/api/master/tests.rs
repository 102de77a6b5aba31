use crate::db::types::UserStatus;
use crate::test_support;
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn master_creates_college_and_admin() {
    let ctx = test_support::setup_test_context().await;
    let master = test_support::insert_master(ctx.state.db(), "master@example.com").await;
    let token = test_support::bearer_token(&master, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/master/colleges",
            Some(&token),
            Some(json!({ "name": "Tech U" })),
        ))
        .await
        .expect("create college");
    let status = response.status();
    let college = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {college}");
    let college_id = college["id"].as_str().expect("college id").to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/master/colleges",
            Some(&token),
            Some(json!({ "name": "tech u" })),
        ))
        .await
        .expect("duplicate college");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/master/admins",
            Some(&token),
            Some(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "password": "admin-pass",
                "college_id": college_id
            })),
        ))
        .await
        .expect("create admin");
    let status = response.status();
    let admin = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {admin}");
    assert_eq!(admin["role"], "admin");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/master/admins", Some(&token), None))
        .await
        .expect("list admins");
    let status = response.status();
    let admins = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {admins}");
    assert_eq!(admins.as_array().map(Vec::len), Some(1));
    assert_eq!(admins[0]["college_name"], "Tech U");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({
                "email": "grace@example.com",
                "password": "admin-pass",
                "college_id": college_id
            })),
        ))
        .await
        .expect("admin login");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn master_only_deletes_own_admins() {
    let ctx = test_support::setup_test_context().await;
    let college = test_support::insert_college(ctx.state.db(), "Tech U").await;
    let master = test_support::insert_master(ctx.state.db(), "master@example.com").await;
    let other_master = test_support::insert_master(ctx.state.db(), "other@example.com").await;
    let admin = test_support::insert_admin(
        ctx.state.db(),
        &college.id,
        "admin@example.com",
        Some(&other_master.id),
    )
    .await;

    let token = test_support::bearer_token(&master, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/master/admins/{}", admin.id),
            Some(&token),
            None,
        ))
        .await
        .expect("delete foreign admin");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let token = test_support::bearer_token(&other_master, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/master/admins/{}", admin.id),
            Some(&token),
            None,
        ))
        .await
        .expect("delete own admin");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
}

#[tokio::test]
async fn master_routes_reject_other_roles() {
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
            "/api/v1/master/colleges",
            Some(&token),
            Some(json!({ "name": "Rogue U" })),
        ))
        .await
        .expect("create college");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/master/admins", None, None))
        .await
        .expect("anonymous");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn concurrent_duplicate_colleges_yield_one_conflict() {
    let ctx = test_support::setup_test_context().await;
    let master = test_support::insert_master(ctx.state.db(), "master@example.com").await;
    let token = test_support::bearer_token(&master, ctx.state.settings());

    let create = |name: &str| {
        test_support::json_request(
            Method::POST,
            "/api/v1/master/colleges",
            Some(&token),
            Some(json!({ "name": name })),
        )
    };

    let (first, second) = tokio::join!(
        ctx.app.clone().oneshot(create("Tech U")),
        ctx.app.clone().oneshot(create("TECH U"))
    );
    let mut statuses = vec![first.expect("create").status(), second.expect("create").status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM colleges")
        .fetch_one(ctx.state.db())
        .await
        .expect("count colleges");
    assert_eq!(stored, 1);
}
