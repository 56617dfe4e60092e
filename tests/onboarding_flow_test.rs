//! Onboarding and dashboard-access flow tests.
//!
//! Need a running PostgreSQL pointed to by `JETON_TEST_DATABASE_URL`;
//! ignored by default.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;

use common::{TestApp, cookie_value};

struct OnboardingSession {
    cookie_header: String,
    csrf: String,
}

async fn db_app() -> TestApp {
    let config = common::test_config();
    let pool = PgPoolOptions::new()
        .connect(&config.database.url)
        .await
        .expect("test database must be reachable");

    jeton_database::migration::run_migrations(&pool)
        .await
        .expect("migrations apply");

    sqlx::query("TRUNCATE users, schools, sessions, onboarding_steps, access_grants CASCADE")
        .execute(&pool)
        .await
        .expect("truncate");

    TestApp::with_config(config)
}

async fn register(app: &TestApp, email: &str, username: &str) -> OnboardingSession {
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": email,
                "username": username,
                "password": "mKz7#qLw$vR2pT9d",
            })),
            None,
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);

    let session = cookie_value(&response.set_cookies, "jeton_session").unwrap();
    let csrf = cookie_value(&response.set_cookies, "csrfToken").unwrap();
    OnboardingSession {
        cookie_header: format!("jeton_session={session}; csrfToken={csrf}"),
        csrf,
    }
}

async fn submit_step(
    app: &TestApp,
    session: &OnboardingSession,
    step: &str,
    data: serde_json::Value,
) -> StatusCode {
    app.request(
        "POST",
        "/api/onboarding/step",
        Some(json!({"step": step, "data": data})),
        Some(&session.cookie_header),
        &[("x-csrf-token", session.csrf.as_str())],
    )
    .await
    .status
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn test_fresh_user_has_incomplete_onboarding() {
    let app = db_app().await;
    let session = register(&app, "fresh@school.example", "freshadmin").await;

    let status = app
        .request(
            "GET",
            "/api/onboarding/status",
            None,
            Some(&session.cookie_header),
            &[],
        )
        .await;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(status.body["data"]["completed"].as_bool(), Some(false));
    assert_eq!(
        status.body["data"]["missing_steps"].as_array().unwrap().len(),
        4
    );
    assert_eq!(
        status.body["data"]["current_step"].as_str(),
        Some("school_setup")
    );

    let access = app
        .request(
            "GET",
            "/api/access/dashboard",
            None,
            Some(&session.cookie_header),
            &[],
        )
        .await;
    assert_eq!(access.status, StatusCode::OK);
    assert_eq!(access.body["data"]["allowed"].as_bool(), Some(false));
    assert_eq!(
        access.body["data"]["reason"].as_str(),
        Some("onboarding_incomplete")
    );
    assert_eq!(
        access.body["data"]["redirect_to"].as_str(),
        Some("/onboarding/school-setup")
    );
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn test_full_onboarding_with_trial_unlocks_dashboard() {
    let app = db_app().await;
    let session = register(&app, "complete@school.example", "thoroughadmin").await;

    assert_eq!(
        submit_step(&app, &session, "school_setup", json!({"name": "Greenfield Primary"})).await,
        StatusCode::OK
    );
    assert_eq!(
        submit_step(&app, &session, "admin_profile", json!({"full_name": "Alex Mensah"})).await,
        StatusCode::OK
    );
    assert_eq!(
        submit_step(&app, &session, "payment_plan", json!({"plan": "trial"})).await,
        StatusCode::OK
    );
    // The final step triggers completion automatically.
    assert_eq!(
        submit_step(&app, &session, "review_confirm", json!({})).await,
        StatusCode::OK
    );

    let status = app
        .request(
            "GET",
            "/api/onboarding/status",
            None,
            Some(&session.cookie_header),
            &[],
        )
        .await;
    assert_eq!(status.body["data"]["completed"].as_bool(), Some(true));

    let access = app
        .request(
            "GET",
            "/api/access/dashboard",
            None,
            Some(&session.cookie_header),
            &[],
        )
        .await;
    assert_eq!(access.body["data"]["allowed"].as_bool(), Some(true));
    assert!(access.body["data"]["reason"].is_null());
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn test_review_confirm_without_plan_does_not_fail_submission() {
    let app = db_app().await;
    let session = register(&app, "noplan@school.example", "planlessadmin").await;

    submit_step(&app, &session, "school_setup", json!({"name": "Hillside Academy"})).await;
    submit_step(&app, &session, "admin_profile", json!({})).await;
    // No payment_plan step: completion cannot succeed yet.
    assert_eq!(
        submit_step(&app, &session, "review_confirm", json!({})).await,
        StatusCode::OK,
        "step submission must succeed even when completion fails"
    );

    // Explicit completion reports the missing prerequisite.
    let complete = app
        .request(
            "POST",
            "/api/onboarding/complete",
            None,
            Some(&session.cookie_header),
            &[("x-csrf-token", session.csrf.as_str())],
        )
        .await;
    assert_eq!(complete.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        complete.body["error"].as_str(),
        Some("INCOMPLETE_PREREQUISITES")
    );

    let access = app
        .request(
            "GET",
            "/api/access/dashboard",
            None,
            Some(&session.cookie_header),
            &[],
        )
        .await;
    assert_eq!(access.body["data"]["allowed"].as_bool(), Some(false));
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn test_completion_is_idempotent() {
    let app = db_app().await;
    let session = register(&app, "twice@school.example", "idempotentadmin").await;

    submit_step(&app, &session, "school_setup", json!({"name": "Lakeview College"})).await;
    submit_step(&app, &session, "admin_profile", json!({})).await;
    submit_step(&app, &session, "payment_plan", json!({"plan": "trial"})).await;
    submit_step(&app, &session, "review_confirm", json!({})).await;

    let me_first = app
        .request("GET", "/api/auth/me", None, Some(&session.cookie_header), &[])
        .await;

    // A second explicit completion is a no-op.
    let complete = app
        .request(
            "POST",
            "/api/onboarding/complete",
            None,
            Some(&session.cookie_header),
            &[("x-csrf-token", session.csrf.as_str())],
        )
        .await;
    assert_eq!(complete.status, StatusCode::OK);

    let me_second = app
        .request("GET", "/api/auth/me", None, Some(&session.cookie_header), &[])
        .await;
    assert_eq!(
        me_first.body["data"]["onboarding_completed"],
        me_second.body["data"]["onboarding_completed"]
    );
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn test_trial_grant_reports_days_remaining() {
    let app = db_app().await;
    let session = register(&app, "trial@school.example", "trialadmin").await;

    submit_step(&app, &session, "payment_plan", json!({"plan": "trial"})).await;

    let plan = app
        .request(
            "GET",
            "/api/access/plan",
            None,
            Some(&session.cookie_header),
            &[],
        )
        .await;
    assert_eq!(plan.status, StatusCode::OK);
    assert_eq!(plan.body["data"]["has_access"].as_bool(), Some(true));
    assert_eq!(plan.body["data"]["grant_type"].as_str(), Some("trial"));

    let days = plan.body["data"]["days_remaining"].as_i64().unwrap();
    assert!((13..=14).contains(&days), "unexpected days_remaining: {days}");
}
