//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use scholarship_api::auth::jwt::{generate_access_token, JwtConfig};
use scholarship_api::config::ServerConfig;
use scholarship_api::router::build_app_router;
use scholarship_api::state::AppState;
use scholarship_core::types::DbId;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "api-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The production router and middleware stack over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Database fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (email, full_name, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(format!("User {email}"))
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_scholarship(pool: &PgPool) -> DbId {
    sqlx::query_scalar("INSERT INTO scholarships (name) VALUES ('Merit Award') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// A student account with a profile and a submitted application.
/// Returns `(user_id, student_id, application_id)`.
pub async fn create_applicant(
    pool: &PgPool,
    email: &str,
    scholarship_id: DbId,
) -> (DbId, DbId, DbId) {
    let user_id = create_user(pool, email, "student").await;
    let student_id: DbId =
        sqlx::query_scalar("INSERT INTO students (user_id) VALUES ($1) RETURNING id")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap();
    let application_id: DbId = sqlx::query_scalar(
        "INSERT INTO scholarship_applications (student_id, scholarship_id, status, submitted_at) \
         VALUES ($1, $2, 'submitted', NOW()) RETURNING id",
    )
    .bind(student_id)
    .bind(scholarship_id)
    .fetch_one(pool)
    .await
    .unwrap();
    (user_id, student_id, application_id)
}

/// `YYYY-MM-DD` for a day `days_ahead` from today.
pub fn future_date(days_ahead: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(days_ahead)).to_string()
}
