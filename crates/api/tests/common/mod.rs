//! Common test utilities for integration tests.
//!
//! The suites run against a real PostgreSQL database named by
//! `TEST_DATABASE_URL`. When the variable is unset every test returns early.
//! Records are namespaced with fresh UUIDs so suites can share one database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain::models::AdminRole;
use domain::services::MockMediaStorage;
use persistence::repositories::AdminRepository;
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;
use wedding_api::{
    app::{router, AppState},
    config::Config,
};

pub const TEST_PASSWORD: &str = "Sup3r-Secret-pass";

/// Connects to the test database and applies migrations, or returns `None`
/// when no database is configured.
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set; skipping database test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Test configuration with rate limiting disabled.
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    Config::load_for_test(overrides).expect("Failed to build test config")
}

/// A running application with the handles tests need to inspect it.
pub struct TestContext {
    pub pool: PgPool,
    pub app: Router,
    pub media: MockMediaStorage,
}

impl TestContext {
    pub async fn new() -> Option<Self> {
        Self::with_media(MockMediaStorage::new(), &[]).await
    }

    pub async fn with_media(media: MockMediaStorage, overrides: &[(&str, &str)]) -> Option<Self> {
        let pool = create_test_pool().await?;
        let state = AppState::new(test_config(overrides), pool.clone(), Arc::new(media.clone()))
            .expect("Failed to build app state");

        Some(Self {
            pool,
            app: router(state),
            media,
        })
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Null` for empty bodies).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(json_request(method, uri, token, body))
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Logs in through the API and returns the bearer token.
    pub async fn login(&self, identifier: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "identifier": identifier, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Inserts an admin directly and logs in as it.
    pub async fn admin_token(&self, role: AdminRole) -> String {
        let username = format!("admin_{}", Uuid::new_v4().simple());
        let hash = shared::password::hash_password(TEST_PASSWORD).unwrap();
        AdminRepository::new(self.pool.clone())
            .create(&username, &hash, role, None)
            .await
            .expect("Failed to create admin");
        self.login(&username, TEST_PASSWORD).await
    }

    /// Creates a user with a fresh wedding through the admin API and logs in
    /// as the owner.
    pub async fn create_owner(&self, admin_token: &str) -> Owner {
        let suffix = Uuid::new_v4().simple().to_string();
        let email = format!("owner_{}@example.com", suffix);
        let slug = format!("ana-budi-{}", &suffix[..12]);

        let (status, body) = self
            .post(
                "/api/v1/users",
                Some(admin_token),
                json!({
                    "email": email,
                    "password": TEST_PASSWORD,
                    "name": "Ana",
                    "wedding": {
                        "slug": slug,
                        "weddingDate": "2025-12-20",
                        "coupleName": "Ana & Budi"
                    }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "user creation failed: {}", body);

        let user_id = parse_id(&body["user"]["id"]);
        let wedding_id = parse_id(&body["wedding"]["id"]);
        let token = self.login(&email, TEST_PASSWORD).await;

        Owner {
            user_id,
            wedding_id,
            slug,
            email,
            token,
        }
    }
}

/// A wedding owner created for a test.
pub struct Owner {
    pub user_id: Uuid,
    pub wedding_id: Uuid,
    pub slug: String,
    pub email: String,
    pub token: String,
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        // A unique client per request keeps rate limits out of unrelated tests
        .header("x-forwarded-for", Uuid::new_v4().to_string());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub fn parse_id(value: &Value) -> Uuid {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("expected a UUID, got {}", value))
}
