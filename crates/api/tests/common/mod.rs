#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use foodgram_api::auth::jwt::{generate_access_token, JwtConfig};
use foodgram_api::config::ServerConfig;
use foodgram_api::router::build_app_router;
use foodgram_api::state::AppState;
use foodgram_core::types::DbId;
use foodgram_db::models::ingredient::CreateIngredient;
use foodgram_db::models::tag::CreateTag;
use foodgram_db::models::user::CreateUser;
use foodgram_db::repositories::{IngredientRepo, TagRepo, UserRepo};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// A 1x1 PNG as a data URI.
pub const TEST_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid access token for `user_id`.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: format!("{username}@example.com"),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
    .id
}

pub async fn seed_tag(pool: &PgPool, slug: &str) -> DbId {
    TagRepo::create(
        pool,
        &CreateTag {
            name: slug.to_uppercase(),
            color: "#E26C2D".to_string(),
            slug: slug.to_string(),
        },
    )
    .await
    .expect("tag creation should succeed")
    .id
}

pub async fn seed_ingredient(pool: &PgPool, name: &str, unit: &str) -> DbId {
    IngredientRepo::create(
        pool,
        &CreateIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        },
    )
    .await
    .expect("ingredient creation should succeed")
    .id
}

/// A complete, valid recipe payload.
pub fn recipe_body(name: &str, tags: &[DbId], ingredients: &[(DbId, i64)]) -> Value {
    serde_json::json!({
        "name": name,
        "text": "Mix everything and cook.",
        "cooking_time": 15,
        "image": TEST_IMAGE,
        "tags": tags,
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| serde_json::json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
    })
}

/// Create a recipe through the API and return its id.
pub async fn create_recipe(
    pool: &PgPool,
    token: &str,
    name: &str,
    tags: &[DbId],
    ingredients: &[(DbId, i64)],
) -> DbId {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/recipes",
        token,
        recipe_body(name, tags, ingredients),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
