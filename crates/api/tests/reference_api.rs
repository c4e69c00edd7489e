//! HTTP-level integration tests for tags, ingredients, health and token
//! handling.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_auth, seed_ingredient, seed_tag};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_db(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tags_listed_by_name(pool: PgPool) {
    let lunch = seed_tag(&pool, "lunch").await;
    seed_tag(&pool, "breakfast").await;

    let response = get(build_test_app(pool.clone()), "/api/tags").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["slug"], "breakfast");
    assert_eq!(json[1]["slug"], "lunch");

    let response = get(build_test_app(pool.clone()), &format!("/api/tags/{lunch}")).await;
    assert_eq!(body_json(response).await["color"], "#E26C2D");

    let response = get(build_test_app(pool), "/api/tags/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ingredient_prefix_search(pool: PgPool) {
    seed_ingredient(&pool, "Sugar", "g").await;
    seed_ingredient(&pool, "salt", "g").await;
    seed_ingredient(&pool, "brown sugar", "g").await;

    let response = get(build_test_app(pool.clone()), "/api/ingredients?name=su").await;
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sugar"]);

    let response = get(build_test_app(pool), "/api/ingredients").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_rejected_on_public_read(pool: PgPool) {
    let response = get_auth(build_test_app(pool), "/api/recipes", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
