//! HTTP-level integration tests for user profiles and subscriptions.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_recipe, delete_auth, get, get_auth, post_auth,
    seed_ingredient, seed_tag, seed_user, token_for,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscribe_returns_author_with_capped_recipes(pool: PgPool) {
    let reader = seed_user(&pool, "reader").await;
    let author = seed_user(&pool, "author").await;
    let tag = seed_tag(&pool, "lunch").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let author_token = token_for(author);
    for i in 0..3 {
        create_recipe(&pool, &author_token, &format!("Dish {i}"), &[tag], &[(flour, 1)]).await;
    }

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/users/{author}/subscribe?recipes_limit=2"),
        &token_for(reader),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["id"], author);
    assert_eq!(json["username"], "author");
    assert_eq!(json["is_subscribed"], true);
    assert_eq!(json["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(json["recipes_count"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_and_absent_subscription_rejected(pool: PgPool) {
    let reader = seed_user(&pool, "reader").await;
    let author = seed_user(&pool, "author").await;
    let token = token_for(reader);
    let uri = format!("/api/users/{author}/subscribe");

    let response = post_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"].is_string());

    let response = delete_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_subscription_rejected(pool: PgPool) {
    let user = seed_user(&pool, "narcissus").await;

    let response = post_auth(
        build_test_app(pool),
        &format!("/api/users/{user}/subscribe"),
        &token_for(user),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"], "You cannot subscribe to yourself.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscribe_unknown_author_returns_404(pool: PgPool) {
    let reader = seed_user(&pool, "reader").await;

    let response = post_auth(
        build_test_app(pool),
        "/api/users/999999/subscribe",
        &token_for(reader),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscriptions_list_and_profiles(pool: PgPool) {
    let reader = seed_user(&pool, "reader").await;
    let author = seed_user(&pool, "author").await;
    let token = token_for(reader);

    post_auth(
        build_test_app(pool.clone()),
        &format!("/api/users/{author}/subscribe"),
        &token,
    )
    .await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/users/subscriptions?recipes_limit=1",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["id"], author);
    assert_eq!(json["results"][0]["recipes_count"], 0);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/users/{author}"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["is_subscribed"], true);

    let response = get(build_test_app(pool.clone()), &format!("/api/users/{author}")).await;
    assert_eq!(body_json(response).await["is_subscribed"], false);

    let response = get_auth(build_test_app(pool.clone()), "/api/users/me", &token).await;
    assert_eq!(body_json(response).await["id"], reader);

    let response = get(build_test_app(pool), "/api/users?limit=1").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
}
