//! HTTP-level integration tests for the recipe endpoints.
//!
//! Uses `tower::ServiceExt` to send requests directly to the router
//! without a TCP listener.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_recipe, delete_auth, get, post_json_auth, put_json_auth,
    recipe_body, seed_ingredient, seed_tag, seed_user, token_for,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_recipe_returns_201_with_sets(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let breakfast = seed_tag(&pool, "breakfast").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let milk = seed_ingredient(&pool, "milk", "ml").await;
    let token = token_for(author);

    let response = post_json_auth(
        build_test_app(pool),
        "/api/recipes",
        &token,
        recipe_body("Pancakes", &[breakfast, breakfast], &[(milk, 300), (flour, 200)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Pancakes");
    assert_eq!(json["author"]["id"], author);
    assert_eq!(json["is_favorited"], false);
    assert_eq!(json["tags"].as_array().unwrap().len(), 1);

    let ingredients: HashSet<(i64, i64)> = json["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| (i["id"].as_i64().unwrap(), i["amount"].as_i64().unwrap()))
        .collect();
    assert_eq!(ingredients, HashSet::from([(flour, 200), (milk, 300)]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_auth(pool: PgPool) {
    let response = common::send(
        build_test_app(pool),
        axum::http::Method::POST,
        "/api/recipes",
        None,
        Some(recipe_body("Anon", &[1], &[(1, 1)])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_ingredient_rejected(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let tag = seed_tag(&pool, "lunch").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/recipes",
        &token_for(author),
        recipe_body("Bread", &[tag], &[(flour, 100), (flour, 250)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["ingredients"].is_array());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_amount_bounds(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let tag = seed_tag(&pool, "lunch").await;
    let salt = seed_ingredient(&pool, "salt", "g").await;
    let token = token_for(author);

    for amount in [0, -5] {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            "/api/recipes",
            &token,
            recipe_body("Salty", &[tag], &[(salt, amount)]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "amount {amount}");
    }

    create_recipe(&pool, &token, "Pinch", &[tag], &[(salt, 1)]).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_fields_are_named(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/recipes",
        &token_for(author),
        json!({ "name": "Nothing else" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors = &body_json(response).await["errors"];
    for field in ["text", "cooking_time", "image", "tags", "ingredients"] {
        assert!(errors[field].is_array(), "missing error for {field}");
    }
    assert!(errors["name"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_ingredient_is_field_error(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let tag = seed_tag(&pool, "lunch").await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/recipes",
        &token_for(author),
        recipe_body("Ghost", &[tag], &[(424242, 1)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"]["ingredients"][0],
        "Unknown ingredient ids: 424242."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrongly_typed_cooking_time_is_field_error(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let tag = seed_tag(&pool, "lunch").await;
    let salt = seed_ingredient(&pool, "salt", "g").await;

    let mut body = recipe_body("Soup", &[tag], &[(salt, 1)]);
    body["cooking_time"] = json!("abc");

    let response = post_json_auth(
        build_test_app(pool),
        "/api/recipes",
        &token_for(author),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["cooking_time"][0]
        .as_str()
        .unwrap()
        .contains("invalid type"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrongly_typed_amount_is_field_error(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let tag = seed_tag(&pool, "lunch").await;
    let salt = seed_ingredient(&pool, "salt", "g").await;

    let mut body = recipe_body("Soup", &[tag], &[(salt, 1)]);
    body["ingredients"][0]["amount"] = json!("lots");

    let response = post_json_auth(
        build_test_app(pool),
        "/api/recipes",
        &token_for(author),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["ingredients"][0]
        .as_str()
        .unwrap()
        .starts_with("ingredients[0].amount"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_recipe_id_is_field_error(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/recipes/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"]["id"][0], "A valid integer is required.");
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_sets(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let lunch = seed_tag(&pool, "lunch").await;
    let dinner = seed_tag(&pool, "dinner").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let eggs = seed_ingredient(&pool, "eggs", "pcs").await;
    let token = token_for(author);

    let id = create_recipe(&pool, &token, "Pie", &[lunch, dinner], &[(flour, 200), (eggs, 2)]).await;

    let mut body = recipe_body("Omelette", &[dinner], &[(eggs, 3)]);
    body.as_object_mut().unwrap().remove("image");
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/recipes/{id}"),
        &token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Omelette");
    assert_eq!(json["image"], common::TEST_IMAGE);
    assert_eq!(json["tags"].as_array().unwrap().len(), 1);
    assert_eq!(json["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(json["ingredients"][0]["id"], eggs);

    let (orphans,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphans, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_author_may_modify(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let other = seed_user(&pool, "critic").await;
    let tag = seed_tag(&pool, "lunch").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let id = create_recipe(&pool, &token_for(author), "Mine", &[tag], &[(flour, 1)]).await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/recipes/{id}"),
        &token_for(other),
        recipe_body("Stolen", &[tag], &[(flour, 1)]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/recipes/{id}"),
        &token_for(other),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/recipes/{id}"),
        &token_for(author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/recipes/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_and_filters_by_tag(pool: PgPool) {
    let author = seed_user(&pool, "chef").await;
    let breakfast = seed_tag(&pool, "breakfast").await;
    let dinner = seed_tag(&pool, "dinner").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let token = token_for(author);

    for i in 0..3 {
        create_recipe(&pool, &token, &format!("Morning {i}"), &[breakfast], &[(flour, 1)]).await;
    }
    create_recipe(&pool, &token, "Evening", &[dinner], &[(flour, 1)]).await;

    let response = get(build_test_app(pool.clone()), "/api/recipes?limit=2&page=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 4);
    assert_eq!(json["limit"], 2);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
    assert_eq!(json["results"][0]["name"], "Evening");

    let response = get(build_test_app(pool.clone()), "/api/recipes?tags=dinner").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);

    let response = get(
        build_test_app(pool),
        "/api/recipes?tags=dinner&tags=breakfast",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 4);
}
