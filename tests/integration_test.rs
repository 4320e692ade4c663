//! Integration tests for the movie catalog API
//!
//! These tests verify the entire application stack including:
//! - HTTP routing
//! - Request/response handling
//! - Database operations
//! - Error handling

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

// Import from the main crate
use movie_catalog::database::{init_db, AppState};
use movie_catalog::route::create_app;

/// Helper function to create a test application with a temporary database
///
/// The upstream URL points at an unroutable port so that any accidental
/// file-host request fails fast instead of reaching the real host.
fn setup_test_app() -> (axum::Router, NamedTempFile) {
    // Create a temporary database file
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_db.path().to_str().unwrap();

    // Initialize database
    let db = init_db(db_path).expect("Failed to initialize test database");
    let state = AppState {
        db: Arc::new(db),
        http: reqwest::Client::new(),
        upstream_url: "http://127.0.0.1:9".to_string(),
    };

    // Create the app
    let app = create_app(state);

    (app, temp_db)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

/// Helper to POST a movie payload to /api/movies
async fn post_movie(app: &axum::Router, payload: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/movies")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Helper to GET a path and return the response
async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_ping() {
    let (app, _temp_db) = setup_test_app();

    let response = get(&app, "/api/ping").await;

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Server is up and running");
}

#[tokio::test]
async fn test_create_free_movie_discards_price() {
    let (app, _temp_db) = setup_test_app();

    // A Free movie with a price supplied anyway
    let response = post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Foo",
            "movieDescription": "d",
            "movieLink": "l",
            "movieType": "Free",
            "price": 9.99
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Movie added successfully");

    // The stored record must have a null price
    let response = get(&app, "/api/movies?name=Foo").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["movieName"], "Foo");
    assert!(body["price"].is_null());
}

#[tokio::test]
async fn test_create_paid_movie_without_price_rejected() {
    let (app, _temp_db) = setup_test_app();

    let response = post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Bar",
            "movieDescription": "d",
            "movieLink": "l",
            "movieType": "Paid"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Price is required for Paid movies");

    // Nothing must have been persisted
    let response = get(&app, "/api/movies").await;
    let body = response_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_paid_movie_with_zero_price_accepted() {
    let (app, _temp_db) = setup_test_app();

    // Zero is a present price; only a missing price is rejected
    let response = post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Gratis",
            "movieDescription": "d",
            "movieLink": "l",
            "movieType": "Paid",
            "price": 0
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(&app, "/api/movies?name=Gratis").await;
    let body = response_json(response.into_body()).await;
    assert_eq!(body["price"], 0.0);
}

#[tokio::test]
async fn test_create_movie_missing_field_rejected() {
    let (app, _temp_db) = setup_test_app();

    // No movieLink
    let response = post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Baz",
            "movieDescription": "d",
            "movieType": "Free"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_create_paid_movie_and_fetch_by_id() {
    let (app, _temp_db) = setup_test_app();

    let response = post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "  Spaced Out  ",
            "movieDescription": " described ",
            "movieLink": "l",
            "movieType": "Paid",
            "price": 4.99
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Grab the store-generated id from the list endpoint
    let response = get(&app, "/api/movies").await;
    let body = response_json(response.into_body()).await;
    let movies = body.as_array().unwrap();
    assert_eq!(movies.len(), 1);
    let id = movies[0]["id"].as_str().unwrap().to_string();

    let response = get(&app, &format!("/api/movies/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    // Name and description are stored trimmed
    assert_eq!(body["movieName"], "Spaced Out");
    assert_eq!(body["movieDescription"], "described");
    assert_eq!(body["movieType"], "Paid");
    assert_eq!(body["price"], 4.99);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_get_movie_not_found() {
    let (app, _temp_db) = setup_test_app();

    let response = get(&app, "/api/movies/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Movie not found");
}

#[tokio::test]
async fn test_update_movie_partial_merge() {
    let (app, _temp_db) = setup_test_app();

    post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Original",
            "movieDescription": "old",
            "movieLink": "l",
            "movieType": "Free"
        }),
    )
    .await;

    let response = get(&app, "/api/movies").await;
    let body = response_json(response.into_body()).await;
    let id = body[0]["id"].as_str().unwrap().to_string();

    // Update only the description
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/movies/{}", id))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "movieDescription": "new" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Movie updated successfully");
    assert_eq!(body["movie"]["movieDescription"], "new");
    // Untouched fields keep their values
    assert_eq!(body["movie"]["movieName"], "Original");
    assert_eq!(body["movie"]["movieType"], "Free");
    assert!(body["movie"]["price"].is_null());
}

#[tokio::test]
async fn test_update_movie_not_found() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/movies/missing123")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "movieName": "x" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_movie() {
    let (app, _temp_db) = setup_test_app();

    post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Doomed",
            "movieDescription": "d",
            "movieLink": "l",
            "movieType": "Free"
        }),
    )
    .await;

    let response = get(&app, "/api/movies").await;
    let body = response_json(response.into_body()).await;
    let id = body[0]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/movies/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Movie deleted successfully");

    // Gone afterwards
    let response = get(&app, &format!("/api/movies/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_movie_not_found() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/movies/missing123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_by_name_first_match_and_null() {
    let (app, _temp_db) = setup_test_app();

    // Two movies sharing a name, inserted in order
    for desc in ["first", "second"] {
        post_movie(
            &app,
            json!({
                "imageURL": "u",
                "movieName": "Dup",
                "movieDescription": desc,
                "movieLink": "l",
                "movieType": "Free"
            }),
        )
        .await;
    }

    // Exactly one record comes back, and it is the oldest one
    let response = get(&app, "/api/movies?name=Dup").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert!(body.is_object());
    assert_eq!(body["movieDescription"], "first");

    // No match yields JSON null, still 200
    let response = get(&app, "/api/movies?name=Nope").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_search_distinct_names() {
    let (app, _temp_db) = setup_test_app();

    for name in ["Alpha", "Beta", "Alpha"] {
        post_movie(
            &app,
            json!({
                "imageURL": "u",
                "movieName": name,
                "movieDescription": "d",
                "movieLink": "l",
                "movieType": "Free"
            }),
        )
        .await;
    }

    let response = get(&app, "/api/search/movie").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    let names = body["movies"].as_array().unwrap();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&json!("Alpha")));
    assert!(names.contains(&json!("Beta")));
}

#[tokio::test]
async fn test_download_requires_movie_id() {
    let (app, _temp_db) = setup_test_app();

    // Missing parameter
    let response = get(&app, "/download").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Movie ID is required");

    // Empty parameter counts as missing too
    let response = get(&app, "/download?movieId=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_upstream_failure() {
    let (app, _temp_db) = setup_test_app();

    // The test upstream is unroutable, so the proxy must surface a 500
    let response = get(&app, "/download?movieId=abc").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Failed to fetch the movie file.");
}

#[tokio::test]
async fn test_movie_details() {
    let (app, _temp_db) = setup_test_app();

    // Missing parameter
    let response = get(&app, "/movie-details").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown id
    let response = get(&app, "/movie-details?movieId=missing123").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Known id
    post_movie(
        &app,
        json!({
            "imageURL": "u",
            "movieName": "Detail",
            "movieDescription": "d",
            "movieLink": "l",
            "movieType": "Free"
        }),
    )
    .await;

    let response = get(&app, "/api/movies").await;
    let body = response_json(response.into_body()).await;
    let id = body[0]["id"].as_str().unwrap().to_string();

    let response = get(&app, &format!("/movie-details?movieId={}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["movieName"], "Detail");
}
