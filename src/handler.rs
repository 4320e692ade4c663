//! HTTP request handlers for the movie catalog API
//!
//! This module implements the request-to-storage glue for:
//! - Movie CRUD and name search
//! - The aggregate visit counters
//! - The streaming download proxy against the external file host
//!
//! Handlers validate inputs, call into [`crate::repository`], and shape the
//! JSON responses; every failure path is an [`ApiError`] propagated with `?`.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::database::AppState;
use crate::error::ApiError;
use crate::model::{CreateMovieRequest, ListMoviesParams, MovieIdParams, UpdateMovieRequest};
use crate::repository;

/// Liveness check
///
/// `GET /api/ping` → **200** plain text
pub async fn ping() -> &'static str {
    "Server is up and running"
}

/// Lists movies, or looks one up by exact name
///
/// `GET /api/movies` → **200** JSON array of all movies in insertion order
/// `GET /api/movies?name=Foo` → **200** first movie named "Foo", or JSON
/// `null` if none matches (first-match semantics when names repeat)
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Response, ApiError> {
    match params.name {
        Some(name) => {
            let movie = repository::find_by_name(&state.db, &name)?;
            Ok(Json(movie).into_response())
        }
        None => {
            let movies = repository::list_all(&state.db)?;
            Ok(Json(movies).into_response())
        }
    }
}

/// Creates a movie
///
/// `POST /api/movies`
///
/// # Response
///
/// - **201 Created** - `{"message": "Movie added successfully"}`
/// - **400 Bad Request** - a required field is missing, or `movieType` is
///   "Paid" without a `price`
pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    repository::create(&state.db, payload)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Movie added successfully" })),
    ))
}

/// Fetches a single movie by ID
///
/// `GET /api/movies/{id}` → **200** movie record, **404** if unknown
pub async fn get_movie(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = repository::find_by_id(&state.db, &id)?;

    Ok(Json(movie))
}

/// Partially updates a movie
///
/// `PUT /api/movies/{id}` with any subset of movie fields in the body.
///
/// # Response
///
/// - **200 OK** - `{"message": "...", "movie": {...}}` with the updated record
/// - **404 Not Found** - no movie with that ID
pub async fn update_movie(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateMovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = repository::update(&state.db, &id, payload)?;

    Ok(Json(json!({
        "message": "Movie updated successfully",
        "movie": movie
    })))
}

/// Deletes a movie
///
/// `DELETE /api/movies/{id}` → **200** on success, **404** if unknown
pub async fn delete_movie(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    repository::delete(&state.db, &id)?;

    Ok(Json(json!({ "message": "Movie deleted successfully" })))
}

/// Returns the set of distinct movie names
///
/// `GET /api/search/movie` → **200** `{"movies": ["Foo", "Bar", ...]}`,
/// each name listed at most once regardless of duplicate records
pub async fn search_movie_names(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let names = repository::distinct_names(&state.db)?;

    Ok(Json(json!({ "movies": names })))
}

/// Records one site visit
///
/// `POST /api/user-visited` increments the visit counter (creating the
/// counters record on first use) and refreshes the stored movie total.
///
/// # Response
///
/// - **200 OK** - `{"message": "...", "userVisited": <new total>}`
pub async fn record_user_visit(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let user_visited = repository::record_visit(&state.db)?;

    Ok(Json(json!({
        "message": "User visit count updated successfully",
        "userVisited": user_visited
    })))
}

/// Fetches the aggregate counters
///
/// `GET /api/user-visited` → **200** full counters record, **404** if no
/// visit has ever been recorded
pub async fn get_user_visits(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let counters = repository::get_stats(&state.db)?;

    Ok(Json(counters))
}

/// Streams a movie file from the external file host
///
/// `GET /download?movieId=<id>` proxies the file host's
/// `uc?export=download&id=<id>` endpoint and forwards the body byte-for-byte
/// as an octet-stream attachment named `<id>.mp4`. The upstream response is
/// never buffered in memory.
///
/// # Response
///
/// - **200 OK** - binary stream
/// - **400 Bad Request** - `movieId` missing or empty; the upstream host is
///   not contacted in this case
/// - **500 Internal Server Error** - upstream network error or non-2xx
///   status; no retry is attempted
pub async fn download_movie(
    State(state): State<AppState>,
    Query(params): Query<MovieIdParams>,
) -> Result<Response, ApiError> {
    let movie_id = params
        .movie_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("Movie ID is required".to_string()))?;

    let url = format!(
        "{}/uc?export=download&id={}",
        state.upstream_url, movie_id
    );

    let upstream = state
        .http
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|err| {
            tracing::error!(%err, movie_id, "upstream file fetch failed");
            ApiError::Upstream("Failed to fetch the movie file.".to_string())
        })?;

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.mp4\"", movie_id),
        ),
    ];

    // Pipe the upstream body through without buffering
    Ok((headers, Body::from_stream(upstream.bytes_stream())).into_response())
}

/// Fetches movie details by ID passed as a query parameter
///
/// `GET /movie-details?movieId=<id>` → **200** movie record,
/// **400** if `movieId` is missing, **404** if unknown
pub async fn movie_details(
    State(state): State<AppState>,
    Query(params): Query<MovieIdParams>,
) -> Result<impl IntoResponse, ApiError> {
    let movie_id = params
        .movie_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("Movie ID is required".to_string()))?;

    let movie = repository::find_by_id(&state.db, &movie_id)?;

    Ok(Json(movie))
}
