//! Route definitions for the movie catalog API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::database::AppState;
use crate::handler::{
    create_movie, delete_movie, download_movie, get_movie, get_user_visits, list_movies,
    movie_details, ping, record_user_visit, search_movie_names, update_movie,
};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /api/ping` - liveness check
/// - `GET /api/movies` - list all movies, or look one up via `?name=`
/// - `POST /api/movies` - create a movie
/// - `GET|PUT|DELETE /api/movies/{id}` - fetch, partially update, delete
/// - `GET /api/search/movie` - distinct movie names
/// - `POST|GET /api/user-visited` - record a visit / fetch the counters
/// - `GET /download` - stream a file from the external host via `?movieId=`
/// - `GET /movie-details` - fetch a movie via `?movieId=`
///
/// The catalog is consumed by a browser frontend served from elsewhere, so
/// a permissive CORS layer is applied to the whole router.
///
/// # Arguments
///
/// * `state` - Application state containing the shared database instance
///
/// # Returns
///
/// Configured Axum Router ready to handle requests
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/ping", get(ping))
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/search/movie", get(search_movie_names))
        .route("/user-visited", get(get_user_visits).post(record_user_visit));

    Router::new()
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Download proxy and details lookup live at the root, matching the
        // paths the frontend already uses
        .route("/download", get(download_movie))
        .route("/movie-details", get(movie_details))
        // Any origin may call the API
        .layer(CorsLayer::permissive())
        // Inject the application state into all handlers
        .with_state(state)
}
