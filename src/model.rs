//! Data models for the movie catalog application
//!
//! This module defines all the data structures used throughout the application,
//! including the stored Movie record, the singleton admin counters record, and
//! the request/query payloads accepted by the HTTP API.
//!
//! Field names on the wire stay in the catalog's original JSON casing
//! (`imageURL`, `movieName`, `createdAt`, ...) so existing frontend clients
//! keep working unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie catalog entry as stored in the database
///
/// All descriptive fields are guaranteed present because creation validates
/// them; only `price` is nullable, and it is non-null exactly when
/// `movie_type` is `"Paid"` (enforced on create, not on update).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Store-generated identifier, immutable and opaque to clients.
    /// The microsecond-timestamp prefix keeps key order equal to
    /// insertion order when iterating the movies table.
    pub id: String,

    /// Poster/thumbnail image URL
    #[serde(rename = "imageURL")]
    pub image_url: String,

    /// Display name, surrounding whitespace trimmed
    pub movie_name: String,

    /// Description text, surrounding whitespace trimmed
    pub movie_description: String,

    /// File-host identifier for the source file
    pub movie_link: String,

    /// Expected values are "Paid" or "Free" (not enforced as a closed set)
    pub movie_type: String,

    /// Price in the site currency; present only for "Paid" movies
    pub price: Option<f64>,

    /// Timestamp set once when the record is inserted
    pub created_at: DateTime<Utc>,

    /// Equal to `created_at` on insert, refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a movie
///
/// Every field is optional at the deserialization layer so that a missing
/// field produces a 400 validation error rather than a deserialization
/// failure. Presence is checked in the repository's create operation.
///
/// # Example
/// ```json
/// {
///   "imageURL": "https://cdn.example.com/foo.jpg",
///   "movieName": "Foo",
///   "movieDescription": "A film about foo",
///   "movieLink": "1a2b3c4d",
///   "movieType": "Paid",
///   "price": 4.99
/// }
/// ```
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub movie_name: Option<String>,
    pub movie_description: Option<String>,
    pub movie_link: Option<String>,
    pub movie_type: Option<String>,
    pub price: Option<f64>,
}

/// Request payload for partially updating a movie
///
/// Any subset of fields may be supplied; omitted fields keep their stored
/// values. No field-level validation is performed on update.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub movie_name: Option<String>,
    pub movie_description: Option<String>,
    pub movie_link: Option<String>,
    pub movie_type: Option<String>,
    pub price: Option<f64>,
}

/// Aggregate site counters, stored as a single record under a fixed key
///
/// Created lazily with all counters at zero on the first visit-tracking
/// call. `paid_movie` and `free_movie` are carried but never incremented by
/// any current operation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminCounters {
    /// Incremented by one per visit-tracking call
    #[serde(default)]
    pub user_visited: u64,

    #[serde(default)]
    pub paid_movie: u64,

    #[serde(default)]
    pub free_movie: u64,

    /// Overwritten with the live movie count on every visit-tracking call
    #[serde(default)]
    pub total_movies: u64,
}

/// Query parameters for `GET /api/movies`
///
/// When `name` is present the endpoint returns the first movie with that
/// exact name (or JSON `null`); otherwise it returns the full list.
#[derive(Deserialize)]
pub struct ListMoviesParams {
    pub name: Option<String>,
}

/// Query parameters for `GET /download` and `GET /movie-details`
#[derive(Deserialize)]
pub struct MovieIdParams {
    #[serde(rename = "movieId")]
    pub movie_id: Option<String>,
}
