//! Storage operations for movies and the admin counters singleton
//!
//! Handlers never touch redb directly; every database access goes through
//! the functions here, which own the transaction scopes and the JSON
//! (de)serialization of stored records.

use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};
use redb::{Database, ReadableDatabase, ReadableTable};
use std::collections::BTreeSet;

use crate::database::{ADMIN_KEY, TABLE_ADMIN, TABLE_MOVIES};
use crate::error::ApiError;
use crate::model::{AdminCounters, CreateMovieRequest, Movie, UpdateMovieRequest};

/// Generates a store-side movie ID
///
/// The decimal microsecond timestamp is a fixed 16 digits for the coming
/// centuries, so lexicographic key order matches insertion order; the random
/// alphanumeric suffix disambiguates inserts within the same microsecond.
fn generate_id(created_at: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    format!("{}{}", created_at.timestamp_micros(), suffix)
}

/// Presence check for a required create field; empty and whitespace-only
/// values count as missing
fn required_field(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation("All fields are required".to_string())),
    }
}

/// Returns all movies in insertion order
pub fn list_all(db: &Database) -> Result<Vec<Movie>, ApiError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_MOVIES)?;

    let mut movies = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        movies.push(serde_json::from_str(value.value())?);
    }

    Ok(movies)
}

/// Returns the first movie whose name matches exactly, if any
///
/// "First" follows insertion order, so duplicate names resolve to the
/// oldest record.
pub fn find_by_name(db: &Database, name: &str) -> Result<Option<Movie>, ApiError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_MOVIES)?;

    for entry in table.iter()? {
        let (_, value) = entry?;
        let movie: Movie = serde_json::from_str(value.value())?;
        if movie.movie_name == name {
            return Ok(Some(movie));
        }
    }

    Ok(None)
}

/// Fetches a movie by its ID
pub fn find_by_id(db: &Database, id: &str) -> Result<Movie, ApiError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_MOVIES)?;

    match table.get(id)? {
        Some(guard) => Ok(serde_json::from_str(guard.value())?),
        None => Err(ApiError::NotFound("Movie not found".to_string())),
    }
}

/// Validates and persists a new movie, returning the stored record
///
/// All descriptive fields are required. `price` is required when
/// `movieType` is "Paid" and is discarded otherwise, even if supplied.
pub fn create(db: &Database, payload: CreateMovieRequest) -> Result<Movie, ApiError> {
    let image_url = required_field(payload.image_url)?;
    let movie_name = required_field(payload.movie_name)?.trim().to_string();
    let movie_description = required_field(payload.movie_description)?.trim().to_string();
    let movie_link = required_field(payload.movie_link)?;
    let movie_type = required_field(payload.movie_type)?;

    let price = if movie_type == "Paid" {
        match payload.price {
            Some(p) => Some(p),
            None => {
                return Err(ApiError::Validation(
                    "Price is required for Paid movies".to_string(),
                ))
            }
        }
    } else {
        // Free movies never carry a price, even if the client sent one
        None
    };

    let now = Utc::now();
    let movie = Movie {
        id: generate_id(now),
        image_url,
        movie_name,
        movie_description,
        movie_link,
        movie_type,
        price,
        created_at: now,
        updated_at: now,
    };

    let record_json = serde_json::to_string(&movie)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(TABLE_MOVIES)?;
        table.insert(movie.id.as_str(), record_json.as_str())?;
    }
    write_txn.commit()?;

    Ok(movie)
}

/// Applies a partial-field merge to an existing movie and returns the
/// updated record
///
/// Omitted fields keep their stored values; no field-level validation is
/// performed here (unlike create). `updatedAt` is always refreshed.
pub fn update(db: &Database, id: &str, payload: UpdateMovieRequest) -> Result<Movie, ApiError> {
    let write_txn = db.begin_write()?;

    let movie = {
        let mut table = write_txn.open_table(TABLE_MOVIES)?;

        let mut movie: Movie = match table.get(id)? {
            Some(guard) => serde_json::from_str(guard.value())?,
            None => return Err(ApiError::NotFound("Movie not found".to_string())),
        };

        if let Some(v) = payload.image_url {
            movie.image_url = v;
        }
        if let Some(v) = payload.movie_name {
            movie.movie_name = v.trim().to_string();
        }
        if let Some(v) = payload.movie_description {
            movie.movie_description = v.trim().to_string();
        }
        if let Some(v) = payload.movie_link {
            movie.movie_link = v;
        }
        if let Some(v) = payload.movie_type {
            movie.movie_type = v;
        }
        if let Some(v) = payload.price {
            movie.price = Some(v);
        }
        movie.updated_at = Utc::now();

        let record_json = serde_json::to_string(&movie)?;
        table.insert(id, record_json.as_str())?;

        movie
    };

    write_txn.commit()?;

    Ok(movie)
}

/// Removes a movie by ID
pub fn delete(db: &Database, id: &str) -> Result<(), ApiError> {
    let write_txn = db.begin_write()?;

    let removed = {
        let mut table = write_txn.open_table(TABLE_MOVIES)?;
        // Bind before the block ends so the access guard is dropped
        // before the table it borrows
        let removed = table.remove(id)?.is_some();
        removed
    };

    if !removed {
        // Dropping the transaction aborts it; nothing was modified
        return Err(ApiError::NotFound("Movie not found".to_string()));
    }

    write_txn.commit()?;

    Ok(())
}

/// Returns each distinct movie name at most once
pub fn distinct_names(db: &Database) -> Result<Vec<String>, ApiError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_MOVIES)?;

    let mut names = BTreeSet::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        let movie: Movie = serde_json::from_str(value.value())?;
        names.insert(movie.movie_name);
    }

    Ok(names.into_iter().collect())
}

/// Increments the visit counter and refreshes the live movie count,
/// returning the new visit total
///
/// The whole read-modify-write happens inside a single write transaction,
/// so concurrent visits serialize instead of losing increments. The
/// counters record is created with defaults on the first call.
pub fn record_visit(db: &Database) -> Result<u64, ApiError> {
    let write_txn = db.begin_write()?;

    let user_visited = {
        let total_movies = {
            let movies = write_txn.open_table(TABLE_MOVIES)?;
            let mut count: u64 = 0;
            for entry in movies.iter()? {
                entry?;
                count += 1;
            }
            count
        };

        let mut table = write_txn.open_table(TABLE_ADMIN)?;
        let mut counters: AdminCounters = match table.get(ADMIN_KEY)? {
            Some(guard) => serde_json::from_str(guard.value())?,
            None => AdminCounters::default(),
        };

        counters.user_visited += 1;
        counters.total_movies = total_movies;

        let record_json = serde_json::to_string(&counters)?;
        table.insert(ADMIN_KEY, record_json.as_str())?;

        counters.user_visited
    };

    write_txn.commit()?;

    Ok(user_visited)
}

/// Returns the counters record, or NotFound if no visit was ever tracked
pub fn get_stats(db: &Database) -> Result<AdminCounters, ApiError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_ADMIN)?;

    match table.get(ADMIN_KEY)? {
        Some(guard) => Ok(serde_json::from_str(guard.value())?),
        None => Err(ApiError::NotFound("No data found".to_string())),
    }
}
