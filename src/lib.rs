//! Library exports for the movie catalog backend
//!
//! This module exposes internal components for testing and potential library usage.

pub mod database;
pub mod error;
pub mod handler;
pub mod model;
pub mod repository;
pub mod route;
