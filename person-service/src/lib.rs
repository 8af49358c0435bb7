//! person-service: CRUD HTTP API for a single MongoDB-backed Person resource.
pub mod config;
pub mod dtos;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{build_router, AppState, Application};
