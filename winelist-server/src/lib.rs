//! winelist-server: HTTP CRUD API for wine records
//!
//! Exposes a single record type through a collection/item route pair
//! backed by PostgreSQL.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, migrations};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
