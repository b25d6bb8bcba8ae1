//! Database layer - connection pool, migrations and repositories
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - One statement per repository call, so no explicit transactions
//! - Rely on the row count from UPDATE/DELETE, no check-then-write

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
