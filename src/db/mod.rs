//! Database module
//!
//! Connection management, migrations, the `Store` trait the service layer
//! depends on, and its PostgreSQL implementation.

pub mod connection;
pub mod pg;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use pg::PgStore;
pub use store::Store;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
