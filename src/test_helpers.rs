use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::init_db;

/// A migrated database in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the pool is used.
pub async fn test_pool() -> (SqlitePool, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", dir.path().join("test.db").display());
    let pool = init_db(&db_url).await.expect("Failed to init test database");
    (pool, dir)
}
