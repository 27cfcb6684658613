use std::path::PathBuf;

use async_trait::async_trait;

use quote_core::db::repository::{QuoteRepository, RepositoryError};
use quote_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// Resolve the seeds directory at runtime so it works in both development and
/// packaged distribution.
///
/// Resolution order:
/// 1. **`QUOTE_DB_SQLITE_SEEDS_DIR`** — if set, use this path (override for
///    packagers or custom layouts).
/// 2. **`./seeds`** — if the directory exists in the current working directory.
/// 3. **Crate manifest dir** — `$CARGO_MANIFEST_DIR/seeds` if it exists
///    (dev/tests when run from the build tree).
///
/// Returns `None` when no candidate directory exists; seeding is skipped in
/// that case.
fn seeds_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("QUOTE_DB_SQLITE_SEEDS_DIR") {
        return Some(PathBuf::from(dir));
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return Some(cwd_seeds);
    }
    let manifest_seeds = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds");
    if manifest_seeds.is_dir() {
        return Some(manifest_seeds);
    }
    None
}

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`quote_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use quote_core::db::RepositoryRegistry;
/// use quote_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values:
    /// * A sqlx-style URL — e.g. `"sqlite:quotes.db?mode=rwc"` to create the
    ///   file if it does not exist.
    /// * `":memory:"` — an ephemeral in-memory database (useful for tests).
    ///
    /// Migrations always run; seed SQL files are loaded from the directory
    /// resolved by [`seeds_dir`] when one is present.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn QuoteRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        if let Some(dir) = seeds_dir() {
            repo.run_seeds(&dir).await?;
        }
        Ok(Box::new(repo))
    }
}
