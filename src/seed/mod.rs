//! Demo data seeding.
//!
//! `run_seed` is the whole lifecycle for a database file: open, check the
//! marker, populate, close. The pieces are usable on their own against any
//! `Store`.

pub mod derive;
pub mod error;
pub mod generator;
pub mod guard;
pub mod roster;
pub mod templates;

use std::path::Path;

pub use derive::*;
pub use error::SeedError;
pub use generator::*;
pub use guard::should_populate;
pub use roster::*;
pub use templates::*;

use crate::crypto::Pbkdf2Hasher;
use crate::db::SqliteStore;

/// Seed the database at `path`, creating it if needed.
///
/// The connection is closed whatever the outcome. A population error wins
/// over a close error; the latter is then only logged.
pub fn run_seed(path: &Path, plan: &SeedPlan, options: SeedOptions) -> Result<SeedOutcome, SeedError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut store = SqliteStore::open(path)?;
    tracing::info!(path = %path.display(), "Database opened");

    let result = Populator::new(&mut store, &Pbkdf2Hasher, options).populate(plan);
    let closed = store.close();

    match (result, closed) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            tracing::warn!(error = %close_err, "Failed to close database after seed error");
            Err(e)
        }
    }
}
