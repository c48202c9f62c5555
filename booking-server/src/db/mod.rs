//! Database Module
//!
//! Embedded SurrealDB storage plus the injected store boundary the
//! booking core is written against.

pub mod memory;
pub mod models;
pub mod repository;
pub mod serde_helpers;
pub mod store;

pub use memory::MemoryReservationStore;
pub use repository::{RepoError, RepoResult, ReservationRepository, SupporterRepository};
pub use store::{ReservationStore, Snapshot, SnapshotSubscription, SurrealReservationStore};

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "verygood";
const DATABASE: &str = "marketing";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the embedded database
    ///
    /// `":memory:"` selects the in-memory engine (tests, local runs);
    /// anything else is a RocksDB path.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = if db_path == ":memory:" {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory db: {e}")))?
        } else {
            Surreal::new::<RocksDb>(db_path)
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        };

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = db_path, "Database connection established");

        Ok(Self { db })
    }
}
