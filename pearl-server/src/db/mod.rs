//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus schema definition.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Schema statements applied at startup.
///
/// The unique index on `order.order_number` is load-bearing: the order
/// number allocator relies on it to reject concurrent duplicates
/// (see `orders::allocator`). The slug/email indexes back the
/// duplicate checks in the repositories.
const SCHEMA_STATEMENTS: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS idx_user_email_unique ON TABLE user COLUMNS email UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_order_number_unique ON TABLE order COLUMNS order_number UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_category_slug_unique ON TABLE category COLUMNS slug UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_product_slug_unique ON TABLE product COLUMNS slug UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_idea_slug_unique ON TABLE idea COLUMNS slug UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_special_offer_slug_unique ON TABLE special_offer COLUMNS slug UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_test_slug_unique ON TABLE test COLUMNS slug UNIQUE",
];

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_dir` and apply the schema
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("pearl")
            .use_db("store")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        let service = Self { db };
        service.define_schema().await?;

        tracing::info!("Database ready (embedded SurrealDB at {})", db_dir.display());
        Ok(service)
    }

    /// Apply index definitions (idempotent)
    async fn define_schema(&self) -> Result<(), AppError> {
        for stmt in SCHEMA_STATEMENTS {
            self.db
                .query(*stmt)
                .await
                .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?
                .check()
                .map_err(|e| AppError::database(format!("Schema statement rejected: {e}")))?;
        }
        tracing::debug!("Schema indexes defined ({})", SCHEMA_STATEMENTS.len());
        Ok(())
    }
}
