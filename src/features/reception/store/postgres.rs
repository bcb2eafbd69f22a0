use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reception::models::ReceptionSnapshot;
use crate::features::reception::store::ReceptionStore;
use crate::shared::constants::RECEPTION_SNAPSHOT_ID;

/// Stores the snapshot as one JSONB row in `reception_snapshots`
pub struct PgReceptionStore {
    pool: PgPool,
}

impl PgReceptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceptionStore for PgReceptionStore {
    async fn load(&self) -> Result<Option<ReceptionSnapshot>> {
        let row: Option<(Json<ReceptionSnapshot>,)> =
            sqlx::query_as("SELECT snapshot FROM reception_snapshots WHERE id = $1")
                .bind(RECEPTION_SNAPSHOT_ID)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to load reception snapshot: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(row.map(|(Json(snapshot),)| snapshot))
    }

    async fn save(&self, snapshot: &ReceptionSnapshot) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reception_snapshots (id, snapshot, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE
            SET snapshot = EXCLUDED.snapshot, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(RECEPTION_SNAPSHOT_ID)
        .bind(Json(snapshot))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save reception snapshot: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!(
            "Reception snapshot saved: tickets={}, next_seq={}",
            snapshot.tickets.len(),
            snapshot.next_seq
        );
        Ok(())
    }
}
