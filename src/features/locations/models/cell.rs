use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Cell model, owned by a sector; names are unique only within the sector
#[derive(Debug, Clone, FromRow, Serialize)]
#[allow(dead_code)]
pub struct Cell {
    pub id: Uuid,
    pub name: String,
    pub sector_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
