use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// District model, owned by a province
#[derive(Debug, Clone, FromRow, Serialize)]
#[allow(dead_code)]
pub struct District {
    pub id: Uuid,
    pub name: String,
    pub province_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
