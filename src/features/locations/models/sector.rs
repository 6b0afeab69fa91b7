use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Sector model, owned by a district
#[derive(Debug, Clone, FromRow, Serialize)]
#[allow(dead_code)]
pub struct Sector {
    pub id: Uuid,
    pub name: String,
    pub district_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
