use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Province model, the root of the location hierarchy
#[derive(Debug, Clone, FromRow, Serialize)]
#[allow(dead_code)]
pub struct Province {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
