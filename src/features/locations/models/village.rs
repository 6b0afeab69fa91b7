use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Village model, owned by a cell; names are unique only within the cell
#[derive(Debug, Clone, FromRow, Serialize)]
#[allow(dead_code)]
pub struct Village {
    pub id: Uuid,
    pub name: String,
    pub cell_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
