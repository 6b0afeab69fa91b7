use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::{
    Cell, District, Level, LocationCounts, LocationPath, Province, Sector, Village,
};

/// Outcome of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub id: Uuid,
    /// False when a row with the same natural key and parent already existed
    pub created: bool,
}

/// Storage for the five location tables.
///
/// Rows are matched by natural key (`name`) plus the id of the owning row.
/// Provinces have no owner and are matched by name alone.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Id of the row with this name under `parent_id`, if any
    async fn find(&self, level: Level, name: &str, parent_id: Option<Uuid>)
        -> Result<Option<Uuid>>;

    /// Insert a new row. Returns `None` when a unique constraint says the
    /// row already exists.
    async fn insert(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Option<Uuid>>;

    /// Row count of every table
    async fn counts(&self) -> Result<LocationCounts>;

    /// Chain of the most recently created village
    async fn last_inserted_path(&self) -> Result<Option<LocationPath>>;
}

/// Checks that `parent_id` is present exactly when the level has an owner
pub fn check_parent(level: Level, parent_id: Option<Uuid>) -> Result<Option<Uuid>> {
    match (level.parent(), parent_id) {
        (None, None) => Ok(None),
        (Some(_), Some(id)) => Ok(Some(id)),
        (None, Some(_)) => Err(AppError::Internal(format!(
            "{} rows have no parent",
            level
        ))),
        (Some(parent), None) => Err(AppError::Internal(format!(
            "{} rows require a {} id",
            level, parent
        ))),
    }
}

/// PostgreSQL-backed repository. The pool is built by the caller and
/// passed in.
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn find(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Option<Uuid>> {
        let parent_id = check_parent(level, parent_id)?;

        let sql = match level.parent_column() {
            Some(column) => format!(
                "SELECT id FROM {} WHERE name = $1 AND {} = $2",
                level.table(),
                column
            ),
            None => format!("SELECT id FROM {} WHERE name = $1", level.table()),
        };

        let mut query = sqlx::query_scalar::<Postgres, Uuid>(&sql).bind(name);
        if let Some(parent_id) = parent_id {
            query = query.bind(parent_id);
        }

        let id = query.fetch_optional(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to look up {} '{}': {:?}", level, name, e);
            AppError::Database(e)
        })?;

        Ok(id)
    }

    async fn insert(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Option<Uuid>> {
        let parent_id = check_parent(level, parent_id)?;

        // ON CONFLICT DO NOTHING yields no row when the unique constraint fires
        let sql = match level.parent_column() {
            Some(column) => format!(
                r#"
                INSERT INTO {} (id, name, {})
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                RETURNING id
                "#,
                level.table(),
                column
            ),
            None => format!(
                r#"
                INSERT INTO {} (id, name)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                RETURNING id
                "#,
                level.table()
            ),
        };

        let mut query = sqlx::query_scalar::<Postgres, Uuid>(&sql)
            .bind(Uuid::now_v7())
            .bind(name);
        if let Some(parent_id) = parent_id {
            query = query.bind(parent_id);
        }

        let id = query.fetch_optional(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to insert {} '{}': {:?}", level, name, e);
            AppError::Database(e)
        })?;

        Ok(id)
    }

    async fn counts(&self) -> Result<LocationCounts> {
        let counts = sqlx::query_as::<_, LocationCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM provinces) AS provinces,
                (SELECT COUNT(*) FROM districts) AS districts,
                (SELECT COUNT(*) FROM sectors) AS sectors,
                (SELECT COUNT(*) FROM cells) AS cells,
                (SELECT COUNT(*) FROM villages) AS villages
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count locations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(counts)
    }

    async fn last_inserted_path(&self) -> Result<Option<LocationPath>> {
        let village = sqlx::query_as::<_, Village>(
            r#"
            SELECT id, name, cell_id, created_at, updated_at
            FROM villages
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch latest village: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(village) = village else {
            return Ok(None);
        };

        let cell = sqlx::query_as::<_, Cell>(
            r#"
            SELECT id, name, sector_id, created_at, updated_at
            FROM cells
            WHERE id = $1
            "#,
        )
        .bind(village.cell_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch cell {}: {:?}", village.cell_id, e);
            AppError::Database(e)
        })?;

        let sector = sqlx::query_as::<_, Sector>(
            r#"
            SELECT id, name, district_id, created_at, updated_at
            FROM sectors
            WHERE id = $1
            "#,
        )
        .bind(cell.sector_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch sector {}: {:?}", cell.sector_id, e);
            AppError::Database(e)
        })?;

        let district = sqlx::query_as::<_, District>(
            r#"
            SELECT id, name, province_id, created_at, updated_at
            FROM districts
            WHERE id = $1
            "#,
        )
        .bind(sector.district_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch district {}: {:?}", sector.district_id, e);
            AppError::Database(e)
        })?;

        let province = sqlx::query_as::<_, Province>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM provinces
            WHERE id = $1
            "#,
        )
        .bind(district.province_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch province {}: {:?}", district.province_id, e);
            AppError::Database(e)
        })?;

        Ok(Some(LocationPath {
            province: province.name,
            district: district.name,
            sector: sector.name,
            cell: cell.name,
            village: village.name,
            created_at: village.created_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_parent_requires_owner_below_provinces() {
        let id = Uuid::now_v7();

        assert_eq!(check_parent(Level::Province, None).unwrap(), None);
        assert_eq!(check_parent(Level::Cell, Some(id)).unwrap(), Some(id));
        assert!(matches!(
            check_parent(Level::District, None),
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            check_parent(Level::Province, Some(id)),
            Err(AppError::Internal(_))
        ));
    }
}
