use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{ordered_villages, LocationTree};
use crate::features::locations::models::{Level, LocationCounts, LocationPath};
use crate::features::locations::services::{check_parent, LocationRepository, ProgressStore};

/// Progress store backed by a fresh file name in the system temp directory
pub fn temp_progress_store() -> ProgressStore {
    ProgressStore::new(std::env::temp_dir().join(format!("progress-{}.json", Uuid::now_v7())))
}

struct Row {
    id: Uuid,
    level: Level,
    name: String,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    rows: Vec<Row>,
    inserts: usize,
    fail_after: Option<usize>,
    hide_next_find: bool,
}

/// Repository holding rows in memory, enforcing the same uniqueness rules
/// as the database
#[derive(Default)]
pub struct InMemoryLocationRepository {
    state: Mutex<State>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `count` more inserts succeed, then fail every insert after them
    pub fn fail_after(&self, count: usize) {
        let mut state = self.state.lock().unwrap();
        state.fail_after = Some(state.inserts + count);
    }

    pub fn heal(&self) {
        self.state.lock().unwrap().fail_after = None;
    }

    /// Make the next `find` miss, as if the row were created concurrently
    pub fn hide_next_find(&self) {
        self.state.lock().unwrap().hide_next_find = true;
    }

    /// Every stored row as a `/`-joined chain of names, sorted
    pub fn paths(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut paths: Vec<String> = state
            .rows
            .iter()
            .map(|row| {
                let mut names = vec![row.name.clone()];
                let mut parent_id = row.parent_id;
                while let Some(id) = parent_id {
                    let parent = state
                        .rows
                        .iter()
                        .find(|r| r.id == id)
                        .expect("parent row exists");
                    names.push(parent.name.clone());
                    parent_id = parent.parent_id;
                }
                names.reverse();
                names.join("/")
            })
            .collect();
        paths.sort();
        paths
    }

    /// What `paths` must return after a complete load of `tree`
    pub fn expected_paths(tree: &LocationTree) -> Vec<String> {
        let mut paths = Vec::new();
        for (province, districts) in tree.provinces() {
            paths.push(province.clone());
            for (district, sectors) in districts {
                let district = format!("{}/{}", province, district);
                paths.push(district.clone());
                for (sector, cells) in sectors {
                    let sector = format!("{}/{}", district, sector);
                    paths.push(sector.clone());
                    for (cell, villages) in cells {
                        let cell = format!("{}/{}", sector, cell);
                        paths.push(cell.clone());
                        for village in ordered_villages(villages) {
                            paths.push(format!("{}/{}", cell, village));
                        }
                    }
                }
            }
        }
        paths.sort();
        paths
    }

    fn lookup(state: &State, level: Level, name: &str, parent_id: Option<Uuid>) -> Option<Uuid> {
        state
            .rows
            .iter()
            .find(|row| row.level == level && row.name == name && row.parent_id == parent_id)
            .map(|row| row.id)
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Option<Uuid>> {
        let parent_id = check_parent(level, parent_id)?;
        let mut state = self.state.lock().unwrap();
        if state.hide_next_find {
            state.hide_next_find = false;
            return Ok(None);
        }
        Ok(Self::lookup(&state, level, name, parent_id))
    }

    async fn insert(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Option<Uuid>> {
        let parent_id = check_parent(level, parent_id)?;
        let mut state = self.state.lock().unwrap();

        if state.fail_after.is_some_and(|limit| state.inserts >= limit) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        if Self::lookup(&state, level, name, parent_id).is_some() {
            return Ok(None);
        }

        let id = Uuid::now_v7();
        state.inserts += 1;
        state.rows.push(Row {
            id,
            level,
            name: name.to_string(),
            parent_id,
            created_at: Utc::now(),
        });
        Ok(Some(id))
    }

    async fn counts(&self) -> Result<LocationCounts> {
        let state = self.state.lock().unwrap();
        let mut counts = LocationCounts::default();
        for row in &state.rows {
            counts.increment(row.level);
        }
        Ok(counts)
    }

    async fn last_inserted_path(&self) -> Result<Option<LocationPath>> {
        let state = self.state.lock().unwrap();
        let Some(village) = state.rows.iter().rev().find(|r| r.level == Level::Village) else {
            return Ok(None);
        };

        let mut names = vec![village.name.clone()];
        let mut parent_id = village.parent_id;
        while let Some(id) = parent_id {
            let parent = state
                .rows
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::Internal(format!("dangling parent {}", id)))?;
            names.push(parent.name.clone());
            parent_id = parent.parent_id;
        }
        names.reverse();

        let [province, district, sector, cell, village_name]: [String; 5] =
            names.try_into().map_err(|_| {
                AppError::Internal("village chain is not five levels deep".to_string())
            })?;

        Ok(Some(LocationPath {
            province,
            district,
            sector,
            cell,
            village: village_name,
            created_at: village.created_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_inserted_path_walks_up_to_province() {
        let repository = InMemoryLocationRepository::new();
        assert!(repository.last_inserted_path().await.unwrap().is_none());

        let mut parent = None;
        let names = ["Kigali", "Gasabo", "Remera", "Rukiri", "Amahoro"];
        for (level, name) in Level::ALL.into_iter().zip(names) {
            parent = repository.insert(level, name, parent).await.unwrap();
        }

        let path = repository.last_inserted_path().await.unwrap().unwrap();
        assert_eq!(path.to_string(), "Kigali / Gasabo / Remera / Rukiri / Amahoro");
    }

    #[tokio::test]
    async fn test_insert_reports_duplicates_per_parent() {
        let repository = InMemoryLocationRepository::new();
        let kigali = repository.insert(Level::Province, "Kigali", None).await.unwrap();
        let south = repository.insert(Level::Province, "Southern", None).await.unwrap();

        assert!(repository.insert(Level::Province, "Kigali", None).await.unwrap().is_none());
        assert!(repository.insert(Level::District, "Central", kigali).await.unwrap().is_some());
        assert!(repository.insert(Level::District, "Central", south).await.unwrap().is_some());
        assert!(repository.insert(Level::District, "Central", kigali).await.unwrap().is_none());
    }
}
