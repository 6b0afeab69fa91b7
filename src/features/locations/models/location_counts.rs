use serde::Serialize;
use sqlx::FromRow;

use super::Level;

/// Number of entries per level, either stored rows or entries in an input document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct LocationCounts {
    pub provinces: i64,
    pub districts: i64,
    pub sectors: i64,
    pub cells: i64,
    pub villages: i64,
}

impl LocationCounts {
    pub fn get(&self, level: Level) -> i64 {
        match level {
            Level::Province => self.provinces,
            Level::District => self.districts,
            Level::Sector => self.sectors,
            Level::Cell => self.cells,
            Level::Village => self.villages,
        }
    }

    pub fn increment(&mut self, level: Level) {
        match level {
            Level::Province => self.provinces += 1,
            Level::District => self.districts += 1,
            Level::Sector => self.sectors += 1,
            Level::Cell => self.cells += 1,
            Level::Village => self.villages += 1,
        }
    }

    pub fn total(&self) -> i64 {
        Level::ALL.iter().map(|level| self.get(*level)).sum()
    }
}
