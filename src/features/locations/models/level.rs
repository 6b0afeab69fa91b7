use std::fmt;

use serde::Serialize;

/// One tier of the containment chain, ordered from the root down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Province,
    District,
    Sector,
    Cell,
    Village,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Province,
        Level::District,
        Level::Sector,
        Level::Cell,
        Level::Village,
    ];

    /// Position in the chain, 0 for provinces
    pub fn depth(self) -> usize {
        self as usize
    }

    pub fn table(self) -> &'static str {
        match self {
            Level::Province => "provinces",
            Level::District => "districts",
            Level::Sector => "sectors",
            Level::Cell => "cells",
            Level::Village => "villages",
        }
    }

    /// Foreign key column pointing at the owning row, `None` for provinces
    pub fn parent_column(self) -> Option<&'static str> {
        match self {
            Level::Province => None,
            Level::District => Some("province_id"),
            Level::Sector => Some("district_id"),
            Level::Cell => Some("sector_id"),
            Level::Village => Some("cell_id"),
        }
    }

    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Province => None,
            Level::District => Some(Level::Province),
            Level::Sector => Some(Level::District),
            Level::Cell => Some(Level::Sector),
            Level::Village => Some(Level::Cell),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Province => "province",
            Level::District => "district",
            Level::Sector => "sector",
            Level::Cell => "cell",
            Level::Village => "village",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
