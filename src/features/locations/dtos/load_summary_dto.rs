use serde::Serialize;

use crate::features::locations::models::Level;

/// What happened to the keys of one level during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub inserted: u64,
    pub existing: u64,
    /// Passed over because they sort before the resume cursor
    pub skipped: u64,
}

/// Per-level outcome of a load run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    levels: [LevelStats; 5],
}

impl LoadSummary {
    pub fn level(&self, level: Level) -> LevelStats {
        self.levels[level.depth()]
    }

    pub fn record_inserted(&mut self, level: Level) {
        self.levels[level.depth()].inserted += 1;
    }

    pub fn record_existing(&mut self, level: Level) {
        self.levels[level.depth()].existing += 1;
    }

    pub fn record_skipped(&mut self, level: Level) {
        self.levels[level.depth()].skipped += 1;
    }

    pub fn total_inserted(&self) -> u64 {
        self.levels.iter().map(|stats| stats.inserted).sum()
    }

    pub fn log(&self) {
        for level in Level::ALL {
            let stats = self.level(level);
            tracing::info!(
                "{:<8} inserted={} existing={} skipped={}",
                level,
                stats.inserted,
                stats.existing,
                stats.skipped
            );
        }
    }
}
