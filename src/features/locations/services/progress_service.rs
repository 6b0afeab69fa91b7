use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};
use crate::features::locations::models::Level;

/// Last key entered at each level.
///
/// A deeper level is only meaningful under the keys stored above it:
/// entering a key clears every level below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub province: Option<String>,
    pub district: Option<String>,
    pub sector: Option<String>,
    pub cell: Option<String>,
    pub village: Option<String>,
}

impl Progress {
    pub fn get(&self, level: Level) -> Option<&str> {
        match level {
            Level::Province => self.province.as_deref(),
            Level::District => self.district.as_deref(),
            Level::Sector => self.sector.as_deref(),
            Level::Cell => self.cell.as_deref(),
            Level::Village => self.village.as_deref(),
        }
    }

    fn slot(&mut self, level: Level) -> &mut Option<String> {
        match level {
            Level::Province => &mut self.province,
            Level::District => &mut self.district,
            Level::Sector => &mut self.sector,
            Level::Cell => &mut self.cell,
            Level::Village => &mut self.village,
        }
    }

    /// Record `key` as current for `level` and forget everything deeper
    pub fn enter(&mut self, level: Level, key: &str) {
        *self.slot(level) = Some(key.to_string());
        for deeper in &Level::ALL[level.depth() + 1..] {
            *self.slot(*deeper) = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        Level::ALL.iter().all(|level| self.get(*level).is_none())
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = Level::ALL
            .iter()
            .map_while(|level| self.get(*level))
            .collect();
        if keys.is_empty() {
            f.write_str("(start)")
        } else {
            f.write_str(&keys.join(" / "))
        }
    }
}

/// JSON file holding the resume cursor
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored cursor, or an empty one when no file exists
    pub async fn load(&self) -> Result<Progress> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Progress::default()),
            Err(e) => return Err(AppError::io(&self.path, e)),
        };

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Progress(format!(
                "{} is not a valid progress file: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Write the cursor through a temporary file so a crash never leaves a
    /// truncated document behind
    pub async fn save(&self, progress: &Progress) -> Result<()> {
        let body = serde_json::to_vec_pretty(progress)
            .map_err(|e| AppError::Progress(format!("Failed to encode progress: {}", e)))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| AppError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::io(&self.path, e))?;

        Ok(())
    }

    /// Delete the file. Returns whether there was one.
    pub async fn reset(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::io(&self.path, e)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
