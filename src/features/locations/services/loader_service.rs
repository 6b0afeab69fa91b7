use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{ordered_villages, LoadSummary, LocationTree};
use crate::features::locations::models::Level;
use crate::features::locations::services::{
    LocationRepository, Progress, ProgressStore, Upserted,
};

/// Walks a [`LocationTree`] and upserts every entry, resuming from the
/// cursor stored by an earlier interrupted run.
pub struct LocationLoader {
    repository: Arc<dyn LocationRepository>,
    progress: ProgressStore,
}

/// Mutable state of one run
struct Pass {
    /// Cursor found on disk when the run started
    resume_from: Progress,
    /// Cursor as of the key being processed
    cursor: Progress,
    summary: LoadSummary,
}

/// A key that was entered rather than skipped
struct Step {
    id: Uuid,
    /// Still on the stored path, so the children must honour the cursor too
    resuming: bool,
}

impl LocationLoader {
    pub fn new(repository: Arc<dyn LocationRepository>, progress: ProgressStore) -> Self {
        Self {
            repository,
            progress,
        }
    }

    /// Load the whole tree. The progress file is removed once every entry
    /// has been processed.
    pub async fn load(&self, tree: &LocationTree) -> Result<LoadSummary> {
        let resume_from = self.progress.load().await?;
        if resume_from.is_empty() {
            tracing::info!("Starting a fresh load");
        } else {
            tracing::info!("Resuming load after {}", resume_from);
        }

        let mut pass = Pass {
            cursor: resume_from.clone(),
            resume_from,
            summary: LoadSummary::default(),
        };

        for (province_name, districts) in tree.provinces() {
            let Some(province) = self
                .enter(&mut pass, Level::Province, province_name, None, true)
                .await?
            else {
                continue;
            };

            for (district_name, sectors) in districts {
                let Some(district) = self
                    .enter(
                        &mut pass,
                        Level::District,
                        district_name,
                        Some(province.id),
                        province.resuming,
                    )
                    .await?
                else {
                    continue;
                };

                for (sector_name, cells) in sectors {
                    let Some(sector) = self
                        .enter(
                            &mut pass,
                            Level::Sector,
                            sector_name,
                            Some(district.id),
                            district.resuming,
                        )
                        .await?
                    else {
                        continue;
                    };

                    for (cell_name, villages) in cells {
                        let Some(cell) = self
                            .enter(
                                &mut pass,
                                Level::Cell,
                                cell_name,
                                Some(sector.id),
                                sector.resuming,
                            )
                            .await?
                        else {
                            continue;
                        };

                        for village_name in ordered_villages(villages) {
                            self.enter(
                                &mut pass,
                                Level::Village,
                                village_name,
                                Some(cell.id),
                                cell.resuming,
                            )
                            .await?;
                        }
                    }

                    tracing::info!("Completed sector: {}", sector_name);
                }
            }
        }

        self.progress.reset().await?;
        tracing::info!("Load completed, progress file cleared");

        Ok(pass.summary)
    }

    /// Skip `name` if it sorts before the stored cursor, otherwise persist
    /// it as the new cursor and upsert it.
    async fn enter(
        &self,
        pass: &mut Pass,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
        resuming: bool,
    ) -> Result<Option<Step>> {
        let stored = if resuming {
            pass.resume_from.get(level)
        } else {
            None
        };

        if stored.is_some_and(|stored| name < stored) {
            tracing::debug!("Skipping {} '{}' (already processed)", level, name);
            pass.summary.record_skipped(level);
            return Ok(None);
        }
        let resuming = stored == Some(name);

        pass.cursor.enter(level, name);
        self.progress.save(&pass.cursor).await?;

        let upserted = self.upsert(level, name, parent_id).await?;
        if upserted.created {
            pass.summary.record_inserted(level);
            log_step(level, format_args!("Inserted {} '{}'", level, name));
        } else {
            pass.summary.record_existing(level);
            log_step(
                level,
                format_args!("{} '{}' already exists with ID: {}", level, name, upserted.id),
            );
        }

        Ok(Some(Step {
            id: upserted.id,
            resuming,
        }))
    }

    /// Return the existing row for `name` under `parent_id`, creating it if
    /// absent
    pub async fn upsert(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Upserted> {
        if let Some(id) = self.repository.find(level, name, parent_id).await? {
            return Ok(Upserted { id, created: false });
        }

        if let Some(id) = self.repository.insert(level, name, parent_id).await? {
            return Ok(Upserted { id, created: true });
        }

        // The unique constraint fired: someone else created it in between
        tracing::warn!(
            "{} '{}' appeared between lookup and insert, using existing row",
            level,
            name
        );
        let id = self
            .repository
            .find(level, name, parent_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "{} '{}' rejected as duplicate but not found",
                    level, name
                ))
            })?;

        Ok(Upserted { id, created: false })
    }
}

/// Upper levels are logged at info, cells and villages at debug
fn log_step(level: Level, message: std::fmt::Arguments<'_>) {
    match level {
        Level::Province | Level::District | Level::Sector => tracing::info!("{}", message),
        Level::Cell | Level::Village => tracing::debug!("{}", message),
    }
}
