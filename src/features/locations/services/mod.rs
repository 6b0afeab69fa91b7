mod loader_service;
mod location_repository;
mod progress_service;

pub use loader_service::LocationLoader;
pub use location_repository::{check_parent, LocationRepository, PgLocationRepository, Upserted};
pub use progress_service::{Progress, ProgressStore};
