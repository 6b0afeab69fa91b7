//! Administrative locations loader.
//!
//! Loads a nested JSON document of administrative units into the
//! location tables, one level per table.
//!
//! ## Data Hierarchy
//!
//! - Level 1: Provinces - unique by name
//! - Level 2: Districts - unique by name within a province
//! - Level 3: Sectors - unique by name within a district
//! - Level 4: Cells - unique by name within a sector
//! - Level 5: Villages - unique by name within a cell
//!
//! ## Resuming
//!
//! Before an entry is written its key is stored in the progress file,
//! together with the keys of its ancestors. A rerun after a failure skips
//! every key that sorts before the stored one on the same path and starts
//! again at the stored key itself. Lookups by natural key make the repeated
//! work harmless.

pub mod dtos;
pub mod models;
pub mod services;

pub use dtos::LocationTree;
pub use services::{LocationLoader, PgLocationRepository, ProgressStore};
