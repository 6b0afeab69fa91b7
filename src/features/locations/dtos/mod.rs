mod load_summary_dto;
mod location_tree_dto;

pub use load_summary_dto::{LevelStats, LoadSummary};
pub use location_tree_dto::{ordered_villages, LocationTree};
