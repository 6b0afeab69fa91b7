mod cell;
mod district;
mod level;
mod location_counts;
mod location_path;
mod province;
mod sector;
mod village;

pub use cell::Cell;
pub use district::District;
pub use level::Level;
pub use location_counts::LocationCounts;
pub use location_path::LocationPath;
pub use province::Province;
pub use sector::Sector;
pub use village::Village;
