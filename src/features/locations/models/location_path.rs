use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Names along one province → village chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationPath {
    pub province: String,
    pub district: String,
    pub sector: String,
    pub cell: String,
    pub village: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {} / {}",
            self.province, self.district, self.sector, self.cell, self.village
        )
    }
}
