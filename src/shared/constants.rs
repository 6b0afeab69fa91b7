// =============================================================================
// FILE DEFAULTS
// =============================================================================

/// Input document used when neither `--input` nor `LOCATIONS_FILE` is given
pub const DEFAULT_LOCATIONS_FILE: &str = "locations.json";

/// Cursor file used when neither `--progress` nor `PROGRESS_FILE` is given
pub const DEFAULT_PROGRESS_FILE: &str = "progress.json";

