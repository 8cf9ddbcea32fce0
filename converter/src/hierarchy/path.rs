//! Row to level path extraction.

use crate::models::{LevelPath, Row};

/// Level names of `row` from `level_1` down to the deepest populated level.
///
/// Stops at the first absent level, so anything after a gap is ignored. An
/// absent `level_1` gives an empty path.
pub fn row_path(row: &Row) -> LevelPath {
    row.levels
        .iter()
        .map_while(|level| level.clone())
        .collect()
}
