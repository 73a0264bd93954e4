use crate::error::{PathError, Result};
use crate::search::SearchKind;
use serde::{Deserialize, Serialize};

/// Upper bound on `(width * height)^2`, the size of the dense adjacency matrix. Allows
/// grids of up to 8192 cells.
pub const MAX_ADJACENCY_ENTRIES: usize = 1 << 26;

/// Dimensions and tuning of the tank's map. [Default] is the reference arena: a 780x560
/// playing field inset by a 10 unit margin and split into 19x13 cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Offset of the first cell from the world origin on both axes.
    pub arena_margin: f32,
    /// Cells added around the start/goal rectangle when adjacency is recomputed.
    pub window_margin: usize,
    /// Per-axis distance at which a waypoint counts as reached.
    pub waypoint_tolerance: f32,
    pub search: SearchKind,
}

impl Default for MapConfig {
    fn default() -> MapConfig {
        MapConfig {
            grid_width: 19,
            grid_height: 13,
            arena_width: 780.0,
            arena_height: 560.0,
            arena_margin: 10.0,
            window_margin: 4,
            waypoint_tolerance: 1.75,
            search: SearchKind::AStar,
        }
    }
}

impl MapConfig {
    pub fn cell_width(&self) -> f32 {
        self.arena_width / self.grid_width as f32
    }
    pub fn cell_height(&self) -> f32 {
        self.arena_height / self.grid_height as f32
    }
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(PathError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        let entries = self
            .grid_width
            .checked_mul(self.grid_height)
            .and_then(|n| n.checked_mul(n));
        if !matches!(entries, Some(n) if n <= MAX_ADJACENCY_ENTRIES) {
            return Err(PathError::InvalidConfig(format!(
                "grid of {}x{} cells is too large for a dense adjacency index",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(PathError::InvalidConfig(format!(
                "arena must have a positive size, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if !(self.waypoint_tolerance > 0.0) {
            return Err(PathError::InvalidConfig(format!(
                "waypoint tolerance must be positive, got {}",
                self.waypoint_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.cell_width() - 780.0 / 19.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_empty_grid() {
        let config = MapConfig {
            grid_height: 0,
            ..MapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PathError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_grid_too_large_for_adjacency() {
        for (grid_width, grid_height) in [(1000, 1000), (91, 91), (usize::MAX, 2)] {
            let config = MapConfig {
                grid_width,
                grid_height,
                ..MapConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(PathError::InvalidConfig(_))
            ));
        }
        let config = MapConfig {
            grid_width: 128,
            grid_height: 64,
            ..MapConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: MapConfig = toml::from_str(
            r#"
            grid_width = 8
            search = "Bfs"
            "#,
        )
        .unwrap();
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.grid_height, 13);
        assert_eq!(config.search, SearchKind::Bfs);
        assert_eq!(config.window_margin, 4);
    }
}
