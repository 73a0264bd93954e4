//! # tank_pathfinding
//!
//! Terrain memory and route planning for an AI-controlled tank in a top-down arena.
//!
//! The arena is split into a fixed grid of cells. As the tank sees objects it
//! [marks](TankMap::mark) the cells they cover, and every tick it runs a
//! [visibility update](TankMap::update) that lets moving objects fade from memory. Routes are
//! planned with a best-first search ([A*](search::AStarSearch), with
//! [BFS](search::BfsSearch) and [DFS](search::DfsSearch) available as alternatives) over an
//! [adjacency index](adjacency::AdjacencyIndex) that is only refreshed in a window around the
//! start and goal. Blocked goals are [snapped](snap::snap_to_traversable) to the nearest free
//! cell.
//!
//! ```
//! use tank_pathfinding::{Point, TankMap, WorldPos};
//!
//! let mut map = TankMap::default();
//! let mut goal = Point::new(10, 6);
//! let start = map.cell_bounds(0, 0).center();
//! map.request_path(start, &mut goal).unwrap();
//! let target: WorldPos = map.follow_path(start);
//! assert_eq!(target, map.cell_bounds(1, 1).center());
//! ```
pub mod adjacency;
pub mod cell;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod occupancy;
pub mod search;
pub mod snap;
mod tank_map;

pub use cell::{NodeShade, ObjectKind};
pub use config::MapConfig;
pub use error::{PathError, Result};
pub use geometry::{WorldPos, WorldRect};
pub use grid_util::Point;
pub use search::SearchKind;
pub use tank_map::TankMap;

/// Inline capacity of neighbour lists; a cell has at most eight neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
