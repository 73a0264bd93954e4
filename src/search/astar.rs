use grid_util::Point;
use log::warn;

use crate::adjacency::AdjacencyIndex;
use crate::error::{PathError, Result};
use crate::search::{PathSearch, SearchContext, SearchNode};

/// Best-first search ordered by path cost plus the squared Euclidean distance to the goal.
///
/// The squared distance overestimates the remaining cost, so the search behaves close to a
/// greedy descent towards the goal and is not guaranteed to find a shortest route around
/// obstacles. On open ground it produces straight diagonal-then-orthogonal routes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarSearch;

impl AStarSearch {
    pub fn heuristic(p: Point, goal: Point) -> i32 {
        let dx = goal.x - p.x;
        let dy = goal.y - p.y;
        dx * dx + dy * dy
    }
    /// Every step costs 1; the root is scored from a parent cost of 0.
    fn score(
        index: usize,
        parent: Option<usize>,
        parent_cost: i32,
        p: Point,
        goal: Point,
    ) -> SearchNode {
        let path_cost = parent_cost + 1;
        let heuristic = Self::heuristic(p, goal);
        SearchNode {
            index,
            parent,
            path_cost,
            heuristic,
            total_cost: path_cost + heuristic,
        }
    }
}

impl PathSearch for AStarSearch {
    fn name(&self) -> &'static str {
        "A*"
    }

    /// A cheaper route to a node that was already expanded only re-parents it; the node is
    /// not reopened, so its descendants keep their recorded costs.
    fn explore(
        &self,
        adjacency: &AdjacencyIndex,
        context: &mut SearchContext,
        start: Point,
        goal: Point,
    ) -> Result<()> {
        let goal_ix = adjacency.get_ix_point(goal);
        let start_ix = adjacency.get_ix_point(start);
        let mut open = vec![Self::score(start_ix, None, 0, start, goal)];
        loop {
            // Stable sort: among equal scores the earliest discovered node comes first.
            open.sort_by_key(|n| n.total_cost);
            if open.is_empty() {
                warn!("Open list exhausted before reaching {:?}", goal);
                return Err(PathError::Unreachable { start, goal });
            }
            let current = open.remove(0);
            context.closed.insert(current.index, current);
            if current.index == goal_ix {
                return Ok(());
            }
            for other in adjacency.neighbours(current.index) {
                let new_cost = current.path_cost + 1;
                if let Some(node) = context.closed.get_mut(&other) {
                    if new_cost < node.path_cost {
                        node.parent = Some(current.index);
                    }
                    continue;
                }
                if let Some(node) = open.iter_mut().find(|n| n.index == other) {
                    if new_cost < node.path_cost {
                        node.parent = Some(current.index);
                    }
                    continue;
                }
                let p = adjacency.point(other);
                open.push(Self::score(other, Some(current.index), current.path_cost, p, goal));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ObjectKind;
    use crate::config::MapConfig;
    use crate::grid::Grid;

    fn open_map() -> (Grid, AdjacencyIndex) {
        let config = MapConfig::default();
        let grid = Grid::new(&config);
        let mut adjacency =
            AdjacencyIndex::new(config.grid_width, config.grid_height, config.window_margin);
        adjacency.recompute_full(&grid);
        (grid, adjacency)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let (_, adjacency) = open_map();
        let mut context = SearchContext::new();
        let p = Point::new(4, 4);
        let path = AStarSearch
            .find_path(&adjacency, &mut context, p, p)
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn diagonal_then_straight() {
        let (grid, adjacency) = open_map();
        let mut context = SearchContext::new();
        let path = AStarSearch
            .find_path(&adjacency, &mut context, Point::new(0, 0), Point::new(5, 2))
            .unwrap();
        let expected = [(1, 1), (2, 2), (3, 2), (4, 2), (5, 2)]
            .iter()
            .map(|&(x, y)| grid.index(x, y))
            .collect::<Vec<_>>();
        assert_eq!(path.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn open_ground_is_chebyshev() {
        let (grid, adjacency) = open_map();
        let mut context = SearchContext::new();
        for start in [Point::new(0, 0), Point::new(18, 12), Point::new(9, 6), Point::new(3, 11)] {
            for ix in 0..grid.len() {
                let goal = grid.inverse_index(ix).unwrap();
                let path = AStarSearch
                    .find_path(&adjacency, &mut context, start, goal)
                    .unwrap();
                let chebyshev = (goal.x - start.x).abs().max((goal.y - start.y).abs());
                assert_eq!(path.len() as i32, chebyshev);
            }
        }
    }

    #[test]
    fn routes_around_wall() {
        let (mut grid, mut adjacency) = open_map();
        for y in 0..12 {
            grid.cell_mut(9, y).set_contents(ObjectKind::OwnBase);
        }
        adjacency.recompute_full(&grid);
        let mut context = SearchContext::new();
        let path = AStarSearch
            .find_path(&adjacency, &mut context, Point::new(2, 2), Point::new(16, 2))
            .unwrap();
        assert!(path.contains(&grid.index(9, 12)));
        assert_eq!(path.back(), Some(&grid.index(16, 2)));
        let mut prev = grid.index(2, 2);
        for &ix in &path {
            assert!(adjacency.is_adjacent(prev, ix));
            prev = ix;
        }
    }

    #[test]
    fn unreachable_goal_fails() {
        let (mut grid, mut adjacency) = open_map();
        for y in 0..grid.height() {
            grid.cell_mut(9, y).set_contents(ObjectKind::OwnBase);
        }
        adjacency.recompute_full(&grid);
        let mut context = SearchContext::new();
        let result =
            AStarSearch.find_path(&adjacency, &mut context, Point::new(2, 2), Point::new(16, 2));
        assert_eq!(
            result,
            Err(PathError::Unreachable {
                start: Point::new(2, 2),
                goal: Point::new(16, 2)
            })
        );
    }
}
