use grid_util::Point;
use log::warn;
use std::collections::VecDeque;

use crate::adjacency::AdjacencyIndex;
use crate::error::{PathError, Result};
use crate::search::{PathSearch, SearchContext, SearchNode};

/// Breadth-first search. Ignores the goal's position, so it returns a route with the fewest
/// steps at the price of expanding most of the reachable grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSearch;

impl PathSearch for BfsSearch {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn explore(
        &self,
        adjacency: &AdjacencyIndex,
        context: &mut SearchContext,
        start: Point,
        goal: Point,
    ) -> Result<()> {
        let goal_ix = adjacency.get_ix_point(goal);
        let start_ix = adjacency.get_ix_point(start);
        context.visited[start_ix] = true;
        let mut open = VecDeque::from([SearchNode::root(start_ix)]);
        while let Some(current) = open.pop_front() {
            context.closed.insert(current.index, current);
            if current.index == goal_ix {
                return Ok(());
            }
            for other in adjacency.neighbours(current.index) {
                if !context.visited[other] {
                    context.visited[other] = true;
                    open.push_back(SearchNode::child(other, &current));
                }
            }
        }
        warn!("Queue exhausted before reaching {:?}", goal);
        Err(PathError::Unreachable { start, goal })
    }
}
