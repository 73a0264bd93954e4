use grid_util::Point;
use log::warn;

use crate::adjacency::AdjacencyIndex;
use crate::error::{PathError, Result};
use crate::search::{PathSearch, SearchContext, SearchNode};

/// Depth-first search. Always follows the most recently discovered neighbour, so routes
/// are valid but usually far from short.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSearch;

impl PathSearch for DfsSearch {
    fn name(&self) -> &'static str {
        "DFS"
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
        let mut stack = vec![SearchNode::root(start_ix)];
        while let Some(current) = stack.pop() {
            context.closed.insert(current.index, current);
            if current.index == goal_ix {
                return Ok(());
            }
            for other in adjacency.neighbours(current.index) {
                if !context.visited[other] {
                    context.visited[other] = true;
                    stack.push(SearchNode::child(other, &current));
                }
            }
        }
        warn!("Stack exhausted before reaching {:?}", goal);
        Err(PathError::Unreachable { start, goal })
    }
}
