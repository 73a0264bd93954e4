//! Graph search over an [AdjacencyIndex].
//!
//! Every strategy expands nodes into the same insertion-ordered closed list, from which
//! [build_path] walks the parent chain back from the goal.
use crate::adjacency::AdjacencyIndex;
use crate::error::{PathError, Result};
use fxhash::FxBuildHasher;
use grid_util::Point;
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub mod astar;
pub mod bfs;
pub mod dfs;

pub use astar::AStarSearch;
pub use bfs::BfsSearch;
pub use dfs::DfsSearch;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Per-search bookkeeping for one cell. Lives only as long as the search that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub index: usize,
    /// [None] marks the root of the search.
    pub parent: Option<usize>,
    pub path_cost: i32,
    pub heuristic: i32,
    pub total_cost: i32,
}

impl SearchNode {
    pub fn root(index: usize) -> SearchNode {
        SearchNode {
            index,
            parent: None,
            path_cost: 0,
            heuristic: 0,
            total_cost: 0,
        }
    }
    pub fn child(index: usize, parent: &SearchNode) -> SearchNode {
        SearchNode {
            index,
            parent: Some(parent.index),
            path_cost: parent.path_cost + 1,
            heuristic: 0,
            total_cost: parent.path_cost + 1,
        }
    }
}

/// Scratch space reused between searches so a replan does not reallocate.
#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    /// Expanded nodes keyed by cell index, in expansion order.
    pub closed: FxIndexMap<usize, SearchNode>,
    pub visited: Vec<bool>,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext::default()
    }
    pub fn reset(&mut self, cells: usize) {
        self.closed.clear();
        self.visited.clear();
        self.visited.resize(cells, false);
    }
}

/// Rebuilds the route from the last expanded node (the goal) by following parents back
/// through `closed`, consuming the entries it visits. The root is not part of the route.
pub fn build_path(closed: &mut FxIndexMap<usize, SearchNode>) -> VecDeque<usize> {
    let mut path = VecDeque::new();
    let Some((goal, node)) = closed.pop() else {
        return path;
    };
    path.push_front(goal);
    let mut parent = node.parent;
    while let Some(ix) = parent {
        match closed.shift_remove(&ix) {
            Some(node) if node.parent.is_some() => {
                path.push_front(ix);
                parent = node.parent;
            }
            _ => break,
        }
    }
    path
}

/// A search strategy over the adjacency index. Implementors only provide
/// [explore](Self::explore); reachability checks and path reconstruction are shared.
pub trait PathSearch {
    fn name(&self) -> &'static str;

    /// Expands nodes from `start` until `goal` has been moved to `context.closed`, which must
    /// then hold the goal as its last entry. Fails if the frontier empties first.
    fn explore(
        &self,
        adjacency: &AdjacencyIndex,
        context: &mut SearchContext,
        start: Point,
        goal: Point,
    ) -> Result<()>;

    /// Computes the cells to visit after `start` to arrive at `goal`, in order. Equal start and
    /// goal give an empty route.
    fn find_path(
        &self,
        adjacency: &AdjacencyIndex,
        context: &mut SearchContext,
        start: Point,
        goal: Point,
    ) -> Result<VecDeque<usize>> {
        if start == goal {
            return Ok(VecDeque::new());
        }
        let start_ix = adjacency.get_ix_point(start);
        let goal_ix = adjacency.get_ix_point(goal);
        if !adjacency.reachable(start_ix, goal_ix) {
            warn!("{:?} is not reachable from {:?}", goal, start);
            return Err(PathError::Unreachable { start, goal });
        }
        info!("{:?} is reachable from {:?}, computing path ({})", goal, start, self.name());
        context.reset(adjacency.len());
        self.explore(adjacency, context, start, goal)?;
        Ok(build_path(&mut context.closed))
    }
}

/// Selects one of the built-in strategies, e.g. from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    #[default]
    AStar,
    Bfs,
    Dfs,
}

impl SearchKind {
    pub fn find_path(
        self,
        adjacency: &AdjacencyIndex,
        context: &mut SearchContext,
        start: Point,
        goal: Point,
    ) -> Result<VecDeque<usize>> {
        match self {
            SearchKind::AStar => AStarSearch.find_path(adjacency, context, start, goal),
            SearchKind::Bfs => BfsSearch.find_path(adjacency, context, start, goal),
            SearchKind::Dfs => DfsSearch.find_path(adjacency, context, start, goal),
        }
    }
}
