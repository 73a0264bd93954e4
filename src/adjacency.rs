//! Reachability between neighbouring cells, kept as a dense `n * n` boolean matrix.
//!
//! The matrix is never rebuilt as a whole while the tank is moving.
//! [AdjacencyIndex::recompute_window] only resets and refills the block around the two cells
//! of interest; entries outside that block keep whatever value they last had, including
//! `true` for cells that have since been blocked. Callers that need the whole map consistent
//! must use [AdjacencyIndex::recompute_full]. Connected components are regenerated from the
//! matrix after every recompute, stale entries included.
use crate::grid::Grid;
use crate::N_SMALLVEC_SIZE;
use grid_util::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Inclusive, clamped cell rectangle over which adjacency is recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
}

#[derive(Clone, Debug)]
pub struct AdjacencyIndex {
    width: usize,
    height: usize,
    margin: usize,
    matrix: Vec<bool>,
    /// Connected components of `matrix`, regenerated after every recompute.
    components: UnionFind<usize>,
}

impl AdjacencyIndex {
    /// Creates an index with no legal moves; call [recompute_full](Self::recompute_full) to
    /// populate it.
    pub fn new(width: usize, height: usize, margin: usize) -> AdjacencyIndex {
        let n = width * height;
        AdjacencyIndex {
            width,
            height,
            margin,
            matrix: vec![false; n * n],
            components: UnionFind::new(n),
        }
    }
    pub fn len(&self) -> usize {
        self.width * self.height
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn get_ix_point(&self, point: Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }
    pub fn point(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }
    pub fn is_adjacent(&self, from: usize, to: usize) -> bool {
        self.matrix[from * self.len() + to]
    }
    fn set(&mut self, from: usize, to: usize, value: bool) {
        let n = self.len();
        self.matrix[from * n + to] = value;
    }
    /// Cells reachable in one step from `from`, in ascending index order. Only the eight
    /// surrounding cells can ever be set, so only those are probed.
    pub fn neighbours(&self, from: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        let p = self.point(from);
        iproduct!(-1..=1, -1..=1)
            .filter(|&(dy, dx)| dx != 0 || dy != 0)
            .map(|(dy, dx)| (p.x + dx, p.y + dy))
            .filter(|&(x, y)| {
                x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
            })
            .map(|(x, y)| y as usize * self.width + x as usize)
            .filter(|&to| self.is_adjacent(from, to))
            .collect()
    }
    /// The rectangle spanned by `(x1, y1)` and `(x2, y2)`, grown by the margin on every side
    /// and clamped to the grid.
    pub fn window(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Window {
        let m = self.margin as i32;
        let clamp_x = |v: i32| v.clamp(0, self.width as i32 - 1) as usize;
        let clamp_y = |v: i32| v.clamp(0, self.height as i32 - 1) as usize;
        Window {
            start_x: clamp_x(x1.min(x2) - m),
            start_y: clamp_y(y1.min(y2) - m),
            end_x: clamp_x(x1.max(x2) + m),
            end_y: clamp_y(y1.max(y2) + m),
        }
    }
    /// Resets and refills the adjacency of the window around two cells.
    ///
    /// The reset covers every pair of indices in the contiguous range from the window's first
    /// to its last cell, which for a window narrower than the grid includes row fragments
    /// outside it. The refill then sets, for each traversable cell inside the window, a step to
    /// every traversable orthogonal neighbour, and a step to every traversable diagonal
    /// neighbour whose two flanking orthogonal cells are traversable as well.
    pub fn recompute_window(
        &mut self,
        grid: &Grid,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Window {
        let window = self.window(x1, y1, x2, y2);
        let first = grid.index(window.start_x, window.start_y);
        let last = grid.index(window.end_x, window.end_y);
        debug!(
            "Recomputing adjacency over ({}, {})-({}, {})",
            window.start_x, window.start_y, window.end_x, window.end_y
        );
        for (i, j) in iproduct!(first..=last, first..=last) {
            self.set(i, j, false);
        }
        for (x, y) in iproduct!(
            window.start_x as i32..=window.end_x as i32,
            window.start_y as i32..=window.end_y as i32
        ) {
            if !grid.can_move_to(x, y) {
                continue;
            }
            let from = grid.index(x as usize, y as usize);
            for (dx, dy) in iproduct!(-1..=1, -1..=1) {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if !grid.can_move_to(nx, ny) {
                    continue;
                }
                let diagonal = dx != 0 && dy != 0;
                if diagonal && !(grid.can_move_to(nx, y) && grid.can_move_to(x, ny)) {
                    continue;
                }
                self.set(from, grid.index(nx as usize, ny as usize), true);
            }
        }
        self.generate_components();
        window
    }
    /// Recomputes the whole grid.
    pub fn recompute_full(&mut self, grid: &Grid) {
        self.recompute_window(grid, 0, 0, self.width as i32, self.height as i32);
    }
    /// Links every cell to the cells it can step to, treating every step as two-way.
    fn generate_components(&mut self) {
        let n = self.len();
        self.components = UnionFind::new(n);
        for from in 0..n {
            for to in self.neighbours(from) {
                self.components.union(from, to);
            }
        }
    }
    /// Connected components as of the last recompute.
    pub fn components(&self) -> &UnionFind<usize> {
        &self.components
    }
    /// Checks if `start` and `goal` share a component. A `false` answer is final; a `true`
    /// answer can still fail a search when stale one-way steps connect the components.
    pub fn reachable(&self, start: usize, goal: usize) -> bool {
        start == goal || self.components.equiv(start, goal)
    }
}
