use crate::adjacency::AdjacencyIndex;
use crate::cell::{NodeShade, ObjectKind};
use crate::config::MapConfig;
use crate::error::{PathError, Result};
use crate::geometry::{WorldPos, WorldRect};
use crate::grid::Grid;
use crate::occupancy::{self, VisibilityOutcome};
use crate::search::{SearchContext, SearchKind};
use crate::snap::snap_to_traversable;
use core::fmt;
use grid_util::Point;
use log::{debug, info};
use std::collections::VecDeque;

/// The tank's map: what it believes occupies the arena, which cells connect, and the route
/// it is currently driving.
///
/// A `TankMap` belongs to a single tank and is driven once per simulation tick: report
/// sightings with [mark](Self::mark), run [update](Self::update) (or
/// [sweep_visibility](Self::sweep_visibility)) over the cells, ask for a route with
/// [request_path](Self::request_path) when the goal changes, then steer towards
/// [follow_path](Self::follow_path).
#[derive(Clone, Debug)]
pub struct TankMap {
    config: MapConfig,
    grid: Grid,
    adjacency: AdjacencyIndex,
    path: VecDeque<usize>,
    context: SearchContext,
}

impl Default for TankMap {
    fn default() -> TankMap {
        TankMap::build(MapConfig::default())
    }
}

impl TankMap {
    pub fn new(config: MapConfig) -> Result<TankMap> {
        config.validate()?;
        Ok(TankMap::build(config))
    }
    fn build(config: MapConfig) -> TankMap {
        let grid = Grid::new(&config);
        let mut adjacency =
            AdjacencyIndex::new(config.grid_width, config.grid_height, config.window_margin);
        adjacency.recompute_full(&grid);
        TankMap {
            config,
            grid,
            adjacency,
            path: VecDeque::new(),
            context: SearchContext::new(),
        }
    }
    pub fn config(&self) -> &MapConfig {
        &self.config
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn search_kind(&self) -> SearchKind {
        self.config.search
    }
    /// Selects the strategy used by later calls to [request_path](Self::request_path).
    pub fn set_search_kind(&mut self, kind: SearchKind) {
        self.config.search = kind;
    }

    /// World-space border of a cell. Panics if `(x, y)` is outside the grid.
    pub fn cell_bounds(&self, x: usize, y: usize) -> WorldRect {
        self.grid.cell(x, y).border()
    }
    /// Current belief about a cell. Panics if `(x, y)` is outside the grid.
    pub fn cell_contents(&self, x: usize, y: usize) -> ObjectKind {
        self.grid.contents(x, y)
    }
    pub fn is_traversable(&self, x: usize, y: usize) -> bool {
        self.grid.cell(x, y).is_traversable()
    }
    /// Tint for an external renderer.
    pub fn shade(&self, x: usize, y: usize) -> NodeShade {
        self.grid.cell(x, y).shade()
    }
    pub fn world_to_cell(&self, x: f32, y: f32) -> Point {
        self.grid.world_to_cell(WorldPos::new(x, y))
    }
    /// Checks if the current adjacency index connects two cells.
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        self.grid.point_in_bounds(a)
            && self.grid.point_in_bounds(b)
            && self
                .adjacency
                .reachable(self.grid.get_ix_point(a), self.grid.get_ix_point(b))
    }

    /// Reports an object seen covering `region`. Cells already classified keep their
    /// classification.
    pub fn mark(&mut self, region: WorldRect, kind: ObjectKind) {
        let marked = occupancy::mark(&mut self.grid, &region, kind);
        if marked > 0 {
            debug!("Marked {} cells as {:?}", marked, kind);
        }
    }

    /// Runs one visibility tick for cell `(x, y)`. If a base has just come into view on the
    /// active route, a new route from `agent` to `goal` is planned before the cell settles,
    /// which may move `goal`.
    pub fn update(
        &mut self,
        x: usize,
        y: usize,
        currently_visible: bool,
        agent: WorldPos,
        goal: &mut Point,
    ) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(PathError::out_of_bounds(x, y));
        }
        let replan = match occupancy::observe(self.grid.cell(x, y), currently_visible) {
            VisibilityOutcome::Replan => {
                info!("Base sighted on route at ({}, {}), replanning", x, y);
                self.request_path(agent, goal)
            }
            VisibilityOutcome::Unchanged => Ok(()),
        };
        occupancy::settle(self.grid.cell_mut(x, y), currently_visible);
        replan
    }

    /// Runs [update](Self::update) over every cell, column by column, asking `can_see`
    /// whether each cell's border is in view.
    ///
    /// A failed replan does not stop the sweep: every cell still gets its tick, and the first
    /// error is returned once all cells are done.
    pub fn sweep_visibility<F>(
        &mut self,
        mut can_see: F,
        agent: WorldPos,
        goal: &mut Point,
    ) -> Result<()>
    where
        F: FnMut(&WorldRect) -> bool,
    {
        let mut first_error = None;
        for x in 0..self.width() {
            for y in 0..self.height() {
                let visible = can_see(&self.cell_bounds(x, y));
                if let Err(e) = self.update(x, y, visible, agent, goal) {
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Replaces the active route with a new one from the cell containing `agent` to `goal`.
    ///
    /// Adjacency is refreshed in the window around both cells only. A blocked goal is moved
    /// to the nearest traversable cell and written back to `goal`; a blocked start is moved
    /// the same way. On failure the tank is left without a route.
    pub fn request_path(&mut self, agent: WorldPos, goal: &mut Point) -> Result<()> {
        self.clear_path();
        if !self.grid.point_in_bounds(*goal) {
            return Err(PathError::OutOfBounds {
                x: goal.x,
                y: goal.y,
            });
        }
        let start = self.grid.world_to_cell(agent);
        self.adjacency
            .recompute_window(&self.grid, start.x, start.y, goal.x, goal.y);
        let resolved_goal = snap_to_traversable(&self.grid, *goal)?;
        if resolved_goal != *goal {
            info!("Goal {:?} is blocked, moving it to {:?}", goal, resolved_goal);
            *goal = resolved_goal;
        }
        let resolved_start = snap_to_traversable(&self.grid, start)?;
        let path = self.config.search.find_path(
            &self.adjacency,
            &mut self.context,
            resolved_start,
            resolved_goal,
        )?;
        for &ix in &path {
            self.grid.cell_at_mut(ix).on_path = true;
        }
        info!(
            "New route from {:?} to {:?} with {} steps",
            resolved_start,
            resolved_goal,
            path.len()
        );
        self.path = path;
        Ok(())
    }

    /// Next steering target for a tank at `agent`.
    ///
    /// Without a route the tank holds its position. Once the tank is within the waypoint
    /// tolerance of the front waypoint's center, that cell leaves the route and is forgotten
    /// (the tank is standing on it), and the following waypoint becomes the target.
    pub fn follow_path(&mut self, agent: WorldPos) -> WorldPos {
        let Some(&front) = self.path.front() else {
            return agent;
        };
        let target = self.grid.center_of(front);
        if !target.within(&agent, self.config.waypoint_tolerance) {
            return target;
        }
        let cell = self.grid.cell_at_mut(front);
        cell.on_path = false;
        cell.set_contents(ObjectKind::Unknown);
        self.path.pop_front();
        match self.path.front() {
            Some(&next) => self.grid.center_of(next),
            None => target,
        }
    }

    /// Center of the waypoint the tank is currently driving to.
    pub fn next_waypoint(&self) -> Option<WorldPos> {
        self.path.front().map(|&ix| self.grid.center_of(ix))
    }
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
    /// Remaining waypoints, front first.
    pub fn active_path(&self) -> impl Iterator<Item = Point> + '_ {
        self.path.iter().filter_map(|&ix| self.grid.inverse_index(ix))
    }
    pub fn clear_path(&mut self) {
        for ix in self.path.drain(..) {
            self.grid.cell_at_mut(ix).on_path = false;
        }
    }
}

impl fmt::Display for TankMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Map ({:?}, {} waypoints):", self.config.search, self.path.len())?;
        write!(f, "{}", self.grid)
    }
}
