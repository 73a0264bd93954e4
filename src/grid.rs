use crate::cell::{Cell, ObjectKind};
use crate::config::MapConfig;
use crate::geometry::{WorldPos, WorldRect};
use core::fmt;
use grid_util::Point;
use log::debug;

/// Fixed partition of the arena into `width * height` [Cell]s, stored row-major so that a
/// cell's index is `y * width + x`.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Lays out the cells of `config`. Neighbouring borders share their edges exactly, so
    /// every in-arena position is contained by exactly one cell.
    pub fn new(config: &MapConfig) -> Grid {
        let (w, h) = (config.grid_width, config.grid_height);
        let cell_w = config.cell_width();
        let cell_h = config.cell_height();
        let edge_x = |i: usize| config.arena_margin + i as f32 * cell_w;
        let edge_y = |j: usize| config.arena_margin + j as f32 * cell_h;
        let mut cells = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let border =
                    WorldRect::from_edges(edge_x(x), edge_y(y), edge_x(x + 1), edge_y(y + 1));
                cells.push(Cell::new(border));
            }
        }
        Grid {
            width: w,
            height: h,
            cells,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.in_bounds(point.x, point.y)
    }
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
    pub fn get_ix_point(&self, point: Point) -> usize {
        self.index(point.x as usize, point.y as usize)
    }
    /// Maps a cell index back to its coordinate; indices past the last cell yield [None].
    pub fn inverse_index(&self, index: usize) -> Option<Point> {
        (index < self.cells.len()).then(|| {
            Point::new((index % self.width) as i32, (index / self.width) as i32)
        })
    }
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }
    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let ix = self.index(x, y);
        &mut self.cells[ix]
    }
    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
    pub fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }
    pub fn cell_point(&self, point: Point) -> &Cell {
        self.cell_at(self.get_ix_point(point))
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }
    /// Traversability of an in-bounds coordinate.
    pub fn can_move_to(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cell(x as usize, y as usize).is_traversable()
    }
    pub fn contents(&self, x: usize, y: usize) -> ObjectKind {
        self.cell(x, y).contents()
    }
    /// World-space center of the cell with the given index.
    pub fn center_of(&self, index: usize) -> WorldPos {
        self.cells[index].border().center()
    }
    /// Finds the cell containing `pos` by scanning every border. Positions outside the arena
    /// resolve to the origin cell.
    pub fn world_to_cell(&self, pos: WorldPos) -> Point {
        match self.cells.iter().position(|c| c.border().contains(pos)) {
            Some(ix) => Point::new((ix % self.width) as i32, (ix / self.width) as i32),
            None => {
                debug!("({}, {}) is outside every cell, using origin", pos.x, pos.y);
                Point::new(0, 0)
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = (0..self.width)
                .map(|x| {
                    let cell = self.cell(x, y);
                    if cell.on_path {
                        return '*';
                    }
                    match cell.contents() {
                        ObjectKind::Unknown => '.',
                        ObjectKind::OwnBase => 'O',
                        ObjectKind::EnemyBase => 'B',
                        ObjectKind::EnemyTank => 'T',
                        ObjectKind::EnemyShell => 's',
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borders_tile_the_arena() {
        let config = MapConfig::default();
        let grid = Grid::new(&config);
        assert_eq!(grid.len(), 19 * 13);
        for y in 0..grid.height() {
            for x in 0..grid.width() - 1 {
                assert_eq!(grid.cell(x, y).border().right, grid.cell(x + 1, y).border().left);
            }
        }
        let last = grid.cell(18, 12).border();
        assert!((last.right - 790.0).abs() < 1e-3);
        assert!((last.bottom - 570.0).abs() < 1e-3);
    }

    #[test]
    fn index_round_trip() {
        let grid = Grid::new(&MapConfig::default());
        assert_eq!(grid.index(3, 2), 2 * 19 + 3);
        assert_eq!(grid.inverse_index(41), Some(Point::new(3, 2)));
        assert_eq!(grid.inverse_index(19 * 13), None);
    }

    #[test]
    fn world_lookup() {
        let grid = Grid::new(&MapConfig::default());
        let center = grid.cell(7, 4).border().center();
        assert_eq!(grid.world_to_cell(center), Point::new(7, 4));
        assert_eq!(grid.world_to_cell(WorldPos::new(10.0, 10.0)), Point::new(0, 0));
        assert_eq!(grid.world_to_cell(WorldPos::new(5000.0, 3.0)), Point::new(0, 0));
        let edge = grid.cell(2, 0).border();
        assert_eq!(
            grid.world_to_cell(WorldPos::new(edge.left, edge.top)),
            Point::new(2, 0)
        );
    }
}
