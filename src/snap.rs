//! Resolving blocked start and goal cells to a nearby traversable cell.
use crate::error::{PathError, Result};
use crate::grid::Grid;
use grid_util::Point;
use itertools::iproduct;
use log::{debug, warn};

/// Probe directions, in the order they are tried at each distance. Up is towards row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compass {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    DownLeft,
    UpRight,
    DownRight,
}

impl Compass {
    pub const PRIORITY: [Compass; 8] = [
        Compass::Left,
        Compass::Right,
        Compass::Up,
        Compass::Down,
        Compass::UpLeft,
        Compass::DownLeft,
        Compass::UpRight,
        Compass::DownRight,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Compass::Left => (-1, 0),
            Compass::Right => (1, 0),
            Compass::Up => (0, -1),
            Compass::Down => (0, 1),
            Compass::UpLeft => (-1, -1),
            Compass::DownLeft => (-1, 1),
            Compass::UpRight => (1, -1),
            Compass::DownRight => (1, 1),
        }
    }
}

/// Returns `origin` if it is traversable, otherwise the nearest traversable cell found by
/// expanding rings.
///
/// At each distance `d = 1, 2, ...` the eight compass cells at distance `d` are probed in
/// [Compass::PRIORITY] order. If no compass probe succeeds anywhere on the grid, the full
/// rings are scanned row by row in order of distance, so the snap only fails when the grid
/// has no traversable cell at all.
pub fn snap_to_traversable(grid: &Grid, origin: Point) -> Result<Point> {
    if !grid.point_in_bounds(origin) {
        return Err(PathError::OutOfBounds {
            x: origin.x,
            y: origin.y,
        });
    }
    if grid.can_move_to(origin.x, origin.y) {
        return Ok(origin);
    }
    let max_distance = grid.width().max(grid.height()) as i32;
    for d in 1..=max_distance {
        for dir in Compass::PRIORITY {
            let (dx, dy) = dir.offset();
            let p = Point::new(origin.x + dx * d, origin.y + dy * d);
            if grid.can_move_to(p.x, p.y) {
                debug!("Snapped {:?} to {:?} ({:?} at distance {})", origin, p, dir, d);
                return Ok(p);
            }
        }
    }
    for d in 1..=max_distance {
        let ring = iproduct!(-d..=d, -d..=d)
            .filter(|&(dy, dx)| dx.abs() == d || dy.abs() == d)
            .map(|(dy, dx)| Point::new(origin.x + dx, origin.y + dy));
        for p in ring {
            if grid.can_move_to(p.x, p.y) {
                debug!("Snapped {:?} to {:?} by ring scan at distance {}", origin, p, d);
                return Ok(p);
            }
        }
    }
    warn!("No traversable cell around {:?}", origin);
    Err(PathError::NoTraversableCell { origin })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ObjectKind;
    use crate::config::MapConfig;

    fn block(grid: &mut Grid, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            grid.cell_mut(x, y).set_contents(ObjectKind::OwnBase);
        }
    }

    #[test]
    fn traversable_origin_is_kept() {
        let grid = Grid::new(&MapConfig::default());
        assert_eq!(
            snap_to_traversable(&grid, Point::new(3, 3)),
            Ok(Point::new(3, 3))
        );
    }

    #[test]
    fn compass_priority() {
        let mut grid = Grid::new(&MapConfig::default());
        block(&mut grid, &[(10, 6)]);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(9, 6))
        );
        block(&mut grid, &[(9, 6)]);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(11, 6))
        );
        block(&mut grid, &[(11, 6)]);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(10, 5))
        );
        block(&mut grid, &[(10, 5), (10, 7)]);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(9, 5))
        );
        block(&mut grid, &[(9, 5)]);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(9, 7))
        );
    }

    #[test]
    fn smaller_ring_first() {
        let mut grid = Grid::new(&MapConfig::default());
        let ring = iproduct!(9..=11, 5..=7).collect::<Vec<_>>();
        block(&mut grid, &ring);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(8, 6))
        );
    }

    #[test]
    fn probes_stay_in_bounds() {
        let mut grid = Grid::new(&MapConfig::default());
        block(&mut grid, &[(0, 0), (1, 0)]);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(0, 0)),
            Ok(Point::new(0, 1))
        );
    }

    #[test]
    fn falls_back_to_ring_scan() {
        let mut grid = Grid::new(&MapConfig::default());
        for cell in grid.cells_mut() {
            cell.set_contents(ObjectKind::OwnBase);
        }
        // Off every compass ray from (10, 6).
        grid.cell_mut(11, 8).set_contents(ObjectKind::Unknown);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(11, 8))
        );
        // A compass hit further out still wins over the closer ring cell.
        grid.cell_mut(15, 11).set_contents(ObjectKind::Unknown);
        assert_eq!(
            snap_to_traversable(&grid, Point::new(10, 6)),
            Ok(Point::new(15, 11))
        );
    }

    #[test]
    fn fully_blocked_grid_fails() {
        let mut grid = Grid::new(&MapConfig::default());
        for cell in grid.cells_mut() {
            cell.set_contents(ObjectKind::EnemyTank);
        }
        assert_eq!(
            snap_to_traversable(&grid, Point::new(4, 4)),
            Err(PathError::NoTraversableCell {
                origin: Point::new(4, 4)
            })
        );
    }
}
