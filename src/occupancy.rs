//! Marking of sighted objects and the per-tick visibility memory of each cell.
//!
//! A visibility tick is split in two so the owner of the path can replan in between, the way
//! the tick is evaluated top to bottom: [observe] reports whether a base just came into view
//! on the active route, then [settle] applies the remaining transitions against whatever the
//! replan left behind.
use crate::cell::{Cell, ObjectKind};
use crate::geometry::WorldRect;
use crate::grid::Grid;

/// What a visibility tick asks of the path owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityOutcome {
    Unchanged,
    /// A base appeared on a cell of the active path.
    Replan,
}

/// Records `kind` in every cell overlapped by `region` that is still [ObjectKind::Unknown].
/// The first classification of a cell wins. Returns how many cells changed.
pub fn mark(grid: &mut Grid, region: &WorldRect, kind: ObjectKind) -> usize {
    let mut marked = 0;
    for cell in grid.cells_mut() {
        if cell.border().intersects(region) && cell.contents() == ObjectKind::Unknown {
            cell.set_contents(kind);
            marked += 1;
        }
    }
    marked
}

pub fn observe(cell: &Cell, currently_visible: bool) -> VisibilityOutcome {
    if currently_visible && cell.contents().is_base() && !cell.visible && cell.on_path {
        VisibilityOutcome::Replan
    } else {
        VisibilityOutcome::Unchanged
    }
}

/// Applies the visibility transitions to a cell:
/// - a base coming into view that is not on the path is forgotten until it is marked again,
///   since it may have been destroyed while out of sight;
/// - visible bases are remembered as visible, anything out of view as not visible;
/// - enemy shells, tanks and bases decay to [ObjectKind::Unknown] regardless of visibility.
pub fn settle(cell: &mut Cell, currently_visible: bool) {
    if currently_visible {
        if cell.contents().is_base() {
            if !cell.visible && !cell.on_path {
                cell.set_contents(ObjectKind::Unknown);
            }
            cell.visible = true;
        }
    } else {
        cell.visible = false;
    }
    if cell.contents().is_transient() {
        cell.set_contents(ObjectKind::Unknown);
    }
}
