use crate::geometry::WorldRect;
use serde::{Deserialize, Serialize};

/// What the tank believes occupies a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Unknown,
    OwnBase,
    EnemyBase,
    EnemyTank,
    EnemyShell,
}

impl ObjectKind {
    /// Shells are assumed to keep moving, so only bases and tanks block a route.
    pub fn is_traversable(self) -> bool {
        matches!(self, ObjectKind::Unknown | ObjectKind::EnemyShell)
    }
    pub fn is_base(self) -> bool {
        matches!(self, ObjectKind::OwnBase | ObjectKind::EnemyBase)
    }
    /// Classifications that decay back to [ObjectKind::Unknown] unless re-marked every tick.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ObjectKind::EnemyShell | ObjectKind::EnemyTank | ObjectKind::EnemyBase
        )
    }
}

/// How an external renderer should tint a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeShade {
    Clear,
    OwnBase,
    Hostile,
    Shell,
    Path,
}

/// A single node of the map. The border is fixed at construction; everything else is the
/// tank's current belief about the cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    contents: ObjectKind,
    border: WorldRect,
    /// Whether the cell was in view on the previous visibility tick.
    pub visible: bool,
    pub on_path: bool,
}

impl Cell {
    pub fn new(border: WorldRect) -> Cell {
        Cell {
            contents: ObjectKind::Unknown,
            border,
            visible: false,
            on_path: false,
        }
    }
    pub fn contents(&self) -> ObjectKind {
        self.contents
    }
    pub fn set_contents(&mut self, contents: ObjectKind) {
        self.contents = contents;
    }
    pub fn border(&self) -> WorldRect {
        self.border
    }
    pub fn is_traversable(&self) -> bool {
        self.contents.is_traversable()
    }
    /// Path membership overrides the contents tint.
    pub fn shade(&self) -> NodeShade {
        if self.on_path {
            return NodeShade::Path;
        }
        match self.contents {
            ObjectKind::Unknown => NodeShade::Clear,
            ObjectKind::OwnBase => NodeShade::OwnBase,
            ObjectKind::EnemyBase | ObjectKind::EnemyTank => NodeShade::Hostile,
            ObjectKind::EnemyShell => NodeShade::Shell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversability() {
        assert!(ObjectKind::Unknown.is_traversable());
        assert!(ObjectKind::EnemyShell.is_traversable());
        assert!(!ObjectKind::OwnBase.is_traversable());
        assert!(!ObjectKind::EnemyBase.is_traversable());
        assert!(!ObjectKind::EnemyTank.is_traversable());
    }

    #[test]
    fn path_shade_wins() {
        let mut cell = Cell::new(WorldRect::new(0.0, 0.0, 1.0, 1.0));
        cell.set_contents(ObjectKind::EnemyTank);
        assert_eq!(cell.shade(), NodeShade::Hostile);
        cell.on_path = true;
        assert_eq!(cell.shade(), NodeShade::Path);
    }
}
