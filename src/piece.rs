use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::grid::{Grid, Position};
use crate::shape::{rotate_offsets, ShapeKind, ShapeOffsets};

/// Anchor column and row every piece spawns at.
pub const SPAWN_POSITION: Position = Position::new(GRID_WIDTH as i16 / 2, 0);

/// The live piece: a shape's current orientation placed at an anchor.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: ShapeKind,
    pub offsets: ShapeOffsets,
    pub anchor: Position,
}

impl Piece {
    /// Base orientation of `kind` at the spawn anchor. Whether it fits is up to the caller.
    pub fn spawn(kind: ShapeKind) -> Self {
        Self::new_at(kind, SPAWN_POSITION.x, SPAWN_POSITION.y)
    }

    pub fn new_at(kind: ShapeKind, x: i16, y: i16) -> Self {
        Self {
            kind,
            offsets: kind.offsets(),
            anchor: Position::new(x, y),
        }
    }

    pub fn can_place(&self, grid: &Grid, dx: i16, dy: i16) -> bool {
        fits(grid, &self.offsets, self.anchor, dx, dy)
    }

    /// Moves the anchor by (dx, dy) if the target is free; otherwise leaves the piece alone.
    pub fn try_move(&mut self, grid: &Grid, dx: i16, dy: i16) -> bool {
        if !self.can_place(grid, dx, dy) {
            return false;
        }
        self.anchor.x = self.anchor.x.saturating_add(dx);
        self.anchor.y = self.anchor.y.saturating_add(dy);
        true
    }

    /// Quarter turn clockwise about the anchor, no wall kicks.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let candidate = rotate_offsets(&self.offsets);
        if !fits(grid, &candidate, self.anchor, 0, 0) {
            return false;
        }
        self.offsets = candidate;
        true
    }

    pub fn occupied_cells(&self) -> [Position; 4] {
        self.offsets
            .map(|o| Position::new(self.anchor.x.saturating_add(o.dx), self.anchor.y.saturating_add(o.dy)))
    }
}

fn fits(grid: &Grid, offsets: &ShapeOffsets, anchor: Position, dx: i16, dy: i16) -> bool {
    offsets.iter().all(|o| {
        // Widened so extreme deltas land off the board instead of overflowing.
        let x = i32::from(anchor.x) + i32::from(o.dx) + i32::from(dx);
        let y = i32::from(anchor.y) + i32::from(o.dy) + i32::from(dy);
        if x < 0 || x >= GRID_WIDTH as i32 || y >= GRID_HEIGHT as i32 {
            return false;
        }
        y < 0 || !grid.is_occupied(x as i16, y as i16)
    })
}
