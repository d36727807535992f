//! Piece: an anchor position plus a shrinking list of relative cell offsets.
//!
//! A piece's absolute cells are `position + offset` for every live offset.
//! Offsets are removed one row at a time as lines clear through the piece;
//! a piece with no offsets left is dead and gets dropped from the grid's
//! settled collection.

use blockfall_types::{PieceKind, Spin, Vector};

/// Stable identifier for a piece within one grid.
///
/// Cells in the occupancy map refer to their owning piece by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(pub(crate) u32);

/// A falling or settled polyomino.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    position: Vector,
    offsets: Vec<Vector>,
}

/// Initial offsets from the anchor, per variant.
fn spawn_offsets(kind: PieceKind) -> Vec<Vector> {
    let table: [(i32, i32); 4] = match kind {
        PieceKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
        PieceKind::I => [(0, -2), (0, -1), (0, 0), (0, 1)],
        PieceKind::S => [(0, 0), (1, 0), (-1, 1), (0, 1)],
        PieceKind::Z => [(0, 0), (-1, 0), (1, 1), (0, 1)],
        PieceKind::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        PieceKind::L => [(0, -1), (0, 0), (0, 1), (1, 1)],
        PieceKind::F => [(0, -1), (1, -1), (0, 0), (0, 1)],
    };
    table.iter().map(|&(x, y)| Vector::new(x, y)).collect()
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, position: Vector) -> Self {
        Self {
            id,
            kind,
            position,
            offsets: spawn_offsets(kind),
        }
    }

    /// Test constructor for pieces with arbitrary footprints.
    #[cfg(test)]
    pub(crate) fn with_offsets(
        id: PieceId,
        kind: PieceKind,
        position: Vector,
        offsets: Vec<Vector>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            offsets,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    /// Live relative offsets, in insertion order.
    pub fn offsets(&self) -> &[Vector] {
        &self.offsets
    }

    /// Absolute cells currently claimed by this piece.
    pub fn cells(&self) -> impl Iterator<Item = Vector> + '_ {
        let position = self.position;
        self.offsets.iter().map(move |&o| position + o)
    }

    /// A piece whose every offset has been cleared no longer occupies any
    /// cell and must be dropped from the settled collection.
    pub fn is_dead(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Unconditionally translate the anchor. Callers are responsible for
    /// legality checks; a piece never consults the grid.
    pub(crate) fn translate(&mut self, direction: Vector) {
        self.position += direction;
    }

    /// Rotate every offset about the anchor. No-op for the square, whose
    /// footprint is rotation-invariant.
    pub(crate) fn rotate(&mut self, spin: Spin) {
        if !self.kind.rotates() {
            return;
        }
        for offset in &mut self.offsets {
            *offset = spin.apply(*offset);
        }
    }

    /// Account for one cleared row: offsets on the row are destroyed, offsets
    /// strictly above it fall by one. Offsets below the row stay put; rows
    /// below the current scan target are already final because clearing
    /// proceeds from the bottom of the board upward.
    pub(crate) fn update_offsets(&mut self, removed_row: i32) {
        let anchor_y = self.position.y;
        self.offsets.retain(|o| anchor_y + o.y != removed_row);
        for offset in &mut self.offsets {
            if anchor_y + offset.y < removed_row {
                offset.y += 1;
            }
        }
    }
}
