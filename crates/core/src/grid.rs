//! Grid: cell occupancy, movement legality, and line clearing.
//!
//! The grid records, per cell, which settled piece currently claims it, and
//! owns the settled pieces themselves (in spawn order). Movement validation
//! is a two-phase protocol: callers unlock a piece's footprint, test the
//! candidate cells with [`Grid::can_go_to`], then relock whether or not the
//! move happened, so a piece never collides with its own old footprint.
//!
//! Coordinates: `(x, y)` with `x` in `0..width` left to right and `y` in
//! `0..height` top to bottom. Rows above the board (`y < 0`) are legal for
//! pieces entering from the top but are never stored in the cell map.

use blockfall_types::{PieceKind, Spin, Transform, Vector};

use crate::piece::{Piece, PieceId};

/// Fixed-size board tracking which piece occupies each cell.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major occupancy map (`y * width + x`).
    cells: Vec<Option<PieceId>>,
    /// Settled pieces, in spawn order.
    settled: Vec<Piece>,
    next_id: u32,
}

impl Grid {
    /// Create an empty grid. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
            settled: Vec::new(),
            next_id: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Settled pieces in spawn order.
    pub fn pieces(&self) -> &[Piece] {
        &self.settled
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.settled.iter().find(|p| p.id() == id)
    }

    fn index(&self, pos: Vector) -> Option<usize> {
        if !self.in_grid(pos) {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }

    /// Whether the position is inside the stored region.
    fn in_grid(&self, pos: Vector) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Whether the position is inside the play area: bounded by the two
    /// sides and the floor, open at the top.
    fn in_play_area(&self, pos: Vector) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// The piece occupying `pos`, if any. Positions outside the stored
    /// region read as empty; this is a pure query.
    pub fn get_cell(&self, pos: Vector) -> Option<PieceId> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// The variant of the piece occupying `pos`, for rendering.
    pub fn occupant(&self, pos: Vector) -> Option<PieceKind> {
        self.get_cell(pos)
            .and_then(|id| self.piece(id))
            .map(|p| p.kind())
    }

    /// Create a new piece, append it to the settled collection, and lock its
    /// footprint. Returns the id the cell map will refer to it by.
    pub fn add_piece(&mut self, kind: PieceKind, position: Vector) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.settled.push(Piece::new(id, kind, position));
        self.lock_cells(id);
        id
    }

    #[cfg(test)]
    pub(crate) fn add_piece_with_offsets(
        &mut self,
        kind: PieceKind,
        position: Vector,
        offsets: Vec<Vector>,
    ) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.settled
            .push(Piece::with_offsets(id, kind, position, offsets));
        self.lock_cells(id);
        id
    }

    /// Unlock and drop a piece from the settled collection.
    pub fn remove_piece(&mut self, id: PieceId) {
        self.unlock_cells(id);
        self.settled.retain(|p| p.id() != id);
    }

    /// Record `id` as the occupant of every live cell of the piece that lies
    /// within the stored region. Cells above the board are not recorded.
    pub fn lock_cells(&mut self, id: PieceId) {
        if let Some(index) = self.settled.iter().position(|p| p.id() == id) {
            self.lock_at(index);
        }
    }

    fn lock_at(&mut self, index: usize) {
        let id = self.settled[index].id();
        let cells: Vec<Vector> = self.settled[index].cells().collect();
        for pos in cells {
            if let Some(i) = self.index(pos) {
                self.cells[i] = Some(id);
            }
        }
    }

    /// Clear every cell currently claimed by `id`.
    ///
    /// Must be paired with a later [`Grid::lock_cells`] while the piece
    /// still exists, so the map never lacks the footprint of a live piece.
    pub fn unlock_cells(&mut self, id: PieceId) {
        for cell in &mut self.cells {
            if *cell == Some(id) {
                *cell = None;
            }
        }
    }

    /// Whether the piece's cells, mapped through `transform`, all land in
    /// the play area on free cells.
    ///
    /// Callers must unlock the piece's current footprint first, otherwise it
    /// collides with itself. There is no upper bound on the candidate cells:
    /// pieces may sit above the visible board while entering.
    pub fn can_go_to(&self, id: PieceId, transform: Transform) -> bool {
        let Some(piece) = self.piece(id) else {
            return false;
        };
        let position = piece.position();
        piece.offsets().iter().all(|&o| {
            let candidate = transform.apply(o) + position;
            self.in_play_area(candidate) && self.get_cell(candidate).is_none()
        })
    }

    /// Translate a piece unconditionally, keeping its footprint locked.
    pub fn translate_piece(&mut self, id: PieceId, direction: Vector) {
        if let Some(index) = self.settled.iter().position(|p| p.id() == id) {
            self.unlock_cells(id);
            self.settled[index].translate(direction);
            self.lock_at(index);
        }
    }

    /// Rotate a piece unconditionally, keeping its footprint locked.
    pub fn rotate_piece(&mut self, id: PieceId, spin: Spin) {
        if let Some(index) = self.settled.iter().position(|p| p.id() == id) {
            self.unlock_cells(id);
            self.settled[index].rotate(spin);
            self.lock_at(index);
        }
    }

    /// Destroy every full row and settle the cells above, returning the
    /// number of rows destroyed.
    ///
    /// Rows are scanned from the bottom upward. After a row is destroyed the
    /// same index is scanned again: the row above has fallen into it and may
    /// itself be full. The scan only moves up once the current row is
    /// confirmed not full, which is what makes cascading clears work.
    pub fn destroy_full_lines(&mut self) -> u32 {
        let mut destroyed = 0;
        let mut y = self.height - 1;
        while y >= 0 {
            if self.row_full(y) {
                destroyed += 1;
                for index in 0..self.settled.len() {
                    let id = self.settled[index].id();
                    self.unlock_cells(id);
                    self.settled[index].update_offsets(y);
                    self.lock_at(index);
                }
                self.settled.retain(|p| !p.is_dead());
            } else {
                y -= 1;
            }
        }
        destroyed
    }

    fn row_full(&self, y: i32) -> bool {
        (0..self.width).all(|x| self.get_cell(Vector::new(x, y)).is_some())
    }

    /// Unlock everything and empty the settled collection.
    pub fn clear(&mut self) {
        let ids: Vec<PieceId> = self.settled.iter().map(|p| p.id()).collect();
        for id in ids {
            self.unlock_cells(id);
        }
        self.settled.clear();
    }
}
