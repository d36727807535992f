//! Grid occupancy and line-clear behavior through the public surface.

use blockfall::core::Grid;
use blockfall::types::{PieceKind, Transform, Vector};

fn occupied(grid: &Grid) -> usize {
    let mut n = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get_cell(Vector::new(x, y)).is_some() {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn occupancy_mirrors_settled_pieces() {
    let mut grid = Grid::new(10, 15);
    grid.add_piece(PieceKind::O, Vector::new(0, 13));
    grid.add_piece(PieceKind::T, Vector::new(5, 10));

    for piece in grid.pieces() {
        for pos in piece.cells() {
            assert_eq!(grid.get_cell(pos), Some(piece.id()));
            assert_eq!(grid.occupant(pos), Some(piece.kind()));
        }
    }
    assert_eq!(occupied(&grid), 8);
}

#[test]
fn unlock_lock_roundtrip_preserves_the_map() {
    let mut grid = Grid::new(10, 15);
    let id = grid.add_piece(PieceKind::S, Vector::new(4, 8));
    let before: Vec<Option<_>> = (0..15)
        .flat_map(|y| (0..10).map(move |x| Vector::new(x, y)))
        .map(|pos| grid.get_cell(pos))
        .collect();

    grid.unlock_cells(id);
    grid.lock_cells(id);

    let after: Vec<Option<_>> = (0..15)
        .flat_map(|y| (0..10).map(move |x| Vector::new(x, y)))
        .map(|pos| grid.get_cell(pos))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn out_of_range_reads_are_empty() {
    let grid = Grid::new(10, 15);
    assert!(grid.get_cell(Vector::new(-1, 5)).is_none());
    assert!(grid.get_cell(Vector::new(5, -1)).is_none());
    assert!(grid.get_cell(Vector::new(10, 5)).is_none());
    assert!(grid.get_cell(Vector::new(5, 15)).is_none());
}

#[test]
fn movement_legality_requires_unlocking_first() {
    let mut grid = Grid::new(10, 15);
    let id = grid.add_piece(PieceKind::O, Vector::new(4, 10));

    // Locked footprint: the one-row fall overlaps the piece's own cells.
    assert!(!grid.can_go_to(id, Transform::TranslateDown));

    grid.unlock_cells(id);
    assert!(grid.can_go_to(id, Transform::TranslateDown));
    grid.lock_cells(id);
}

#[test]
fn two_full_rows_of_squares_clear_together() {
    let mut grid = Grid::new(10, 15);
    // Five squares fill rows 13 and 14 completely.
    let ids: Vec<_> = (0..5)
        .map(|i| grid.add_piece(PieceKind::O, Vector::new(2 * i, 13)))
        .collect();

    assert_eq!(grid.destroy_full_lines(), 2);
    for id in ids {
        assert!(grid.piece(id).is_none(), "cleared piece must be dropped");
    }
    assert!(grid.pieces().is_empty());
    assert_eq!(occupied(&grid), 0);
}

#[test]
fn four_full_rows_of_columns_clear_together() {
    let mut grid = Grid::new(10, 15);
    // A vertical I in every column fills rows 11..=14.
    for x in 0..10 {
        grid.add_piece(PieceKind::I, Vector::new(x, 13));
    }
    assert_eq!(grid.destroy_full_lines(), 4);
    assert!(grid.pieces().is_empty());
    assert_eq!(occupied(&grid), 0);
}

#[test]
fn survivors_above_cleared_rows_fall_by_one_per_row() {
    let mut grid = Grid::new(10, 15);
    // Rows 13 and 14 full of squares; one extra square higher up.
    for i in 0..5 {
        grid.add_piece(PieceKind::O, Vector::new(2 * i, 13));
    }
    let survivor = grid.add_piece(PieceKind::O, Vector::new(4, 10));

    assert_eq!(grid.destroy_full_lines(), 2);

    let mut cells: Vec<Vector> = grid.piece(survivor).unwrap().cells().collect();
    cells.sort_by_key(|c| (c.y, c.x));
    assert_eq!(
        cells,
        vec![
            Vector::new(4, 12),
            Vector::new(5, 12),
            Vector::new(4, 13),
            Vector::new(5, 13),
        ]
    );
    // The map mirrors the fallen piece.
    for pos in cells {
        assert_eq!(grid.get_cell(pos), Some(survivor));
    }
    assert_eq!(occupied(&grid), 4);
}

#[test]
fn partial_rows_do_not_clear() {
    let mut grid = Grid::new(10, 15);
    for i in 0..4 {
        grid.add_piece(PieceKind::O, Vector::new(2 * i, 13));
    }
    assert_eq!(grid.destroy_full_lines(), 0);
    assert_eq!(grid.pieces().len(), 4);
    assert_eq!(occupied(&grid), 16);
}

#[test]
fn clear_resets_the_board() {
    let mut grid = Grid::new(10, 15);
    for i in 0..5 {
        grid.add_piece(PieceKind::O, Vector::new(2 * i, 13));
    }
    grid.clear();
    assert!(grid.pieces().is_empty());
    assert_eq!(occupied(&grid), 0);
    assert_eq!(grid.destroy_full_lines(), 0);
}

#[test]
fn small_boards_work_with_the_same_rules() {
    let mut grid = Grid::new(4, 4);
    let a = grid.add_piece(PieceKind::O, Vector::new(0, 2));
    let b = grid.add_piece(PieceKind::O, Vector::new(2, 2));
    assert_eq!(grid.destroy_full_lines(), 2);
    assert!(grid.piece(a).is_none());
    assert!(grid.piece(b).is_none());
}
