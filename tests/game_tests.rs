//! Session-level behavior through the public surface.

use blockfall::core::Game;
use blockfall::types::{
    Command, PieceKind, Vector, FALL_INTERVAL_STEP_MS, GRID_HEIGHT, GRID_WIDTH,
    START_FALL_INTERVAL_MS,
};

fn started(seed: u32) -> Game {
    let mut game = Game::new(GRID_WIDTH, GRID_HEIGHT, seed);
    game.start();
    game
}

/// A started game whose first spawned piece is the given variant.
fn started_with_first_piece(kind: PieceKind) -> Game {
    for seed in 1..10_000 {
        let mut game = started(seed);
        game.tick();
        let id = game.active_piece().unwrap();
        if game.grid().piece(id).unwrap().kind() == kind {
            return game;
        }
    }
    unreachable!("no seed produced {:?} as the first piece", kind);
}

#[test]
fn tick_and_input_are_no_ops_before_start() {
    let mut game = Game::new(GRID_WIDTH, GRID_HEIGHT, 7);
    game.tick();
    game.handle_input(Command::HardDrop);
    assert!(!game.is_started());
    assert!(game.grid().pieces().is_empty());
    assert_eq!(game.points(), 0);
}

#[test]
fn session_runs_to_game_over_under_constant_hard_drops() {
    let mut game = started(42);
    // Hard-dropping every spawn must eventually top out the stack, well
    // within the number of pieces the board can hold.
    let max_pieces = (GRID_WIDTH * GRID_HEIGHT / 4 + 8) as usize;
    for _ in 0..max_pieces {
        game.tick();
        game.handle_input(Command::HardDrop);
        if game.is_game_over() {
            break;
        }
    }
    assert!(game.is_game_over());
    assert!(!game.is_started());
    // The final board stays queryable.
    assert!(!game.grid().pieces().is_empty());
}

#[test]
fn restart_clears_the_finished_board() {
    let mut game = started(42);
    loop {
        game.tick();
        game.handle_input(Command::HardDrop);
        if game.is_game_over() {
            break;
        }
    }

    game.start();
    assert!(game.is_started());
    assert_eq!(game.points(), 0);
    assert_eq!(game.fall_interval_ms(), START_FALL_INTERVAL_MS);
    assert!(game.grid().pieces().is_empty());
}

#[test]
fn same_seed_spawns_the_same_pieces() {
    let mut a = started(1234);
    let mut b = started(1234);

    for _ in 0..10 {
        a.tick();
        b.tick();
        let ka = a.active_piece().map(|id| a.grid().piece(id).unwrap().kind());
        let kb = b.active_piece().map(|id| b.grid().piece(id).unwrap().kind());
        assert_eq!(ka, kb);
        a.handle_input(Command::HardDrop);
        b.handle_input(Command::HardDrop);
        if a.is_game_over() {
            break;
        }
    }
}

#[test]
fn completing_two_rows_scores_two_widths_and_speeds_up() {
    // Rows 13 and 14 full except columns 8 and 9; a square dropped at
    // x = 8 completes both.
    let mut game = started_with_first_piece(PieceKind::O);
    for i in 0..4 {
        game.grid_mut()
            .add_piece(PieceKind::O, Vector::new(2 * i, GRID_HEIGHT - 2));
    }

    // The square spawns with its anchor at the spawn column; walk it to the gap.
    let id = game.active_piece().unwrap();
    let anchor_x = game.grid().piece(id).unwrap().position().x;
    for _ in anchor_x..(GRID_WIDTH - 2) {
        game.handle_input(Command::MoveRight);
    }
    game.handle_input(Command::HardDrop);

    assert_eq!(game.points(), 2 * GRID_WIDTH as u32);
    assert_eq!(
        game.fall_interval_ms(),
        START_FALL_INTERVAL_MS - 2 * FALL_INTERVAL_STEP_MS
    );
    // Every piece died with the cleared rows.
    assert!(game.grid().pieces().is_empty());
}

#[test]
fn illegal_moves_leave_the_board_unchanged() {
    let mut game = started(99);
    game.tick();
    let id = game.active_piece().unwrap();

    // Walk to the left wall, then keep pushing.
    for _ in 0..GRID_WIDTH {
        game.handle_input(Command::MoveLeft);
    }
    let stuck: Vec<Vector> = game.grid().piece(id).unwrap().cells().collect();
    game.handle_input(Command::MoveLeft);
    let after: Vec<Vector> = game.grid().piece(id).unwrap().cells().collect();
    assert_eq!(stuck, after);
}

#[test]
fn hard_drop_lands_on_top_of_settled_stacks() {
    let mut game = started_with_first_piece(PieceKind::O);
    // A square already settled on the floor at the spawn column.
    let spawn_x = GRID_WIDTH / 2 - 1;
    game.grid_mut()
        .add_piece(PieceKind::O, Vector::new(spawn_x, GRID_HEIGHT - 2));

    let id = game.active_piece().unwrap();
    game.handle_input(Command::HardDrop);

    let piece = game.grid().piece(id).unwrap();
    let max_y = piece.cells().map(|c| c.y).max().unwrap();
    assert_eq!(max_y, GRID_HEIGHT - 3);
}

#[test]
fn scoring_belongs_to_the_session_not_the_grid() {
    let mut game = started_with_first_piece(PieceKind::O);
    for i in 0..4 {
        game.grid_mut()
            .add_piece(PieceKind::O, Vector::new(2 * i, GRID_HEIGHT - 2));
    }
    let id = game.active_piece().unwrap();
    let anchor_x = game.grid().piece(id).unwrap().position().x;
    for _ in anchor_x..(GRID_WIDTH - 2) {
        game.handle_input(Command::MoveRight);
    }
    game.handle_input(Command::HardDrop);
    let first = game.points();
    assert!(first > 0);

    // Clearing rows directly on the grid awards nothing; only the session's
    // finalize step does the accounting.
    for i in 0..5 {
        game.grid_mut()
            .add_piece(PieceKind::O, Vector::new(2 * i, GRID_HEIGHT - 2));
    }
    let destroyed = game.grid_mut().destroy_full_lines();
    assert_eq!(destroyed, 2);
    assert_eq!(game.points(), first);
}
