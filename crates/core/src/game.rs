//! Game: the session state machine driving the grid.
//!
//! One `Game` value is one session. The external loop owns it, calls
//! [`Game::tick`] at the cadence of [`Game::fall_interval_ms`], and feeds
//! keyboard input through [`Game::handle_input`]. The grid never initiates
//! ticks and knows nothing about timers.

use blockfall_types::{
    Command, PieceColor, PieceKind, Spin, Transform, Vector, FALL_INTERVAL_FLOOR_MS,
    FALL_INTERVAL_STEP_MS, START_FALL_INTERVAL_MS,
};

use crate::grid::Grid;
use crate::piece::PieceId;
use crate::rng::SimpleRng;

/// Session lifecycle: `NotStarted -> Running -> GameOver`, and back to
/// `Running` on restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// One game session.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    rng: SimpleRng,
    phase: Phase,
    points: u32,
    fall_interval_ms: u32,
    /// The piece currently falling. Its footprint lives in the grid like any
    /// settled piece; the id is what makes it the one the player controls.
    active: Option<PieceId>,
}

impl Game {
    /// Create a session over an empty `width x height` board.
    ///
    /// The seed fixes the piece sequence; the session is otherwise
    /// deterministic given the same tick/input interleaving.
    pub fn new(width: i32, height: i32, seed: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            rng: SimpleRng::new(seed),
            phase: Phase::NotStarted,
            points: 0,
            fall_interval_ms: START_FALL_INTERVAL_MS,
            active: None,
        }
    }

    /// Start (or restart) the session: empty board, zero points, default
    /// fall interval.
    pub fn start(&mut self) {
        self.points = 0;
        self.fall_interval_ms = START_FALL_INTERVAL_MS;
        self.grid.clear();
        self.active = None;
        self.phase = Phase::Running;
    }

    pub fn is_started(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// The color tag occupying a visible cell, for rendering. Out-of-range
    /// coordinates read as empty.
    pub fn cell_occupant(&self, x: i32, y: i32) -> Option<PieceColor> {
        self.grid.occupant(Vector::new(x, y)).map(PieceKind::color)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Grid access for tests that pre-build board states.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The currently falling piece's id, if any.
    pub fn active_piece(&self) -> Option<PieceId> {
        self.active
    }

    /// Advance the session by one fall step.
    ///
    /// Spawns a piece when none is falling, then tries a one-row fall. A
    /// blocked fall finalizes the piece where it lies and resolves full
    /// lines.
    pub fn tick(&mut self) {
        if !self.is_started() {
            return;
        }

        let id = match self.active {
            Some(id) => id,
            None => match self.spawn_piece() {
                Some(id) => id,
                None => return,
            },
        };

        if !self.fall_one_row(id) {
            self.active = None;
            self.check_for_full_lines();
        }
    }

    /// Apply a player command to the falling piece.
    ///
    /// The piece's own footprint is unlocked around the legality check so it
    /// never collides with itself; illegal commands are silently ignored and
    /// the footprint is relocked either way.
    pub fn handle_input(&mut self, command: Command) {
        if !self.is_started() {
            return;
        }
        let Some(id) = self.active else {
            return;
        };

        self.grid.unlock_cells(id);
        let allowed = self.grid.can_go_to(id, command.transform());
        self.grid.lock_cells(id);
        if !allowed {
            return;
        }

        match command {
            Command::MoveLeft => self.grid.translate_piece(id, Vector::LEFT),
            Command::MoveRight => self.grid.translate_piece(id, Vector::RIGHT),
            Command::RotateCw => self.grid.rotate_piece(id, Spin::Cw),
            Command::RotateCcw => self.grid.rotate_piece(id, Spin::Ccw),
            Command::HardDrop => self.drop_to_bottom(),
        }
    }

    /// Spawn a random piece above the board. Returns `None` on game over.
    ///
    /// The piece joins the settled collection immediately so its footprint
    /// takes part in collision state. If it cannot even fall one row the
    /// session is over; the fresh piece is rolled back so the final board
    /// holds exactly the stack that caused the loss.
    fn spawn_piece(&mut self) -> Option<PieceId> {
        let kind = PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize];
        let position = Vector::new(self.grid.width() / 2 - 1, -2);
        let id = self.grid.add_piece(kind, position);

        if !self.grid.can_go_to(id, Transform::TranslateDown) {
            self.grid.remove_piece(id);
            self.active = None;
            self.phase = Phase::GameOver;
            return None;
        }

        self.active = Some(id);
        Some(id)
    }

    /// One-row soft fall. Returns false when the piece is blocked, leaving
    /// its footprint locked in place.
    fn fall_one_row(&mut self, id: PieceId) -> bool {
        self.grid.unlock_cells(id);
        if self.grid.can_go_to(id, Transform::TranslateDown) {
            self.grid.translate_piece(id, Vector::DOWN);
            true
        } else {
            self.grid.lock_cells(id);
            false
        }
    }

    /// Fall until blocked, then finalize and resolve lines, exactly as a
    /// blocked tick would. Bounded by the board height.
    fn drop_to_bottom(&mut self) {
        let Some(id) = self.active else {
            return;
        };
        while self.fall_one_row(id) {}
        self.active = None;
        self.check_for_full_lines();
    }

    /// Resolve full lines, then award points and speed up the fall.
    fn check_for_full_lines(&mut self) {
        let destroyed = self.grid.destroy_full_lines();
        self.points += self.grid.width() as u32 * destroyed;
        self.fall_interval_ms = self
            .fall_interval_ms
            .saturating_sub(FALL_INTERVAL_STEP_MS * destroyed)
            .max(FALL_INTERVAL_FLOOR_MS);
    }
}
