//! Core game rules - pure, deterministic, and testable.
//!
//! This crate holds the whole falling-block engine and nothing else: no I/O,
//! no UI, no timers. The shell owns one [`Game`] per session, drives it with
//! [`Game::tick`] at the cadence of [`Game::fall_interval_ms`], and reads the
//! board back through the query surface.
//!
//! # Module structure
//!
//! - [`piece`]: a polyomino as an anchor plus shrinking relative offsets
//! - [`grid`]: cell occupancy, movement legality, and line clearing
//! - [`game`]: the session state machine (spawn, fall, input, scoring)
//! - [`rng`]: seedable LCG for deterministic piece selection
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::{Command, GRID_HEIGHT, GRID_WIDTH};
//!
//! let mut game = Game::new(GRID_WIDTH, GRID_HEIGHT, 12345);
//! game.start();
//!
//! game.tick();
//! game.handle_input(Command::MoveLeft);
//! game.handle_input(Command::HardDrop);
//!
//! assert!(game.is_started());
//! ```

pub mod game;
pub mod grid;
pub mod piece;
pub mod rng;

pub use game::Game;
pub use grid::Grid;
pub use piece::{Piece, PieceId};
pub use rng::SimpleRng;
