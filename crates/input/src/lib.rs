//! Input mapping: crossterm key events to game commands.
//!
//! Pure translation only; the shell decides when to poll and what to do with
//! start/quit keys.

pub mod map;

pub use map::{is_start_key, key_to_command, should_quit};
