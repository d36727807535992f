//! Core types shared across the workspace.
//!
//! This crate contains pure data types with no external dependencies:
//! coordinates, transforms, piece variants, input commands, and the
//! board/timing constants.

use std::ops::{Add, AddAssign};

/// Default board dimensions (columns x rows).
pub const GRID_WIDTH: i32 = 10;
pub const GRID_HEIGHT: i32 = 15;

/// Fall timing (in milliseconds).
pub const START_FALL_INTERVAL_MS: u32 = 500;
/// Speed-up per cleared line.
pub const FALL_INTERVAL_STEP_MS: u32 = 20;
/// Lower clamp for the fall interval.
pub const FALL_INTERVAL_FLOOR_MS: u32 = 50;

/// A position on the grid, or a relative cell offset.
///
/// Value type; equality is by field comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const DOWN: Vector = Vector { x: 0, y: 1 };
    pub const LEFT: Vector = Vector { x: -1, y: 0 };
    pub const RIGHT: Vector = Vector { x: 1, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 90° clockwise rotation about the origin.
    pub const fn rotate_right(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// 90° counter-clockwise rotation about the origin.
    pub const fn rotate_left(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Rotation direction for a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Cw,
    Ccw,
}

impl Spin {
    /// Apply this rotation to a single offset.
    pub fn apply(self, v: Vector) -> Vector {
        match self {
            Spin::Cw => v.rotate_right(),
            Spin::Ccw => v.rotate_left(),
        }
    }
}

/// Candidate-cell transform used by movement/rotation legality checks.
///
/// Each variant maps to a pure function over a piece's relative offsets:
/// translations add a unit vector, rotations map the offset through a 90°
/// rotation about the piece anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    TranslateLeft,
    TranslateRight,
    TranslateDown,
    RotateCw,
    RotateCcw,
}

impl Transform {
    /// Apply the transform to one relative offset.
    pub fn apply(self, offset: Vector) -> Vector {
        match self {
            Transform::TranslateLeft => offset + Vector::LEFT,
            Transform::TranslateRight => offset + Vector::RIGHT,
            Transform::TranslateDown => offset + Vector::DOWN,
            Transform::RotateCw => offset.rotate_right(),
            Transform::RotateCcw => offset.rotate_left(),
        }
    }
}

/// The seven piece variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    T,
    L,
    F,
}

impl PieceKind {
    /// All variants, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::L,
        PieceKind::F,
    ];

    /// Cosmetic color tag carried for rendering only.
    pub fn color(self) -> PieceColor {
        match self {
            PieceKind::O => PieceColor::Yellow,
            PieceKind::I => PieceColor::Blue,
            PieceKind::S => PieceColor::Green,
            PieceKind::Z => PieceColor::Red,
            PieceKind::T => PieceColor::Purple,
            PieceKind::L => PieceColor::Orange,
            PieceKind::F => PieceColor::DarkBlue,
        }
    }

    /// Whether rotation changes this piece. The 2x2 square is
    /// rotation-invariant, so rotating it is a no-op.
    pub fn rotates(self) -> bool {
        !matches!(self, PieceKind::O)
    }
}

/// Cosmetic cell color, one per piece variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Yellow,
    Blue,
    Green,
    Red,
    Purple,
    Orange,
    DarkBlue,
}

/// Input commands accepted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    HardDrop,
}

impl Command {
    /// The transform whose candidate cells must be legal before the
    /// command is applied.
    ///
    /// Hard drop is gated on a single one-row fall; the drop itself is a
    /// repeated soft-fall step.
    pub fn transform(self) -> Transform {
        match self {
            Command::MoveLeft => Transform::TranslateLeft,
            Command::MoveRight => Transform::TranslateRight,
            Command::RotateCw => Transform::RotateCw,
            Command::RotateCcw => Transform::RotateCcw,
            Command::HardDrop => Transform::TranslateDown,
        }
    }
}
