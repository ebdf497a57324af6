use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate.
/// Contract:
/// - Any value is a valid `Position`, including negative or oversized ones.
/// - Only in-bounds positions are ever committed into a `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `0 <= x < size && 0 <= y < size`.
    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        let size = size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }

    /// `None` when either coordinate would overflow.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type PlayerId = u8;

pub const PLAYER_ONE: PlayerId = 1;
pub const PLAYER_TWO: PlayerId = 2;

/// A participant. Created at session setup and kept for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub color: String,
}

impl Player {
    pub fn new(id: PlayerId, color: impl Into<String>) -> Self {
        Self {
            id,
            color: color.into(),
        }
    }
}

/// Movement class of a piece variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
    /// Horizontal or vertical.
    Orthogonal,
    /// Orthogonal or diagonal.
    Omni,
    /// Knight jumps; intermediate squares are ignored.
    Leap,
}

impl Direction {
    /// Unit steps for sliding classes, jump deltas for `Leap`.
    pub fn steps(self) -> &'static [(i32, i32)] {
        match self {
            Self::Horizontal => &HORIZONTAL_STEPS,
            Self::Vertical => &VERTICAL_STEPS,
            Self::Diagonal => &DIAGONAL_STEPS,
            Self::Orthogonal => &ORTHOGONAL_STEPS,
            Self::Omni => &OMNI_STEPS,
            Self::Leap => &LEAP_DELTAS,
        }
    }
}

const HORIZONTAL_STEPS: [(i32, i32); 2] = [(1, 0), (-1, 0)];
const VERTICAL_STEPS: [(i32, i32); 2] = [(0, 1), (0, -1)];
const DIAGONAL_STEPS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const OMNI_STEPS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const LEAP_DELTAS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Read-only view of a piece handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub owner: Option<PlayerId>,
    pub kills: u32,
    pub cooldown_ms: u32,
    pub cooldown_remaining_ms: u32,
    pub max_steps: u32,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub x: i32,
    pub y: i32,
    pub size: u32,
    pub color: String,
    pub occupant: Option<PieceSnapshot>,
}

/// Public board state returned from WASM APIs.
/// Contract:
/// - `cells` is row-major: index `y * size + x`.
/// - `cells.len() == size * size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub cells: Vec<CellSnapshot>,
}
