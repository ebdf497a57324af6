//! Non-pawn pieces. Each is a direction class plus a step limit; legality comes
//! from `movement::reaches`.

use crate::board::{Board, CELL_SIZE};
use crate::pieces::movement::{UNBOUNDED_STEPS, reaches};
use crate::pieces::{MoveListener, MovementRule};
use crate::render::{Renderable, Surface};
use crate::types::{Direction, Position};

const TOKEN_RADIUS: f64 = 16.0;

const KNIGHT_COOLDOWN_MS: u32 = 1_500;
const BISHOP_COOLDOWN_MS: u32 = 1_500;
const ROOK_COOLDOWN_MS: u32 = 5_000;
const QUEEN_COOLDOWN_MS: u32 = 9_000;
const KING_COOLDOWN_MS: u32 = 1_500;

fn draw_token(surface: &mut dyn Surface, position: Position, color: &str, letter: char) {
    let cell = f64::from(CELL_SIZE);
    let (cx, cy) = (f64::from(position.x) * cell, f64::from(position.y) * cell);
    surface.fill_circle(cx, cy, TOKEN_RADIUS, color);
    surface.draw_glyph(cx, cy, letter, color);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Knight;

impl MovementRule for Knight {
    fn direction(&self) -> Direction {
        Direction::Leap
    }

    fn max_steps(&self) -> u32 {
        1
    }

    fn base_cooldown_ms(&self) -> u32 {
        KNIGHT_COOLDOWN_MS
    }

    fn can_move_to(&self, from: Position, destination: Position, board: &Board) -> bool {
        reaches(self.direction(), self.max_steps(), from, destination, board)
    }
}

impl Renderable for Knight {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        draw_token(surface, position, color, 'N');
    }
}

impl MoveListener for Knight {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bishop;

impl MovementRule for Bishop {
    fn direction(&self) -> Direction {
        Direction::Diagonal
    }

    fn max_steps(&self) -> u32 {
        UNBOUNDED_STEPS
    }

    fn base_cooldown_ms(&self) -> u32 {
        BISHOP_COOLDOWN_MS
    }

    fn can_move_to(&self, from: Position, destination: Position, board: &Board) -> bool {
        reaches(self.direction(), self.max_steps(), from, destination, board)
    }
}

impl Renderable for Bishop {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        draw_token(surface, position, color, 'B');
    }
}

impl MoveListener for Bishop {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rook;

impl MovementRule for Rook {
    fn direction(&self) -> Direction {
        Direction::Orthogonal
    }

    fn max_steps(&self) -> u32 {
        UNBOUNDED_STEPS
    }

    fn base_cooldown_ms(&self) -> u32 {
        ROOK_COOLDOWN_MS
    }

    fn can_move_to(&self, from: Position, destination: Position, board: &Board) -> bool {
        reaches(self.direction(), self.max_steps(), from, destination, board)
    }
}

impl Renderable for Rook {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        draw_token(surface, position, color, 'R');
    }
}

impl MoveListener for Rook {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Queen;

impl MovementRule for Queen {
    fn direction(&self) -> Direction {
        Direction::Omni
    }

    fn max_steps(&self) -> u32 {
        UNBOUNDED_STEPS
    }

    fn base_cooldown_ms(&self) -> u32 {
        QUEEN_COOLDOWN_MS
    }

    fn can_move_to(&self, from: Position, destination: Position, board: &Board) -> bool {
        reaches(self.direction(), self.max_steps(), from, destination, board)
    }
}

impl Renderable for Queen {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        draw_token(surface, position, color, 'Q');
    }
}

impl MoveListener for Queen {}

/// One step in any direction. No check rules apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct King;

impl MovementRule for King {
    fn direction(&self) -> Direction {
        Direction::Omni
    }

    fn max_steps(&self) -> u32 {
        1
    }

    fn base_cooldown_ms(&self) -> u32 {
        KING_COOLDOWN_MS
    }

    fn can_move_to(&self, from: Position, destination: Position, board: &Board) -> bool {
        reaches(self.direction(), self.max_steps(), from, destination, board)
    }
}

impl Renderable for King {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        draw_token(surface, position, color, 'K');
    }
}

impl MoveListener for King {}
