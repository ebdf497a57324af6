use crate::board::{Board, CELL_SIZE};
use crate::pieces::{MoveListener, MovementRule};
use crate::render::{Renderable, Surface};
use crate::types::{Direction, PLAYER_TWO, PlayerId, Position};

const PAWN_COOLDOWN_MS: u32 = 500;
const PAWN_RADIUS: f64 = 10.0;

/// Single forward step. Player two walks toward -y, everyone else toward +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pawn {
    forward: i32,
}

impl Pawn {
    pub fn for_owner(owner: Option<PlayerId>) -> Self {
        let forward = if owner == Some(PLAYER_TWO) { -1 } else { 1 };
        Self { forward }
    }
}

impl Default for Pawn {
    fn default() -> Self {
        Self::for_owner(None)
    }
}

impl MovementRule for Pawn {
    fn direction(&self) -> Direction {
        Direction::Vertical
    }

    fn max_steps(&self) -> u32 {
        1
    }

    fn base_cooldown_ms(&self) -> u32 {
        PAWN_COOLDOWN_MS
    }

    /// Occupancy and bounds are not consulted here; the executor handles both.
    fn can_move_to(&self, from: Position, destination: Position, _board: &Board) -> bool {
        from.offset(0, self.forward) == Some(destination)
    }
}

impl Renderable for Pawn {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        let cell = f64::from(CELL_SIZE);
        surface.fill_circle(
            f64::from(position.x) * cell,
            f64::from(position.y) * cell,
            PAWN_RADIUS,
            color,
        );
    }
}

impl MoveListener for Pawn {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandSurface, DrawCommand};

    #[test]
    fn t01_pawn_reaches_only_the_square_ahead() {
        let board = Board::new(8);
        let pawn = Pawn::for_owner(Some(1));
        let from = Position::new(0, 0);

        assert!(pawn.can_move_to(from, Position::new(0, 1), &board));
        assert!(!pawn.can_move_to(from, Position::new(1, 0), &board));
        assert!(!pawn.can_move_to(from, Position::new(0, 0), &board));
        assert!(!pawn.can_move_to(from, Position::new(0, 2), &board));
    }

    #[test]
    fn pawn_never_moves_backward_or_diagonally() {
        let board = Board::new(8);
        let pawn = Pawn::for_owner(Some(1));
        let from = Position::new(3, 3);

        assert!(!pawn.can_move_to(from, Position::new(3, 2), &board));
        assert!(!pawn.can_move_to(from, Position::new(4, 4), &board));
        assert!(!pawn.can_move_to(from, Position::new(2, 4), &board));
    }

    #[test]
    fn player_two_pawns_walk_toward_lower_rows() {
        let board = Board::new(8);
        let pawn = Pawn::for_owner(Some(PLAYER_TWO));
        let from = Position::new(0, 6);

        assert!(pawn.can_move_to(from, Position::new(0, 5), &board));
        assert!(!pawn.can_move_to(from, Position::new(0, 7), &board));
    }

    #[test]
    fn neutral_pawns_walk_toward_higher_rows() {
        let board = Board::new(8);

        assert!(Pawn::default().can_move_to(Position::new(0, 1), Position::new(0, 2), &board));
        assert_eq!(Pawn::for_owner(None), Pawn::for_owner(Some(1)));
    }

    #[test]
    fn step_past_the_edge_of_i32_is_simply_unreachable() {
        let board = Board::new(8);

        assert!(!Pawn::for_owner(Some(1)).can_move_to(
            Position::new(0, i32::MAX),
            Position::new(0, i32::MIN),
            &board
        ));
        assert!(!Pawn::for_owner(Some(PLAYER_TWO)).can_move_to(
            Position::new(0, i32::MIN),
            Position::new(0, i32::MAX),
            &board
        ));
    }

    #[test]
    fn pawn_draws_a_circle_scaled_by_cell_size() {
        let mut surface = CommandSurface::new();
        Pawn::default().draw(&mut surface, Position::new(2, 3), "black");

        assert_eq!(
            surface.commands(),
            &[DrawCommand::FillCircle {
                x: 2.0 * f64::from(CELL_SIZE),
                y: 3.0 * f64::from(CELL_SIZE),
                radius: 10.0,
                color: "black".to_string(),
            }]
        );
    }
}
