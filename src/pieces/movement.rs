use crate::board::Board;
use crate::types::{Direction, Position};

/// `max_steps` of pieces that slide until blocked or off the board.
pub const UNBOUNDED_STEPS: u32 = u32::MAX;

/// Whether `to` is reachable from `from` by `direction` within `max_steps`.
/// Sliding classes need every square strictly between the two to be empty;
/// `Leap` ignores them. The destination's occupant is not consulted.
pub fn reaches(
    direction: Direction,
    max_steps: u32,
    from: Position,
    to: Position,
    board: &Board,
) -> bool {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);

    if direction == Direction::Leap {
        return max_steps > 0
            && direction
                .steps()
                .iter()
                .any(|&(sx, sy)| i64::from(sx) == dx && i64::from(sy) == dy);
    }

    let distance = dx.abs().max(dy.abs());
    if distance == 0 || distance > i64::from(max_steps) {
        return false;
    }
    if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
        return false;
    }
    let step = (dx.signum() as i32, dy.signum() as i32);
    if !direction.steps().contains(&step) {
        return false;
    }

    // Squares past the board edge count as blocking, so this stops within `size` steps.
    let mut cursor = from;
    for _ in 1..distance {
        cursor = match cursor.offset(step.0, step.1) {
            Some(next) => next,
            None => return false,
        };
        if !matches!(board.piece_at_location(cursor), Ok(None)) {
            return false;
        }
    }
    true
}
