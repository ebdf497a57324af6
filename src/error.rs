use thiserror::Error;

use crate::types::{PlayerId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// The piece's movement rule rejects the destination.
    Unreachable,
    /// The destination holds a piece of the same owner.
    OwnPiece,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move from {from} to {to}: {reason:?}")]
    IllegalMove {
        from: Position,
        to: Position,
        reason: IllegalReason,
    },
    #[error("position {position} is outside the {size}x{size} board")]
    OutOfBounds { position: Position, size: usize },
    #[error("no cell at {position}")]
    NotFound { position: Position },
    #[error("no piece at {position}")]
    NoPiece { position: Position },
    #[error("cell {position} is already occupied")]
    Occupied { position: Position },
    #[error("piece at {position} is cooling down for {remaining_ms}ms")]
    CoolingDown { position: Position, remaining_ms: u32 },
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

