use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod executor;
pub mod game;
pub mod pieces;
pub mod render;
pub mod types;
pub mod wasm;

pub use board::{Board, GridCell};
pub use config::{RulesConfig, SelfCapturePolicy};
pub use error::{GameError, IllegalReason};
pub use executor::{Lifecycle, MoveExecutor, MoveObserver, MoveReport, NoObserver};
pub use game::GameSession;
pub use pieces::{
    Bishop, King, Knight, MoveListener, MovementRule, Pawn, Piece, PieceVariant, Queen, Rook,
    UNBOUNDED_STEPS,
};
pub use types::{Direction, PieceKind, Player, PlayerId, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
