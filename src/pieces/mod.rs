pub mod movement;
mod officers;
mod pawn;

pub use movement::UNBOUNDED_STEPS;
pub use officers::{Bishop, King, Knight, Queen, Rook};
pub use pawn::Pawn;

use crate::board::Board;
use crate::render::{Renderable, Surface};
use crate::types::{Direction, PLAYER_ONE, PieceKind, PieceSnapshot, PlayerId, Position};

/// Legality rule supplied by each piece variant.
pub trait MovementRule {
    fn direction(&self) -> Direction;
    fn max_steps(&self) -> u32;
    fn base_cooldown_ms(&self) -> u32;

    /// Pure predicate: must not mutate the board or the piece.
    fn can_move_to(&self, from: Position, destination: Position, board: &Board) -> bool;
}

/// Optional lifecycle hooks. A variant overrides only the hooks it cares about;
/// the rest are no-ops.
pub trait MoveListener {
    fn piece_will_move(&mut self, _from: Position, _to: Position) {}
    fn piece_did_move(&mut self, _from: Position, _to: Position) {}
    fn piece_will_kill(&mut self, _target: &Piece) {}
    fn piece_did_kill(&mut self, _target: &Piece) {}
    fn piece_will_die(&mut self) {}
    fn piece_did_die(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieceVariant {
    Pawn(Pawn),
    Knight(Knight),
    Bishop(Bishop),
    Rook(Rook),
    Queen(Queen),
    King(King),
}

impl PieceVariant {
    /// Pawns take their forward direction from the owner.
    pub fn from_kind(kind: PieceKind, owner: Option<PlayerId>) -> Self {
        match kind {
            PieceKind::Pawn => Self::Pawn(Pawn::for_owner(owner)),
            PieceKind::Knight => Self::Knight(Knight),
            PieceKind::Bishop => Self::Bishop(Bishop),
            PieceKind::Rook => Self::Rook(Rook),
            PieceKind::Queen => Self::Queen(Queen),
            PieceKind::King => Self::King(King),
        }
    }

    pub fn kind(&self) -> PieceKind {
        match self {
            Self::Pawn(_) => PieceKind::Pawn,
            Self::Knight(_) => PieceKind::Knight,
            Self::Bishop(_) => PieceKind::Bishop,
            Self::Rook(_) => PieceKind::Rook,
            Self::Queen(_) => PieceKind::Queen,
            Self::King(_) => PieceKind::King,
        }
    }

    fn rule(&self) -> &dyn MovementRule {
        match self {
            Self::Pawn(p) => p,
            Self::Knight(p) => p,
            Self::Bishop(p) => p,
            Self::Rook(p) => p,
            Self::Queen(p) => p,
            Self::King(p) => p,
        }
    }

    fn renderer(&self) -> &dyn Renderable {
        match self {
            Self::Pawn(p) => p,
            Self::Knight(p) => p,
            Self::Bishop(p) => p,
            Self::Rook(p) => p,
            Self::Queen(p) => p,
            Self::King(p) => p,
        }
    }

    fn listener(&mut self) -> &mut dyn MoveListener {
        match self {
            Self::Pawn(p) => p,
            Self::Knight(p) => p,
            Self::Bishop(p) => p,
            Self::Rook(p) => p,
            Self::Queen(p) => p,
            Self::King(p) => p,
        }
    }
}

/// A game entity. Owned by exactly one board cell while alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    variant: PieceVariant,
    owner: Option<PlayerId>,
    pub(crate) position: Position,
    pub(crate) kills: u32,
    pub(crate) cooldown_remaining_ms: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Option<PlayerId>, position: Position) -> Self {
        Self {
            variant: PieceVariant::from_kind(kind, owner),
            owner,
            position,
            kills: 0,
            cooldown_remaining_ms: 0,
        }
    }

    pub fn pawn(owner: PlayerId, position: Position) -> Self {
        Self::new(PieceKind::Pawn, Some(owner), position)
    }

    pub fn kind(&self) -> PieceKind {
        self.variant.kind()
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn direction(&self) -> Direction {
        self.variant.rule().direction()
    }

    pub fn max_steps(&self) -> u32 {
        self.variant.rule().max_steps()
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.variant.rule().base_cooldown_ms()
    }

    pub fn cooldown_remaining_ms(&self) -> u32 {
        self.cooldown_remaining_ms
    }

    /// Neutral pieces never share an owner with anyone, including each other.
    pub fn is_ally_of(&self, other: &Piece) -> bool {
        matches!((self.owner, other.owner), (Some(a), Some(b)) if a == b)
    }

    pub fn can_move_to(&self, destination: Position, board: &Board) -> bool {
        self.variant
            .rule()
            .can_move_to(self.position, destination, board)
    }

    pub(crate) fn tick(&mut self, elapsed_ms: u32) {
        self.cooldown_remaining_ms = self.cooldown_remaining_ms.saturating_sub(elapsed_ms);
    }

    pub(crate) fn restart_cooldown(&mut self) {
        self.cooldown_remaining_ms = self.cooldown_ms();
    }

    pub fn snapshot(&self) -> PieceSnapshot {
        PieceSnapshot {
            kind: self.kind(),
            owner: self.owner,
            kills: self.kills,
            cooldown_ms: self.cooldown_ms(),
            cooldown_remaining_ms: self.cooldown_remaining_ms,
            max_steps: self.max_steps(),
            direction: self.direction(),
        }
    }

    /// Single-character glyph used by the text rendering of a board.
    /// Player one gets the white set, other players the black set, neutral
    /// pieces a lowercase letter.
    pub fn glyph(&self) -> char {
        let (white, black, neutral) = match self.kind() {
            PieceKind::Pawn => ('♙', '♟', 'p'),
            PieceKind::Knight => ('♘', '♞', 'n'),
            PieceKind::Bishop => ('♗', '♝', 'b'),
            PieceKind::Rook => ('♖', '♜', 'r'),
            PieceKind::Queen => ('♕', '♛', 'q'),
            PieceKind::King => ('♔', '♚', 'k'),
        };
        match self.owner {
            Some(PLAYER_ONE) => white,
            Some(_) => black,
            None => neutral,
        }
    }
}

impl Renderable for Piece {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str) {
        self.variant.renderer().draw(surface, position, color);
    }
}

impl MoveListener for Piece {
    fn piece_will_move(&mut self, from: Position, to: Position) {
        self.variant.listener().piece_will_move(from, to);
    }

    fn piece_did_move(&mut self, from: Position, to: Position) {
        self.variant.listener().piece_did_move(from, to);
    }

    fn piece_will_kill(&mut self, target: &Piece) {
        self.variant.listener().piece_will_kill(target);
    }

    fn piece_did_kill(&mut self, target: &Piece) {
        self.variant.listener().piece_did_kill(target);
    }

    fn piece_will_die(&mut self) {
        self.variant.listener().piece_will_die();
    }

    fn piece_did_die(&mut self) {
        self.variant.listener().piece_did_die();
    }
}
