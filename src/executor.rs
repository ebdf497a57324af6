use log::{debug, trace};
use serde::Serialize;

use crate::board::Board;
use crate::config::{RulesConfig, SelfCapturePolicy};
use crate::error::{GameError, IllegalReason};
use crate::pieces::{MoveListener, Piece};
use crate::types::{PieceSnapshot, Position};

/// Protocol stages, in the order they can fire during one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    WillMove,
    WillKill,
    WillDie,
    DidDie,
    DidKill,
    DidMove,
}

/// Outside view of a move, called at the same points as the piece's own hooks.
/// Kill stages get both pieces; die stages get the captured piece.
pub trait MoveObserver {
    fn will_move(&mut self, _mover: &Piece, _to: Position) {}
    fn will_kill(&mut self, _mover: &Piece, _victim: &Piece) {}
    fn will_die(&mut self, _victim: &Piece) {}
    fn did_die(&mut self, _victim: &Piece) {}
    fn did_kill(&mut self, _mover: &Piece, _victim: &Piece) {}
    fn did_move(&mut self, _mover: &Piece, _from: Position) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl MoveObserver for NoObserver {}

impl MoveObserver for Vec<Box<dyn MoveObserver>> {
    fn will_move(&mut self, mover: &Piece, to: Position) {
        self.iter_mut().for_each(|o| o.will_move(mover, to));
    }

    fn will_kill(&mut self, mover: &Piece, victim: &Piece) {
        self.iter_mut().for_each(|o| o.will_kill(mover, victim));
    }

    fn will_die(&mut self, victim: &Piece) {
        self.iter_mut().for_each(|o| o.will_die(victim));
    }

    fn did_die(&mut self, victim: &Piece) {
        self.iter_mut().for_each(|o| o.did_die(victim));
    }

    fn did_kill(&mut self, mover: &Piece, victim: &Piece) {
        self.iter_mut().for_each(|o| o.did_kill(mover, victim));
    }

    fn did_move(&mut self, mover: &Piece, from: Position) {
        self.iter_mut().for_each(|o| o.did_move(mover, from));
    }
}

/// Result of a committed move.
/// Contract:
/// - `captured` is a copy of the destroyed piece; the piece itself is gone.
/// - `mover` reflects the piece after the move (new position, kills, cooldown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub from: Position,
    pub to: Position,
    pub mover: PieceSnapshot,
    pub captured: Option<PieceSnapshot>,
    pub trace: Vec<Lifecycle>,
}

impl MoveReport {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Fires each stage on the piece hooks and the observer, and records it.
struct Dispatch<'a> {
    observer: &'a mut dyn MoveObserver,
    trace: Vec<Lifecycle>,
}

impl Dispatch<'_> {
    fn will_move(&mut self, mover: &mut Piece, from: Position, to: Position) {
        self.trace.push(Lifecycle::WillMove);
        mover.piece_will_move(from, to);
        self.observer.will_move(mover, to);
    }

    fn capture(&mut self, mover: &mut Piece, victim: &mut Piece) {
        self.trace.push(Lifecycle::WillKill);
        mover.piece_will_kill(victim);
        self.observer.will_kill(mover, victim);

        self.trace.push(Lifecycle::WillDie);
        victim.piece_will_die();
        self.observer.will_die(victim);

        self.trace.push(Lifecycle::DidDie);
        victim.piece_did_die();
        self.observer.did_die(victim);

        self.trace.push(Lifecycle::DidKill);
        mover.piece_did_kill(victim);
        self.observer.did_kill(mover, victim);
    }

    fn did_move(&mut self, mover: &mut Piece, from: Position, to: Position) {
        self.trace.push(Lifecycle::DidMove);
        mover.piece_did_move(from, to);
        self.observer.did_move(mover, from);
    }
}

/// Sole writer of piece movement on a `Board`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveExecutor {
    self_capture: SelfCapturePolicy,
    enforce_cooldowns: bool,
}

impl MoveExecutor {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            self_capture: config.self_capture,
            enforce_cooldowns: config.enforce_cooldowns,
        }
    }

    /// Moves the piece at `from` to `to`.
    /// On `Err` the board is left exactly as it was and no hook has fired.
    pub fn move_to(
        &self,
        board: &mut Board,
        from: Position,
        to: Position,
    ) -> Result<MoveReport, GameError> {
        self.move_to_observed(board, from, to, &mut NoObserver)
    }

    pub fn move_to_observed(
        &self,
        board: &mut Board,
        from: Position,
        to: Position,
        observer: &mut dyn MoveObserver,
    ) -> Result<MoveReport, GameError> {
        if let Err(err) = self.check(board, from, to) {
            trace!("move {from} -> {to} rejected: {err}");
            return Err(err);
        }
        self.commit(board, from, to, observer)
    }

    /// Every cell the piece at `from` could move to right now, row-major.
    /// Empty while the piece is cooling down under enforced cooldowns.
    pub fn legal_destinations(
        &self,
        board: &Board,
        from: Position,
    ) -> Result<Vec<Position>, GameError> {
        board
            .piece_at_location(from)?
            .ok_or(GameError::NoPiece { position: from })?;
        Ok(board
            .cells()
            .map(|cell| cell.position)
            .filter(|&to| self.check(board, from, to).is_ok())
            .collect())
    }

    fn check(&self, board: &Board, from: Position, to: Position) -> Result<(), GameError> {
        let piece = board
            .piece_at_location(from)?
            .ok_or(GameError::NoPiece { position: from })?;

        if self.enforce_cooldowns && piece.cooldown_remaining_ms() > 0 {
            return Err(GameError::CoolingDown {
                position: from,
                remaining_ms: piece.cooldown_remaining_ms(),
            });
        }

        if from == to || !piece.can_move_to(to, board) {
            return Err(GameError::IllegalMove {
                from,
                to,
                reason: IllegalReason::Unreachable,
            });
        }

        if !to.in_bounds(board.size()) {
            return Err(GameError::OutOfBounds {
                position: to,
                size: board.size(),
            });
        }

        if let Some(target) = board.piece_at_location(to)?
            && piece.is_ally_of(target)
            && self.self_capture == SelfCapturePolicy::Forbid
        {
            return Err(GameError::IllegalMove {
                from,
                to,
                reason: IllegalReason::OwnPiece,
            });
        }

        Ok(())
    }

    fn commit(
        &self,
        board: &mut Board,
        from: Position,
        to: Position,
        observer: &mut dyn MoveObserver,
    ) -> Result<MoveReport, GameError> {
        let mut mover = board
            .take_piece(from)?
            .ok_or(GameError::NoPiece { position: from })?;
        let mut hooks = Dispatch {
            observer,
            trace: Vec::with_capacity(6),
        };

        hooks.will_move(&mut mover, from, to);

        let captured = match board.take_piece(to)? {
            Some(mut victim) => {
                hooks.capture(&mut mover, &mut victim);
                mover.kills += 1;
                debug!(
                    "{:?} at {from} captured {:?} at {to}",
                    mover.kind(),
                    victim.kind()
                );
                Some(victim.snapshot())
            }
            None => None,
        };

        mover.position = to;
        mover.restart_cooldown();
        board.set_piece(to, mover)?;

        let mover = board
            .piece_at_location_mut(to)?
            .ok_or(GameError::NoPiece { position: to })?;
        hooks.did_move(mover, from, to);
        debug!("committed {:?} {from} -> {to}", mover.kind());

        Ok(MoveReport {
            from,
            to,
            mover: mover.snapshot(),
            captured,
            trace: hooks.trace,
        })
    }
}
