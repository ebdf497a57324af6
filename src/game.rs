use log::debug;

use crate::board::Board;
use crate::config::RulesConfig;
use crate::error::GameError;
use crate::executor::{MoveExecutor, MoveObserver, MoveReport};
use crate::pieces::Piece;
use crate::render::{Renderable, Surface};
use crate::types::{BoardSnapshot, PLAYER_ONE, PLAYER_TWO, PieceKind, Player, PlayerId, Position};

pub const PLAYER_ONE_COLOR: &str = "white";
pub const PLAYER_TWO_COLOR: &str = "black";
pub const NEUTRAL_COLOR: &str = "gray";
const MIN_PAWN_ROWS_SIZE: usize = 4;
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Owns the players, the board and the move executor for one game.
pub struct GameSession {
    config: RulesConfig,
    players: Vec<Player>,
    board: Board,
    executor: MoveExecutor,
    observers: Vec<Box<dyn MoveObserver>>,
}

impl GameSession {
    /// Two players and an empty board.
    pub fn new(config: RulesConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            players: vec![
                Player::new(PLAYER_ONE, PLAYER_ONE_COLOR),
                Player::new(PLAYER_TWO, PLAYER_TWO_COLOR),
            ],
            board: Board::new(config.board_size),
            executor: MoveExecutor::new(&config),
            observers: Vec::new(),
        })
    }

    /// Player one's pawns fill row 1, player two's fill row `size - 2`.
    pub fn with_pawn_rows(config: RulesConfig) -> Result<Self, GameError> {
        if config.board_size < MIN_PAWN_ROWS_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "pawn rows need a board of at least {MIN_PAWN_ROWS_SIZE}, got {}",
                config.board_size
            )));
        }
        let mut session = Self::new(config)?;
        let size = config.board_size as i32;
        for x in 0..size {
            session.place_piece(PieceKind::Pawn, Some(PLAYER_ONE), Position::new(x, 1))?;
            session.place_piece(PieceKind::Pawn, Some(PLAYER_TWO), Position::new(x, size - 2))?;
        }
        Ok(session)
    }

    /// Pawn rows plus the usual back ranks in columns 0..8.
    pub fn standard(config: RulesConfig) -> Result<Self, GameError> {
        if config.board_size < BACK_RANK.len() {
            return Err(GameError::InvalidConfig(format!(
                "back ranks need a board of at least {}, got {}",
                BACK_RANK.len(),
                config.board_size
            )));
        }
        let mut session = Self::with_pawn_rows(config)?;
        let last = config.board_size as i32 - 1;
        for (x, kind) in (0..).zip(BACK_RANK) {
            session.place_piece(kind, Some(PLAYER_ONE), Position::new(x, 0))?;
            session.place_piece(kind, Some(PLAYER_TWO), Position::new(x, last))?;
        }
        Ok(session)
    }

    /// Observers see every committed move, after the piece's own hook at each stage.
    pub fn add_observer(&mut self, observer: Box<dyn MoveObserver>) {
        self.observers.push(observer);
    }

    pub fn add_player(&mut self, color: impl Into<String>) -> Result<PlayerId, GameError> {
        let next = self
            .players
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| GameError::InvalidConfig("too many players".to_string()))?;
        self.players.push(Player::new(next, color));
        Ok(next)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// `owner == None` places a neutral piece.
    pub fn place_piece(
        &mut self,
        kind: PieceKind,
        owner: Option<PlayerId>,
        position: Position,
    ) -> Result<(), GameError> {
        if let Some(id) = owner
            && self.player(id).is_none()
        {
            return Err(GameError::UnknownPlayer(id));
        }
        self.board
            .place_piece(Piece::new(kind, owner, position), position)
    }

    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<MoveReport, GameError> {
        let report = self
            .executor
            .move_to_observed(&mut self.board, from, to, &mut self.observers)?;
        if let Some(captured) = &report.captured {
            debug!(
                "player {:?} lost a {:?}, {} pieces left on board",
                captured.owner,
                captured.kind,
                self.board.piece_count()
            );
        }
        Ok(report)
    }

    pub fn legal_destinations(&self, from: Position) -> Result<Vec<Position>, GameError> {
        self.executor.legal_destinations(&self.board, from)
    }

    pub fn piece_at(&self, position: Position) -> Result<Option<&Piece>, GameError> {
        self.board.piece_at_location(position)
    }

    pub fn piece_count(&self) -> usize {
        self.board.piece_count()
    }

    pub fn pieces_of(&self, owner: PlayerId) -> impl Iterator<Item = &Piece> {
        self.board.pieces_of(owner)
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.board.tick(elapsed_ms);
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Draws every cell, then every occupant in its owner's color.
    pub fn render(&self, surface: &mut dyn Surface) {
        for cell in self.board.cells() {
            surface.fill_cell(cell.position, cell.size, &cell.color);
        }
        for piece in self.board.pieces() {
            piece.draw(surface, piece.position(), self.color_of(piece.owner()));
        }
    }

    fn color_of(&self, owner: Option<PlayerId>) -> &str {
        owner
            .and_then(|id| self.player(id))
            .map_or(NEUTRAL_COLOR, |p| p.color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelfCapturePolicy;
    use crate::error::IllegalReason;
    use crate::executor::Lifecycle;
    use crate::render::{CommandSurface, DrawCommand};

    fn small_config(size: usize) -> RulesConfig {
        RulesConfig {
            board_size: size,
            ..RulesConfig::default()
        }
    }

    #[test]
    fn initial_session_has_two_players_and_an_empty_board() {
        let session = GameSession::new(RulesConfig::default()).unwrap();

        assert_eq!(session.players().len(), 2);
        assert_eq!(session.player(PLAYER_ONE).unwrap().color, PLAYER_ONE_COLOR);
        assert_eq!(session.player(PLAYER_TWO).unwrap().color, PLAYER_TWO_COLOR);
        assert_eq!(session.board().size(), 8);
        assert_eq!(session.piece_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            GameSession::new(small_config(0)),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameSession::with_pawn_rows(small_config(3)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn pawn_rows_fill_both_sides() {
        let session = GameSession::with_pawn_rows(RulesConfig::default()).unwrap();

        assert_eq!(session.piece_count(), 16);
        assert!(session.pieces_of(PLAYER_ONE).all(|p| p.position().y == 1));
        assert!(session.pieces_of(PLAYER_TWO).all(|p| p.position().y == 6));
    }

    #[test]
    fn placing_for_unknown_player_fails() {
        let mut session = GameSession::new(small_config(4)).unwrap();

        assert_eq!(
            session.place_piece(PieceKind::Pawn, Some(9), Position::new(0, 0)),
            Err(GameError::UnknownPlayer(9))
        );
        session
            .place_piece(PieceKind::Pawn, None, Position::new(0, 0))
            .unwrap();
        assert_eq!(session.piece_count(), 1);
    }

    #[test]
    fn added_players_get_fresh_ids() {
        let mut session = GameSession::new(small_config(4)).unwrap();

        let id = session.add_player("red").unwrap();

        assert_eq!(id, 3);
        assert_eq!(session.player(id).unwrap().color, "red");
    }

    #[test]
    fn pawns_advance_into_each_other_and_capture() {
        let mut session = GameSession::new(small_config(6)).unwrap();
        session
            .place_piece(PieceKind::Pawn, Some(PLAYER_ONE), Position::new(2, 1))
            .unwrap();
        session
            .place_piece(PieceKind::Pawn, Some(PLAYER_TWO), Position::new(2, 3))
            .unwrap();

        let first = session
            .move_piece(Position::new(2, 1), Position::new(2, 2))
            .unwrap();
        assert!(!first.is_capture());

        let second = session
            .move_piece(Position::new(2, 2), Position::new(2, 3))
            .unwrap();
        assert!(second.is_capture());
        assert_eq!(second.trace.first(), Some(&Lifecycle::WillMove));
        assert_eq!(second.trace.last(), Some(&Lifecycle::DidMove));
        assert_eq!(session.pieces_of(PLAYER_TWO).count(), 0);
        assert_eq!(
            session.piece_at(Position::new(2, 3)).unwrap().unwrap().kills(),
            1
        );
    }

    #[test]
    fn self_capture_policy_flows_from_config() {
        let mut forbid = GameSession::new(small_config(4)).unwrap();
        let mut allow = GameSession::new(RulesConfig {
            self_capture: SelfCapturePolicy::Allow,
            ..small_config(4)
        })
        .unwrap();
        for session in [&mut forbid, &mut allow] {
            session
                .place_piece(PieceKind::Pawn, Some(PLAYER_ONE), Position::new(0, 0))
                .unwrap();
            session
                .place_piece(PieceKind::Pawn, Some(PLAYER_ONE), Position::new(0, 1))
                .unwrap();
        }

        let err = forbid
            .move_piece(Position::new(0, 0), Position::new(0, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove {
                reason: IllegalReason::OwnPiece,
                ..
            }
        ));
        assert!(allow
            .move_piece(Position::new(0, 0), Position::new(0, 1))
            .unwrap()
            .is_capture());
    }

    #[test]
    fn render_draws_cells_then_pieces_in_owner_color() {
        let mut session = GameSession::new(small_config(2)).unwrap();
        session
            .place_piece(PieceKind::Pawn, Some(PLAYER_TWO), Position::new(1, 0))
            .unwrap();
        session
            .place_piece(PieceKind::Pawn, None, Position::new(0, 1))
            .unwrap();
        let before = session.snapshot();

        let mut surface = CommandSurface::new();
        session.render(&mut surface);
        let commands = surface.into_commands();

        assert_eq!(commands.len(), 6);
        assert!(commands[..4]
            .iter()
            .all(|c| matches!(c, DrawCommand::FillCell { .. })));
        assert!(matches!(
            &commands[4],
            DrawCommand::FillCircle { color, .. } if color == PLAYER_TWO_COLOR
        ));
        assert!(matches!(
            &commands[5],
            DrawCommand::FillCircle { color, .. } if color == NEUTRAL_COLOR
        ));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn tick_reaches_board_pieces() {
        let mut session = GameSession::new(small_config(4)).unwrap();
        session
            .place_piece(PieceKind::Pawn, Some(PLAYER_ONE), Position::new(0, 0))
            .unwrap();
        session
            .move_piece(Position::new(0, 0), Position::new(0, 1))
            .unwrap();

        session.tick(100);

        let snap = session.snapshot();
        let cell = &snap.cells[4];
        assert_eq!(cell.occupant.as_ref().unwrap().cooldown_remaining_ms, 400);
    }

    #[test]
    fn player_two_pawns_advance_toward_row_zero() {
        let mut session = GameSession::with_pawn_rows(RulesConfig::default()).unwrap();

        assert!(session
            .move_piece(Position::new(0, 6), Position::new(0, 7))
            .is_err());
        session
            .move_piece(Position::new(0, 6), Position::new(0, 5))
            .unwrap();
        for y in (2..5).rev() {
            session
                .move_piece(Position::new(0, y + 1), Position::new(0, y))
                .unwrap();
        }

        let report = session
            .move_piece(Position::new(0, 2), Position::new(0, 1))
            .unwrap();
        assert_eq!(report.mover.owner, Some(PLAYER_TWO));
        assert_eq!(report.captured.unwrap().owner, Some(PLAYER_ONE));
        assert_eq!(session.pieces_of(PLAYER_ONE).count(), 7);
    }

    #[test]
    fn standard_setup_places_back_ranks() {
        let session = GameSession::standard(RulesConfig::default()).unwrap();

        assert_eq!(session.piece_count(), 32);
        let kind_at = |x, y| session.piece_at(Position::new(x, y)).unwrap().unwrap().kind();
        assert_eq!(kind_at(3, 0), PieceKind::Queen);
        assert_eq!(kind_at(4, 7), PieceKind::King);
        assert_eq!(kind_at(0, 7), PieceKind::Rook);
        assert!(session.legal_destinations(Position::new(0, 0)).unwrap().is_empty());
        assert_eq!(
            session.legal_destinations(Position::new(1, 0)).unwrap(),
            vec![Position::new(0, 2), Position::new(2, 2)]
        );
        assert!(matches!(
            GameSession::standard(small_config(7)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn session_observers_see_moves_but_not_rejections() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Log(Rc<RefCell<Vec<String>>>);

        impl MoveObserver for Log {
            fn will_move(&mut self, mover: &Piece, to: Position) {
                self.0.borrow_mut().push(format!("will_move {} {to}", mover.position()));
            }

            fn did_kill(&mut self, mover: &Piece, victim: &Piece) {
                self.0
                    .borrow_mut()
                    .push(format!("did_kill {:?} {:?}", mover.owner(), victim.owner()));
            }

            fn did_move(&mut self, mover: &Piece, from: Position) {
                self.0.borrow_mut().push(format!("did_move {from} {}", mover.position()));
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut session = GameSession::new(small_config(4)).unwrap();
        session.add_observer(Box::new(Log(log.clone())));
        session
            .place_piece(PieceKind::Knight, Some(PLAYER_ONE), Position::new(0, 0))
            .unwrap();
        session
            .place_piece(PieceKind::Pawn, Some(PLAYER_TWO), Position::new(1, 2))
            .unwrap();

        assert!(session
            .move_piece(Position::new(0, 0), Position::new(1, 1))
            .is_err());
        assert!(log.borrow().is_empty());

        session
            .move_piece(Position::new(0, 0), Position::new(1, 2))
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "will_move (0, 0) (1, 2)".to_string(),
                "did_kill Some(1) Some(2)".to_string(),
                "did_move (0, 0) (1, 2)".to_string(),
            ]
        );
    }
}
