use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::RulesConfig;
use crate::error::GameError;
use crate::game::GameSession;
use crate::render::CommandSurface;
use crate::types::{PieceKind, PlayerId, Position};

#[wasm_bindgen]
pub struct GameHandle {
    session: GameSession,
    last_update: Instant,
}

#[wasm_bindgen]
impl GameHandle {
    /// `config` may be `undefined`; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GameHandle, JsValue> {
        let session = GameSession::new(parse_config(config)?).map_err(to_js_error)?;
        Ok(Self::from_session(session))
    }

    #[wasm_bindgen]
    pub fn with_pawn_rows(config: JsValue) -> Result<GameHandle, JsValue> {
        let session = GameSession::with_pawn_rows(parse_config(config)?).map_err(to_js_error)?;
        Ok(Self::from_session(session))
    }

    #[wasm_bindgen]
    pub fn standard(config: JsValue) -> Result<GameHandle, JsValue> {
        let session = GameSession::standard(parse_config(config)?).map_err(to_js_error)?;
        Ok(Self::from_session(session))
    }

    /// `kind` is a snake_case piece name such as `"queen"`.
    #[wasm_bindgen]
    pub fn place_piece(
        &mut self,
        kind: JsValue,
        owner: Option<PlayerId>,
        x: i32,
        y: i32,
    ) -> Result<(), JsValue> {
        let kind: PieceKind = serde_wasm_bindgen::from_value(kind).map_err(JsValue::from)?;
        self.session
            .place_piece(kind, owner, Position::new(x, y))
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn place_pawn(&mut self, owner: Option<PlayerId>, x: i32, y: i32) -> Result<(), JsValue> {
        self.session
            .place_piece(PieceKind::Pawn, owner, Position::new(x, y))
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn move_piece(
        &mut self,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
    ) -> Result<JsValue, JsValue> {
        let report = self
            .session
            .move_piece(Position::new(from_x, from_y), Position::new(to_x, to_y))
            .map_err(to_js_error)?;
        to_js(&report)
    }

    #[wasm_bindgen]
    pub fn legal_destinations(&self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let destinations = self
            .session
            .legal_destinations(Position::new(x, y))
            .map_err(to_js_error)?;
        to_js(&destinations)
    }

    #[wasm_bindgen]
    pub fn piece_at(&self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let piece = self
            .session
            .piece_at(Position::new(x, y))
            .map_err(to_js_error)?;
        to_js(&piece.map(|p| p.snapshot()))
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.snapshot())
    }

    #[wasm_bindgen]
    pub fn draw_commands(&self) -> Result<JsValue, JsValue> {
        let mut surface = CommandSurface::new();
        self.session.render(&mut surface);
        to_js(&surface.into_commands())
    }

    #[wasm_bindgen]
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
    }

    /// Ticks by the wall-clock time since the previous call.
    #[wasm_bindgen]
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_millis();
        self.last_update = now;
        self.session.tick(u32::try_from(elapsed).unwrap_or(u32::MAX));
    }

    #[wasm_bindgen]
    pub fn piece_count(&self) -> usize {
        self.session.piece_count()
    }

    #[wasm_bindgen]
    pub fn board_size(&self) -> usize {
        self.session.board().size()
    }
}

impl GameHandle {
    fn from_session(session: GameSession) -> Self {
        Self {
            session,
            last_update: Instant::now(),
        }
    }
}

fn parse_config(config: JsValue) -> Result<RulesConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(RulesConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(JsValue::from)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn undefined_config_builds_default_board() {
        let handle = GameHandle::new(JsValue::UNDEFINED).unwrap();

        assert_eq!(handle.board_size(), 8);
        assert_eq!(handle.piece_count(), 0);
    }

    #[wasm_bindgen_test]
    fn illegal_move_surfaces_as_js_error_text() {
        let mut handle = GameHandle::with_pawn_rows(JsValue::UNDEFINED).unwrap();

        let err = handle.move_piece(0, 1, 1, 1).unwrap_err();

        assert!(err.as_string().unwrap().contains("illegal move"));
        assert_eq!(handle.piece_count(), 16);
    }

    #[wasm_bindgen_test]
    fn move_report_exposes_trace() {
        let mut handle = GameHandle::with_pawn_rows(JsValue::UNDEFINED).unwrap();

        let report = handle.move_piece(0, 1, 0, 2).unwrap();
        let trace = js_sys::Reflect::get(&report, &JsValue::from_str("trace")).unwrap();

        assert_eq!(js_sys::Array::from(&trace).length(), 2);
    }

    #[wasm_bindgen_test]
    fn placed_officers_report_their_destinations() {
        let mut handle = GameHandle::new(JsValue::UNDEFINED).unwrap();
        handle
            .place_piece(JsValue::from_str("king"), Some(1), 0, 0)
            .unwrap();

        let destinations = handle.legal_destinations(0, 0).unwrap();

        assert_eq!(js_sys::Array::from(&destinations).length(), 3);
        assert!(handle
            .place_piece(JsValue::from_str("dragon"), Some(1), 1, 1)
            .is_err());
    }
}
