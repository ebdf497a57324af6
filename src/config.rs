use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const DEFAULT_BOARD_SIZE: usize = 8;
pub const MAX_BOARD_SIZE: usize = 64;

/// What happens when a move lands on a piece of the same owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfCapturePolicy {
    /// The move is rejected as illegal.
    #[default]
    Forbid,
    /// The own piece is captured like an opponent's.
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub board_size: usize,
    pub self_capture: SelfCapturePolicy,
    pub enforce_cooldowns: bool,
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "board_size must be in 1..={MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            self_capture: SelfCapturePolicy::Forbid,
            enforce_cooldowns: false,
        }
    }
}
