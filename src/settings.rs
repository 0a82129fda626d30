use crate::board::PlayerColor;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEPTH: u32 = 3;

/// Who drives a side's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    #[default]
    Human,
    Engine,
}

impl PlayerType {
    pub fn from_str(s: &str) -> EngineResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerType::Human),
            "engine" | "ai" => Ok(PlayerType::Engine),
            _ => Err(EngineError::InvalidControl(s.to_string())),
        }
    }
}

/// Per-side control mode and search depth. Depth has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub white_player: PlayerType,
    pub black_player: PlayerType,
    pub white_depth: u32,
    pub black_depth: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            white_player: PlayerType::Human,
            black_player: PlayerType::Human,
            white_depth: DEFAULT_DEPTH,
            black_depth: DEFAULT_DEPTH,
        }
    }
}

impl GameSettings {
    pub fn validate(self) -> EngineResult<Self> {
        for (side, depth) in [("white", self.white_depth), ("black", self.black_depth)] {
            if depth == 0 {
                return Err(EngineError::InvalidDepth {
                    side: side.to_string(),
                    depth,
                });
            }
        }
        Ok(self)
    }

    pub fn player(&self, side: PlayerColor) -> PlayerType {
        match side {
            PlayerColor::White => self.white_player,
            PlayerColor::Black => self.black_player,
        }
    }

    pub fn depth(&self, side: PlayerColor) -> u32 {
        match side {
            PlayerColor::White => self.white_depth,
            PlayerColor::Black => self.black_depth,
        }
    }

    pub fn is_engine(&self, side: PlayerColor) -> bool {
        self.player(side) == PlayerType::Engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_human_at_depth_three() {
        let s = GameSettings::default();
        assert_eq!(s.player(PlayerColor::White), PlayerType::Human);
        assert_eq!(s.depth(PlayerColor::Black), 3);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let s = GameSettings {
            black_depth: 0,
            ..GameSettings::default()
        };
        assert_eq!(
            s.validate(),
            Err(EngineError::InvalidDepth {
                side: "black".to_string(),
                depth: 0
            })
        );
    }

    #[test]
    fn control_mode_parsing() {
        assert_eq!(PlayerType::from_str("AI"), Ok(PlayerType::Engine));
        assert_eq!(PlayerType::from_str("human"), Ok(PlayerType::Human));
        assert!(matches!(PlayerType::from_str("robot"), Err(EngineError::InvalidControl(_))));
    }
}
