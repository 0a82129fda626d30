//! Fixed demo/test layouts. Each clears the board and places a handful of
//! pieces that exercise one rule.

use crate::board::{Board, PieceKind, PlayerColor, Square};
use crate::error::{EngineError, EngineResult};
use crate::game::GameState;

use crate::pieces::PieceKind::{BlackMan as B, WhiteKing as WK, WhiteMan as W};

pub struct Scenario {
    pub id: u8,
    pub name: &'static str,
    pub turn: PlayerColor,
    pub pieces: &'static [(i8, i8, PieceKind)],
}

pub static SCENARIOS: [Scenario; 11] = [
    Scenario {
        id: 1,
        name: "forced capture pins the other piece",
        turn: PlayerColor::White,
        pieces: &[(5, 2, W), (6, 6, W), (4, 3, B)],
    },
    Scenario {
        id: 2,
        name: "multi-capture chain",
        turn: PlayerColor::White,
        pieces: &[(5, 2, W), (4, 3, B), (4, 5, B), (2, 3, B)],
    },
    Scenario {
        id: 3,
        name: "man cannot move backward",
        turn: PlayerColor::White,
        pieces: &[(4, 4, W)],
    },
    Scenario {
        id: 4,
        name: "forward capture by a man",
        turn: PlayerColor::White,
        pieces: &[(4, 4, W), (3, 3, B)],
    },
    Scenario {
        id: 5,
        name: "promotion",
        turn: PlayerColor::White,
        pieces: &[(1, 2, W)],
    },
    Scenario {
        id: 6,
        name: "king moves in any direction",
        turn: PlayerColor::White,
        pieces: &[(4, 4, WK)],
    },
    Scenario {
        id: 7,
        name: "king captures backward and forward",
        turn: PlayerColor::White,
        pieces: &[(4, 4, WK), (3, 3, B), (5, 5, B)],
    },
    Scenario {
        id: 8,
        name: "only one piece may capture",
        turn: PlayerColor::White,
        pieces: &[(5, 0, W), (5, 6, W), (4, 1, B)],
    },
    Scenario {
        id: 9,
        name: "only one piece may continue the chain",
        turn: PlayerColor::White,
        pieces: &[(4, 1, W), (5, 6, W), (3, 2, B), (1, 4, B), (4, 5, B)],
    },
    Scenario {
        id: 10,
        name: "capturing piece cannot step instead",
        turn: PlayerColor::White,
        pieces: &[(5, 2, W), (4, 3, B), (5, 6, W)],
    },
    Scenario {
        id: 11,
        name: "engine wins by capture",
        turn: PlayerColor::Black,
        pieces: &[(2, 3, B), (3, 4, W)],
    },
];

pub fn scenario(id: u8) -> EngineResult<&'static Scenario> {
    SCENARIOS
        .iter()
        .find(|s| s.id == id)
        .ok_or(EngineError::UnknownScenario(id))
}

/// Fresh game on the layout of scenario `id`, with no combo and no selection.
pub fn load_scenario(id: u8) -> EngineResult<GameState> {
    let s = scenario(id)?;
    let mut board = Board::new();
    for &(row, col, piece) in s.pieces {
        board.set(Square::new(row, col), piece);
    }
    Ok(GameState::from_board(board, s.turn))
}
