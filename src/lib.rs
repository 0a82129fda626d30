use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod moves;
pub mod pieces;
pub mod scenarios;
pub mod search;
pub mod settings;
mod utils;

use board::{Board, PlayerColor, Square};
use error::EngineError;
use game::GameState;
use moves::Move;
use search::SearchLimits;
use settings::GameSettings;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

impl From<EngineError> for JsValue {
    fn from(e: EngineError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub fn parse_side(s: &str) -> Result<PlayerColor, EngineError> {
    PlayerColor::from_str(s).ok_or_else(|| EngineError::InvalidSide(s.to_string()))
}

#[derive(Serialize)]
struct JsSelectable {
    from: Square,
    to: Vec<Square>,
}

#[derive(Serialize)]
struct JsMoveWithEval {
    from: Square,
    to: Square,
    is_capture: bool,
    eval: i32, // positive = white advantage
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[derive(Serialize)]
struct JsScenario {
    id: u8,
    name: &'static str,
}

fn scenario_list() -> Vec<JsScenario> {
    scenarios::SCENARIOS
        .iter()
        .map(|s| JsScenario {
            id: s.id,
            name: s.name,
        })
        .collect()
}

/// Driver-facing handle: one live game plus the per-side control settings.
#[wasm_bindgen]
pub struct Engine {
    game: GameState,
    settings: GameSettings,
}

#[wasm_bindgen]
impl Engine {
    /// `settings` may be `undefined` for human-vs-human at depth 3.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<Engine, JsValue> {
        utils::set_panic_hook();
        let settings: GameSettings = if settings.is_undefined() || settings.is_null() {
            GameSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings)?
        };

        Ok(Engine {
            game: GameState::new_game(),
            settings: settings.validate()?,
        })
    }

    pub fn new_game(&mut self) {
        self.game = GameState::new_game();
    }

    pub fn load_scenario(&mut self, id: u8) -> Result<(), JsValue> {
        self.game = scenarios::load_scenario(id)?;
        Ok(())
    }

    /// Replace the position with eight rows of `o O x X .`, row 0 first.
    pub fn load_board(&mut self, rows: &str, turn: &str) -> Result<(), JsValue> {
        let board = Board::from_rows(rows)
            .ok_or_else(|| EngineError::InvalidBoard("expected 8 rows of 8 squares".to_string()))?;
        self.game = GameState::from_board(board, parse_side(turn)?);
        Ok(())
    }

    pub fn turn(&self) -> String {
        self.game.turn.to_str().to_string()
    }

    pub fn is_engine_turn(&self) -> bool {
        self.settings.is_engine(self.game.turn)
    }

    pub fn in_combo(&self) -> bool {
        self.game.combo().is_active()
    }

    /// Destinations of the piece on (row, col) for the side to move.
    pub fn legal_destinations(&self, row: i8, col: i8) -> JsValue {
        let dests = self.game.legal_destinations(Square::new(row, col), self.game.turn);
        to_js(&dests.into_vec())
    }

    /// Every movable piece of the side to move with its destinations.
    pub fn selectable_pieces(&self) -> JsValue {
        let mut pieces: Vec<JsSelectable> = self
            .game
            .selectable_pieces(self.game.turn)
            .into_iter()
            .map(|(from, to)| JsSelectable {
                from,
                to: to.into_vec(),
            })
            .collect();
        pieces.sort_by_key(|p| p.from);
        to_js(&pieces)
    }

    pub fn select(&mut self, row: i8, col: i8) -> bool {
        self.game.select(Square::new(row, col))
    }

    pub fn deselect(&mut self) {
        self.game.deselect();
    }

    /// Destinations of the currently selected piece.
    pub fn possible_moves(&self) -> JsValue {
        to_js(&self.game.possible_moves().into_vec())
    }

    /// Returns `{committed, combo_continues}`.
    pub fn attempt_move(&mut self, from_row: i8, from_col: i8, to_row: i8, to_col: i8) -> JsValue {
        let side = self.game.turn;
        let outcome = self.game.attempt_move(
            Square::new(from_row, from_col),
            Square::new(to_row, to_col),
            side,
        );
        to_js(&outcome)
    }

    pub fn side_has_any_legal_move(&self, side: &str) -> Result<bool, JsValue> {
        Ok(self.game.side_has_any_legal_move(parse_side(side)?))
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Search the side to move at its configured depth without playing.
    /// Returns `{from, to, is_capture, eval}` or `null` when the side is stuck.
    pub fn get_best_move(&mut self) -> JsValue {
        #[cfg(feature = "debug")]
        for m in self.game.legal_moves(self.game.turn) {
            let line = format!("{}: {}", self.game.turn.to_str(), m);
            web_sys::console::debug_1(&JsValue::from(line));
        }

        self.best_move_with_limits(SearchLimits::NONE)
    }

    /// Timed variant of `get_best_move`, same result shape. The search
    /// returns early with the best completed root move once `time_limit_ms`
    /// has passed.
    pub fn get_best_move_with_time(&mut self, time_limit_ms: u32) -> JsValue {
        self.best_move_with_limits(SearchLimits {
            max_nodes: None,
            time_limit_ms: Some(time_limit_ms as u128),
        })
    }

    /// Built-in scenarios as `[{id, name}]`.
    pub fn scenarios(&self) -> JsValue {
        to_js(&scenario_list())
    }

    /// Let the engine play one move for the side to move. Call again while
    /// `in_combo()` to finish a capture chain.
    pub fn play_engine_turn(&mut self) -> JsValue {
        let depth = self.settings.depth(self.game.turn);
        let played: Option<Move> = self.game.play_engine_turn(depth);
        played.map(|m| to_js(&m)).unwrap_or(JsValue::NULL)
    }

    /// Static evaluation, positive = white advantage.
    pub fn evaluate_position(&self) -> i32 {
        evaluation::evaluate(&self.game.board)
    }

    pub fn perft(&mut self, depth: u32) -> u64 {
        self.game.perft(depth)
    }

    pub fn board_string(&self) -> String {
        self.game.board.to_string()
    }
}

impl Engine {
    fn best_move_with_limits(&mut self, limits: SearchLimits) -> JsValue {
        let side = self.game.turn;
        let depth = self.settings.depth(side);
        let result = search::search_with_limits(&mut self.game, side, depth, limits, false);
        match result.best_move {
            Some(m) => to_js(&JsMoveWithEval {
                from: m.from,
                to: m.to,
                is_capture: m.is_capture,
                eval: result.score,
            }),
            None => JsValue::NULL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_list_names_every_scenario_in_order() {
        let list = scenario_list();
        assert_eq!(list.len(), 11);
        for (i, s) in list.iter().enumerate() {
            assert_eq!(s.id as usize, i + 1);
            assert!(!s.name.is_empty());
        }
        assert_eq!(list[10].name, "engine wins by capture");
    }
}
