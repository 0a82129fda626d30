//! WASM facade smoke tests.
//!
//! Run with: wasm-pack test --node

#![cfg(target_arch = "wasm32")]

use hydrodraughts_wasm::Engine;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn default_engine_starts_with_white() {
    let engine = Engine::new(JsValue::UNDEFINED).expect("default settings");
    assert_eq!(engine.turn(), "w");
    assert!(!engine.is_engine_turn());
    assert!(!engine.is_game_over());
    assert_eq!(engine.evaluate_position(), 0);
}

#[wasm_bindgen_test]
fn attempt_move_flips_the_turn() {
    let mut engine = Engine::new(JsValue::UNDEFINED).expect("default settings");
    let outcome = engine.attempt_move(5, 0, 4, 1);
    assert!(!outcome.is_null());
    assert_eq!(engine.turn(), "b");
}

#[wasm_bindgen_test]
fn scenario_and_engine_turn() {
    let mut engine = Engine::new(JsValue::UNDEFINED).expect("default settings");
    engine.load_scenario(11).expect("scenario 11");
    assert!(!engine.get_best_move().is_null());
    assert!(!engine.play_engine_turn().is_null());
    assert_eq!(engine.side_has_any_legal_move("w"), Ok(false));
    assert!(engine.load_scenario(42).is_err());
}

#[wasm_bindgen_test]
fn timed_and_untimed_best_moves_share_a_shape() {
    let mut engine = Engine::new(JsValue::UNDEFINED).expect("default settings");
    engine.load_scenario(11).expect("scenario 11");
    for result in [engine.get_best_move(), engine.get_best_move_with_time(1000)] {
        let eval = js_sys::Reflect::get(&result, &JsValue::from_str("eval")).expect("object");
        assert!(eval.as_f64().is_some());
        let capture =
            js_sys::Reflect::get(&result, &JsValue::from_str("is_capture")).expect("object");
        assert_eq!(capture.as_bool(), Some(true));
    }
}

#[wasm_bindgen_test]
fn scenarios_are_listed_by_id() {
    let engine = Engine::new(JsValue::UNDEFINED).expect("default settings");
    let list = js_sys::Array::from(&engine.scenarios());
    assert_eq!(list.length(), 11);
}
