#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use othello4x4::api::WasmGame;
use othello4x4::wasm_ready;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).expect("field exists")
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn new_game_state_reports_ai_opening_move() {
    let game = WasmGame::new(JsValue::UNDEFINED).expect("default config");
    let state = game.state().expect("state serializes");

    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(field(&state, "black_count").as_f64(), Some(4.0));
    assert_eq!(field(&state, "white_count").as_f64(), Some(1.0));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn partial_config_object_is_accepted() {
    let config = Object::new();
    Reflect::set(
        &config,
        &JsValue::from_str("ai_delay_frames"),
        &JsValue::from_f64(0.0),
    )
    .expect("set field");

    let mut game = WasmGame::new(config.into()).expect("config deserializes");
    assert!(game.submit_human_move(0, 0));
    game.tick().expect("AI answers");

    let state = game.state().expect("state serializes");
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn rejected_move_sets_message() {
    let mut game = WasmGame::new(JsValue::NULL).expect("default config");

    assert!(!game.submit_human_move(9, 9));
    assert_eq!(game.message(), "Invalid move");
}
