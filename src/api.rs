//! JavaScript surface for a browser renderer.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;

#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Accepts a partial `GameConfig` object, or `undefined`/`null` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: Game::new_with_default_selector(config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_result())?)
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(
            &self.inner.legal_moves_for_current(),
        )?)
    }

    pub fn message(&self) -> String {
        self.inner.current_message().to_string()
    }

    /// Returns whether the move was accepted; rejections show up in `message()`.
    pub fn submit_human_move(&mut self, row: i32, col: i32) -> bool {
        self.inner.submit_human_move(row, col).is_ok()
    }

    pub fn advance_ai_if_pending(&mut self) -> Result<(), JsError> {
        Ok(self.inner.advance_ai_if_pending()?)
    }

    pub fn tick(&mut self) -> Result<(), JsError> {
        Ok(self.inner.tick()?)
    }
}
