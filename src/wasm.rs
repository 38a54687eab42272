//! Browser bindings (wasm32 only)
//!
//! A thin wrapper so a JS host can drive the controller from
//! `requestAnimationFrame` and draw the returned shapes on a canvas.

use wasm_bindgen::prelude::*;

use crate::game::{Control, GameController};
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Asteroids core loaded");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    inner: GameController<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32) -> WebGame {
        let mut settings = Settings::load();
        settings.viewport_width = viewport_width;
        settings.viewport_height = viewport_height;
        WebGame {
            inner: GameController::new(settings, LocalStorageStore::new()),
        }
    }

    pub fn start(&mut self) -> bool {
        self.inner.start()
    }

    /// One tick; false when nothing advanced
    pub fn frame(&mut self) -> bool {
        self.inner.frame().advanced
    }

    pub fn key_down(&mut self, key: &str) {
        match key {
            "Escape" | "p" => {
                self.inner.toggle_pause();
            }
            _ => {
                if let Some(control) = Control::from_key(key) {
                    self.inner.press(control);
                }
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = Control::from_key(key) {
            self.inner.release(control);
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.inner.toggle_pause()
    }

    pub fn quit(&mut self) -> bool {
        self.inner.quit()
    }

    pub fn restart(&mut self) -> bool {
        self.inner.restart()
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.inner.set_autopilot(enabled);
    }

    pub fn submit_score(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.submit_score(name).map_err(js_err)
    }

    /// New viewport; remembered for the next page load
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.inner.resize(viewport_width, viewport_height);
        self.inner.settings().save();
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(js_err)
    }

    pub fn shapes_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.draw_list().shapes).map_err(js_err)
    }

    pub fn leaderboard_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.leaderboard_ranked()).map_err(js_err)
    }
}
