//! Browser bindings. The host page keeps its own input field and toggle
//! button and drives the running app through an [`AxiscopeHandle`].

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

use crate::config::{DEFAULT_LOG_FILTER, SceneConfig};
use crate::render::{AxiscopeCommand, HostBridge};
use crate::runtime::run_app;

#[wasm_bindgen]
pub struct AxiscopeHandle {
    scene: SceneConfig,
    bridge: HostBridge,
    started: bool,
}

#[wasm_bindgen]
impl AxiscopeHandle {
    /// `config_json` may be empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<AxiscopeHandle, JsValue> {
        let scene = if config_json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json_str(config_json)
                .and_then(|scene| scene.validate().map(|()| scene))
                .map_err(|e| JsValue::from_str(&format!("{e:?}")))?
        };

        Ok(AxiscopeHandle {
            scene,
            bridge: HostBridge::default(),
            started: false,
        })
    }

    /// Start rendering into the canvas with id `canvas_id` (without `#`).
    #[wasm_bindgen]
    pub fn start(&mut self, canvas_id: &str) {
        if self.started {
            web_sys::console::warn_1(&"axiscope already started".into());
            return;
        }
        self.started = true;
        run_app(
            self.scene.clone(),
            DEFAULT_LOG_FILTER,
            canvas_id,
            self.bridge.clone(),
        );
    }

    /// Plot `text` on the next frame. A rejected function raises a browser alert.
    #[wasm_bindgen]
    pub fn plot(&self, text: &str) {
        self.bridge.push(AxiscopeCommand::Plot(text.to_owned()));
    }

    #[wasm_bindgen]
    pub fn toggle_mode(&self) {
        self.bridge.push(AxiscopeCommand::ToggleMode);
    }

    /// Caption for the host's toggle button.
    #[wasm_bindgen]
    pub fn mode_label(&self) -> String {
        let caption = self.bridge.status().toggle_caption;
        if caption.is_empty() {
            crate::mode::toggle_caption(self.scene.initial_mode).to_owned()
        } else {
            caption
        }
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.bridge.status().scale.max(1.0)
    }

    #[wasm_bindgen(getter)]
    pub fn is_started(&self) -> bool {
        self.started
    }
}
