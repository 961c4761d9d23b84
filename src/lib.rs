pub mod builder;
pub mod camera;
pub mod config;
pub mod core;
pub mod expr;
pub mod grid;
pub mod labels;
pub mod mode;
pub mod plotter;
pub mod render;
pub mod runtime;
pub mod scale;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

use thiserror::Error;

/// Application-level failures. Expression problems are not listed here: they are
/// reported through [`plotter::PlotOutcome`] and never abort the session.
#[derive(Debug, Error)]
pub enum AxiscopeError {
    #[error("failed to read configuration file")]
    ConfigRead,

    #[error("configuration file is not valid JSON")]
    ConfigParse,

    #[error("failed to serialize configuration")]
    ConfigSerialize,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, error_stack::Report<AxiscopeError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::builder::*;
    pub use crate::config::{Config, SceneConfig};
    pub use crate::core::*;
    pub use crate::plotter::PlotOutcome;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::scene::SceneState;
}
