pub mod config;
pub mod entity;
pub mod game;
pub mod lifecycle;
pub mod renderer;
pub mod scene;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
mod web_logger;
#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use config::{ConfigError, GameConfig};
pub use entity::{Point, Target, TargetId};
pub use game::{Game, GameState, Phase, TickOutcome};
pub use lifecycle::Lifecycle;
pub use renderer::{apply_input, Input, Renderer};
pub use scene::{DrawSurface, Paint, Scene, Shape};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::{CellGrid, CliRenderer};

#[cfg(target_arch = "wasm32")]
pub use web_main::{start_game, GameHandle};
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
