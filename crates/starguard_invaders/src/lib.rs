pub mod app;
pub mod config;
pub mod formation;
pub mod framebuffer;
pub mod game;
pub mod geometry;
pub mod input;
pub mod player;
pub mod playfield;
pub mod projectile;
pub mod render;
pub mod score;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use app::InvadersApp;
pub use config::GameConfig;
pub use game::{Game, GameStatus};
pub use playfield::{Playfield, Viewport};

/// Host window used by the desktop frontend; the playfield takes
/// `viewport_fraction` of it.
pub const DESKTOP_VIEWPORT: Viewport = Viewport::new(800.0, 600.0, 1.0);
