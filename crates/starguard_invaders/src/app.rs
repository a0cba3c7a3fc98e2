use anyhow::Result;
use starguard_common::app::App;
use starguard_common::color::Color;
use starguard_common::key::Key;

use crate::config::GameConfig;
use crate::framebuffer::FrameBuffer;
use crate::game::{Game, GameStatus};
use crate::playfield::Viewport;
use crate::render::render;

/// Desktop-facing application wrapper around [`Game`].
///
/// Implements the shared `App` trait so the SDL2 frontend
/// (`starguard_sdl2`) can drive it frame by frame, rasterizing into the
/// frontend's RGB24 screen buffer.
pub struct InvadersApp {
    should_exit: bool,
    pub game: Game,
}

impl InvadersApp {
    pub fn new(config: GameConfig, viewport: Viewport) -> Result<Self> {
        Ok(Self {
            should_exit: false,
            game: Game::new(config, viewport)?,
        })
    }
}

impl App for InvadersApp {
    fn init(&mut self) {
        log::info!("Starguard init");
        self.game.start();
    }

    fn update(&mut self, timestamp_ms: f64, screen_state: &mut [u8]) {
        let status = self.game.frame(timestamp_ms);

        let width = self.width() as usize;
        let height = self.height() as usize;
        let mut frame = FrameBuffer::new(screen_state, width, height);
        render(&self.game, &mut frame);

        if status == GameStatus::Lost {
            overlay_lost_banner(&mut frame);
        }
    }

    fn handle_key_event(&mut self, key: Key, is_pressed: bool) {
        if key == Key::Escape {
            if is_pressed {
                self.should_exit = true;
            }
            return;
        }
        self.game.input_mut().apply_key(key, is_pressed);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Starguard exit with score {}", self.game.score());
    }

    fn width(&self) -> u32 {
        self.game.playfield().surface_width()
    }

    fn height(&self) -> u32 {
        self.game.playfield().surface_height()
    }

    fn scale(&self) -> u32 {
        1
    }

    fn title(&self) -> String {
        "Starguard".to_string()
    }
}

/// Striped band across the top of the screen once the game is lost.
fn overlay_lost_banner(frame: &mut FrameBuffer<'_>) {
    let banner_height = 12usize.min(frame.height());
    let width = frame.width() as f64;

    for y in 0..banner_height {
        let color = if y % 2 == 0 { Color::RED } else { Color::BLACK };
        frame.fill(0.0, y as f64, width, 1.0, color);
    }
}
