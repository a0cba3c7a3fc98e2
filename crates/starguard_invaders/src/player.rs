use crate::config::GameConfig;
use crate::geometry::clamp;
use crate::playfield::Playfield;

/// The player's ship. Only the horizontal centre moves; the ship is pinned to
/// the bottom edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
}

impl Player {
    pub fn centered(playfield: &Playfield) -> Self {
        Self {
            x: playfield.width / 2.0,
        }
    }

    fn step(delta_ms: f64, playfield: &Playfield, config: &GameConfig) -> f64 {
        delta_ms * playfield.width * config.player_move_speed
    }

    /// Moving left clamps into `[size / 2, width]`.
    pub fn move_left(&mut self, delta_ms: f64, playfield: &Playfield, config: &GameConfig) {
        self.x = clamp(
            self.x - Self::step(delta_ms, playfield, config),
            config.player_size / 2.0,
            playfield.width,
        );
    }

    /// Moving right clamps into `[0, width - size / 2]`.
    pub fn move_right(&mut self, delta_ms: f64, playfield: &Playfield, config: &GameConfig) {
        self.x = clamp(
            self.x + Self::step(delta_ms, playfield, config),
            0.0,
            playfield.width - config.player_size / 2.0,
        );
    }
}
