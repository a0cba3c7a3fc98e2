use anyhow::{ensure, Context, Result};
use typed_builder::TypedBuilder;

/// Tunables for one game session.
///
/// Distances are in logical playfield units, times in milliseconds. Speeds are
/// fractions of the playfield extent per millisecond, except
/// `invader_move_speed`, which is a fraction of the playfield width per step
/// when marching right and a raw unit offset when marching left.
#[derive(TypedBuilder, Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Minimum time between two shots.
    #[builder(default = 2000.0)]
    pub projectile_interval_ms: f64,
    /// Initial formation cadence.
    #[builder(default = 1200.0)]
    pub invader_move_interval_ms: f64,
    #[builder(default = 50.0)]
    pub cadence_floor_ms: f64,
    #[builder(default = 10_000.0)]
    pub cadence_ceiling_ms: f64,
    /// Cadence shrinks by `cadence_step_ms / invaders_left` per kill.
    #[builder(default = 1000.0)]
    pub cadence_step_ms: f64,

    #[builder(default = 0.0002)]
    pub player_move_speed: f64,
    #[builder(default = 0.03)]
    pub invader_move_speed: f64,
    #[builder(default = 0.0007)]
    pub projectile_speed: f64,

    #[builder(default = 40.0)]
    pub player_size: f64,
    #[builder(default = 50.0)]
    pub invader_size: f64,
    #[builder(default = 5.0)]
    pub invader_spacing: f64,
    /// Width-to-height ratio used for the vertical row pitch.
    #[builder(default = 1.0)]
    pub invader_ratio: f64,
    #[builder(default = 3.0)]
    pub projectile_width: f64,
    #[builder(default = 10.0)]
    pub projectile_height: f64,

    /// Invaders per row, top row first.
    #[builder(default = vec![10, 5, 7])]
    pub rows: Vec<usize>,
    /// Top row offset as a fraction of the playfield height.
    #[builder(default = 0.1)]
    pub formation_top_fraction: f64,
    /// A wall contact drops the formation by `height / descent_divisor`.
    #[builder(default = 15.0)]
    pub descent_divisor: f64,
    /// How far the right wall zone reaches past the playfield edge.
    #[builder(default = 100.0)]
    pub wall_overshoot: f64,
    /// New shots spawn this far above the bottom edge.
    #[builder(default = 30.0)]
    pub projectile_spawn_offset: f64,

    /// Share of the host viewport the playfield occupies on each axis.
    #[builder(default = 0.9)]
    pub viewport_fraction: f64,
    /// Invader sprites are drawn taller than their hit box.
    #[builder(default = 1.25)]
    pub invader_render_height_ratio: f64,
    #[builder(default = " 70px Pixelify Sans".to_string())]
    pub score_font: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::builder().build()
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.cadence_floor_ms <= self.cadence_ceiling_ms,
            "cadence floor {}ms exceeds ceiling {}ms",
            self.cadence_floor_ms,
            self.cadence_ceiling_ms
        );
        ensure!(
            (self.cadence_floor_ms..=self.cadence_ceiling_ms)
                .contains(&self.invader_move_interval_ms),
            "initial cadence {}ms is outside [{}, {}]",
            self.invader_move_interval_ms,
            self.cadence_floor_ms,
            self.cadence_ceiling_ms
        );
        ensure!(
            self.projectile_interval_ms >= 0.0,
            "projectile interval must not be negative"
        );

        let positive = [
            ("player_move_speed", self.player_move_speed),
            ("invader_move_speed", self.invader_move_speed),
            ("projectile_speed", self.projectile_speed),
            ("player_size", self.player_size),
            ("invader_size", self.invader_size),
            ("invader_ratio", self.invader_ratio),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("descent_divisor", self.descent_divisor),
        ];
        for (name, value) in positive {
            ensure!(value > 0.0, "{name} must be positive, got {value}");
        }

        ensure!(
            self.viewport_fraction > 0.0 && self.viewport_fraction <= 1.0,
            "viewport fraction {} is outside (0, 1]",
            self.viewport_fraction
        );
        Ok(())
    }
}

/// Parse a row layout such as `"10,5,7"`.
pub fn parse_rows(layout: &str) -> Result<Vec<usize>> {
    layout
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("invalid invader count '{part}' in row layout"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rows, vec![10, 5, 7]);
        assert_eq!(config.projectile_interval_ms, 2000.0);
        assert_eq!(config.invader_move_interval_ms, 1200.0);
    }

    #[test]
    fn inverted_cadence_bounds_are_rejected() {
        let config = GameConfig::builder()
            .cadence_floor_ms(500.0)
            .cadence_ceiling_ms(100.0)
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds ceiling"));
    }

    #[test]
    fn initial_cadence_must_sit_inside_bounds() {
        let config = GameConfig::builder().invader_move_interval_ms(20.0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let config = GameConfig::builder().invader_size(0.0).build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invader_size"));
    }

    #[test]
    fn viewport_fraction_above_one_is_rejected() {
        let config = GameConfig::builder().viewport_fraction(1.5).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_formation_is_allowed() {
        let config = GameConfig::builder().rows(Vec::new()).build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_row_layouts() {
        assert_eq!(parse_rows("10,5,7").unwrap(), vec![10, 5, 7]);
        assert_eq!(parse_rows(" 3 , 4 ").unwrap(), vec![3, 4]);
        assert_eq!(parse_rows("").unwrap(), Vec::<usize>::new());
        assert!(parse_rows("3,x").is_err());
    }
}
