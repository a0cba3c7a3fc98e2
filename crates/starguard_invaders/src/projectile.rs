use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::playfield::Playfield;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    /// Frame timestamp at which the shot was fired.
    pub fired_at_ms: f64,
}

impl Projectile {
    pub fn hit_box(&self, config: &GameConfig) -> Rect {
        Rect::centered(
            self.x,
            self.y,
            config.projectile_width,
            config.projectile_height,
        )
    }
}

/// Player shots in flight, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ProjectileSet {
    projectiles: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// The most recently fired shot.
    pub fn last(&self) -> Option<&Projectile> {
        self.projectiles.last()
    }

    pub fn pop(&mut self) -> Option<Projectile> {
        self.projectiles.pop()
    }

    /// Fire from `(x, height - spawn_offset)` unless the latest shot is
    /// younger than `projectile_interval_ms`. Returns whether a shot was
    /// added.
    pub fn fire(&mut self, x: f64, now: f64, playfield: &Playfield, config: &GameConfig) -> bool {
        if let Some(last) = self.projectiles.last() {
            if now - last.fired_at_ms < config.projectile_interval_ms {
                return false;
            }
        }

        self.projectiles.push(Projectile {
            x,
            y: playfield.height - config.projectile_spawn_offset,
            fired_at_ms: now,
        });
        log::debug!("fired at x={x:.1}, {} in flight", self.projectiles.len());
        true
    }

    /// Move every shot upwards by `delta * height * projectile_speed`.
    pub fn advance(&mut self, delta_ms: f64, playfield: &Playfield, config: &GameConfig) {
        let dy = delta_ms * playfield.height * config.projectile_speed;
        for projectile in &mut self.projectiles {
            projectile.y -= dy;
        }
    }

    /// Drop the first shot that left the top of the playfield. At most one
    /// shot is removed per call.
    pub fn prune_offscreen(&mut self) -> Option<Projectile> {
        let index = self.projectiles.iter().position(|p| p.y < 0.0)?;
        Some(self.projectiles.remove(index))
    }
}
