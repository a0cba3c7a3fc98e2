use crate::config::GameConfig;
use crate::formation::Formation;
use crate::geometry::clamp;
use crate::projectile::ProjectileSet;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scorekeeper {
    score: u32,
}

impl Scorekeeper {
    pub fn score(&self) -> u32 {
        self.score
    }

    fn credit(&mut self) {
        self.score = self.score.saturating_add(1);
    }
}

/// Cadence after a kill that left `remaining` invaders standing.
///
/// `clamp(current - step / remaining, floor, ceiling)`; with nobody left the
/// quotient is unbounded, which lands on the floor.
pub fn next_cadence(current_ms: f64, remaining: usize, config: &GameConfig) -> f64 {
    if remaining == 0 {
        return config.cadence_floor_ms;
    }
    clamp(
        current_ms - config.cadence_step_ms / remaining as f64,
        config.cadence_floor_ms,
        config.cadence_ceiling_ms,
    )
}

/// Outcome of one hit-resolution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitReport {
    /// Indices, in the pre-removal formation, of the invaders destroyed.
    pub destroyed: Vec<usize>,
}

impl HitReport {
    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty()
    }
}

/// Test the most recently fired shot against every invader.
///
/// Every invader overlapping the shot is destroyed, each one scoring a point
/// and tightening the cadence in turn. The shot itself is spent on the first
/// hit. Removal happens after the scan so no invader is skipped.
pub fn resolve_hits(
    projectiles: &mut ProjectileSet,
    formation: &mut Formation,
    scorekeeper: &mut Scorekeeper,
    config: &GameConfig,
) -> HitReport {
    let Some(shot) = projectiles.last().map(|p| p.hit_box(config)) else {
        return HitReport::default();
    };

    let destroyed: Vec<usize> = formation
        .invaders()
        .iter()
        .enumerate()
        .filter(|(_, invader)| invader.hit_box(config.invader_size).overlaps(&shot))
        .map(|(index, _)| index)
        .collect();

    if destroyed.is_empty() {
        return HitReport::default();
    }

    projectiles.pop();
    let before = formation.len();
    formation.remove_all(&destroyed);

    let mut cadence = formation.cadence_ms();
    for kills in 1..=destroyed.len() {
        cadence = next_cadence(cadence, before - kills, config);
        scorekeeper.credit();
    }
    formation.set_cadence_ms(cadence);

    log::debug!(
        "destroyed {} invader(s), score {}, cadence {:.1}ms",
        destroyed.len(),
        scorekeeper.score(),
        cadence
    );

    HitReport { destroyed }
}
