use anyhow::{Context, Result};

use crate::config::GameConfig;
use crate::formation::{Formation, Invader};
use crate::input::{Buttons, InputState};
use crate::player::Player;
use crate::playfield::{Playfield, Viewport};
use crate::projectile::{Projectile, ProjectileSet};
use crate::score::{resolve_hits, Scorekeeper};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Setup,
    Running,
    /// An invader reached the bottom. Terminal: frames are no longer
    /// processed and the frontend should stop scheduling them.
    Lost,
}

/// All state of one game session, advanced one frame at a time by
/// [`Game::frame`].
pub struct Game {
    config: GameConfig,
    playfield: Playfield,
    player: Player,
    projectiles: ProjectileSet,
    formation: Formation,
    scorekeeper: Scorekeeper,
    input: InputState,
    status: GameStatus,
    previous_timestamp_ms: Option<f64>,
    pending_resize: Option<Viewport>,
}

impl Game {
    pub fn new(config: GameConfig, viewport: Viewport) -> Result<Self> {
        config.validate().context("invalid game configuration")?;
        let playfield = Playfield::from_viewport(viewport, config.viewport_fraction);
        let formation = Formation::from_invaders(Vec::new(), config.invader_move_interval_ms);
        Ok(Self {
            player: Player::centered(&playfield),
            playfield,
            projectiles: ProjectileSet::new(),
            formation,
            scorekeeper: Scorekeeper::default(),
            input: InputState::default(),
            status: GameStatus::Setup,
            previous_timestamp_ms: None,
            pending_resize: None,
            config,
        })
    }

    /// Lay out the formation and begin accepting frames.
    pub fn start(&mut self) {
        if self.status != GameStatus::Setup {
            log::warn!("start() ignored, game is already {:?}", self.status);
            return;
        }
        self.formation = Formation::setup(&self.config.rows, &self.playfield, &self.config);
        self.player = Player::centered(&self.playfield);
        self.input.release_all();
        self.status = GameStatus::Running;
        log::info!(
            "game started: {} invaders on a {:.0}x{:.0} playfield",
            self.formation.len(),
            self.playfield.width,
            self.playfield.height
        );
    }

    /// Remember the latest viewport; it takes effect on the next call to
    /// [`Game::apply_pending_resize`].
    pub fn queue_resize(&mut self, viewport: Viewport) {
        self.pending_resize = Some(viewport);
    }

    /// Recompute the playfield from a queued resize, if any. Frontends call
    /// this between frames and resize their drawing surface from the result.
    /// Entity positions are left where they are.
    pub fn apply_pending_resize(&mut self) -> Option<Playfield> {
        let viewport = self.pending_resize.take()?;
        self.playfield = Playfield::from_viewport(viewport, self.config.viewport_fraction);
        log::info!(
            "playfield resized to {:.0}x{:.0} @{}x",
            self.playfield.width,
            self.playfield.height,
            self.playfield.scale
        );
        Some(self.playfield)
    }

    /// Run one frame at `timestamp_ms` (monotonic, milliseconds).
    ///
    /// Order: player movement, fire, projectile flight and pruning, hit
    /// resolution, then the formation's wall check and march. The first
    /// frame only anchors the clocks and moves nothing.
    pub fn frame(&mut self, timestamp_ms: f64) -> GameStatus {
        if self.status != GameStatus::Running {
            return self.status;
        }

        let delta = match self.previous_timestamp_ms {
            Some(previous) => timestamp_ms - previous,
            None => 0.0,
        };
        self.previous_timestamp_ms = Some(timestamp_ms);
        self.formation.anchor_clock(timestamp_ms);

        let (playfield, config) = (&self.playfield, &self.config);

        if self.input.held(Buttons::LEFT) {
            self.player.move_left(delta, playfield, config);
        }
        if self.input.held(Buttons::RIGHT) {
            self.player.move_right(delta, playfield, config);
        }
        if self.input.held(Buttons::FIRE) {
            self.projectiles
                .fire(self.player.x, timestamp_ms, playfield, config);
        }

        self.projectiles.advance(delta, playfield, config);
        self.projectiles.prune_offscreen();

        resolve_hits(
            &mut self.projectiles,
            &mut self.formation,
            &mut self.scorekeeper,
            config,
        );

        if let Some(event) = self.formation.wall_check(timestamp_ms, playfield, config) {
            if event.breached {
                self.status = GameStatus::Lost;
                log::info!(
                    "an invader reached the bottom, game over with score {}",
                    self.scorekeeper.score()
                );
                return self.status;
            }
        }
        self.formation.advance(timestamp_ms, playfield, config);

        self.status
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.projectiles.as_slice()
    }

    pub fn invaders(&self) -> &[Invader] {
        self.formation.invaders()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn score(&self) -> u32 {
        self.scorekeeper.score()
    }

    pub fn cadence_ms(&self) -> f64 {
        self.formation.cadence_ms()
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }
}
