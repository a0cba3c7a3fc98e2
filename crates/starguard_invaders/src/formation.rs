use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::playfield::Playfield;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Invader {
    pub x: f64,
    pub y: f64,
}

impl Invader {
    /// Square hit box of side `size` centered on the invader.
    pub fn hit_box(&self, size: f64) -> Rect {
        Rect::centered(self.x, self.y, size, size)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Emitted when the formation touched a side wall and dropped one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DescendEvent {
    /// Index, in creation order, of the first invader found in the wall zone.
    pub contact: usize,
    pub new_direction: Direction,
    /// Some invader reached the bottom of the playfield.
    pub breached: bool,
}

/// The grid of invaders, marched as one block on a shared cadence timer.
#[derive(Clone, Debug)]
pub struct Formation {
    invaders: Vec<Invader>,
    direction: Direction,
    cadence_ms: f64,
    last_move_ms: Option<f64>,
}

impl Formation {
    /// Lay out `rows` (invaders per row, top row first), each row centered
    /// horizontally.
    pub fn setup(rows: &[usize], playfield: &Playfield, config: &GameConfig) -> Self {
        let pitch = config.invader_size + config.invader_spacing;
        let mut invaders = Vec::with_capacity(rows.iter().sum());
        let mut y = playfield.height * config.formation_top_fraction;

        for &per_row in rows {
            let mut x = (playfield.width - per_row as f64 * pitch) / 2.0 + pitch / 2.0;
            for _ in 0..per_row {
                invaders.push(Invader { x, y });
                x += pitch;
            }
            y += config.invader_size / config.invader_ratio + config.invader_spacing;
        }

        Self {
            invaders,
            direction: Direction::Right,
            cadence_ms: config.invader_move_interval_ms,
            last_move_ms: None,
        }
    }

    /// Formation made of explicit invaders, marching right.
    pub fn from_invaders(invaders: Vec<Invader>, cadence_ms: f64) -> Self {
        Self {
            invaders,
            direction: Direction::Right,
            cadence_ms,
            last_move_ms: None,
        }
    }

    pub fn invaders(&self) -> &[Invader] {
        &self.invaders
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn cadence_ms(&self) -> f64 {
        self.cadence_ms
    }

    pub fn set_cadence_ms(&mut self, cadence_ms: f64) {
        self.cadence_ms = cadence_ms;
    }

    /// Start the cadence timer at `now` unless it is already running.
    pub fn anchor_clock(&mut self, now: f64) {
        if self.last_move_ms.is_none() {
            self.last_move_ms = Some(now);
        }
    }

    fn cadence_elapsed(&self, now: f64) -> bool {
        match self.last_move_ms {
            Some(last) => now - last >= self.cadence_ms,
            None => false,
        }
    }

    /// Remove the invaders at `indices` (ascending, unique) in one pass.
    pub fn remove_all(&mut self, indices: &[usize]) {
        let mut doomed = indices.iter().peekable();
        let mut index = 0;
        self.invaders.retain(|_| {
            let hit = doomed.next_if_eq(&&index).is_some();
            index += 1;
            !hit
        });
    }

    /// Zone the formation must not enter in its current direction of travel.
    pub fn wall_zone(&self, playfield: &Playfield, config: &GameConfig) -> Rect {
        let half = config.invader_size / 2.0;
        match self.direction {
            Direction::Right => Rect::new(
                playfield.width - half,
                0.0,
                playfield.width + config.wall_overshoot,
                playfield.height,
            ),
            Direction::Left => Rect::new(0.0, 0.0, half, playfield.height),
        }
    }

    /// Once the cadence has elapsed, look for an invader inside the wall zone.
    /// On contact the direction flips, the whole block drops by
    /// `height / descent_divisor` and the cadence timer restarts, so the
    /// formation does not also march sideways in the same frame.
    pub fn wall_check(
        &mut self,
        now: f64,
        playfield: &Playfield,
        config: &GameConfig,
    ) -> Option<DescendEvent> {
        if !self.cadence_elapsed(now) {
            return None;
        }

        let zone = self.wall_zone(playfield, config);
        let contact = self
            .invaders
            .iter()
            .position(|invader| invader.hit_box(config.invader_size).overlaps(&zone))?;

        self.direction = self.direction.flipped();
        let drop = playfield.height / config.descent_divisor;
        for invader in &mut self.invaders {
            invader.y += drop;
        }
        let breached = self.invaders.iter().any(|i| i.y >= playfield.height);
        self.last_move_ms = Some(now);

        log::debug!(
            "formation hit the wall (invader {contact}), now moving {:?}",
            self.direction
        );

        Some(DescendEvent {
            contact,
            new_direction: self.direction,
            breached,
        })
    }

    /// March one step sideways if the cadence has elapsed. Returns whether a
    /// step was taken.
    ///
    /// Marching right covers `width * invader_move_speed`; marching left only
    /// `invader_move_speed` units.
    pub fn advance(&mut self, now: f64, playfield: &Playfield, config: &GameConfig) -> bool {
        if !self.cadence_elapsed(now) {
            return false;
        }

        let dx = match self.direction {
            Direction::Right => playfield.width * config.invader_move_speed,
            Direction::Left => -config.invader_move_speed,
        };
        for invader in &mut self.invaders {
            invader.x += dx;
        }
        self.last_move_ms = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn playfield() -> Playfield {
        Playfield {
            width: 900.0,
            height: 600.0,
            scale: 1.0,
        }
    }

    fn single(x: f64, y: f64) -> Formation {
        Formation {
            invaders: vec![Invader { x, y }],
            direction: Direction::Right,
            cadence_ms: 1200.0,
            last_move_ms: Some(0.0),
        }
    }

    #[test]
    fn setup_centers_each_row() {
        let config = GameConfig::default();
        let formation = Formation::setup(&[10, 5], &playfield(), &config);
        assert_eq!(formation.len(), 15);

        let top = &formation.invaders()[..10];
        assert!((top[0].x - 202.5).abs() < EPS);
        assert!((top[9].x - 697.5).abs() < EPS);
        assert!(top.iter().all(|i| (i.y - 60.0).abs() < EPS));

        let second = &formation.invaders()[10..];
        assert!((second[0].x - 340.0).abs() < EPS);
        assert!(second.iter().all(|i| (i.y - 115.0).abs() < EPS));

        // Rows are symmetric about the playfield centre.
        assert!((top[0].x + top[9].x - 900.0).abs() < EPS);
        assert!((second[0].x + second[4].x - 900.0).abs() < EPS);
    }

    #[test]
    fn setup_starts_right_with_initial_cadence() {
        let config = GameConfig::default();
        let formation = Formation::setup(&config.rows, &playfield(), &config);
        assert_eq!(formation.len(), 22);
        assert_eq!(formation.direction(), Direction::Right);
        assert_eq!(formation.cadence_ms(), 1200.0);
    }

    #[test]
    fn nothing_happens_before_the_clock_is_anchored() {
        let config = GameConfig::default();
        let mut formation = Formation::setup(&[3], &playfield(), &config);
        assert!(!formation.advance(1_000_000.0, &playfield(), &config));
        formation.anchor_clock(10.0);
        formation.anchor_clock(500.0);
        assert!(!formation.advance(1209.0, &playfield(), &config));
        assert!(formation.advance(1210.0, &playfield(), &config));
    }

    #[test]
    fn advance_right_scales_with_width() {
        let config = GameConfig::default();
        let mut formation = single(100.0, 100.0);
        assert!(formation.advance(1200.0, &playfield(), &config));
        assert!((formation.invaders()[0].x - 127.0).abs() < EPS);
    }

    #[test]
    fn advance_left_uses_a_raw_offset() {
        let config = GameConfig::default();
        let mut formation = single(100.0, 100.0);
        formation.direction = Direction::Left;
        assert!(formation.advance(1200.0, &playfield(), &config));
        assert!((formation.invaders()[0].x - 99.97).abs() < EPS);
    }

    #[test]
    fn advance_waits_for_cadence() {
        let config = GameConfig::default();
        let mut formation = single(100.0, 100.0);
        assert!(!formation.advance(1199.0, &playfield(), &config));
        assert_eq!(formation.invaders()[0].x, 100.0);
        assert!(formation.advance(1200.0, &playfield(), &config));
        assert!(!formation.advance(2000.0, &playfield(), &config));
    }

    #[test]
    fn wall_contact_flips_once_and_descends() {
        let config = GameConfig::default();
        let mut formation = single(880.0, 100.0);

        assert!(formation.wall_check(1000.0, &playfield(), &config).is_none());

        let event = formation
            .wall_check(1200.0, &playfield(), &config)
            .expect("invader touches the right wall");
        assert_eq!(event.contact, 0);
        assert_eq!(event.new_direction, Direction::Left);
        assert!(!event.breached);
        assert_eq!(formation.direction(), Direction::Left);
        assert!((formation.invaders()[0].y - 140.0).abs() < EPS);

        // Timer restarted: neither a second flip nor a march this frame.
        assert!(formation.wall_check(1200.0, &playfield(), &config).is_none());
        assert!(!formation.advance(1200.0, &playfield(), &config));
        assert_eq!(formation.direction(), Direction::Left);
    }

    #[test]
    fn every_invader_descends_on_contact() {
        let config = GameConfig::default();
        let mut formation = Formation {
            invaders: vec![Invader { x: 400.0, y: 50.0 }, Invader { x: 10.0, y: 80.0 }],
            direction: Direction::Left,
            cadence_ms: 100.0,
            last_move_ms: Some(0.0),
        };
        let event = formation.wall_check(100.0, &playfield(), &config).unwrap();
        assert_eq!(event.contact, 1);
        assert_eq!(formation.direction(), Direction::Right);
        assert!((formation.invaders()[0].y - 90.0).abs() < EPS);
        assert!((formation.invaders()[1].y - 120.0).abs() < EPS);
    }

    #[test]
    fn far_from_walls_is_clear() {
        let config = GameConfig::default();
        let mut formation = single(450.0, 100.0);
        assert!(formation.wall_check(5000.0, &playfield(), &config).is_none());
        formation.direction = Direction::Left;
        assert!(formation.wall_check(5000.0, &playfield(), &config).is_none());
    }

    #[test]
    fn reaching_the_bottom_is_a_breach() {
        let config = GameConfig::default();
        let mut formation = single(880.0, 570.0);
        let event = formation.wall_check(1200.0, &playfield(), &config).unwrap();
        assert!(event.breached);
    }

    #[test]
    fn remove_all_keeps_survivor_order() {
        let config = GameConfig::default();
        let mut formation = Formation::setup(&[5], &playfield(), &config);
        let xs: Vec<f64> = formation.invaders().iter().map(|i| i.x).collect();
        formation.remove_all(&[1, 2, 4]);
        let left: Vec<f64> = formation.invaders().iter().map(|i| i.x).collect();
        assert_eq!(left, vec![xs[0], xs[3]]);
    }

    #[test]
    fn empty_formation_is_inert() {
        let config = GameConfig::default();
        let mut formation = Formation::setup(&[], &playfield(), &config);
        formation.anchor_clock(0.0);
        assert!(formation.wall_check(5000.0, &playfield(), &config).is_none());
        assert!(formation.advance(5000.0, &playfield(), &config));
        assert!(formation.is_empty());
    }
}
