//! Entity controller: owns every entity and runs one simulation step
//!
//! Per tick, in order:
//! 1. ship update and exhaust clouds
//! 2. ship fire
//! 3. asteroid motion
//! 4. all-pairs asteroid bounce sweep
//! 5. powerup pickup
//! 6. bullet motion and hit tests
//! 7. ship/asteroid contact
//! 8. spawn throttle
//! 9. terminal check
//!
//! The step runs to completion; callers only ever see settled state. The
//! asteroid sweep is O(n²), fine for the ~150 bodies a level reaches.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::bullet::Bullet;
use super::effects::{SoundChannel, SoundRequests, SoundTrack, VisualEffect};
use super::powerup::{Powerup, PowerupKind};
use super::ship::Ship;
use super::vector::{self, Bounds};
use crate::config::FieldConfig;
use crate::consts::*;

/// Outcome of a simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    Running,
    /// Every asteroid of the level is gone
    Complete,
    /// The last life was lost
    Over,
}

/// Everything a tick hands to the renderer and audio layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub state: SimState,
    pub score: u64,
    pub visuals: Vec<VisualEffect>,
    pub sounds: SoundRequests,
}

/// Owner of the ship, bullets, asteroids and powerups
#[derive(Debug, Clone)]
pub struct EntityController {
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub powerups: Vec<Powerup>,
    /// Asteroids spawned at the border this level (starts at 1)
    pub spawned: u32,
    /// Border spawns allowed this level
    pub asteroid_limit: u32,
    width: f32,
    height: f32,
    cell_size: f32,
    x_bounds: Bounds,
    y_bounds: Bounds,
    rng: Pcg32,
}

impl EntityController {
    pub fn new(config: &FieldConfig) -> Self {
        let (x_bounds, y_bounds) = config.bounds();
        let center = Vec2::new(config.width / 2.0, config.height / 2.0);
        Self {
            ship: Ship::new(center, config.cell_size, STARTING_LIVES),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            powerups: Vec::new(),
            spawned: 1,
            asteroid_limit: Self::limit_for_level(0),
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            x_bounds,
            y_bounds,
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    /// Starting asteroid limit for a level
    ///
    /// Wraps modulo 50, so level 8 allows no spawns and level 9 fewer than
    /// level 0. Kept as-is; later levels are not guaranteed to be harder.
    pub fn limit_for_level(level: u32) -> u32 {
        (BASE_ASTEROID_LIMIT + level * ASTEROID_LIMIT_PER_LEVEL) % ASTEROID_LIMIT_WRAP
    }

    /// Reset the field for `level`; lives carry over past level 0
    pub fn restart(&mut self, level: u32) {
        let lives = if level > 0 { self.ship.lives } else { STARTING_LIVES };
        self.ship = Ship::new(self.center(), self.cell_size, lives);
        self.bullets.clear();
        self.asteroids.clear();
        self.powerups.clear();
        self.spawned = 1;
        self.asteroid_limit = Self::limit_for_level(level);
        log::info!(
            "Level {} start: lives={}, asteroid limit={}",
            level,
            lives,
            self.asteroid_limit
        );
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn bounds(&self) -> (Bounds, Bounds) {
        (self.x_bounds, self.y_bounds)
    }

    /// Advance every entity by one tick
    ///
    /// `elapsed` is the session tick counter (drives spawn pacing), `score`
    /// the running score the tick adds to.
    pub fn update(&mut self, elapsed: u64, score: u64) -> TickResult {
        let mut state = SimState::Running;
        let mut score = score;
        let mut visuals = Vec::new();
        let mut sounds = SoundRequests::new();
        let (xb, yb) = (self.x_bounds, self.y_bounds);

        // Ship motion and exhaust
        self.ship.update(xb, yb);
        visuals.extend(self.ship.propel().into_iter().map(VisualEffect::ThrustCloud));

        let volley = self.ship.shoot(self.cell_size);
        if !volley.is_empty() {
            self.bullets.extend(volley);
            sounds.request(SoundChannel::Ship, SoundTrack::Shoot);
        }

        for asteroid in &mut self.asteroids {
            asteroid.update(xb, yb);
        }
        if self.resolve_asteroid_collisions() > 0 {
            sounds.request(SoundChannel::Asteroids, SoundTrack::Bounce);
        }

        score += self.collect_powerups(&mut sounds);

        // Bullets: leave the field, break an asteroid, or hit the ship
        let bullets = std::mem::take(&mut self.bullets);
        let mut survivors = Vec::with_capacity(bullets.len());
        for mut bullet in bullets {
            if !bullet.update(xb, yb) {
                continue;
            }
            if let Some(index) = self.asteroids.iter().position(|a| a.contains(bullet.pos)) {
                score += self.break_asteroid(index, &mut visuals, &mut sounds);
                continue;
            }
            if !self.ship.is_invulnerable() && bullet.hits(self.ship.pos, self.ship.radius) {
                if self.lethal_hit(&mut sounds) {
                    state = SimState::Over;
                }
                continue;
            }
            survivors.push(bullet);
        }
        self.bullets = survivors;

        if !self.ship.is_invulnerable() {
            let ship = &self.ship;
            let struck = self
                .asteroids
                .iter()
                .any(|a| vector::distance(a.pos, ship.pos) < a.radius + ship.radius);
            if struck && self.lethal_hit(&mut sounds) {
                state = SimState::Over;
            }
        }

        self.throttle_spawns(elapsed);

        if self.asteroids.is_empty() {
            state = SimState::Complete;
        }

        TickResult {
            state,
            score,
            visuals,
            sounds,
        }
    }

    /// One all-pairs sweep; returns the number of bounces
    ///
    /// A pair pushed back into contact by a later bounce in the same sweep is
    /// left for the next tick.
    pub fn resolve_asteroid_collisions(&mut self) -> usize {
        let mut bounces = 0;
        let n = self.asteroids.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.asteroids.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if a.overlaps(b) {
                    a.bounce(b);
                    bounces += 1;
                }
            }
        }
        bounces
    }

    /// Apply and remove every powerup the ship touches; returns score gained
    fn collect_powerups(&mut self, sounds: &mut SoundRequests) -> u64 {
        let (ship_pos, ship_radius) = (self.ship.pos, self.ship.radius);
        let (collected, remaining): (Vec<Powerup>, Vec<Powerup>) = std::mem::take(&mut self.powerups)
            .into_iter()
            .partition(|p| p.collected_by(ship_pos, ship_radius));
        self.powerups = remaining;

        let mut gained = 0;
        for powerup in collected {
            gained += self.apply_powerup(powerup.kind);
            sounds.request(SoundChannel::Ui, SoundTrack::Powerup);
        }
        gained
    }

    fn apply_powerup(&mut self, kind: PowerupKind) -> u64 {
        log::debug!("Powerup collected: {:?}", kind);
        match kind {
            PowerupKind::Life => {
                self.ship.lives += 1;
                0
            }
            PowerupKind::Invincible => {
                self.ship.invulnerable_ticks = POWERUP_INVULNERABILITY_TICKS;
                1
            }
            PowerupKind::Normal | PowerupKind::Rapid | PowerupKind::Spread => {
                if let Some(mode) = kind.fire_mode() {
                    self.ship.set_fire_mode(mode, None);
                }
                1
            }
        }
    }

    /// Fragment or destroy the asteroid at `index`; returns score gained
    pub fn break_asteroid(
        &mut self,
        index: usize,
        visuals: &mut Vec<VisualEffect>,
        sounds: &mut SoundRequests,
    ) -> u64 {
        let asteroid = self.asteroids.remove(index);
        visuals.push(VisualEffect::Explosion { pos: asteroid.pos });

        if asteroid.size_class > 1 {
            let children = asteroid.degrade(self.ship.pos, self.cell_size, &mut self.rng);
            log::debug!(
                "Asteroid size {} split into {:?}",
                asteroid.size_class,
                children.iter().map(|c| c.size_class).collect::<Vec<_>>()
            );
            self.asteroids.extend(children);
            sounds.request(SoundChannel::Asteroids, SoundTrack::Crack);
        } else {
            if asteroid.has_prize {
                let powerup = Powerup::random(asteroid.pos, self.cell_size, &mut self.rng);
                log::debug!("Prize asteroid dropped {:?}", powerup.kind);
                self.powerups.push(powerup);
            }
            sounds.request(SoundChannel::Asteroids, SoundTrack::Break);
        }
        1
    }

    /// Lose a life: respawn a fresh ship, or report game over on the last one
    fn lethal_hit(&mut self, sounds: &mut SoundRequests) -> bool {
        sounds.request(SoundChannel::Ship, SoundTrack::Death);
        if self.ship.lives > 1 {
            let lives = self.ship.lives - 1;
            self.ship = Ship::new(self.center(), self.cell_size, lives);
            log::debug!("Ship destroyed, respawning with {} lives", lives);
            false
        } else {
            log::info!("Ship destroyed on its last life");
            true
        }
    }

    fn throttle_spawns(&mut self, elapsed: u64) {
        if elapsed > 0
            && elapsed % LIMIT_GROWTH_INTERVAL == 0
            && self.asteroid_limit < MAX_ASTEROID_LIMIT
        {
            self.asteroid_limit += 1;
        }

        if self.spawned < self.asteroid_limit
            && (elapsed % SPAWN_INTERVAL == 0 || self.asteroids.is_empty())
        {
            let asteroid = self.spawn_asteroid();
            self.asteroids.push(asteroid);
            self.spawned += 1;
        }
    }

    /// A new asteroid on a random screen edge, drifting toward the ship
    pub fn spawn_asteroid(&mut self) -> Asteroid {
        let cell = self.cell_size;
        let rng = &mut self.rng;

        let pos = match rng.random_range(0..4) {
            0 => Vec2::new(0.0, rng.random::<f32>() * (self.y_bounds.max - 2.0)),
            1 => Vec2::new(self.width - 1.0, rng.random::<f32>() * (self.y_bounds.max - 2.0)),
            2 => Vec2::new(rng.random::<f32>() * (self.x_bounds.max - 2.0), 0.0),
            _ => Vec2::new(rng.random::<f32>() * (self.x_bounds.max - 2.0), self.height - 1.0),
        };

        // Aim roughly at the ship
        let target = self.ship.pos
            + Vec2::new(
                rng.random_range(-2.0 * cell..2.0 * cell),
                rng.random_range(-2.0 * cell..2.0 * cell),
            );
        let speed = cell / 100.0 + rng.random::<f32>() * cell / 50.0;
        let vel = vector::construct(speed, vector::angle(target - pos), true);

        let size_class = rng.random_range(1..=MAX_SIZE_CLASS);
        let spin = rng.random_range(-5.0..5.0);
        Asteroid::new(pos, size_class, cell, vel, spin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::ColorTag;
    use crate::sim::input::Signal;
    use crate::sim::ship::FireMode;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    /// A controller with no asteroids that will not spawn any more
    fn quiet_controller() -> EntityController {
        let mut ctl = EntityController::new(&FieldConfig::default());
        ctl.spawned = ctl.asteroid_limit;
        ctl
    }

    fn still_rock(pos: Vec2, size_class: u8, rng: &mut Pcg32) -> Asteroid {
        Asteroid::new(pos, size_class, 25.0, Vec2::ZERO, 0.0, rng)
    }

    #[test]
    fn test_new_controller() {
        let ctl = EntityController::new(&FieldConfig::default());
        assert_eq!(ctl.ship.pos, Vec2::new(200.0, 200.0));
        assert_eq!(ctl.ship.lives, 3);
        assert_eq!(ctl.spawned, 1);
        assert_eq!(ctl.asteroid_limit, 10);
        assert!(ctl.asteroids.is_empty());
    }

    #[test]
    fn test_level_limits_wrap() {
        assert_eq!(EntityController::limit_for_level(0), 10);
        assert_eq!(EntityController::limit_for_level(1), 15);
        assert_eq!(EntityController::limit_for_level(7), 45);
        assert_eq!(EntityController::limit_for_level(8), 0);
        assert_eq!(EntityController::limit_for_level(9), 5);
    }

    #[test]
    fn test_restart_carries_lives_past_level_zero() {
        let mut ctl = EntityController::new(&FieldConfig::default());
        ctl.ship.lives = 2;
        ctl.asteroids.push(still_rock(Vec2::ONE, 1, &mut test_rng()));
        ctl.restart(1);
        assert_eq!(ctl.ship.lives, 2);
        assert!(ctl.asteroids.is_empty());
        assert_eq!(ctl.asteroid_limit, 15);
        assert_eq!(ctl.spawned, 1);

        ctl.restart(0);
        assert_eq!(ctl.ship.lives, 3);
    }

    #[test]
    fn test_first_tick_spawns_into_empty_field() {
        let mut ctl = EntityController::new(&FieldConfig::default());
        let result = ctl.update(0, 0);
        assert_eq!(result.state, SimState::Running);
        assert_eq!(ctl.asteroids.len(), 1);
        assert_eq!(ctl.spawned, 2);

        // Off the spawn beat nothing new appears while the field is occupied
        ctl.update(1, 0);
        assert_eq!(ctl.asteroids.len(), 1);

        ctl.update(50, 0);
        assert_eq!(ctl.asteroids.len(), 2);
        assert_eq!(ctl.spawned, 3);
    }

    #[test]
    fn test_limit_grows_every_thousand_ticks() {
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(20.0, 20.0), 1, &mut test_rng()));
        let limit = ctl.asteroid_limit;
        ctl.update(1000, 0);
        assert_eq!(ctl.asteroid_limit, limit + 1);

        ctl.asteroid_limit = MAX_ASTEROID_LIMIT;
        ctl.update(2000, 0);
        assert_eq!(ctl.asteroid_limit, MAX_ASTEROID_LIMIT);
    }

    #[test]
    fn test_spawned_asteroids_sit_on_an_edge() {
        let mut ctl = EntityController::new(&FieldConfig::default());
        for _ in 0..50 {
            let a = ctl.spawn_asteroid();
            let on_edge = a.pos.x == 0.0 || a.pos.x == 399.0 || a.pos.y == 0.0 || a.pos.y == 399.0;
            assert!(on_edge, "spawned at {:?}", a.pos);
            assert!((1..=4).contains(&a.size_class));
            let speed = a.vel.length();
            assert!(speed >= 0.25 - 1e-4 && speed <= 0.75 + 1e-4);
        }
    }

    #[test]
    fn test_empty_field_completes_level() {
        let mut ctl = quiet_controller();
        ctl.powerups.push(Powerup::new(Vec2::new(10.0, 10.0), 25.0, PowerupKind::Life));
        ctl.bullets.push(Bullet::new(Vec2::new(50.0, 50.0), Vec2::X, ColorTag::Grey));
        let result = ctl.update(7, 3);
        assert_eq!(result.state, SimState::Complete);
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_level_eight_completes_immediately() {
        let mut ctl = EntityController::new(&FieldConfig::default());
        ctl.restart(8);
        let result = ctl.update(0, 0);
        assert_eq!(result.state, SimState::Complete);
    }

    #[test]
    fn test_prize_asteroid_drops_powerup_where_it_died() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        let mut rock = still_rock(Vec2::new(100.0, 100.0), 1, &mut rng);
        rock.has_prize = true;
        ctl.asteroids.push(rock);
        ctl.bullets.push(Bullet::new(Vec2::new(95.0, 100.0), Vec2::new(1.0, 0.0), ColorTag::Grey));

        let result = ctl.update(1, 10);

        assert_eq!(ctl.powerups.len(), 1);
        assert_eq!(ctl.powerups[0].pos, Vec2::new(100.0, 100.0));
        assert!(ctl.bullets.is_empty());
        assert_eq!(result.score, 11);
        assert_eq!(result.state, SimState::Complete);
        assert!(result.visuals.contains(&VisualEffect::Explosion { pos: Vec2::new(100.0, 100.0) }));
        assert_eq!(result.sounds.get(SoundChannel::Asteroids), Some(SoundTrack::Break));
    }

    #[test]
    fn test_plain_size_one_asteroid_drops_nothing() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        let mut rock = still_rock(Vec2::new(100.0, 100.0), 1, &mut rng);
        rock.has_prize = false;
        ctl.asteroids.push(rock);
        ctl.bullets.push(Bullet::new(Vec2::new(95.0, 100.0), Vec2::new(1.0, 0.0), ColorTag::Grey));
        ctl.update(1, 0);
        assert!(ctl.powerups.is_empty());
    }

    #[test]
    fn test_bullet_fragments_large_asteroid() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(100.0, 100.0), 3, &mut rng));
        ctl.bullets.push(Bullet::new(Vec2::new(95.0, 100.0), Vec2::new(1.0, 0.0), ColorTag::Grey));

        let result = ctl.update(1, 0);

        assert!(ctl.asteroids.len() >= 2);
        let total: u8 = ctl.asteroids.iter().map(|a| a.size_class).sum();
        assert_eq!(total, 3);
        assert_eq!(result.score, 1);
        assert_eq!(result.state, SimState::Running);
        assert_eq!(result.sounds.get(SoundChannel::Asteroids), Some(SoundTrack::Crack));
    }

    #[test]
    fn test_last_life_collision_is_game_over() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.ship.lives = 1;
        ctl.ship.invulnerable_ticks = 0;
        let pos = ctl.ship.pos + Vec2::new(5.0, 0.0);
        ctl.asteroids.push(still_rock(pos, 1, &mut rng));

        let result = ctl.update(1, 7);

        assert_eq!(result.state, SimState::Over);
        assert_eq!(result.score, 7);
        assert_eq!(result.sounds.get(SoundChannel::Ship), Some(SoundTrack::Death));
    }

    #[test]
    fn test_collision_with_lives_left_respawns() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.ship.invulnerable_ticks = 0;
        ctl.ship.vel = Vec2::new(1.0, 0.0);
        ctl.ship.cooldown = 12;
        ctl.ship.set_fire_mode(FireMode::Spread, None);
        let pos = ctl.ship.pos + Vec2::new(12.0, 0.0);
        ctl.asteroids.push(still_rock(pos, 1, &mut rng));

        let result = ctl.update(1, 0);

        assert_eq!(result.state, SimState::Running);
        assert_eq!(ctl.ship.lives, 2);
        assert_eq!(ctl.ship.pos, ctl.center());
        assert_eq!(ctl.ship.vel, Vec2::ZERO);
        assert_eq!(ctl.ship.cooldown, 0);
        assert_eq!(ctl.ship.fire_mode, FireMode::Normal);
        assert_eq!(ctl.ship.invulnerable_ticks, SPAWN_INVULNERABILITY_TICKS);
    }

    #[test]
    fn test_invulnerable_ship_ignores_asteroids() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.ship.lives = 1;
        ctl.ship.invulnerable_ticks = 50;
        let pos = ctl.ship.pos;
        ctl.asteroids.push(still_rock(pos, 2, &mut rng));
        let result = ctl.update(1, 0);
        assert_eq!(result.state, SimState::Running);
        assert_eq!(result.sounds.get(SoundChannel::Ship), None);
    }

    #[test]
    fn test_stray_bullet_hits_vulnerable_ship() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(20.0, 20.0), 1, &mut rng));
        ctl.ship.invulnerable_ticks = 0;
        ctl.ship.lives = 2;
        let start = ctl.ship.pos + Vec2::new(-8.0, 0.0);
        ctl.bullets.push(Bullet::new(start, Vec2::new(2.0, 0.0), ColorTag::Grey));

        let result = ctl.update(1, 0);

        assert!(ctl.bullets.is_empty());
        assert_eq!(ctl.ship.lives, 1);
        assert_eq!(result.state, SimState::Running);
        assert_eq!(result.sounds.get(SoundChannel::Ship), Some(SoundTrack::Death));
    }

    #[test]
    fn test_firing_adds_bullets_and_sound() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(20.0, 380.0), 1, &mut rng));
        ctl.ship.pull_input(Signal::Shoot, SHOT_STRENGTH);

        let result = ctl.update(1, 0);

        assert_eq!(ctl.bullets.len(), 1);
        assert_eq!(result.sounds.get(SoundChannel::Ship), Some(SoundTrack::Shoot));
    }

    #[test]
    fn test_turning_emits_thrust_cloud() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(20.0, 380.0), 1, &mut rng));
        ctl.ship.pull_input(Signal::CounterClockwise, TURN_STRENGTH);
        let result = ctl.update(1, 0);
        assert!(matches!(result.visuals.as_slice(), [VisualEffect::ThrustCloud(_)]));
    }

    #[test]
    fn test_powerup_effects() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(20.0, 380.0), 1, &mut rng));
        let at_ship = ctl.ship.pos;
        ctl.powerups.push(Powerup::new(at_ship, 25.0, PowerupKind::Life));
        ctl.powerups.push(Powerup::new(at_ship, 25.0, PowerupKind::Rapid));
        ctl.powerups.push(Powerup::new(Vec2::new(350.0, 50.0), 25.0, PowerupKind::Spread));

        let result = ctl.update(1, 0);

        assert_eq!(ctl.ship.lives, 4);
        assert_eq!(ctl.ship.fire_mode, FireMode::Rapid);
        // Only the weapon pickup scores
        assert_eq!(result.score, 1);
        assert_eq!(ctl.powerups.len(), 1);
        assert_eq!(ctl.powerups[0].kind, PowerupKind::Spread);
        assert_eq!(result.sounds.get(SoundChannel::Ui), Some(SoundTrack::Powerup));

        // Weapon modes from pickups do not expire
        for t in 2..200 {
            ctl.update(t, 0);
        }
        assert_eq!(ctl.ship.fire_mode, FireMode::Rapid);
    }

    #[test]
    fn test_invincible_powerup() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        ctl.asteroids.push(still_rock(Vec2::new(20.0, 380.0), 1, &mut rng));
        ctl.ship.invulnerable_ticks = 0;
        ctl.powerups.push(Powerup::new(ctl.ship.pos, 25.0, PowerupKind::Invincible));
        let result = ctl.update(1, 0);
        assert_eq!(ctl.ship.invulnerable_ticks, POWERUP_INVULNERABILITY_TICKS);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_overlapping_pair_bounces_once() {
        let mut rng = test_rng();
        let mut ctl = quiet_controller();
        let mut a = still_rock(Vec2::new(100.0, 100.0), 2, &mut rng);
        a.vel = Vec2::new(0.5, 0.0);
        let mut b = still_rock(Vec2::new(125.0, 100.0), 2, &mut rng);
        b.vel = Vec2::new(-0.5, 0.0);
        ctl.asteroids.push(a);
        ctl.asteroids.push(b);

        let result = ctl.update(1, 0);

        assert_eq!(result.sounds.get(SoundChannel::Asteroids), Some(SoundTrack::Bounce));
        assert!(ctl.asteroids[0].vel.x < 0.0);
        assert!(ctl.asteroids[1].vel.x > 0.0);
        // The separation step leaves nothing for a second sweep to find
        assert_eq!(ctl.resolve_asteroid_collisions(), 0);
    }

    #[test]
    fn test_bounced_pairs_rarely_overlap_after_sweep() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut ctl = quiet_controller();
        for _ in 0..20 {
            let pos = Vec2::new(rng.random_range(0.0..400.0), rng.random_range(0.0..400.0));
            let vel = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
            let size = rng.random_range(1..=MAX_SIZE_CLASS);
            ctl.asteroids.push(Asteroid::new(pos, size, 25.0, vel, 0.0, &mut rng));
        }

        let mut bounced = 0;
        let mut still_overlapping = 0;
        let (xb, yb) = ctl.bounds();
        for _ in 0..300 {
            for a in &mut ctl.asteroids {
                a.update(xb, yb);
            }
            bounced += ctl.resolve_asteroid_collisions();
            let n = ctl.asteroids.len();
            for i in 0..n {
                for j in (i + 1)..n {
                    let (a, b) = (&ctl.asteroids[i], &ctl.asteroids[j]);
                    if vector::distance(a.pos, b.pos) < a.radius + b.radius - 1e-2 {
                        still_overlapping += 1;
                    }
                }
            }
        }

        assert!(bounced > 0, "field never produced a collision");
        assert!(
            still_overlapping * 2 <= bounced,
            "{still_overlapping} overlaps left after {bounced} bounces"
        );
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = FieldConfig::default().with_seed(1234);
        let mut a = EntityController::new(&config);
        let mut b = EntityController::new(&config);
        a.ship.pull_input(Signal::Shoot, SHOT_STRENGTH);
        b.ship.pull_input(Signal::Shoot, SHOT_STRENGTH);

        let mut score_a = 0;
        let mut score_b = 0;
        for tick in 0..300 {
            score_a = a.update(tick, score_a).score;
            score_b = b.update(tick, score_b).score;
        }

        assert_eq!(score_a, score_b);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.size_class, y.size_class);
        }
    }
}
