//! The player's ship
//!
//! Three independent latched channels (turn, thrust, fire) drive the ship.
//! Every timer is an integer tick counter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::effects::{CloudEffect, ColorTag};
use super::input::{Channel, InputEvent, Latch, Signal};
use super::vector::{self, Bounds};
use crate::consts::*;
use crate::normalize_degrees;

/// Bullet pattern the ship currently fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Normal,
    /// Shorter cooldown
    Rapid,
    /// Three-way fan, longer cooldown
    Spread,
}

impl FireMode {
    pub fn bullet_color(self) -> ColorTag {
        match self {
            FireMode::Normal => ColorTag::Grey,
            FireMode::Rapid => ColorTag::Red,
            FireMode::Spread => ColorTag::Blue,
        }
    }

    /// Cooldown after a volley, from the normal-mode maximum
    pub fn cooldown(self, max_cooldown: u32) -> u32 {
        match self {
            FireMode::Normal => max_cooldown,
            FireMode::Rapid => (max_cooldown as f32 * 0.75).floor() as u32,
            FireMode::Spread => (max_cooldown as f32 * 1.25).floor() as u32,
        }
    }

    /// Heading offsets (degrees) of the bullets in one volley
    fn offsets(self) -> &'static [f32] {
        match self {
            FireMode::Normal | FireMode::Rapid => &[0.0],
            FireMode::Spread => &[-SPREAD_ANGLE_DEG, 0.0, SPREAD_ANGLE_DEG],
        }
    }
}

/// The ship entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in degrees, [0, 360)
    pub orientation: f32,
    pub vel: Vec2,
    /// Collision radius
    pub radius: f32,
    pub max_speed: f32,
    pub turn: Latch,
    pub thrust: Latch,
    pub fire: Latch,
    /// Ticks until the next volley may fire
    pub cooldown: u32,
    pub max_cooldown: u32,
    pub fire_mode: FireMode,
    /// Fire mode expiry: `None` never expires, `Some(0)` reverts to normal on
    /// the next update, `Some(n)` counts down
    pub fire_mode_ticks: Option<u32>,
    pub lives: u32,
    pub invulnerable_ticks: u32,
}

impl Ship {
    /// A fresh ship at `center`, pointing up, briefly invulnerable
    pub fn new(center: Vec2, cell_size: f32, lives: u32) -> Self {
        Self {
            pos: center,
            orientation: SHIP_SPAWN_ORIENTATION,
            vel: Vec2::ZERO,
            radius: cell_size * SHIP_RADIUS_FACTOR,
            max_speed: cell_size * SHIP_MAX_SPEED_FACTOR,
            turn: Latch::default(),
            thrust: Latch::default(),
            fire: Latch::default(),
            cooldown: 0,
            max_cooldown: SHIP_MAX_COOLDOWN,
            fire_mode: FireMode::Normal,
            fire_mode_ticks: Some(0),
            lives,
            invulnerable_ticks: SPAWN_INVULNERABILITY_TICKS,
        }
    }

    fn latch_mut(&mut self, channel: Channel) -> &mut Latch {
        match channel {
            Channel::Turn => &mut self.turn,
            Channel::Thrust => &mut self.thrust,
            Channel::Fire => &mut self.fire,
        }
    }

    /// Latch `signal` on its channel, replacing whatever was there
    pub fn pull_input(&mut self, signal: Signal, strength: f32) {
        self.latch_mut(signal.channel()).pull(signal, strength);
    }

    /// Release `signal` if it is the one latched on its channel
    pub fn stop_input(&mut self, signal: Signal) {
        self.latch_mut(signal.channel()).release(signal);
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pull { signal, strength } => self.pull_input(signal, strength),
            InputEvent::Stop(signal) => self.stop_input(signal),
        }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Switch fire mode; `duration` of `None` never expires
    pub fn set_fire_mode(&mut self, mode: FireMode, duration: Option<u32>) {
        self.fire_mode = mode;
        self.fire_mode_ticks = duration;
    }

    /// Advance one tick: turn, thrust or drift, tick timers, move and wrap
    pub fn update(&mut self, x_bounds: Bounds, y_bounds: Bounds) {
        match self.turn.signal {
            Some(Signal::Clockwise) => {
                self.orientation = normalize_degrees(self.orientation + self.turn.strength);
            }
            Some(Signal::CounterClockwise) => {
                self.orientation = normalize_degrees(self.orientation - self.turn.strength);
            }
            _ => {}
        }

        if self.thrust.is(Signal::Accelerate) {
            let push = vector::from_degrees(self.thrust.strength, self.orientation);
            self.vel = vector::trim(self.vel + push, self.max_speed);
        } else {
            self.vel *= SHIP_DRAG;
        }

        self.cooldown = self.cooldown.saturating_sub(1);

        self.fire_mode_ticks = match self.fire_mode_ticks {
            Some(0) => {
                self.fire_mode = FireMode::Normal;
                None
            }
            Some(n) => Some(n - 1),
            None => None,
        };

        self.pos = vector::wrap(self.pos + self.vel, x_bounds, y_bounds);
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }

    /// Fire a volley if the trigger is held and the gun is cool
    ///
    /// The cooldown still ticks down here whether or not the trigger is held.
    pub fn shoot(&mut self, cell_size: f32) -> Vec<Bullet> {
        if !self.fire.is(Signal::Shoot) || self.cooldown > 0 {
            self.cooldown = self.cooldown.saturating_sub(1);
            return Vec::new();
        }

        let mode = self.fire_mode;
        let bullets = mode
            .offsets()
            .iter()
            .map(|offset| {
                let vel = vector::from_degrees(
                    self.fire.strength * cell_size,
                    self.orientation + offset,
                );
                Bullet::new(self.pos + vel * 1.5, vel, mode.bullet_color())
            })
            .collect();
        self.cooldown = mode.cooldown(self.max_cooldown);
        bullets
    }

    /// Exhaust clouds for the currently latched turn/thrust signals
    pub fn propel(&self) -> Vec<CloudEffect> {
        let mut clouds = Vec::new();

        let side = match self.turn.signal {
            Some(Signal::Clockwise) => Some(-45.0),
            Some(Signal::CounterClockwise) => Some(45.0),
            _ => None,
        };
        if let Some(side) = side {
            clouds.push(self.cloud(
                vector::from_degrees(self.radius, self.orientation + side),
                10,
            ));
        }

        if self.thrust.is(Signal::Accelerate) {
            // Exhaust trails behind when pushing forward, ahead when reversing
            let behind = if self.thrust.strength > 0.0 { 180.0 } else { 0.0 };
            clouds.push(self.cloud(
                vector::from_degrees(self.radius + 5.0, self.orientation + behind),
                40,
            ));
        }

        clouds
    }

    fn cloud(&self, offset: Vec2, life: u32) -> CloudEffect {
        CloudEffect {
            pos: self.pos + offset,
            radius: self.radius * 0.7,
            life,
            density: 10,
            colors: vec![ColorTag::White],
        }
    }
}
