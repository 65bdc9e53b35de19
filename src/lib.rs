//! Asteroid Field - a toroidal asteroid-field arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `config`: Field dimensions and the seed a run is built from
//! - `error`: Configuration errors
//!
//! Rendering, audio playback and keyboard binding live outside this crate.
//! They consume the per-tick [`sim::TickResult`] and the read-only entity
//! geometry.

pub mod config;
pub mod error;
pub mod sim;

pub use config::FieldConfig;
pub use error::ConfigError;

use glam::Vec2;

/// Game tuning constants
///
/// Distances and speeds that scale with the field are expressed as
/// fractions of `cell_size` at their use sites; the values here are the
/// unitless ones.
pub mod consts {
    /// Lives a new game starts with
    pub const STARTING_LIVES: u32 = 3;

    /// Ship body radius as a fraction of cell size
    pub const SHIP_RADIUS_FACTOR: f32 = 2.0 / 5.0;
    /// Ship max speed as a fraction of cell size
    pub const SHIP_MAX_SPEED_FACTOR: f32 = 0.1;
    /// Velocity multiplier applied each tick while not thrusting
    pub const SHIP_DRAG: f32 = 0.99;
    /// Ship heading at spawn (degrees, screen "up")
    pub const SHIP_SPAWN_ORIENTATION: f32 = 270.0;
    /// Fire cooldown in ticks for the normal fire mode
    pub const SHIP_MAX_COOLDOWN: u32 = 30;
    /// Invulnerability granted to a freshly spawned ship
    pub const SPAWN_INVULNERABILITY_TICKS: u32 = 100;
    /// Invulnerability granted by the invincible powerup
    pub const POWERUP_INVULNERABILITY_TICKS: u32 = 300;
    /// Spread fire fan half-angle (degrees)
    pub const SPREAD_ANGLE_DEG: f32 = 15.0;

    /// Largest asteroid size class
    pub const MAX_SIZE_CLASS: u8 = 4;
    /// Chance that a size-1 asteroid carries a prize
    pub const PRIZE_CHANCE: f64 = 0.09;

    /// Asteroid limit of level 0 and per-level increment
    pub const BASE_ASTEROID_LIMIT: u32 = 10;
    pub const ASTEROID_LIMIT_PER_LEVEL: u32 = 5;
    /// Level limits wrap at this value (see `EntityController::restart`)
    pub const ASTEROID_LIMIT_WRAP: u32 = 50;
    /// Hard ceiling for the in-level limit growth
    pub const MAX_ASTEROID_LIMIT: u32 = 100;
    /// The limit grows by one every this many ticks
    pub const LIMIT_GROWTH_INTERVAL: u64 = 1000;
    /// A new asteroid spawns every this many ticks
    pub const SPAWN_INTERVAL: u64 = 50;

    /// Default input strengths (mirroring the classic key bindings)
    pub const THRUST_STRENGTH: f32 = 0.08;
    pub const TURN_STRENGTH: f32 = 2.0;
    pub const TURN_HELD_STRENGTH: f32 = 6.0;
    pub const SHOT_STRENGTH: f32 = 0.5;
    pub const SHOT_HELD_STRENGTH: f32 = 0.6;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
