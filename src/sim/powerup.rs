//! Stationary pickups dropped by prize asteroids

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::ColorTag;
use super::ship::FireMode;
use super::vector;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// One extra life
    Life,
    /// Temporary invulnerability
    Invincible,
    Normal,
    Rapid,
    Spread,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 5] = [
        PowerupKind::Life,
        PowerupKind::Invincible,
        PowerupKind::Normal,
        PowerupKind::Rapid,
        PowerupKind::Spread,
    ];

    pub fn color(self) -> ColorTag {
        match self {
            PowerupKind::Life => ColorTag::Green,
            PowerupKind::Invincible => ColorTag::White,
            PowerupKind::Normal => ColorTag::Black,
            PowerupKind::Rapid => ColorTag::Red,
            PowerupKind::Spread => ColorTag::Blue,
        }
    }

    /// Fire mode granted on pickup, if this is a weapon pickup
    pub fn fire_mode(self) -> Option<FireMode> {
        match self {
            PowerupKind::Normal => Some(FireMode::Normal),
            PowerupKind::Rapid => Some(FireMode::Rapid),
            PowerupKind::Spread => Some(FireMode::Spread),
            PowerupKind::Life | PowerupKind::Invincible => None,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerupKind,
    pub color: ColorTag,
}

impl Powerup {
    pub fn new(pos: Vec2, cell_size: f32, kind: PowerupKind) -> Self {
        Self {
            pos,
            radius: cell_size / 4.0,
            kind,
            color: kind.color(),
        }
    }

    /// A pickup of uniformly random kind
    pub fn random(pos: Vec2, cell_size: f32, rng: &mut impl Rng) -> Self {
        let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
        Self::new(pos, cell_size, kind)
    }

    /// Whether a body at `pos` with `radius` touches this pickup
    #[inline]
    pub fn collected_by(&self, pos: Vec2, radius: f32) -> bool {
        vector::distance(pos, self.pos) < self.radius + radius
    }
}
