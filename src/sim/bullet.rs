//! Straight-line projectiles with a fading after-glow trail

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::ColorTag;
use super::vector::{self, Bounds};

/// Trail marker left behind by a bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailMark {
    pub pos: Vec2,
    /// Heading of the bullet when the mark was laid (radians)
    pub angle: f32,
    /// Ticks left before the mark disappears
    pub life: u32,
    pub color: ColorTag,
}

/// Maximum number of trail marks to keep
pub const TRAIL_LENGTH: usize = 20;

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ColorTag,
    /// After-glow history (newest first)
    pub trail: Vec<TrailMark>,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, color: ColorTag) -> Self {
        Self {
            pos,
            vel,
            color,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Age the trail, lay a new mark, then advance
    ///
    /// Returns false once the bullet has left the field; bullets do not wrap.
    pub fn update(&mut self, x_bounds: Bounds, y_bounds: Bounds) -> bool {
        for mark in &mut self.trail {
            mark.life = mark.life.saturating_sub(1);
        }
        self.trail.retain(|m| m.life > 0);

        self.record_trail();
        self.pos += self.vel;

        x_bounds.contains(self.pos.x) && y_bounds.contains(self.pos.y)
    }

    /// Record the current position to the trail
    fn record_trail(&mut self) {
        // Lifetime varies between 6 and 15 ticks with distance from the origin
        let life = (15.0 * ((self.pos.length() % 30.0) + 20.0) / 50.0).round() as u32;
        self.trail.insert(
            0,
            TrailMark {
                pos: self.pos,
                angle: vector::angle(self.vel),
                life,
                color: self.color,
            },
        );
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    /// Whether the bullet center lies within `radius` of `center`
    #[inline]
    pub fn hits(&self, center: Vec2, radius: f32) -> bool {
        vector::distance(center, self.pos) < radius
    }
}
