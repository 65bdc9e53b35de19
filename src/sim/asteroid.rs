//! Asteroids: size-classed bodies with an irregular outline
//!
//! Collisions use the analytic `radius`; the generated `surface` polygon is
//! only there for the renderer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::vector::{self, Bounds};
use crate::consts::PRIZE_CHANCE;
use crate::{normalize_degrees, polar_to_cartesian};

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Degrees, [0, 360)
    pub orientation: f32,
    pub vel: Vec2,
    /// Degrees per tick
    pub spin: f32,
    /// 1 (smallest) to 4
    pub size_class: u8,
    /// Collision radius, derived from `size_class`
    pub radius: f32,
    /// Closed outline relative to `pos`, unrotated
    pub surface: Vec<Vec2>,
    /// Size-1 asteroids may drop a powerup when destroyed
    pub has_prize: bool,
}

impl Asteroid {
    pub fn new(
        pos: Vec2,
        size_class: u8,
        cell_size: f32,
        vel: Vec2,
        spin: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let radius = Self::radius_for(size_class, cell_size);
        let orientation = rng.random_range(0.0..360.0);
        let has_prize = size_class == 1 && rng.random_bool(PRIZE_CHANCE);
        let surface = generate_surface(radius, rng);

        Self {
            pos,
            orientation,
            vel,
            spin,
            size_class,
            radius,
            surface,
            has_prize,
        }
    }

    /// Collision radius for a size class: `size/5 · cell + cell/5`
    #[inline]
    pub fn radius_for(size_class: u8, cell_size: f32) -> f32 {
        size_class as f32 / 5.0 * cell_size + cell_size / 5.0
    }

    /// Collision mass; proportional to radius
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius
    }

    /// Whether `point` lies strictly inside the collision circle
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        vector::distance(self.pos, point) < self.radius
    }

    /// Whether two asteroids' collision circles overlap
    #[inline]
    pub fn overlaps(&self, other: &Asteroid) -> bool {
        vector::distance(self.pos, other.pos) < self.radius + other.radius
    }

    /// Advance one tick: move, wrap, spin
    pub fn update(&mut self, x_bounds: Bounds, y_bounds: Bounds) {
        self.pos = vector::wrap(self.pos + self.vel, x_bounds, y_bounds);
        self.orientation = normalize_degrees(self.orientation + self.spin);
    }

    /// Elastic two-body collision along the line of centers
    ///
    /// Velocities are exchanged with masses proportional to radius, then both
    /// bodies are pushed apart symmetrically so their centers end exactly
    /// `radius + other.radius` apart.
    pub fn bounce(&mut self, other: &mut Asteroid) {
        let d = self.pos - other.pos;
        let dist_sq = d.dot(d);
        if dist_sq <= f32::EPSILON {
            // Coincident centers have no line of centers to resolve along
            log::warn!("bounce skipped: coincident asteroid centers at {:?}", self.pos);
            return;
        }

        let total_mass = self.mass() + other.mass();
        let k = (self.vel - other.vel).dot(d) / dist_sq;
        let self_vel = self.vel - d * (2.0 * other.mass() / total_mass * k);
        let other_vel = other.vel + d * (2.0 * self.mass() / total_mass * k);
        self.vel = self_vel;
        other.vel = other_vel;

        let contact = self.radius + other.radius;
        let correction = (d * (contact / dist_sq.sqrt()) - d) * 0.5;
        self.pos += correction;
        other.pos -= correction;
    }

    /// Break into smaller asteroids whose size classes sum to this one's
    ///
    /// Children fan out evenly around this asteroid, starting perpendicular to
    /// the direction from `impact_origin`. Each keeps a share of the parent's
    /// velocity plus an outward kick. The caller discards the parent.
    pub fn degrade(&self, impact_origin: Vec2, cell_size: f32, rng: &mut impl Rng) -> Vec<Asteroid> {
        let parts = partition_size(self.size_class, rng);
        let count = parts.len() as f32;
        let angle_base =
            normalize_degrees(vector::angle(self.pos - impact_origin).to_degrees() + 90.0);

        let mut children = Vec::with_capacity(parts.len());
        for (i, &part) in parts.iter().enumerate() {
            let heading = normalize_degrees(angle_base + i as f32 / count * 360.0);
            let offset = vector::from_degrees(
                cell_size / 2.0 + part as f32 * cell_size / 10.0,
                heading,
            );
            let kick = offset.normalize()
                * (cell_size / 100.0 + rng.random::<f32>() * cell_size / 60.0);
            let vel = self.vel * (0.5 + 0.2 * (part as f32 / 3.0)) + kick;
            let spin = rng.random_range(-10.0..10.0);

            children.push(Asteroid::new(self.pos + offset, part, cell_size, vel, spin, rng));
        }
        children
    }
}

/// Randomly split `size_class` into positive parts summing to it
///
/// The first part leaves at least 1 behind, so anything above size 1 always
/// splits into two or more pieces.
pub fn partition_size(size_class: u8, rng: &mut impl Rng) -> Vec<u8> {
    let mut parts = Vec::new();
    let mut remaining = size_class;
    while remaining > 0 {
        let max = if parts.is_empty() && remaining > 1 {
            remaining - 1
        } else {
            remaining
        };
        let part = rng.random_range(1..=max);
        parts.push(part);
        remaining -= part;
    }
    parts
}

/// Walk the circumference in irregular 5°-45° steps, jittering the radius
/// within [R/2, R] at each point
fn generate_surface(radius: f32, rng: &mut impl Rng) -> Vec<Vec2> {
    let min_r = radius * 0.5;
    let mut r = min_r + rng.random::<f32>() * radius * 0.5;
    let mut t = 0.0f32;
    let mut points = Vec::new();

    while t < 360.0 {
        r = loop {
            let step = radius * 0.05 + rng.random::<f32>() * radius * 0.1;
            let candidate = if rng.random_bool(0.5) { r - step } else { r + step };
            if candidate >= min_r && candidate <= radius {
                break candidate;
            }
        };
        points.push(polar_to_cartesian(r, t.to_radians()));
        t += (5.0 + rng.random::<f32>() * 40.0).min(360.0 - t);
    }
    points
}
