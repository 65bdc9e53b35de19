//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam covers add/sub/scale/negate/dot/length/normalize/rotate. What it lacks
//! for a toroidal field lives here: polar construction, magnitude trimming,
//! wrap-around remapping, and a full-circle heading.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, polar_to_cartesian};

/// An interval `[min, max)` along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Width of the interval
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Inclusive containment (bullets leave the field only once strictly past an edge)
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Remap a coordinate into `[min, max)`
    ///
    /// Equivalent to `((max + v - 2·min) mod span) + min` with a Euclidean mod.
    /// Values already inside are returned untouched so the remap is idempotent
    /// under floating point.
    pub fn wrap(&self, v: f32) -> f32 {
        if v >= self.min && v < self.max {
            return v;
        }
        let wrapped = (v - self.min).rem_euclid(self.span()) + self.min;
        if wrapped >= self.max || wrapped < self.min {
            self.min
        } else {
            wrapped
        }
    }
}

/// Construct a vector from cartesian `(a, b)` or, when `polar`, from
/// magnitude `a` and angle `b` (radians)
#[inline]
pub fn construct(a: f32, b: f32, polar: bool) -> Vec2 {
    if polar {
        polar_to_cartesian(a, b)
    } else {
        Vec2::new(a, b)
    }
}

/// Vector of magnitude `magnitude` pointing at `degrees`
#[inline]
pub fn from_degrees(magnitude: f32, degrees: f32) -> Vec2 {
    polar_to_cartesian(magnitude, degrees.to_radians())
}

/// Clamp the magnitude of `v` to `max_magnitude`, keeping its direction
pub fn trim(v: Vec2, max_magnitude: f32) -> Vec2 {
    let norm = v.length();
    if norm > max_magnitude {
        v * (max_magnitude / norm)
    } else {
        v
    }
}

/// Toroidal remap of `v` into the given bounds
#[inline]
pub fn wrap(v: Vec2, x_bounds: Bounds, y_bounds: Bounds) -> Vec2 {
    Vec2::new(x_bounds.wrap(v.x), y_bounds.wrap(v.y))
}

/// Signed heading of `v` in radians, in (-π, π]
#[inline]
pub fn angle(v: Vec2) -> f32 {
    cartesian_to_polar(v).1
}

/// Rotate `v` about the origin by `theta` radians
#[inline]
pub fn rotate(v: Vec2, theta: f32) -> Vec2 {
    Vec2::from_angle(theta).rotate(v)
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
