//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the entity lists)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod controller;
pub mod effects;
pub mod input;
pub mod powerup;
pub mod session;
pub mod ship;
pub mod vector;

pub use asteroid::{Asteroid, partition_size};
pub use bullet::{Bullet, TRAIL_LENGTH, TrailMark};
pub use controller::{EntityController, SimState, TickResult};
pub use effects::{CloudEffect, ColorTag, SoundChannel, SoundRequests, SoundTrack, VisualEffect};
pub use input::{Channel, InputEvent, InputQueue, Latch, Signal};
pub use powerup::{Powerup, PowerupKind};
pub use session::{Session, SessionPhase};
pub use ship::{FireMode, Ship};
pub use vector::Bounds;
