//! Visual and sound effect descriptors
//!
//! The simulation never draws or plays anything. It emits these records and
//! an external renderer / audio layer decides what to do with them.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named colours a renderer maps to its own palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Grey,
    Red,
    Blue,
    Green,
    White,
    Black,
}

/// A short-lived particle cloud (thruster exhaust)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudEffect {
    pub pos: Vec2,
    pub radius: f32,
    /// Lifetime in ticks
    pub life: u32,
    /// Particles per frame at full life
    pub density: u32,
    pub colors: Vec<ColorTag>,
}

/// A visual effect request, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisualEffect {
    /// Asteroid hit at this position
    Explosion { pos: Vec2 },
    ThrustCloud(CloudEffect),
}

/// Audio channels; each plays at most one track per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoundChannel {
    Ui,
    Ship,
    Asteroids,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundTrack {
    Beep,
    Powerup,
    Shoot,
    Death,
    Bounce,
    Crack,
    Break,
}

/// Per-tick sound requests, one slot per channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundRequests {
    requests: BTreeMap<SoundChannel, SoundTrack>,
}

impl SoundRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a track; a later request on the same channel replaces the earlier one
    pub fn request(&mut self, channel: SoundChannel, track: SoundTrack) {
        self.requests.insert(channel, track);
    }

    pub fn get(&self, channel: SoundChannel) -> Option<SoundTrack> {
        self.requests.get(&channel).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Requests in channel order
    pub fn iter(&self) -> impl Iterator<Item = (SoundChannel, SoundTrack)> + '_ {
        self.requests.iter().map(|(c, t)| (*c, *t))
    }
}
