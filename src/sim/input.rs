//! Input signals and the event queue feeding the ship
//!
//! The simulation knows nothing about keyboards. A front end translates its
//! device events into [`InputEvent`]s and queues them; the session drains the
//! queue into the ship at the start of each tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A control signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Clockwise,
    CounterClockwise,
    /// Thrust along the heading (negative strength reverses)
    Accelerate,
    /// Fire along the heading (negative strength fires backwards)
    Shoot,
}

/// The independent latch a signal drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Turn,
    Thrust,
    Fire,
}

impl Signal {
    pub fn channel(self) -> Channel {
        match self {
            Signal::Clockwise | Signal::CounterClockwise => Channel::Turn,
            Signal::Accelerate => Channel::Thrust,
            Signal::Shoot => Channel::Fire,
        }
    }
}

/// A latched signal and its strength; `signal == None` means idle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Latch {
    pub signal: Option<Signal>,
    pub strength: f32,
}

impl Latch {
    #[inline]
    pub fn is(&self, signal: Signal) -> bool {
        self.signal == Some(signal)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.signal.is_none()
    }

    pub fn pull(&mut self, signal: Signal, strength: f32) {
        self.signal = Some(signal);
        self.strength = strength;
    }

    /// Clear only if `signal` is the one currently latched, so a stale
    /// release cannot cancel a newer press on the same channel
    pub fn release(&mut self, signal: Signal) -> bool {
        if self.is(signal) {
            *self = Latch::default();
            true
        } else {
            false
        }
    }
}

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Latch `signal` on its channel with `strength`
    Pull { signal: Signal, strength: f32 },
    /// Release `signal` if it is still the latched one
    Stop(Signal),
}

impl InputEvent {
    pub fn pull(signal: Signal, strength: f32) -> Self {
        InputEvent::Pull { signal, strength }
    }

    pub fn signal(&self) -> Signal {
        match *self {
            InputEvent::Pull { signal, .. } | InputEvent::Stop(signal) => signal,
        }
    }
}

/// FIFO of pending input events
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
