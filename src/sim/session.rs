//! Game session: level progression, pause handling and score keeping
//!
//! Wraps an [`EntityController`] with the bits a front end needs between
//! ticks. The front end queues input events as they happen and calls
//! [`Session::step`] once per frame.

use serde::{Deserialize, Serialize};

use super::controller::{EntityController, SimState, TickResult};
use super::effects::{SoundChannel, SoundRequests, SoundTrack};
use super::input::{InputEvent, InputQueue, Signal};
use crate::config::FieldConfig;

/// Ticks per reported second of play time
const TICKS_PER_SECOND: u64 = 100;

/// Session phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the player; also the state after every restart
    #[default]
    Paused,
    Running,
    /// Level cleared, waiting to advance
    Complete,
    /// Out of lives, waiting to start over
    Over,
}

impl From<SimState> for SessionPhase {
    fn from(state: SimState) -> Self {
        match state {
            SimState::Running => SessionPhase::Running,
            SimState::Complete => SessionPhase::Complete,
            SimState::Over => SessionPhase::Over,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub controller: EntityController,
    pub phase: SessionPhase,
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    /// Play time in seconds of the run that set `high_score`
    pub best_time: Option<u64>,
    /// Ticks run since the last level-0 start
    pub elapsed: u64,
    input: InputQueue,
}

impl Session {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            controller: EntityController::new(config),
            phase: SessionPhase::Paused,
            level: 0,
            score: 0,
            high_score: 0,
            best_time: None,
            elapsed: 0,
            input: InputQueue::new(),
        }
    }

    /// Play time in whole seconds
    #[inline]
    pub fn play_time(&self) -> u64 {
        self.elapsed / TICKS_PER_SECOND
    }

    /// The pause key: pause/resume, or advance past a finished level
    pub fn toggle_pause(&mut self) -> SoundRequests {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused;
                log::debug!("Paused at tick {}", self.elapsed);
            }
            SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                log::debug!("Resumed at tick {}", self.elapsed);
            }
            SessionPhase::Complete => self.restart(self.level + 1),
            SessionPhase::Over => self.restart(0),
        }

        let mut sounds = SoundRequests::new();
        sounds.request(SoundChannel::Ui, SoundTrack::Beep);
        sounds
    }

    /// Start `level`, carrying score and time forward unless it is level 0
    pub fn restart(&mut self, level: u32) {
        self.record_high_score();
        if level == 0 {
            self.score = 0;
            self.elapsed = 0;
        }
        self.level = level;
        self.controller.restart(level);
        self.input.clear();
        self.phase = SessionPhase::Paused;
    }

    /// A higher score wins; a tie goes to the faster run
    fn record_high_score(&mut self) {
        let time = self.play_time();
        let better = self.score > self.high_score
            || (self.score > 0
                && self.score == self.high_score
                && self.best_time.is_none_or(|best| time < best));
        if better {
            log::info!("New high score {} in {}s", self.score, time);
            self.high_score = self.score;
            self.best_time = Some(time);
        }
    }

    /// Queue an input event for the next step
    ///
    /// Fire presses are ignored outside of play so a shot held through the
    /// pause screen does not go off on resume.
    pub fn push_input(&mut self, event: InputEvent) {
        let is_fire = matches!(
            event,
            InputEvent::Pull {
                signal: Signal::Shoot,
                ..
            }
        );
        if is_fire && self.phase != SessionPhase::Running {
            return;
        }
        self.input.push(event);
    }

    #[inline]
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Run one tick if the session is running
    pub fn step(&mut self) -> Option<TickResult> {
        if self.phase != SessionPhase::Running {
            return None;
        }

        for event in self.input.drain() {
            self.controller.ship.apply(event);
        }

        let result = self.controller.update(self.elapsed, self.score);
        self.score = result.score;
        self.elapsed += 1;

        let phase = SessionPhase::from(result.state);
        if phase != self.phase {
            log::info!(
                "Level {} ended {:?} at tick {} with score {}",
                self.level,
                phase,
                self.elapsed,
                self.score
            );
        }
        self.phase = phase;
        Some(result)
    }
}
