//! Per-frame simulation tick
//!
//! Input handlers never touch the state directly. They queue intents in a
//! `TickInput`, which the next tick applies before advancing the simulation.

use super::aim::{advance_aim, nudge_target_yaw, set_target_yaw};
use super::hit::{ShotOutcome, fire};
use super::spawner::update_enemies;
use super::state::GalleryState;

/// Intents collected between two frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest absolute heading from the orientation sensor (radians)
    pub heading: Option<f32>,
    /// Accumulated relative turns from the keyboard (radians)
    pub nudge: f32,
    /// Fire requests since the last tick
    pub fire: u32,
}

impl TickInput {
    /// Queue an orientation reading; only the latest one matters
    pub fn set_heading(&mut self, heading: f32) {
        self.heading = Some(heading);
    }

    /// Queue a relative turn
    pub fn push_nudge(&mut self, delta: f32) {
        self.nudge += delta;
    }

    /// Queue one shot
    pub fn push_fire(&mut self) {
        self.fire = self.fire.saturating_add(1);
    }

    /// Hand the queued intents to a tick and start a fresh queue
    pub fn take(&mut self) -> TickInput {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.nudge == 0.0 && self.fire == 0
    }
}

/// Something the page should reflect after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryEvent {
    /// A fire intent resolved; `shots` is the running total
    Shot { outcome: ShotOutcome, shots: u64 },
    /// The first orientation reading arrived
    MotionActivated,
    /// A new enemy joined the track
    Spawned { population: usize },
}

/// Turns animation-frame timestamps into clamped simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds to simulate for a frame stamped `time_ms`
    ///
    /// The first frame simulates nothing. Later frames are capped at
    /// `max_dt` so a suspended tab doesn't jump ahead on resume.
    pub fn delta(&mut self, time_ms: f64, max_dt: f32) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);
        dt.clamp(0.0, max_dt)
    }
}

/// Advance the simulation by one frame
///
/// Order: queued intents, then aim easing, then enemy update. Rendering is
/// left to the caller. Events come out in the order the page should apply
/// them: shots first, then motion activation, then spawns.
pub fn tick(state: &mut GalleryState, input: &TickInput, dt: f32, now_ms: f64) -> Vec<GalleryEvent> {
    let mut events = Vec::new();

    if let Some(heading) = input.heading {
        set_target_yaw(state, heading);
    }

    if input.nudge != 0.0 {
        nudge_target_yaw(state, input.nudge);
    }

    for _ in 0..input.fire {
        let outcome = fire(state);
        events.push(GalleryEvent::Shot {
            outcome,
            shots: state.shots,
        });
    }

    // Reported after the shots so the activation message is the one left showing
    if input.heading.is_some() && !state.motion_enabled {
        state.motion_enabled = true;
        events.push(GalleryEvent::MotionActivated);
    }

    advance_aim(state, dt);

    if update_enemies(state, dt, now_ms) {
        events.push(GalleryEvent::Spawned {
            population: state.enemies.len(),
        });
    }

    events
}
