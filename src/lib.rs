//! Orbit Gallery - a first-person shooting gallery on a circular track
//!
//! Core modules:
//! - `sim`: Simulation state, spawning, aiming, hit testing and the frame tick
//! - `renderer`: 2D canvas scene painting
//! - `platform`: Browser input mapping and status messages
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use std::f32::consts::{PI, TAU};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Default angular width of the visible cone (60 degrees)
    pub const FIELD_OF_VIEW: f32 = PI / 3.0;
    /// Half-angle within which a shot counts as a hit
    pub const CROSSHAIR_TOLERANCE: f32 = 0.04;

    /// Population cap for live enemies
    pub const MAX_ENEMIES: usize = 8;
    /// Enemies placed on the track at start-up
    pub const INITIAL_ENEMIES: usize = 2;
    /// Minimum real time between spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 1600.0;

    /// Enemy distance range [min, max)
    pub const ENEMY_MIN_DISTANCE: f32 = 5.0;
    pub const ENEMY_MAX_DISTANCE: f32 = 19.0;
    /// Enemy scale multiplier range [min, max)
    pub const ENEMY_MIN_SIZE: f32 = 0.9;
    pub const ENEMY_MAX_SIZE: f32 = 1.6;

    /// Orbital drift along the track (radians/s)
    pub const DRIFT_SPEED: f32 = 0.15;
    /// Wobble phase speed (radians/s)
    pub const SWAY_SPEED: f32 = 1.7;

    /// Aim easing rate; yaw covers `dt * rate` of the remaining gap per tick
    pub const AIM_EASE_RATE: f32 = 6.0;
    /// Largest simulated step per frame (s), about 30 Hz worth
    pub const MAX_FRAME_DT: f32 = 0.032;

    /// Target yaw change per arrow key press (radians)
    pub const KEY_STEP: f32 = 0.12;
    /// Device pixel ratio clamp
    pub const MAX_PIXEL_RATIO: f32 = 2.0;

    /// Horizon height as a fraction of viewport height
    pub const HORIZON_FRACTION: f32 = 0.55;
}

/// Wrap an angle to (-π, π]
///
/// Used for shortest angular differences, e.g. an enemy's bearing relative
/// to the current gaze.
#[inline]
pub fn wrap_signed(angle: f32) -> f32 {
    let mut next = angle % TAU;
    if next <= -PI {
        next += TAU;
    }
    if next > PI {
        next -= TAU;
    }
    next
}

/// Wrap an angle to [0, 2π)
///
/// Used for absolute headings (target yaw, enemy positions).
#[inline]
pub fn wrap_unsigned(angle: f32) -> f32 {
    let mut next = angle % TAU;
    if next < 0.0 {
        next += TAU;
    }
    // A tiny negative remainder plus TAU can round up to TAU itself
    if next >= TAU {
        next = 0.0;
    }
    next
}
