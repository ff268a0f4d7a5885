//! Simulation state and entity types
//!
//! Everything a tick reads or writes lives in `GalleryState`. Nothing here
//! is persisted; a reload starts a fresh run.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::spawn_enemy;
use crate::tuning::Tuning;

/// Drawing area in CSS pixels plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, clamping the pixel ratio to [1, max_ratio]
    pub fn new(width: f32, height: f32, device_ratio: f32, max_ratio: f32) -> Self {
        let pixel_ratio = if device_ratio.is_finite() {
            device_ratio.clamp(1.0, max_ratio.max(1.0))
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Backing-store size of the canvas in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }
}

/// A target on the circular track
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Position on the track (radians, [0, 2π))
    pub angle: f32,
    /// Distance from the player; fixed for the enemy's lifetime
    pub distance: f32,
    /// Scale multiplier; fixed for the enemy's lifetime
    pub size: f32,
    /// Wobble phase (unbounded, only fed to `sin`)
    ///
    /// Kept in `f64` so a long-lived enemy still wobbles; an `f32` phase stops
    /// advancing once its magnitude swamps a frame's increment.
    pub sway: f64,
    /// Marked by a shot; removed on the next update
    pub hit: bool,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GalleryState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub viewport: Viewport,
    /// Rendered gaze direction, (-π, π]
    pub yaw: f32,
    /// Where input wants the gaze to go, [0, 2π)
    pub target_yaw: f32,
    /// Total fire events
    pub shots: u64,
    /// Live enemies in insertion order
    pub enemies: Vec<Enemy>,
    /// Timestamp of the last spawn (ms, animation-frame clock)
    pub last_spawn_ms: f64,
    /// Set by the first valid orientation reading
    pub motion_enabled: bool,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl GalleryState {
    /// Create a run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a run and place the opening enemies
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        for _ in 0..state.tuning.initial_enemies {
            spawn_enemy(&mut state);
        }
        state
    }

    /// Create a run with no enemies (fixtures and tests)
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            viewport: Viewport::default(),
            yaw: 0.0,
            target_yaw: 0.0,
            shots: 0,
            enemies: Vec::with_capacity(tuning.max_enemies + 1),
            last_spawn_ms: 0.0,
            motion_enabled: false,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a new window size
    pub fn resize(&mut self, width: f32, height: f32, device_ratio: f32) {
        self.viewport = Viewport::new(width, height, device_ratio, self.tuning.max_pixel_ratio);
        log::debug!(
            "Viewport {}x{} @{}",
            self.viewport.width,
            self.viewport.height,
            self.viewport.pixel_ratio
        );
    }
}
