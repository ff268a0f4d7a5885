//! Data-driven game balance
//!
//! Defaults match `consts`. A JSON override may be stored in LocalStorage;
//! any field it omits keeps its default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation and input tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Angular width of the visible cone (radians)
    pub fov: f32,
    /// Half-angle within which a shot counts as a hit (radians)
    pub crosshair_tolerance: f32,
    /// Population cap
    pub max_enemies: usize,
    /// Enemies spawned when a run starts
    pub initial_enemies: usize,
    /// Minimum real time between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Orbital drift (radians/s)
    pub drift_speed: f32,
    /// Wobble phase speed (radians/s)
    pub sway_speed: f32,
    /// Aim easing rate (1/s)
    pub aim_ease_rate: f32,
    /// Largest simulated step per frame (s)
    pub max_frame_dt: f32,
    /// Target yaw change per arrow key press (radians)
    pub key_step: f32,
    /// Device pixel ratio clamp
    pub max_pixel_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fov: FIELD_OF_VIEW,
            crosshair_tolerance: CROSSHAIR_TOLERANCE,
            max_enemies: MAX_ENEMIES,
            initial_enemies: INITIAL_ENEMIES,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            drift_speed: DRIFT_SPEED,
            sway_speed: SWAY_SPEED,
            aim_ease_rate: AIM_EASE_RATE,
            max_frame_dt: MAX_FRAME_DT,
            key_step: KEY_STEP,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

/// Why a tuning override was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning is not valid JSON: {}", e),
            TuningError::Invalid(field) => write!(f, "tuning field `{}` is out of range", field),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orbit_gallery_tuning";

    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        // serde_json reads out-of-range f32 values such as 1e39 as infinity
        let floats = [
            ("fov", self.fov),
            ("crosshair_tolerance", self.crosshair_tolerance),
            ("drift_speed", self.drift_speed),
            ("sway_speed", self.sway_speed),
            ("aim_ease_rate", self.aim_ease_rate),
            ("max_frame_dt", self.max_frame_dt),
            ("key_step", self.key_step),
            ("max_pixel_ratio", self.max_pixel_ratio),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::Invalid(*field));
        }
        if !self.spawn_interval_ms.is_finite() {
            return Err(TuningError::Invalid("spawn_interval_ms"));
        }
        if !(self.fov > 0.0 && self.fov < std::f32::consts::TAU) {
            return Err(TuningError::Invalid("fov"));
        }
        if !(self.crosshair_tolerance > 0.0) {
            return Err(TuningError::Invalid("crosshair_tolerance"));
        }
        if self.max_enemies == 0 {
            return Err(TuningError::Invalid("max_enemies"));
        }
        if self.initial_enemies > self.max_enemies {
            return Err(TuningError::Invalid("initial_enemies"));
        }
        if !(self.spawn_interval_ms >= 0.0) {
            return Err(TuningError::Invalid("spawn_interval_ms"));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(TuningError::Invalid("max_frame_dt"));
        }
        if !(self.aim_ease_rate > 0.0) {
            return Err(TuningError::Invalid("aim_ease_rate"));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(TuningError::Invalid("max_pixel_ratio"));
        }
        Ok(())
    }

    /// Half of the field of view
    #[inline]
    pub fn half_fov(&self) -> f32 {
        self.fov / 2.0
    }

    /// Load the tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
