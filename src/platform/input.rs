//! Browser event to intent mapping
//!
//! Pure functions so the DOM closures in `main.rs` stay thin.

use crate::Tuning;
use crate::sim::TickInput;

/// How a DOM listener is registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// The handler never calls `preventDefault`
    pub passive: bool,
    pub capture: bool,
}

/// Registration options for the events the game listens to
///
/// Pointer and orientation handlers only queue intents, so they are passive
/// and never hold up scrolling or touch gestures.
pub fn listener_options(event: &str) -> ListenerOptions {
    match event {
        "pointerdown" => ListenerOptions {
            passive: true,
            capture: false,
        },
        "deviceorientation" => ListenerOptions {
            passive: true,
            capture: true,
        },
        _ => ListenerOptions::default(),
    }
}

/// Relative turn for a `keydown` key name, if it is an aim key
pub fn key_nudge(key: &str, tuning: &Tuning) -> Option<f32> {
    match key {
        "ArrowLeft" => Some(-tuning.key_step),
        "ArrowRight" => Some(tuning.key_step),
        _ => None,
    }
}

/// Heading (radians) from a `deviceorientation` alpha in degrees
///
/// Sensors report `null` while uncalibrated; those readings are skipped.
pub fn heading_from_alpha(alpha: Option<f64>) -> Option<f32> {
    let alpha = alpha.filter(|a| a.is_finite())?;
    Some(crate::wrap_unsigned((alpha as f32).to_radians()))
}

/// Queue the effect of a key press. Returns true if the key was used.
pub fn on_key(input: &mut TickInput, key: &str, tuning: &Tuning) -> bool {
    match key_nudge(key, tuning) {
        Some(delta) => {
            input.push_nudge(delta);
            true
        }
        None => false,
    }
}

/// Queue an orientation reading
pub fn on_orientation(input: &mut TickInput, alpha: Option<f64>) {
    if let Some(heading) = heading_from_alpha(alpha) {
        input.set_heading(heading);
    }
}

/// Queue a shot
pub fn on_pointer_down(input: &mut TickInput) {
    input.push_fire();
}
