//! Shot resolution against the fixed crosshair

use super::state::GalleryState;
use crate::wrap_signed;

/// Result of a single fire event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The enemy at `index` (stored order) was marked as hit
    Hit { index: usize },
    Miss,
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }
}

/// Bearing of an absolute track angle relative to the gaze, (-π, π]
#[inline]
pub fn bearing(angle: f32, yaw: f32) -> f32 {
    wrap_signed(angle - yaw)
}

/// First enemy in stored order under the crosshair, if any
///
/// Earliest-spawned wins ties; neither distance nor exact alignment is
/// considered. Enemies already hit this frame are skipped.
pub fn find_target(state: &GalleryState) -> Option<usize> {
    let tolerance = state.tuning.crosshair_tolerance;
    let half_fov = state.tuning.half_fov();
    state.enemies.iter().position(|enemy| {
        if enemy.hit {
            return false;
        }
        let off = bearing(enemy.angle, state.yaw).abs();
        off < tolerance && off < half_fov
    })
}

/// Count a shot and mark whatever is under the crosshair
pub fn fire(state: &mut GalleryState) -> ShotOutcome {
    state.shots += 1;

    match find_target(state) {
        Some(index) => {
            state.enemies[index].hit = true;
            log::debug!("Shot {} hit enemy {}", state.shots, index);
            ShotOutcome::Hit { index }
        }
        None => {
            log::debug!("Shot {} missed", state.shots);
            ShotOutcome::Miss
        }
    }
}
