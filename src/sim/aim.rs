//! Gaze easing toward the input target

use super::state::GalleryState;
use crate::{wrap_signed, wrap_unsigned};

/// Ease the rendered yaw toward the target yaw
///
/// Covers `min(1, dt * rate)` of the shortest remaining arc, so it never
/// overshoots and a fixed target is approached monotonically.
pub fn advance_aim(state: &mut GalleryState, dt: f32) {
    let diff = wrap_signed(state.target_yaw - state.yaw);
    let step = (dt * state.tuning.aim_ease_rate).min(1.0);
    state.yaw = wrap_signed(state.yaw + diff * step);
}

/// Point the target at an absolute heading (radians)
pub fn set_target_yaw(state: &mut GalleryState, heading: f32) {
    state.target_yaw = wrap_unsigned(heading);
}

/// Turn the target by a relative amount (radians)
pub fn nudge_target_yaw(state: &mut GalleryState, delta: f32) {
    state.target_yaw = wrap_unsigned(state.target_yaw + delta);
}

/// Remaining shortest-arc error between target and gaze
#[inline]
pub fn aim_error(state: &GalleryState) -> f32 {
    wrap_signed(state.target_yaw - state.yaw).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    fn fixture(yaw: f32, target: f32) -> GalleryState {
        let mut state = GalleryState::empty(1, Tuning::default());
        state.yaw = yaw;
        set_target_yaw(&mut state, target);
        state
    }

    #[test]
    fn test_zero_dt_holds_still() {
        let mut state = fixture(0.3, 1.0);
        advance_aim(&mut state, 0.0);
        assert_eq!(state.yaw, 0.3);
    }

    #[test]
    fn test_large_dt_snaps_to_target() {
        let mut state = fixture(0.0, 1.0);
        advance_aim(&mut state, 1.0);
        assert!((state.yaw - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_takes_short_way_round() {
        // Target stored as 3π/2 is a quarter turn clockwise from 0
        let mut state = fixture(0.0, -PI / 2.0);
        assert!((state.target_yaw - 1.5 * PI).abs() < 1e-5);
        advance_aim(&mut state, 0.016);
        assert!(state.yaw < 0.0);
        assert!(state.yaw > -PI / 2.0);
    }

    #[test]
    fn test_crosses_seam_in_signed_range() {
        let mut state = fixture(3.0, -3.0);
        for _ in 0..200 {
            advance_aim(&mut state, 0.032);
            assert!(state.yaw > -PI && state.yaw <= PI);
        }
        assert!(aim_error(&state) < 1e-4);
    }

    #[test]
    fn test_nudge_wraps_unsigned() {
        let mut state = fixture(0.0, 0.0);
        nudge_target_yaw(&mut state, -0.12);
        assert!((state.target_yaw - (TAU - 0.12)).abs() < 1e-5);
        nudge_target_yaw(&mut state, 0.24);
        assert!((state.target_yaw - 0.12).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn converges_without_growing(
            yaw in -3.1f32..3.1,
            target in 0.0f32..6.28,
            dt in 0.004f32..0.032,
        ) {
            let mut state = fixture(yaw, target);
            let mut previous = aim_error(&state);
            let mut dt = dt;
            for _ in 0..2000 {
                advance_aim(&mut state, dt);
                let err = aim_error(&state);
                prop_assert!(err <= previous + 1e-5, "error grew {} -> {}", previous, err);
                previous = err;
                dt = (dt * 0.999).max(0.004);
            }
            prop_assert!(previous < 1e-3, "did not converge: {}", previous);
        }
    }
}
