//! Enemy spawning and per-tick aging

use std::f32::consts::TAU;

use rand::Rng;

use super::state::{Enemy, GalleryState};
use crate::consts::*;
use crate::wrap_unsigned;

/// Append one randomized enemy to the track
pub fn spawn_enemy(state: &mut GalleryState) {
    let rng = &mut state.rng;
    let enemy = Enemy {
        distance: rng.random_range(ENEMY_MIN_DISTANCE..ENEMY_MAX_DISTANCE),
        angle: rng.random_range(0.0..TAU),
        size: rng.random_range(ENEMY_MIN_SIZE..ENEMY_MAX_SIZE),
        sway: rng.random_range(0.0..std::f64::consts::TAU),
        hit: false,
    };
    log::debug!(
        "Spawned enemy at {:.2} rad, distance {:.1}",
        enemy.angle,
        enemy.distance
    );
    state.enemies.push(enemy);
}

/// Move enemies along the track, drop hit ones, then maybe spawn
///
/// Enemies already marked as hit are left untouched until they are dropped.
/// Removal happens before the spawn check so a slot freed by a hit can be
/// refilled in the same tick. Returns true if an enemy was spawned.
pub fn update_enemies(state: &mut GalleryState, dt: f32, now_ms: f64) -> bool {
    let drift = dt * state.tuning.drift_speed;
    let sway = f64::from(dt * state.tuning.sway_speed);
    for enemy in state.enemies.iter_mut().filter(|e| !e.hit) {
        enemy.angle = wrap_unsigned(enemy.angle + drift);
        enemy.sway += sway;
    }

    state.enemies.retain(|e| !e.hit);

    if now_ms - state.last_spawn_ms > state.tuning.spawn_interval_ms
        && state.enemies.len() < state.tuning.max_enemies
    {
        spawn_enemy(state);
        state.last_spawn_ms = now_ms;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn fixture() -> GalleryState {
        GalleryState::empty(12345, Tuning::default())
    }

    fn enemy_at(angle: f32) -> Enemy {
        Enemy {
            angle,
            distance: 10.0,
            size: 1.0,
            sway: 0.0,
            hit: false,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut state = fixture();
        for _ in 0..500 {
            spawn_enemy(&mut state);
        }
        for e in &state.enemies {
            assert!((ENEMY_MIN_DISTANCE..ENEMY_MAX_DISTANCE).contains(&e.distance));
            assert!((0.0..TAU).contains(&e.angle));
            assert!((ENEMY_MIN_SIZE..ENEMY_MAX_SIZE).contains(&e.size));
            assert!((0.0..std::f64::consts::TAU).contains(&e.sway));
            assert!(!e.hit);
        }
    }

    #[test]
    fn test_update_moves_and_wraps() {
        let mut state = fixture();
        state.enemies.push(enemy_at(TAU - 0.001));
        update_enemies(&mut state, 0.032, 0.0);
        let e = &state.enemies[0];
        assert!((0.0..TAU).contains(&e.angle));
        assert!((e.angle - (0.032 * DRIFT_SPEED - 0.001)).abs() < 1e-4);
        assert!((e.sway - f64::from(0.032 * SWAY_SPEED)).abs() < 1e-9);
    }

    #[test]
    fn test_old_enemy_keeps_swaying() {
        let mut state = fixture();
        let mut e = enemy_at(0.0);
        // Roughly a week of wobble at the default speed
        e.sway = 1_048_576.0;
        state.enemies.push(e);
        update_enemies(&mut state, 0.016, 0.0);
        let step = state.enemies[0].sway - 1_048_576.0;
        assert!((step - f64::from(0.016 * SWAY_SPEED)).abs() < 1e-6, "{}", step);
    }

    #[test]
    fn test_distance_and_size_constant() {
        let mut state = fixture();
        spawn_enemy(&mut state);
        let before = state.enemies[0].clone();
        for i in 0..100 {
            update_enemies(&mut state, 0.016, i as f64 * 16.0);
        }
        assert_eq!(state.enemies[0].distance, before.distance);
        assert_eq!(state.enemies[0].size, before.size);
    }

    #[test]
    fn test_hit_enemies_removed() {
        let mut state = fixture();
        state.enemies.push(enemy_at(0.0));
        state.enemies.push(enemy_at(1.0));
        state.enemies[0].hit = true;
        update_enemies(&mut state, 0.0, 0.0);
        assert_eq!(state.enemies.len(), 1);
        assert!((state.enemies[0].angle - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_throttled_within_interval() {
        let mut state = fixture();
        state.last_spawn_ms = 10_000.0;
        let mut spawns = 0;
        // One frame every 16 ms across a 1.6 s window starting at the first eligible frame
        let start = 10_000.0 + SPAWN_INTERVAL_MS + 1.0;
        for frame in 0..100 {
            if update_enemies(&mut state, 0.016, start + frame as f64 * 16.0) {
                spawns += 1;
            }
        }
        assert_eq!(spawns, 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_spawn_requires_strictly_greater_interval() {
        let mut state = fixture();
        assert!(!update_enemies(&mut state, 0.0, SPAWN_INTERVAL_MS));
        assert!(update_enemies(&mut state, 0.0, SPAWN_INTERVAL_MS + 1.0));
        assert_eq!(state.last_spawn_ms, SPAWN_INTERVAL_MS + 1.0);
    }

    #[test]
    fn test_population_capped() {
        let mut state = fixture();
        let mut now = 0.0;
        for _ in 0..200 {
            now += 2000.0;
            update_enemies(&mut state, 0.016, now);
            assert!(state.enemies.len() <= MAX_ENEMIES);
        }
        assert_eq!(state.enemies.len(), MAX_ENEMIES);
    }

    #[test]
    fn test_freed_slot_refilled_same_tick() {
        let mut state = fixture();
        for i in 0..MAX_ENEMIES {
            state.enemies.push(enemy_at(i as f32 * 0.5));
        }
        state.enemies[3].hit = true;
        assert!(update_enemies(&mut state, 0.016, 5000.0));
        assert_eq!(state.enemies.len(), MAX_ENEMIES);
        assert!(state.enemies.iter().all(|e| !e.hit));
    }
}
