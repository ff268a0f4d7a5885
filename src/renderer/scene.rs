//! First-person scene painting
//!
//! Reads `GalleryState` and never mutates it. Enemies are projected from
//! their bearing relative to the gaze and painted farthest first.

use glam::Vec2;

use super::surface::{Paint, Surface};
use crate::consts::HORIZON_FRACTION;
use crate::sim::hit::bearing;
use crate::sim::state::{Enemy, GalleryState, Viewport};

const SKY_TOP: &str = "#c7e7f2";
const SKY_BOTTOM: &str = "#87b6ca";
const GROUND_TOP: &str = "#6f7c48";
const GROUND_BOTTOM: &str = "#3a3b2c";
const HORIZON_LINE: &str = "rgba(0, 0, 0, 0.25)";

const ENEMY_BODY: &str = "#b12d2b";
const ENEMY_EYES: &str = "#2b0c0c";
const ENEMY_OUTLINE: &str = "rgba(0, 0, 0, 0.4)";

const CROSSHAIR: &str = "rgba(255, 255, 255, 0.8)";
const CROSSHAIR_GAP: f32 = 8.0;
const CROSSHAIR_LEN: f32 = 14.0;

/// Apparent size of an enemy at distance 1, before the floor offset
const SPRITE_SCALE: f32 = 140.0;
/// Minimum apparent size (px) so far enemies stay visible
const SPRITE_FLOOR: f32 = 18.0;
/// Relative size change at the peak of the wobble
const WOBBLE_AMOUNT: f32 = 0.08;
/// Vertical travel (px) per unit of wobble
const WOBBLE_LIFT: f32 = 10.0;
/// Enemies stand slightly below the horizon
const GROUND_LINE: f32 = 0.56;

/// Screen-space placement of one enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub center: Vec2,
    /// Vertical radius; the horizontal radius is 0.7 of this
    pub size: f32,
}

/// Place an enemy on screen, or `None` if it is outside the view cone
pub fn project_enemy(enemy: &Enemy, yaw: f32, viewport: &Viewport, fov: f32) -> Option<Sprite> {
    let angle = bearing(enemy.angle, yaw);
    let half_fov = fov / 2.0;
    if angle.abs() > half_fov {
        return None;
    }

    let x = ((angle / half_fov) * 0.5 + 0.5) * viewport.width;
    let depth = 1.0 / enemy.distance;
    let wobble = enemy.sway.sin() as f32 * WOBBLE_AMOUNT;
    let size = (SPRITE_SCALE * enemy.size * depth + SPRITE_FLOOR) * (1.0 + wobble);
    let y = viewport.height * GROUND_LINE - size * 0.5 + wobble * WOBBLE_LIFT;

    Some(Sprite {
        center: Vec2::new(x, y),
        size,
    })
}

/// Paint one full frame
pub fn render<S: Surface + ?Sized>(state: &GalleryState, surface: &mut S) {
    let vp = &state.viewport;
    surface.clear(vp.width, vp.height);
    draw_background(vp, surface);

    // Back-to-front on a snapshot; stored order is what hit testing uses
    let mut sorted: Vec<&Enemy> = state.enemies.iter().collect();
    sorted.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    for enemy in sorted {
        if let Some(sprite) = project_enemy(enemy, state.yaw, vp, state.tuning.fov) {
            draw_enemy(&sprite, surface);
        }
    }

    draw_crosshair(vp, surface);
    draw_weapon(vp, surface);
}

fn draw_background<S: Surface + ?Sized>(vp: &Viewport, surface: &mut S) {
    let horizon = vp.height * HORIZON_FRACTION;

    surface.fill_rect(
        Vec2::ZERO,
        Vec2::new(vp.width, horizon),
        Paint::Vertical {
            y0: 0.0,
            y1: horizon,
            top: SKY_TOP,
            bottom: SKY_BOTTOM,
        },
    );
    surface.fill_rect(
        Vec2::new(0.0, horizon),
        Vec2::new(vp.width, vp.height - horizon),
        Paint::Vertical {
            y0: horizon,
            y1: vp.height,
            top: GROUND_TOP,
            bottom: GROUND_BOTTOM,
        },
    );

    surface.begin_path();
    surface.move_to(Vec2::new(0.0, horizon));
    surface.line_to(Vec2::new(vp.width, horizon));
    surface.stroke(HORIZON_LINE, 2.0);
}

fn draw_enemy<S: Surface + ?Sized>(sprite: &Sprite, surface: &mut S) {
    let Sprite { center, size } = *sprite;
    let radii = Vec2::new(size * 0.7, size);

    surface.begin_path();
    surface.ellipse(center, radii);
    surface.fill(ENEMY_BODY);

    let eye_offset = Vec2::new(size * 0.15, -size * 0.1);
    surface.begin_path();
    surface.circle(center + Vec2::new(-eye_offset.x, eye_offset.y), size * 0.08);
    surface.circle(center + eye_offset, size * 0.08);
    surface.fill(ENEMY_EYES);

    surface.begin_path();
    surface.ellipse(center, radii);
    surface.stroke(ENEMY_OUTLINE, 2.0);
}

fn draw_crosshair<S: Surface + ?Sized>(vp: &Viewport, surface: &mut S) {
    let c = Vec2::new(vp.width * 0.5, vp.height * HORIZON_FRACTION);

    surface.begin_path();
    for dir in [Vec2::NEG_X, Vec2::X, Vec2::NEG_Y, Vec2::Y] {
        surface.move_to(c + dir * CROSSHAIR_LEN);
        surface.line_to(c + dir * CROSSHAIR_GAP);
    }
    surface.stroke(CROSSHAIR, 2.0);
}

/// Static weapon silhouette: body, receiver, grip, barrel
fn draw_weapon<S: Surface + ?Sized>(vp: &Viewport, surface: &mut S) {
    let base = Vec2::new(vp.width * 0.5, vp.height * 0.78);
    let parts: [(Vec2, Vec2, &'static str); 4] = [
        (Vec2::new(-80.0, 0.0), Vec2::new(160.0, 120.0), "#2a2a2f"),
        (Vec2::new(-40.0, -60.0), Vec2::new(80.0, 80.0), "#121318"),
        (Vec2::new(-18.0, 40.0), Vec2::new(36.0, 60.0), "#6f3f20"),
        (Vec2::new(-12.0, -90.0), Vec2::new(24.0, 40.0), "#202029"),
    ];
    for (offset, size, color) in parts {
        surface.fill_rect(base + offset, size, Paint::Solid(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::renderer::surface::{DrawCommand, RecordingSurface};
    use std::f32::consts::PI;

    fn enemy(angle: f32, distance: f32) -> Enemy {
        Enemy {
            angle,
            distance,
            size: 1.0,
            sway: 0.0,
            hit: false,
        }
    }

    fn fixture(enemies: Vec<Enemy>) -> GalleryState {
        let mut state = GalleryState::empty(5, Tuning::default());
        state.resize(800.0, 600.0, 1.0);
        state.enemies = enemies;
        state
    }

    #[test]
    fn test_projection_centered() {
        let vp = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let sprite = project_enemy(&enemy(0.0, 10.0), 0.0, &vp, PI / 3.0).unwrap();
        assert!((sprite.center.x - 400.0).abs() < 1e-3);
        // sway 0 => no wobble
        assert!((sprite.size - (14.0 + 18.0)).abs() < 1e-3);
        assert!((sprite.center.y - (336.0 - 16.0)).abs() < 1e-3);
    }

    #[test]
    fn test_projection_edges_and_culling() {
        let vp = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let fov = PI / 3.0;
        let right = project_enemy(&enemy(PI / 6.0 - 1e-4, 10.0), 0.0, &vp, fov).unwrap();
        assert!((right.center.x - 800.0).abs() < 0.5);
        let left = project_enemy(&enemy(2.0 * PI - PI / 6.0 + 1e-4, 10.0), 0.0, &vp, fov).unwrap();
        assert!(left.center.x.abs() < 0.5);
        assert!(project_enemy(&enemy(PI / 6.0 + 0.01, 10.0), 0.0, &vp, fov).is_none());
        assert!(project_enemy(&enemy(PI, 10.0), 0.0, &vp, fov).is_none());
    }

    #[test]
    fn test_nearer_enemies_are_larger() {
        let vp = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let near = project_enemy(&enemy(0.0, 5.0), 0.0, &vp, PI / 3.0).unwrap();
        let far = project_enemy(&enemy(0.0, 19.0), 0.0, &vp, PI / 3.0).unwrap();
        assert!(near.size > far.size);
    }

    #[test]
    fn test_wobble_scales_size() {
        let vp = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let mut e = enemy(0.0, 10.0);
        e.sway = std::f64::consts::FRAC_PI_2;
        let sprite = project_enemy(&e, 0.0, &vp, PI / 3.0).unwrap();
        assert!((sprite.size - 32.0 * 1.08).abs() < 1e-3);
    }

    #[test]
    fn test_render_paints_far_to_near_without_reordering() {
        let mut state = fixture(vec![enemy(0.0, 6.0), enemy(0.1, 18.0), enemy(6.2, 11.0)]);
        let before = state.enemies.clone();
        let mut surface = RecordingSurface::new();

        render(&state, &mut surface);

        let bodies = surface.filled_ellipses(ENEMY_BODY);
        assert_eq!(bodies.len(), 3);
        let sizes: Vec<f32> = bodies.iter().map(|(_, radii)| radii.y).collect();
        assert!(sizes[0] < sizes[1] && sizes[1] < sizes[2], "{:?}", sizes);
        assert_eq!(state.enemies, before);

        // Second frame from the same state paints the same thing
        let mut again = RecordingSurface::new();
        render(&state, &mut again);
        assert_eq!(surface.commands, again.commands);

        state.yaw = PI;
        surface.reset();
        render(&state, &mut surface);
        assert!(surface.filled_ellipses(ENEMY_BODY).is_empty());
    }

    #[test]
    fn test_render_layers() {
        let state = fixture(Vec::new());
        let mut surface = RecordingSurface::new();
        render(&state, &mut surface);

        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }
        );
        match &surface.commands[1] {
            DrawCommand::FillRect { size, paint, .. } => {
                assert!((size.y - 330.0).abs() < 1e-3);
                assert!(matches!(paint, Paint::Vertical { top: SKY_TOP, .. }));
            }
            other => panic!("expected sky, got {:?}", other),
        }
        let crosshair_strokes = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { color: CROSSHAIR, .. }))
            .count();
        assert_eq!(crosshair_strokes, 1);
        let weapon_parts = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { paint: Paint::Solid(_), .. }))
            .count();
        assert_eq!(weapon_parts, 4);
    }
}
