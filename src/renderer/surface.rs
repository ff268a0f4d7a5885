//! Drawing backends
//!
//! The scene only needs a handful of Canvas 2D primitives. `Surface` names
//! them so the same painting code drives the browser canvas and the
//! in-memory recorder used by tests and the native build.

use glam::Vec2;

/// Fill for a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(&'static str),
    /// Linear gradient from `top` at `y0` to `bottom` at `y1`
    Vertical {
        y0: f32,
        y1: f32,
        top: &'static str,
        bottom: &'static str,
    },
}

/// The 2D primitives the scene is painted with (CSS pixel coordinates)
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    /// Full axis-aligned ellipse as a closed subpath
    fn ellipse(&mut self, center: Vec2, radii: Vec2);
    /// Full circle as a closed subpath
    fn circle(&mut self, center: Vec2, radius: f32);

    fn fill(&mut self, color: &'static str);
    fn stroke(&mut self, color: &'static str, width: f32);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillRect { origin: Vec2, size: Vec2, paint: Paint },
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Ellipse { center: Vec2, radii: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Fill(&'static str),
    Stroke { color: &'static str, width: f32 },
}

/// Surface that keeps every command instead of drawing
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Ellipses filled with `color`, in paint order
    pub fn filled_ellipses(&self, color: &str) -> Vec<(Vec2, Vec2)> {
        let mut out = Vec::new();
        let mut pending = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::BeginPath => pending.clear(),
                DrawCommand::Ellipse { center, radii } => pending.push((*center, *radii)),
                DrawCommand::Fill(c) if *c == color => out.append(&mut pending),
                _ => {}
            }
        }
        out
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint) {
        self.commands.push(DrawCommand::FillRect { origin, size, paint });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2) {
        self.commands.push(DrawCommand::Ellipse { center, radii });
    }

    fn circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn fill(&mut self, color: &'static str) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, color: &'static str, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::TAU;

    use glam::Vec2;
    use web_sys::CanvasRenderingContext2d;

    use super::{Paint, Surface};

    impl Surface for CanvasRenderingContext2d {
        fn clear(&mut self, width: f32, height: f32) {
            self.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint) {
            match paint {
                Paint::Solid(color) => self.set_fill_style_str(color),
                Paint::Vertical { y0, y1, top, bottom } => {
                    let gradient = self.create_linear_gradient(0.0, y0 as f64, 0.0, y1 as f64);
                    if gradient.add_color_stop(0.0, top).is_err()
                        || gradient.add_color_stop(1.0, bottom).is_err()
                    {
                        log::warn!("Invalid gradient stop: {} / {}", top, bottom);
                    }
                    self.set_fill_style_canvas_gradient(&gradient);
                }
            }
            CanvasRenderingContext2d::fill_rect(
                self,
                origin.x as f64,
                origin.y as f64,
                size.x as f64,
                size.y as f64,
            );
        }

        fn begin_path(&mut self) {
            CanvasRenderingContext2d::begin_path(self);
        }

        fn move_to(&mut self, p: Vec2) {
            CanvasRenderingContext2d::move_to(self, p.x as f64, p.y as f64);
        }

        fn line_to(&mut self, p: Vec2) {
            CanvasRenderingContext2d::line_to(self, p.x as f64, p.y as f64);
        }

        fn ellipse(&mut self, center: Vec2, radii: Vec2) {
            // Only fails on negative radii, which projection never produces
            let _ = CanvasRenderingContext2d::ellipse(
                self,
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                TAU,
            );
        }

        fn circle(&mut self, center: Vec2, radius: f32) {
            // Start a new subpath so consecutive circles aren't joined by a line
            CanvasRenderingContext2d::move_to(self, (center.x + radius) as f64, center.y as f64);
            let _ = self.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        }

        fn fill(&mut self, color: &'static str) {
            self.set_fill_style_str(color);
            CanvasRenderingContext2d::fill(self);
        }

        fn stroke(&mut self, color: &'static str, width: f32) {
            self.set_stroke_style_str(color);
            self.set_line_width(width as f64);
            CanvasRenderingContext2d::stroke(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_ellipses_tracks_fill_color() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.ellipse(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        surface.fill("#b12d2b");
        surface.begin_path();
        surface.ellipse(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        surface.stroke("black", 2.0);

        let bodies = surface.filled_ellipses("#b12d2b");
        assert_eq!(bodies, vec![(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))]);
        assert!(surface.filled_ellipses("white").is_empty());

        surface.reset();
        assert!(surface.commands.is_empty());
    }
}
