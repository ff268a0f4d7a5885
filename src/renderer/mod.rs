//! Canvas 2D rendering module
//!
//! The scene is painted through the `Surface` trait so it can target the
//! browser canvas or an in-memory recorder.

pub mod scene;
pub mod surface;

pub use scene::{Sprite, project_enemy, render};
pub use surface::{DrawCommand, Paint, RecordingSurface, Surface};
