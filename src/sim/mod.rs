//! Simulation module
//!
//! All gameplay logic lives here:
//! - One explicit `GalleryState` passed into every step
//! - Seeded RNG only
//! - Stable iteration order (insertion order of enemies)
//! - No rendering or platform dependencies

pub mod aim;
pub mod hit;
pub mod spawner;
pub mod state;
pub mod tick;

pub use aim::{advance_aim, aim_error, nudge_target_yaw, set_target_yaw};
pub use hit::{ShotOutcome, bearing, find_target, fire};
pub use spawner::{spawn_enemy, update_enemies};
pub use state::{Enemy, GalleryState, Viewport};
pub use tick::{FrameClock, GalleryEvent, TickInput, tick};
