//! Platform abstraction layer
//!
//! Maps browser events to tick intents and tick events to status text:
//! - Input: pointer, arrow keys, device orientation
//! - Status: status line messages and motion-setup errors

pub mod input;
pub mod status;

pub use input::{
    ListenerOptions, heading_from_alpha, key_nudge, listener_options, on_key, on_orientation,
    on_pointer_down,
};
pub use status::{MotionError, Status, StatusLine};
