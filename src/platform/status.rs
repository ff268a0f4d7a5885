//! Status line messages and motion-setup failures

use std::fmt;

use crate::sim::{GalleryEvent, ShotOutcome};

/// Everything the status line can say
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Hit,
    Miss,
    MotionActive,
    MotionDenied,
    MotionUnavailable,
    MotionFailed,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Hit => "Hit! Rotate to find more.",
            Status::Miss => "Missed. Keep scanning.",
            Status::MotionActive => "Motion active. Rotate to look around.",
            Status::MotionDenied => "Motion permission denied.",
            Status::MotionUnavailable => "Motion sensors unavailable on this device.",
            Status::MotionFailed => "Unable to enable motion.",
        }
    }

    pub fn from_outcome(outcome: ShotOutcome) -> Self {
        match outcome {
            ShotOutcome::Hit { .. } => Status::Hit,
            ShotOutcome::Miss => Status::Miss,
        }
    }

    /// Status line update for a tick event, if any
    pub fn from_event(event: &GalleryEvent) -> Option<Self> {
        match event {
            GalleryEvent::Shot { outcome, .. } => Some(Self::from_outcome(*outcome)),
            GalleryEvent::MotionActivated => Some(Status::MotionActive),
            GalleryEvent::Spawned { .. } => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Decides what the status line shows after each frame
///
/// Motion setup reports asynchronously, outside the tick. Its outcome is
/// queued here and applied after the frame's events, so a shot resolved in
/// the same frame can't overwrite it.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pending: Option<Status>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a status from outside the tick; the latest one wins
    pub fn queue(&mut self, status: Status) {
        self.pending = Some(status);
    }

    /// Final status for a frame, if it changes
    pub fn settle(&mut self, events: &[GalleryEvent]) -> Option<Status> {
        let from_events = events.iter().rev().find_map(Status::from_event);
        self.pending.take().or(from_events)
    }
}

/// Why orientation control could not be enabled
///
/// None of these are fatal; the game keeps running on pointer and keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// The browser has no `DeviceOrientationEvent`
    Unavailable,
    /// The user (or policy) refused the permission prompt
    Denied,
    /// The permission request itself rejected
    Failed(String),
}

impl MotionError {
    pub fn status(&self) -> Status {
        match self {
            MotionError::Unavailable => Status::MotionUnavailable,
            MotionError::Denied => Status::MotionDenied,
            MotionError::Failed(_) => Status::MotionFailed,
        }
    }

    /// Interpret the string a permission prompt resolves with
    pub fn check_permission(result: &str) -> Result<(), MotionError> {
        if result == "granted" {
            Ok(())
        } else {
            Err(MotionError::Denied)
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Unavailable => write!(f, "device orientation is not supported"),
            MotionError::Denied => write!(f, "device orientation permission denied"),
            MotionError::Failed(reason) => {
                write!(f, "device orientation request failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for MotionError {}
