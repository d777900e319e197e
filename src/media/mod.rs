//! Media source abstraction.
//!
//! The playable resource and its engine live outside this crate. This module
//! describes what the controller needs from them: a handful of commands,
//! readable properties, and an ordered stream of lifecycle notifications.

mod error;
mod simulated;
mod source;

pub use error::MediaError;
pub use simulated::{MediaCommand, SimulatedSource};
pub use source::{
    BufferedRanges, MediaReadings, MediaSource, Notification, NotificationStream, SourceUri,
    TimeRange, known_duration,
};
