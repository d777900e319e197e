//! playbar - video transport controls kept in sync with a media source.
//!
//! A [`PlaybackController`](controller::PlaybackController) subscribes to a
//! [`MediaSource`](media::MediaSource)'s lifecycle notifications, folds them
//! into a small playback state through a pure reducer, and translates
//! play/pause and timeline gestures into source commands. The
//! [`view`] module turns that state into what a transport draws: button
//! face, time text, and the widths of the buffered and progress indicators.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use playbar::config::PlayerConfig;
//! use playbar::controller::PlaybackController;
//! use playbar::media::SimulatedSource;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let options = PlayerConfig::new("/video/intro.mp4");
//! let source = Arc::new(SimulatedSource::new(options.source_uri()?));
//!
//! let mut controller = PlaybackController::new(options);
//! controller.bind(source.clone());
//!
//! source.load_metadata(90.0);
//! controller.toggle();
//! controller.seek(0.5);
//!
//! println!("{}", controller.view().render_line(40));
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Playback controller, reducer and seek geometry.
pub mod controller;

/// Media source capability surface and an in-process simulated source.
pub mod media;

/// Reactive state cells.
pub mod reactive;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Transport view model and time formatting.
pub mod view;

/// Re-exported core types for convenience.
pub use core::{PlaybarError, Result};
