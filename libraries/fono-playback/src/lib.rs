//! Fono Playback
//!
//! Platform-agnostic playback state machine for Fono.
//!
//! This crate provides:
//! - `PlaybackEngine`: one active transport session over a bound audio file
//! - Transport operations (bind/play/pause/stop/seek) with the state machine
//!   `Idle -> Loading -> Ready -> Playing/Paused -> Ended`
//! - Session-identity guarding of asynchronous backend signals, so a signal
//!   from a superseded session can never corrupt the live one
//! - Typed `PlaybackEvent`s for UI synchronization
//!
//! # Architecture
//!
//! `fono-playback` never talks to an audio device directly. The actual
//! subsystem (decoder + output) sits behind the [`AudioBackend`] trait and
//! reports back through [`BackendSignal`]s tagged with the [`SessionId`] it
//! was opened under.
//!
//! # Example
//!
//! ```rust,no_run
//! use fono_playback::{AudioBackend, PlaybackEngine, Result, SessionId};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! struct MyBackend { /* platform transport */ }
//!
//! impl AudioBackend for MyBackend {
//!     fn open(&mut self, _session: SessionId, _path: &Path) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn stop(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn close(&mut self) {}
//! }
//!
//! let mut engine = PlaybackEngine::new(Box::new(MyBackend {}));
//! // engine.bind(&record)?;
//! // ...subsystem delivers BackendSignal::Ready, then:
//! // engine.play()?;
//! ```

mod backend;
mod engine;
mod error;
mod events;
pub mod types;

// Public exports
pub use backend::{AudioBackend, BackendSignal};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use types::{PlaybackSession, PlaybackState, SessionId};
