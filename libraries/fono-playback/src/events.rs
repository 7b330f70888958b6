//! Playback events
//!
//! Event-based communication for UI synchronization. Events are pushed on
//! each state transition and drained by the embedding layer via
//! [`PlaybackEngine::take_events`](crate::PlaybackEngine::take_events).

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Events emitted by the playback engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A new session was bound to a record
    SessionBound {
        /// Path of the bound audio file
        path: PathBuf,
    },

    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Position update (periodic, at the media clock's cadence)
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration (0 while still unknown)
        duration_ms: u64,
    },

    /// Track finished playing naturally
    TrackFinished {
        /// Path of the finished audio file
        path: PathBuf,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
