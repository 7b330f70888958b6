//! Core types for the playback engine

use fono_core::AudioFileRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// `Idle` means no session is bound; every other state implies a live
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No session bound
    Idle,

    /// Session opened, waiting for the subsystem's duration metadata
    Loading,

    /// Loaded and stopped at a known position
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Track finished naturally; replay starts from zero
    Ended,
}

/// Identity of one decode/transport session
///
/// Monotonically increasing; asynchronous backend signals carry the id they
/// were opened under, and the engine discards any signal whose id is not the
/// live session's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub(crate) u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// One live binding between the engine and an audio file
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Signal guard key
    pub id: SessionId,

    /// The bound record
    pub record: AudioFileRecord,

    /// Current state (never `Idle` while the session exists)
    pub state: PlaybackState,

    /// Current position
    pub position: Duration,

    /// Total duration; unknown until the subsystem reports it
    pub duration: Option<Duration>,
}
