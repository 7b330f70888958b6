//! Platform-agnostic audio subsystem seam
//!
//! Abstracts the decoder/output pair the engine drives (HTML audio element,
//! rodio sink, native transport...). The engine issues transport calls; the
//! backend answers asynchronously with [`BackendSignal`]s tagged with the
//! [`SessionId`] the file was opened under.

use crate::error::Result;
use crate::types::SessionId;
use std::path::Path;
use std::time::Duration;

/// Asynchronous signals from the audio subsystem
///
/// The embedding layer pumps these into
/// [`PlaybackEngine::handle_signal`](crate::PlaybackEngine::handle_signal)
/// together with the session id the backend was opened under; signals from a
/// superseded session are discarded there.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendSignal {
    /// Duration metadata became available; the session is playable
    Ready {
        /// Total track duration
        duration: Duration,
    },

    /// The media clock advanced
    Progress {
        /// Current position
        position: Duration,
    },

    /// The track finished naturally
    Ended,

    /// The subsystem failed mid-session (decode error, device loss)
    Failed {
        /// Failure description
        message: String,
    },
}

/// Audio subsystem transport
///
/// Implementers own at most one native decode/transport session at a time;
/// `open` on a live backend implicitly supersedes the previous session, but
/// the engine always calls `close` first so resources are released eagerly.
pub trait AudioBackend: Send {
    /// Open a file, binding the native session to `session`
    ///
    /// Duration is not known at return; it arrives later as
    /// [`BackendSignal::Ready`]. A file the subsystem cannot open (corrupt or
    /// unsupported codec despite the extension) fails here with
    /// [`PlaybackError::Decode`](crate::PlaybackError::Decode).
    fn open(&mut self, session: SessionId, path: &Path) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping position
    fn pause(&mut self) -> Result<()>;

    /// Halt playback and rewind to zero, keeping the track loaded
    fn stop(&mut self) -> Result<()>;

    /// Relocate the transport
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Release the native session's resources
    ///
    /// Infallible: a close that goes wrong has nothing useful to report to
    /// the state machine.
    fn close(&mut self);
}
