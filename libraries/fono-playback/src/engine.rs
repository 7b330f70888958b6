//! Playback engine - the transport state machine
//!
//! Owns at most one live session over the audio subsystem and serializes
//! every transition through `&mut self`; asynchronous backend signals are
//! admitted only when their session id matches the live session.

use crate::backend::{AudioBackend, BackendSignal};
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::types::{PlaybackSession, PlaybackState, SessionId};
use fono_core::AudioFileRecord;
use std::time::Duration;
use tracing::debug;

/// The playback state machine
///
/// State is `Idle` exactly when no session is bound. `bind` is the only way
/// in; the cold-start sequence is `bind` then (after the subsystem's `Ready`
/// signal) `play`.
pub struct PlaybackEngine {
    backend: Box<dyn AudioBackend>,
    session: Option<PlaybackSession>,
    next_session: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create an engine over an audio subsystem
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            session: None,
            next_session: 0,
            pending_events: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map_or(PlaybackState::Idle, |s| s.state)
    }

    /// Current position (zero when idle)
    pub fn position(&self) -> Duration {
        self.session
            .as_ref()
            .map_or(Duration::ZERO, |s| s.position)
    }

    /// Total duration, once the subsystem has reported it
    pub fn duration(&self) -> Option<Duration> {
        self.session.as_ref().and_then(|s| s.duration)
    }

    /// The bound record, if any
    pub fn current(&self) -> Option<&AudioFileRecord> {
        self.session.as_ref().map(|s| &s.record)
    }

    /// The live session's id, if any
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Bind a record, replacing any existing session
    ///
    /// The prior session's native resources are released before the new file
    /// is opened. The new session starts in `Loading`; duration arrives
    /// asynchronously as [`BackendSignal::Ready`]. If the subsystem cannot
    /// open the file the engine stays `Idle` with no session.
    pub fn bind(&mut self, record: &AudioFileRecord) -> Result<()> {
        let prior = self.state();

        if self.session.take().is_some() {
            self.backend.close();
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;

        if let Err(e) = self.backend.open(id, &record.path) {
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
            self.push_state_change(prior);
            return Err(e);
        }

        self.session = Some(PlaybackSession {
            id,
            record: record.clone(),
            state: PlaybackState::Loading,
            position: Duration::ZERO,
            duration: None,
        });
        self.pending_events.push(PlaybackEvent::SessionBound {
            path: record.path.clone(),
        });
        self.push_state_change(prior);
        Ok(())
    }

    /// Release the current session, returning to `Idle`
    pub fn unbind(&mut self) {
        let prior = self.state();
        if self.session.take().is_some() {
            self.backend.close();
        }
        self.push_state_change(prior);
    }

    /// Start or resume playback
    ///
    /// Valid in `Ready`, `Paused`, and `Ended` (which replays from zero).
    /// `Playing` is a no-op; `Idle` and a still-loading session fail with
    /// `NoActiveSession`.
    pub fn play(&mut self) -> Result<()> {
        let prior = self.state();
        let Some(session) = self.session.as_mut() else {
            return Err(PlaybackError::NoActiveSession);
        };

        match session.state {
            PlaybackState::Loading => return Err(PlaybackError::NoActiveSession),
            PlaybackState::Playing => return Ok(()),
            PlaybackState::Ready | PlaybackState::Paused => {
                self.backend.play()?;
                session.state = PlaybackState::Playing;
            }
            PlaybackState::Ended => {
                // Replay from the start without rebinding
                self.backend.seek(Duration::ZERO)?;
                session.position = Duration::ZERO;
                self.backend.play()?;
                session.state = PlaybackState::Playing;
            }
            PlaybackState::Idle => unreachable!("live session is never Idle"),
        }

        self.push_state_change(prior);
        Ok(())
    }

    /// Pause playback; a no-op in any state but `Playing`
    pub fn pause(&mut self) -> Result<()> {
        let prior = self.state();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.state != PlaybackState::Playing {
            return Ok(());
        }

        self.backend.pause()?;
        session.state = PlaybackState::Paused;
        self.push_state_change(prior);
        Ok(())
    }

    /// Stop playback, rewinding to zero but keeping the track loaded
    ///
    /// The session stays bound so the track can replay from the start
    /// without reselecting. A session that is still `Loading` only has its
    /// position reset; `Ready` still arrives from the backend signal.
    pub fn stop(&mut self) -> Result<()> {
        let prior = self.state();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        self.backend.stop()?;
        session.position = Duration::ZERO;
        if session.state != PlaybackState::Loading {
            session.state = PlaybackState::Ready;
        }
        self.push_state_change(prior);
        Ok(())
    }

    /// Seek to a position, clamped to `[0, duration]`
    ///
    /// Valid once duration is known; does not change Playing/Paused state.
    /// Position is updated optimistically before the subsystem relocates.
    /// Returns the clamped position.
    pub fn seek(&mut self, position: Duration) -> Result<Duration> {
        let Some(session) = self.session.as_mut() else {
            return Err(PlaybackError::NoActiveSession);
        };
        let Some(duration) = session.duration else {
            return Err(PlaybackError::InvalidOperation(
                "duration not yet known".to_string(),
            ));
        };

        let clamped = position.min(duration);
        session.position = clamped;
        self.backend.seek(clamped)?;

        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: clamped.as_millis() as u64,
            duration_ms: duration.as_millis() as u64,
        });
        Ok(clamped)
    }

    /// Seek from a (possibly negative) seconds value, clamping below at zero
    pub fn seek_seconds(&mut self, seconds: f64) -> Result<Duration> {
        if !seconds.is_finite() {
            return Err(PlaybackError::InvalidOperation(format!(
                "non-finite seek target: {seconds}"
            )));
        }
        self.seek(Duration::from_secs_f64(seconds.max(0.0)))
    }

    /// Feed an asynchronous subsystem signal into the state machine
    ///
    /// Signals whose session id is not the live session's are discarded:
    /// a late `Ready` from a superseded bind can never leak its duration
    /// into the current session.
    pub fn handle_signal(&mut self, id: SessionId, signal: BackendSignal) {
        let prior = self.state();

        let Some(live_id) = self.session.as_ref().map(|s| s.id) else {
            debug!(%id, ?signal, "signal with no live session, discarding");
            return;
        };
        if live_id != id {
            debug!(%id, %live_id, ?signal, "stale session signal, discarding");
            return;
        }

        if let BackendSignal::Failed { message } = signal {
            self.backend.close();
            self.session = None;
            self.pending_events.push(PlaybackEvent::Error { message });
            self.push_state_change(prior);
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        match signal {
            BackendSignal::Ready { duration } => {
                session.duration = Some(duration);
                if session.state == PlaybackState::Loading {
                    session.state = PlaybackState::Ready;
                }
            }
            BackendSignal::Progress { position } => {
                let position = session.duration.map_or(position, |d| position.min(d));
                session.position = position;
                self.pending_events.push(PlaybackEvent::PositionUpdate {
                    position_ms: position.as_millis() as u64,
                    duration_ms: session
                        .duration
                        .map_or(0, |d| d.as_millis() as u64),
                });
            }
            BackendSignal::Ended => {
                if matches!(
                    session.state,
                    PlaybackState::Playing | PlaybackState::Paused
                ) {
                    session.state = PlaybackState::Ended;
                    session.position = Duration::ZERO;
                    self.pending_events.push(PlaybackEvent::TrackFinished {
                        path: session.record.path.clone(),
                    });
                }
            }
            BackendSignal::Failed { .. } => {}
        }

        self.push_state_change(prior);
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_state_change(&mut self, prior: PlaybackState) {
        let state = self.state();
        if state != prior {
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::{Path, PathBuf};

    /// Backend that accepts every call and remembers the last one
    #[derive(Default)]
    struct AcceptingBackend {
        opened: Vec<(SessionId, PathBuf)>,
        closed: usize,
    }

    impl AudioBackend for AcceptingBackend {
        fn open(&mut self, session: SessionId, path: &Path) -> Result<()> {
            self.opened.push((session, path.to_path_buf()));
            Ok(())
        }
        fn play(&mut self) -> Result<()> {
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            Ok(())
        }
        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
        fn seek(&mut self, _position: Duration) -> Result<()> {
            Ok(())
        }
        fn close(&mut self) {
            self.closed += 1;
        }
    }

    /// Backend whose open always fails
    struct RefusingBackend;

    impl AudioBackend for RefusingBackend {
        fn open(&mut self, _session: SessionId, _path: &Path) -> Result<()> {
            Err(PlaybackError::Decode("unsupported codec".to_string()))
        }
        fn play(&mut self) -> Result<()> {
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            Ok(())
        }
        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
        fn seek(&mut self, _position: Duration) -> Result<()> {
            Ok(())
        }
        fn close(&mut self) {}
    }

    fn record(name: &str) -> AudioFileRecord {
        AudioFileRecord {
            name: name.to_string(),
            folder_path: PathBuf::from("/music"),
            path: PathBuf::from("/music").join(name),
            size: 1,
            last_modified: Utc::now(),
            cover: None,
        }
    }

    fn ready_engine() -> PlaybackEngine {
        let mut engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        engine.bind(&record("a.mp3")).unwrap();
        let id = engine.session_id().unwrap();
        engine.handle_signal(
            id,
            BackendSignal::Ready {
                duration: Duration::from_secs(200),
            },
        );
        engine
    }

    #[test]
    fn starts_idle() {
        let engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.position(), Duration::ZERO);
        assert!(engine.duration().is_none());
    }

    #[test]
    fn bind_enters_loading_until_ready() {
        let mut engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        engine.bind(&record("a.mp3")).unwrap();
        assert_eq!(engine.state(), PlaybackState::Loading);
        assert!(engine.duration().is_none());

        let id = engine.session_id().unwrap();
        engine.handle_signal(
            id,
            BackendSignal::Ready {
                duration: Duration::from_secs(90),
            },
        );
        assert_eq!(engine.state(), PlaybackState::Ready);
        assert_eq!(engine.duration(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn play_before_ready_fails() {
        let mut engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        assert!(matches!(
            engine.play(),
            Err(PlaybackError::NoActiveSession)
        ));

        engine.bind(&record("a.mp3")).unwrap();
        assert!(matches!(
            engine.play(),
            Err(PlaybackError::NoActiveSession)
        ));
    }

    #[test]
    fn transport_chain_play_pause_play_stop() {
        let mut engine = ready_engine();

        engine.play().unwrap();
        assert_eq!(engine.state(), PlaybackState::Playing);

        engine.pause().unwrap();
        assert_eq!(engine.state(), PlaybackState::Paused);

        engine.play().unwrap();
        assert_eq!(engine.state(), PlaybackState::Playing);

        engine.stop().unwrap();
        assert_eq!(engine.state(), PlaybackState::Ready);
        assert_eq!(engine.position(), Duration::ZERO);
        assert!(engine.current().is_some());
    }

    #[test]
    fn pause_outside_playing_is_noop() {
        let mut engine = ready_engine();
        engine.pause().unwrap();
        assert_eq!(engine.state(), PlaybackState::Ready);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut engine = ready_engine();

        let clamped = engine.seek_seconds(-5.0).unwrap();
        assert_eq!(clamped, Duration::ZERO);

        let clamped = engine.seek_seconds(250.0).unwrap();
        assert_eq!(clamped, Duration::from_secs(200));
        assert_eq!(engine.position(), Duration::from_secs(200));
    }

    #[test]
    fn seek_with_unknown_duration_fails() {
        let mut engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        engine.bind(&record("a.mp3")).unwrap();
        assert!(matches!(
            engine.seek(Duration::from_secs(1)),
            Err(PlaybackError::InvalidOperation(_))
        ));
    }

    #[test]
    fn ended_resets_position_and_allows_replay() {
        let mut engine = ready_engine();
        engine.play().unwrap();
        engine.seek(Duration::from_secs(100)).unwrap();

        let id = engine.session_id().unwrap();
        engine.handle_signal(id, BackendSignal::Ended);
        assert_eq!(engine.state(), PlaybackState::Ended);
        assert_eq!(engine.position(), Duration::ZERO);

        // Same session replays from the start
        engine.play().unwrap();
        assert_eq!(engine.state(), PlaybackState::Playing);
        assert_eq!(engine.position(), Duration::ZERO);
    }

    #[test]
    fn stale_ready_from_superseded_session_is_discarded() {
        let mut engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        engine.bind(&record("a.mp3")).unwrap();
        let first = engine.session_id().unwrap();

        engine.bind(&record("b.mp3")).unwrap();
        let second = engine.session_id().unwrap();
        assert_ne!(first, second);

        // Late Ready from the first bind arrives after the rebind
        engine.handle_signal(
            first,
            BackendSignal::Ready {
                duration: Duration::from_secs(11),
            },
        );
        assert_eq!(engine.state(), PlaybackState::Loading);
        assert!(engine.duration().is_none());

        engine.handle_signal(
            second,
            BackendSignal::Ready {
                duration: Duration::from_secs(22),
            },
        );
        assert_eq!(engine.duration(), Some(Duration::from_secs(22)));
    }

    #[test]
    fn failed_open_leaves_engine_idle() {
        let mut engine = PlaybackEngine::new(Box::new(RefusingBackend));
        let result = engine.bind(&record("bad.mp3"));
        assert!(matches!(result, Err(PlaybackError::Decode(_))));
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert!(engine.current().is_none());
    }

    #[test]
    fn backend_failure_signal_tears_down_session() {
        let mut engine = ready_engine();
        engine.play().unwrap();

        let id = engine.session_id().unwrap();
        engine.handle_signal(
            id,
            BackendSignal::Failed {
                message: "device lost".to_string(),
            },
        );
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert!(engine.current().is_none());
    }

    #[test]
    fn progress_updates_position_and_emits_event() {
        let mut engine = ready_engine();
        engine.play().unwrap();
        engine.take_events();

        let id = engine.session_id().unwrap();
        engine.handle_signal(
            id,
            BackendSignal::Progress {
                position: Duration::from_secs(42),
            },
        );
        assert_eq!(engine.position(), Duration::from_secs(42));

        let events = engine.take_events();
        assert!(matches!(
            events.as_slice(),
            [PlaybackEvent::PositionUpdate {
                position_ms: 42_000,
                duration_ms: 200_000,
            }]
        ));
    }

    #[test]
    fn rebind_closes_prior_backend_session() {
        let mut engine = PlaybackEngine::new(Box::<AcceptingBackend>::default());
        engine.bind(&record("a.mp3")).unwrap();
        engine.bind(&record("b.mp3")).unwrap();
        engine.unbind();

        let events = engine.take_events();
        // bound a, bound b, unbound: two SessionBound plus the transitions
        let bounds = events
            .iter()
            .filter(|e| matches!(e, PlaybackEvent::SessionBound { .. }))
            .count();
        assert_eq!(bounds, 2);
        assert_eq!(engine.state(), PlaybackState::Idle);
    }
}
