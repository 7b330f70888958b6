//! Fono Session
//!
//! The coordination layer tying the library to playback. A
//! [`SelectionCoordinator`] owns the [`LibraryStore`](fono_library::LibraryStore)
//! and the [`PlaybackEngine`](fono_playback::PlaybackEngine), tracks which
//! file is selected, and keeps the three consistent: the selected file always
//! exists in the library, and removing its folder (or resetting the library)
//! clears the selection and releases the playback session in the same call.
//!
//! The embedding shell drives one coordinator from its single command loop
//! and drains the library and playback event queues after each command.

mod coordinator;

pub use coordinator::SelectionCoordinator;
