//! Recording value objects and session entity

pub mod duration;
pub mod fragments;
pub mod session;

pub use duration::Duration;
pub use fragments::FragmentBuffer;
pub use session::{InvalidStateTransition, RecordingSession, SessionState};
