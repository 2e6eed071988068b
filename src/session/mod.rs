//! Session layer: screens, balance, pacing, audio and host integration.
//!
//! [`SessionController`] is the single owner of the session. Engines from
//! [`crate::games`] plug into it one round at a time.

pub mod audio;
pub mod controller;
pub mod host;
pub mod state;
pub mod timer;

pub use audio::{Cue, CuePlayer, RecordingPlayer, SilentPlayer};
pub use controller::{ResultSummary, SessionController, SessionSnapshot};
pub use host::{HostShell, Viewport};
pub use state::{RoundRecord, Screen, Session};
pub use timer::{PendingTransition, RevealTimer};
