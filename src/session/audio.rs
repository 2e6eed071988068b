//! Audio cues.
//!
//! The core only names the cue; playing it is the host's business and any
//! failure there is swallowed on the host side.

use serde::{Deserialize, Serialize};

/// Outcome tags the audio layer can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Correct,
    Wrong,
    Win,
    Lose,
    CashOut,
}

impl Cue {
    /// Sound file stem (`/sounds/{stem}.mp3`).
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
            Cue::Win => "win",
            Cue::Lose => "lose",
            Cue::CashOut => "cashout",
        }
    }
}

/// Fire-and-forget cue playback.
pub trait CuePlayer {
    /// Play a cue. Must not fail.
    fn play(&mut self, cue: Cue);
}

/// Discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&mut self, _cue: Cue) {}
}

/// Keeps every cue it is asked to play.
#[derive(Clone, Debug, Default)]
pub struct RecordingPlayer {
    pub played: Vec<Cue>,
}

impl RecordingPlayer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded cues, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.played)
    }
}

impl CuePlayer for RecordingPlayer {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}
