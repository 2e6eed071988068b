//! # blast-wars
//!
//! Game engine for a small casino arcade: Ride The Bus, Tile Hunter and
//! Casino War sharing one chip balance.
//!
//! ## Design Principles
//!
//! 1. **Engines Stay Pure**: A round engine sees the bet and the balance
//!    through a `RoundContext` and answers with an `Outcome`. It never
//!    touches the session.
//!
//! 2. **One Balance Path**: Every balance change goes through
//!    `Session::update_balance`, which keeps the high score in step.
//!
//! 3. **Exact Payouts**: Multipliers are rationals and payouts are floored
//!    to whole chips, so 100 chips at 3.375x pays 337.
//!
//! ## Architecture
//!
//! - **Logical Clock**: Reveal pacing is a scheduled transition advanced by
//!   the host. Leaving a round invalidates anything it scheduled.
//!
//! - **Seedable RNG**: Every draw comes from a forked `ChaCha8Rng`, so a
//!   seeded session replays exactly.
//!
//! - **Persistent History**: Settled rounds live in an `im::Vector`.
//!
//! ## Modules
//!
//! - `core`: Cards, RNG, multipliers, configuration, errors
//! - `games`: The three round engines and their shared trait
//! - `session`: Screen state machine, pacing, audio cues, host shell

pub mod core;
pub mod games;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Card, Color, Rank, RankOrder, Suit,
    Difficulty, GameKind, SessionConfig,
    GameError, Result,
    GameRng, GameRngState,
    Multiplier,
};

pub use crate::games::{
    ActiveRound, RoundEngine, RoundContext, RoundSnapshot, RoundStatus,
    Guess, Move, Outcome,
    RideTheBus, TileHunter, CasinoWar,
};

pub use crate::session::{
    Screen, Session, RoundRecord,
    SessionController, SessionSnapshot, ResultSummary,
    Cue, CuePlayer, SilentPlayer,
    HostShell, Viewport,
};
