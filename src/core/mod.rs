//! Core building blocks: cards, RNG, multipliers, configuration, errors.
//!
//! Nothing in here knows about a specific game. The engines in `games`
//! and the controller in `session` are built on top of these types.

pub mod card;
pub mod config;
pub mod error;
pub mod multiplier;
pub mod rng;

pub use card::{Card, Color, Rank, RankOrder, Suit};
pub use config::{Difficulty, GameKind, SessionConfig};
pub use error::{GameError, Result};
pub use multiplier::Multiplier;
pub use rng::{GameRng, GameRngState};
