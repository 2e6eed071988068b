//! Error type shared by the engines and the session controller.
//!
//! Only [`GameError::InsufficientBalance`] is meant to reach the player as a
//! blocking notice. Everything else signals a host driving the API outside
//! the domain its buttons allow.

use thiserror::Error;

use crate::session::Screen;

/// Errors raised by engines and the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The stake for a round or a war escalation exceeds the balance.
    #[error("insufficient balance: {balance} chips available, {bet} required")]
    InsufficientBalance { balance: i64, bet: i64 },

    /// Bet outside the configured range or off the step grid.
    #[error("bet {bet} is not accepted (range {min}..={max}, step {step})")]
    InvalidBet { bet: i64, min: i64, max: i64, step: i64 },

    /// Move not valid for the engine or its current stage.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// Tile index outside the grid.
    #[error("tile {index} is outside the {grid_size}-cell grid")]
    InvalidTile { index: usize, grid_size: usize },

    /// Cash-out requested before it is offered.
    #[error("cash-out is not available yet")]
    CashOutUnavailable,

    /// The round already reached a terminal outcome.
    #[error("round is already complete")]
    RoundComplete,

    /// Action not allowed on the current screen.
    #[error("cannot {action} from the {from:?} screen")]
    InvalidTransition { from: Screen, action: &'static str },

    /// No game selected or no round in progress.
    #[error("no active game")]
    NoActiveGame,

    /// Rejected configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Snapshot bytes could not be encoded or decoded.
    #[error("snapshot codec: {0}")]
    Snapshot(String),
}

impl GameError {
    /// True for the errors a player should see as a blocking notice.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, GameError::InsufficientBalance { .. })
    }
}

/// Result alias for engine and session operations.
pub type Result<T> = std::result::Result<T, GameError>;
