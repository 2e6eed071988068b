//! Session data: balance, high score, selections and the settled-round log.
//!
//! ## Session
//!
//! Lives for the whole app lifetime. The balance changes only through
//! [`Session::update_balance`], which also maintains the high score as the
//! balance high-water mark.
//!
//! ## History
//!
//! Every settled round is appended to an `im::Vector`, so snapshots of the
//! session clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Difficulty, GameKind, SessionConfig};

/// Which screen the app is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Launcher,
    Setup,
    Playing,
    Won,
    Lost,
}

impl Screen {
    /// Check if this is a result screen.
    #[must_use]
    pub fn is_result(self) -> bool {
        matches!(self, Screen::Won | Screen::Lost)
    }
}

/// One settled round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub game: GameKind,
    pub difficulty: Difficulty,
    pub bet: i64,
    /// Every stake placed during the round (the bet, plus a war stake).
    pub staked: i64,
    /// Total chips credited during the round.
    pub payout: i64,
    pub won: bool,
    /// Balance once the round settled.
    pub balance_after: i64,
}

impl RoundRecord {
    /// Net result of the round (payout minus every stake).
    #[must_use]
    pub fn net(&self) -> i64 {
        self.payout - self.staked
    }
}

/// Session state shared by every game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Chips available.
    pub balance: i64,

    /// Highest balance seen this session.
    pub high_score: i64,

    /// Game picked on the launcher.
    pub active_game: Option<GameKind>,

    /// Difficulty picked on the setup screen.
    pub difficulty: Difficulty,

    /// Bet picked on the setup screen.
    pub bet_amount: i64,

    /// Settled rounds, oldest first.
    pub history: Vector<RoundRecord>,
}

impl Session {
    /// Create a session from the configuration.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            balance: config.starting_balance,
            high_score: config.starting_high_score,
            active_game: None,
            difficulty: config.default_difficulty,
            bet_amount: config.default_bet,
            history: Vector::new(),
        }
    }

    /// Apply a new absolute balance.
    ///
    /// This is the only place the balance changes. The high score follows
    /// the balance high-water mark.
    pub fn update_balance(&mut self, balance: i64) {
        let previous = self.balance;
        self.balance = balance;
        self.high_score = self.high_score.max(balance);
        info!(previous, balance, high_score = self.high_score, "balance updated");
    }

    /// Record a settled round.
    pub fn record(&mut self, record: RoundRecord) {
        self.history.push_back(record);
    }

    /// Rounds won so far.
    #[must_use]
    pub fn rounds_won(&self) -> usize {
        self.history.iter().filter(|r| r.won).count()
    }
}
