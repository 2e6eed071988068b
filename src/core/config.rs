//! Session configuration types.
//!
//! A host configures the session once at startup:
//! - `GameKind`: Which mini-game a round plays
//! - `Difficulty`: Grid size for Tile Hunter (shown for every game)
//! - `SessionConfig`: Balance, bet limits, pacing and seeding
//!
//! The defaults reproduce the stock Blast Wars setup: 1000 chips, bets of
//! 10..=1000 in steps of 10, 250 preselected, one second reveal pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// The three mini-games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    RideTheBus,
    TileHunter,
    CasinoWar,
}

impl GameKind {
    /// All games in launcher order.
    pub const ALL: [GameKind; 3] = [GameKind::RideTheBus, GameKind::TileHunter, GameKind::CasinoWar];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            GameKind::RideTheBus => "Ride The Bus",
            GameKind::TileHunter => "Tile Hunter",
            GameKind::CasinoWar => "Casino War",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Difficulty level.
///
/// Only Tile Hunter changes behavior with difficulty: it selects the grid size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Insane,
}

impl Difficulty {
    /// All difficulties in setup-screen order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Insane,
    ];

    /// Number of Tile Hunter cells.
    #[must_use]
    pub const fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 25,
            Difficulty::Medium => 36,
            Difficulty::Hard => 49,
            Difficulty::Insane => 64,
        }
    }

    /// Cells per grid row (the grid is always square).
    #[must_use]
    pub const fn grid_side(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 6,
            Difficulty::Hard => 7,
            Difficulty::Insane => 8,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        };
        f.write_str(name)
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Balance a fresh session starts with.
    pub starting_balance: i64,

    /// High score a fresh session starts with.
    pub starting_high_score: i64,

    /// Bet preselected on the setup screen.
    pub default_bet: i64,

    /// Smallest accepted bet.
    pub min_bet: i64,

    /// Largest accepted bet.
    pub max_bet: i64,

    /// Bets must be a multiple of this step.
    pub bet_step: i64,

    /// Difficulty preselected on the setup screen.
    pub default_difficulty: Difficulty,

    /// Fraction of Tile Hunter cells that are safe.
    pub safe_tile_ratio: f64,

    /// Pause between a revealed result and the result screen, in milliseconds.
    /// Zero collapses every delayed transition.
    pub reveal_delay_ms: u64,

    /// Whether audio cues start enabled.
    pub sound_enabled: bool,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            starting_high_score: 0,
            default_bet: 250,
            min_bet: 10,
            max_bet: 1000,
            bet_step: 10,
            default_difficulty: Difficulty::Easy,
            safe_tile_ratio: 0.4,
            reveal_delay_ms: 1000,
            sound_enabled: true,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set the starting balance.
    #[must_use]
    pub fn with_starting_balance(mut self, balance: i64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Set the preselected bet.
    #[must_use]
    pub fn with_default_bet(mut self, bet: i64) -> Self {
        self.default_bet = bet;
        self
    }

    /// Set the accepted bet range and step.
    #[must_use]
    pub fn with_bet_limits(mut self, min: i64, max: i64, step: i64) -> Self {
        self.min_bet = min;
        self.max_bet = max;
        self.bet_step = step;
        self
    }

    /// Set the preselected difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.default_difficulty = difficulty;
        self
    }

    /// Set the reveal pacing delay. Zero makes every transition immediate.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enable or disable sound at startup.
    #[must_use]
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reveal pacing delay.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Check whether `bet` lies in range and on the step grid.
    #[must_use]
    pub fn is_valid_bet(&self, bet: i64) -> bool {
        (self.min_bet..=self.max_bet).contains(&bet) && (bet - self.min_bet) % self.bet_step == 0
    }

    /// Number of safe tiles on a grid of `grid_size` cells.
    #[must_use]
    pub fn safe_tile_count(&self, grid_size: usize) -> usize {
        ((grid_size as f64) * self.safe_tile_ratio).floor() as usize
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_bet <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "min_bet must be > 0 (got {})",
                self.min_bet
            )));
        }
        if self.max_bet < self.min_bet {
            return Err(GameError::InvalidConfig(format!(
                "max_bet {} is below min_bet {}",
                self.max_bet, self.min_bet
            )));
        }
        if self.bet_step <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "bet_step must be > 0 (got {})",
                self.bet_step
            )));
        }
        if !self.is_valid_bet(self.default_bet) {
            return Err(GameError::InvalidConfig(format!(
                "default_bet {} is not an accepted bet",
                self.default_bet
            )));
        }
        if !(self.safe_tile_ratio > 0.0 && self.safe_tile_ratio <= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "safe_tile_ratio must be in (0, 1] (got {})",
                self.safe_tile_ratio
            )));
        }
        let smallest_grid = Difficulty::Easy.grid_size();
        if self.safe_tile_count(smallest_grid) == 0 {
            return Err(GameError::InvalidConfig(format!(
                "safe_tile_ratio {} leaves no safe tile on a {}-cell grid",
                self.safe_tile_ratio, smallest_grid
            )));
        }
        if self.starting_balance < 0 {
            return Err(GameError::InvalidConfig(format!(
                "starting_balance must be >= 0 (got {})",
                self.starting_balance
            )));
        }
        Ok(())
    }
}
