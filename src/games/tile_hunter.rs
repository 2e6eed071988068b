//! Tile Hunter: reveal safe tiles on a hidden grid.
//!
//! The grid size follows the difficulty (25/36/49/64 cells). When the round
//! starts, `floor(grid × 0.4)` distinct cells are chosen uniformly as safe.
//!
//! - Safe reveal: multiplier += 0.1; revealing the last safe tile pays
//!   `bet × multiplier`
//! - Unsafe reveal: the round is lost on the spot
//! - Repeat reveal: no-op
//! - Cash-out: available until the round ends, pays `bet × multiplier`

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Difficulty, GameError, GameKind, GameRng, Multiplier, Result};
use crate::session::Cue;

use super::engine::{Move, Outcome, RoundContext, RoundEngine, RoundSnapshot, RoundStatus};

/// What the player sees on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Safe,
    Unsafe,
}

/// Presentation view of a Tile Hunter round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileHunterView {
    pub difficulty: Difficulty,
    /// Cells per row.
    pub side: usize,
    /// Row-major cells.
    pub tiles: Vec<TileView>,
    pub multiplier: f64,
    pub safe_total: usize,
    pub safe_found: usize,
    pub finished: bool,
}

/// Tile Hunter round state.
#[derive(Clone, Debug)]
pub struct TileHunter {
    difficulty: Difficulty,
    safe: FxHashSet<usize>,
    revealed: FxHashSet<usize>,
    safe_found: usize,
    multiplier: Multiplier,
    status: RoundStatus,
}

impl TileHunter {
    /// Lay out a grid for `difficulty` with `safe_count` safe cells drawn from `rng`.
    pub fn new(difficulty: Difficulty, safe_count: usize, rng: &mut GameRng) -> Self {
        let safe = rng.sample_distinct(difficulty.grid_size(), safe_count);
        Self::with_safe_tiles(difficulty, safe)
    }

    /// Lay out a grid with a known safe set. Indices outside the grid are dropped.
    pub fn with_safe_tiles(difficulty: Difficulty, safe: impl IntoIterator<Item = usize>) -> Self {
        let grid_size = difficulty.grid_size();
        let safe: FxHashSet<usize> = safe.into_iter().filter(|&i| i < grid_size).collect();
        debug!(%difficulty, safe = safe.len(), "tile hunter grid laid out");

        Self {
            difficulty,
            safe,
            revealed: FxHashSet::default(),
            safe_found: 0,
            multiplier: Multiplier::ONE,
            status: RoundStatus::InProgress,
        }
    }

    /// Number of cells.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.difficulty.grid_size()
    }

    /// Number of safe cells on the grid.
    #[must_use]
    pub fn safe_total(&self) -> usize {
        self.safe.len()
    }

    /// Safe cells revealed so far.
    #[must_use]
    pub fn safe_found(&self) -> usize {
        self.safe_found
    }

    /// Check whether a cell has been revealed.
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    /// Check whether a cell is safe.
    #[must_use]
    pub fn is_safe(&self, index: usize) -> bool {
        self.safe.contains(&index)
    }

    fn reveal(&mut self, index: usize, ctx: &RoundContext) -> Result<Outcome> {
        if self.status.is_terminal() {
            return Err(GameError::RoundComplete);
        }
        let grid_size = self.grid_size();
        if index >= grid_size {
            return Err(GameError::InvalidTile { index, grid_size });
        }
        if !self.revealed.insert(index) {
            return Ok(Outcome::in_progress());
        }

        if !self.safe.contains(&index) {
            debug!(index, "tile hunter hit an unsafe tile");
            self.status = RoundStatus::Lost;
            return Ok(Outcome::lost().with_cue(Cue::Wrong));
        }

        self.safe_found += 1;
        self.multiplier = self.multiplier.add(1, 10);
        debug!(index, found = self.safe_found, total = self.safe.len(), "tile hunter safe tile");

        if self.safe_found == self.safe.len() {
            self.status = RoundStatus::Won;
            let payout = self.multiplier.apply(ctx.bet);
            return Ok(Outcome::won(ctx, payout).with_cue(Cue::Correct).delayed());
        }

        Ok(Outcome::in_progress().with_cue(Cue::Correct))
    }

    fn cash_out(&mut self, ctx: &RoundContext) -> Result<Outcome> {
        if self.status.is_terminal() {
            return Err(GameError::RoundComplete);
        }
        self.status = RoundStatus::Won;
        let payout = self.multiplier.apply(ctx.bet);
        Ok(Outcome::won(ctx, payout).with_cue(Cue::CashOut))
    }
}

impl RoundEngine for TileHunter {
    fn kind(&self) -> GameKind {
        GameKind::TileHunter
    }

    fn resolve_round(&mut self, mv: &Move, ctx: &RoundContext) -> Result<Outcome> {
        match *mv {
            Move::Reveal(index) => self.reveal(index, ctx),
            Move::CashOut => self.cash_out(ctx),
            other => Err(GameError::InvalidMove(format!("{other:?} in Tile Hunter"))),
        }
    }

    fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    fn can_cash_out(&self) -> bool {
        !self.is_finished()
    }

    fn snapshot(&self) -> RoundSnapshot {
        let tiles = (0..self.grid_size())
            .map(|i| match (self.revealed.contains(&i), self.safe.contains(&i)) {
                (false, _) => TileView::Hidden,
                (true, true) => TileView::Safe,
                (true, false) => TileView::Unsafe,
            })
            .collect();

        RoundSnapshot::TileHunter(TileHunterView {
            difficulty: self.difficulty,
            side: self.difficulty.grid_side(),
            tiles,
            multiplier: self.multiplier.as_f64(),
            safe_total: self.safe.len(),
            safe_found: self.safe_found,
            finished: self.is_finished(),
        })
    }
}
