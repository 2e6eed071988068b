//! The round-resolution capability shared by every game.
//!
//! Each engine owns the transient state of one round (drawn cards, reveal
//! flags, multiplier) and resolves player moves against it. Engines never
//! touch the session: they receive the bet and current balance through a
//! [`RoundContext`] and report back the *final absolute balance* the session
//! should apply, if any.
//!
//! ## Implementation Notes
//!
//! - `resolve_round`: Reject moves from the wrong game or stage with
//!   `GameError::InvalidMove`; never panic
//! - Terminal outcomes (`Won`/`Lost`) finish the engine; every later move is
//!   `GameError::RoundComplete`
//! - `delayed` asks the controller to pace the screen transition with the
//!   reveal delay; it has no effect on the settled balance

use serde::{Deserialize, Serialize};

use crate::core::{Color, Difficulty, GameKind, GameRng, Multiplier, Rank, Result, SessionConfig, Suit};
use crate::session::Cue;

use super::casino_war::{CasinoWar, CasinoWarView};
use super::ride_the_bus::{HighLow, InsideOutside, RideTheBus, RideTheBusView};
use super::tile_hunter::{TileHunter, TileHunterView};

/// Bet and balance visible to an engine while it resolves a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundContext {
    /// Stake placed when the round started.
    pub bet: i64,
    /// Session balance right now (the opening stake is already deducted).
    pub balance: i64,
}

impl RoundContext {
    /// Create a context.
    #[must_use]
    pub const fn new(bet: i64, balance: i64) -> Self {
        Self { bet, balance }
    }
}

/// A Ride the Bus guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guess {
    /// Round 0: red or black.
    Color(Color),
    /// Round 1: higher or lower than the previous card.
    HighLow(HighLow),
    /// Round 2: inside or outside the first two cards.
    InsideOutside(InsideOutside),
    /// Round 3: exact suit.
    Suit(Suit),
    /// Round 4: exact rank.
    Rank(Rank),
}

/// A discrete player action sent by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Ride the Bus guess for the current round.
    Guess(Guess),
    /// Tile Hunter reveal by cell index.
    Reveal(usize),
    /// Take the current multiplier and end the round.
    CashOut,
    /// Casino War: draw the player and dealer cards.
    Deal,
    /// Casino War tie: stake the bet again and draw a fresh pair.
    GoToWar,
    /// Casino War tie: take back half the bet and end the round.
    Surrender,
}

/// Where a round stands after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Waiting for the next regular move.
    InProgress,
    /// Waiting for a branch decision (Casino War tie).
    AwaitingDecision,
    /// Round over, player won.
    Won,
    /// Round over, player lost.
    Lost,
}

impl RoundStatus {
    /// Check if the round is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundStatus::Won | RoundStatus::Lost)
    }
}

/// Result of resolving one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Round status after the move.
    pub status: RoundStatus,
    /// Final absolute balance to apply. `None` leaves the balance untouched.
    pub balance: Option<i64>,
    /// Chips credited by this move.
    pub payout: i64,
    /// Audio cue for the move, if any.
    pub cue: Option<Cue>,
    /// Pace the terminal transition with the reveal delay.
    pub delayed: bool,
}

impl Outcome {
    /// Round continues with no balance change.
    #[must_use]
    pub fn in_progress() -> Self {
        Self {
            status: RoundStatus::InProgress,
            balance: None,
            payout: 0,
            cue: None,
            delayed: false,
        }
    }

    /// Round waits for a branch decision.
    #[must_use]
    pub fn awaiting_decision() -> Self {
        Self {
            status: RoundStatus::AwaitingDecision,
            ..Self::in_progress()
        }
    }

    /// Round won; `payout` is credited on top of the context balance.
    #[must_use]
    pub fn won(ctx: &RoundContext, payout: i64) -> Self {
        Self {
            status: RoundStatus::Won,
            balance: Some(ctx.balance + payout),
            payout,
            cue: None,
            delayed: false,
        }
    }

    /// Round lost with no further balance change.
    #[must_use]
    pub fn lost() -> Self {
        Self {
            status: RoundStatus::Lost,
            ..Self::in_progress()
        }
    }

    /// Override the balance to apply.
    #[must_use]
    pub fn with_balance(mut self, balance: i64, payout: i64) -> Self {
        self.balance = Some(balance);
        self.payout = payout;
        self
    }

    /// Attach an audio cue.
    #[must_use]
    pub fn with_cue(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Pace the transition with the reveal delay.
    #[must_use]
    pub fn delayed(mut self) -> Self {
        self.delayed = true;
        self
    }
}

/// Round engine trait.
///
/// Each game implements this trait; the controller drives whichever engine
/// is active through [`ActiveRound`].
pub trait RoundEngine {
    /// Which game this engine plays.
    fn kind(&self) -> GameKind;

    /// Resolve one player move.
    fn resolve_round(&mut self, mv: &Move, ctx: &RoundContext) -> Result<Outcome>;

    /// Current payout multiplier.
    fn multiplier(&self) -> Multiplier;

    /// Check if the round reached a terminal outcome.
    fn is_finished(&self) -> bool;

    /// Check if `Move::CashOut` would be accepted now.
    fn can_cash_out(&self) -> bool;

    /// Presentation view of the round.
    fn snapshot(&self) -> RoundSnapshot;
}

/// Presentation view of whichever round is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundSnapshot {
    RideTheBus(RideTheBusView),
    TileHunter(TileHunterView),
    CasinoWar(CasinoWarView),
}

/// The engine of the round currently being played.
#[derive(Clone, Debug)]
pub enum ActiveRound {
    RideTheBus(RideTheBus),
    TileHunter(TileHunter),
    CasinoWar(CasinoWar),
}

impl ActiveRound {
    /// Start a fresh round of `kind`, drawing from `rng`.
    pub fn start(kind: GameKind, difficulty: Difficulty, config: &SessionConfig, rng: &mut GameRng) -> Self {
        match kind {
            GameKind::RideTheBus => ActiveRound::RideTheBus(RideTheBus::new(rng)),
            GameKind::TileHunter => {
                let safe_count = config.safe_tile_count(difficulty.grid_size());
                ActiveRound::TileHunter(TileHunter::new(difficulty, safe_count, rng))
            }
            GameKind::CasinoWar => ActiveRound::CasinoWar(CasinoWar::new(rng.fork())),
        }
    }

    fn engine(&self) -> &dyn RoundEngine {
        match self {
            ActiveRound::RideTheBus(game) => game,
            ActiveRound::TileHunter(game) => game,
            ActiveRound::CasinoWar(game) => game,
        }
    }

    fn engine_mut(&mut self) -> &mut dyn RoundEngine {
        match self {
            ActiveRound::RideTheBus(game) => game,
            ActiveRound::TileHunter(game) => game,
            ActiveRound::CasinoWar(game) => game,
        }
    }
}

impl RoundEngine for ActiveRound {
    fn kind(&self) -> GameKind {
        self.engine().kind()
    }

    fn resolve_round(&mut self, mv: &Move, ctx: &RoundContext) -> Result<Outcome> {
        self.engine_mut().resolve_round(mv, ctx)
    }

    fn multiplier(&self) -> Multiplier {
        self.engine().multiplier()
    }

    fn is_finished(&self) -> bool {
        self.engine().is_finished()
    }

    fn can_cash_out(&self) -> bool {
        self.engine().can_cash_out()
    }

    fn snapshot(&self) -> RoundSnapshot {
        self.engine().snapshot()
    }
}

impl From<RideTheBus> for ActiveRound {
    fn from(game: RideTheBus) -> Self {
        ActiveRound::RideTheBus(game)
    }
}

impl From<TileHunter> for ActiveRound {
    fn from(game: TileHunter) -> Self {
        ActiveRound::TileHunter(game)
    }
}

impl From<CasinoWar> for ActiveRound {
    fn from(game: CasinoWar) -> Self {
        ActiveRound::CasinoWar(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(!RoundStatus::InProgress.is_terminal());
        assert!(!RoundStatus::AwaitingDecision.is_terminal());
        assert!(RoundStatus::Won.is_terminal());
        assert!(RoundStatus::Lost.is_terminal());
    }

    #[test]
    fn test_won_credits_context_balance() {
        let ctx = RoundContext::new(100, 900);
        let outcome = Outcome::won(&ctx, 337).with_cue(Cue::CashOut);

        assert_eq!(outcome.status, RoundStatus::Won);
        assert_eq!(outcome.balance, Some(1237));
        assert_eq!(outcome.payout, 337);
        assert_eq!(outcome.cue, Some(Cue::CashOut));
        assert!(!outcome.delayed);
    }

    #[test]
    fn test_lost_leaves_balance() {
        let outcome = Outcome::lost().delayed();
        assert_eq!(outcome.balance, None);
        assert_eq!(outcome.payout, 0);
        assert!(outcome.delayed);
    }

    #[test]
    fn test_start_dispatches_by_kind() {
        let config = SessionConfig::default();
        let mut rng = GameRng::new(42);

        for kind in GameKind::ALL {
            let round = ActiveRound::start(kind, Difficulty::Medium, &config, &mut rng);
            assert_eq!(round.kind(), kind);
            assert!(!round.is_finished());
            assert_eq!(round.multiplier(), Multiplier::ONE);
        }
    }

    #[test]
    fn test_wrong_game_move_is_rejected() {
        let config = SessionConfig::default();
        let mut rng = GameRng::new(42);
        let ctx = RoundContext::new(100, 900);

        let mut bus = ActiveRound::start(GameKind::RideTheBus, Difficulty::Easy, &config, &mut rng);
        assert!(bus.resolve_round(&Move::Reveal(0), &ctx).is_err());

        let mut tiles = ActiveRound::start(GameKind::TileHunter, Difficulty::Easy, &config, &mut rng);
        assert!(tiles.resolve_round(&Move::Deal, &ctx).is_err());

        let mut war = ActiveRound::start(GameKind::CasinoWar, Difficulty::Easy, &config, &mut rng);
        assert!(war.resolve_round(&Move::CashOut, &ctx).is_err());
    }
}
