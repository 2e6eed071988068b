//! Casino War: one card each, highest rank wins.
//!
//! Ranks compare in ace-high order; suits never matter.
//!
//! Stages:
//! - `Ready`: waiting for `Deal`
//! - `Tie`: equal ranks, waiting for `GoToWar` or `Surrender`
//! - `Finished`: terminal
//!
//! Payouts (the opening stake `b` is already deducted):
//! - Player higher: `2b`
//! - Dealer higher: nothing
//! - Tie, surrender: `floor(b / 2)` back
//! - Tie, war (stakes `b` again): win `4b`, lose nothing, tie again `3b`
//!
//! There is no second war: a tie in the war draw is paid as a win.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Card, GameError, GameKind, GameRng, Multiplier, RankOrder, Result};
use crate::session::Cue;

use super::engine::{Move, Outcome, RoundContext, RoundEngine, RoundSnapshot};

const ORDER: RankOrder = RankOrder::AceHigh;

/// Casino War stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarStage {
    Ready,
    Tie,
    Finished,
}

/// How the round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarResult {
    PlayerWins,
    DealerWins,
    Surrendered,
    WonWar,
    LostWar,
    TiedWar,
}

impl WarResult {
    /// Message shown under the cards.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            WarResult::PlayerWins => "You win!",
            WarResult::DealerWins => "You lose!",
            WarResult::Surrendered => "You surrendered.",
            WarResult::WonWar => "You won the war!",
            WarResult::LostWar => "You lost the war!",
            WarResult::TiedWar => "It's another tie! You win 1:1",
        }
    }
}

/// One player/dealer draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarDeal {
    pub player: Card,
    pub dealer: Card,
}

impl WarDeal {
    /// Compare ranks: `Greater` when the player is higher.
    #[must_use]
    pub fn compare(&self) -> std::cmp::Ordering {
        self.player.position(ORDER).cmp(&self.dealer.position(ORDER))
    }
}

/// Presentation view of a Casino War round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CasinoWarView {
    pub stage: WarStage,
    /// Most recent draw.
    pub deal: Option<WarDeal>,
    pub went_to_war: bool,
    pub result: Option<WarResult>,
}

/// Casino War round state.
#[derive(Clone, Debug)]
pub struct CasinoWar {
    rng: GameRng,
    stacked: VecDeque<Card>,
    stage: WarStage,
    deals: SmallVec<[WarDeal; 2]>,
    result: Option<WarResult>,
}

impl CasinoWar {
    /// Start a round that draws from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            stacked: VecDeque::new(),
            stage: WarStage::Ready,
            deals: SmallVec::new(),
            result: None,
        }
    }

    /// Start a round whose first draws come from `cards` in order
    /// (player, dealer, player, dealer), falling back to `rng` afterwards.
    #[must_use]
    pub fn stacked(rng: GameRng, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            stacked: cards.into_iter().collect(),
            ..Self::new(rng)
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> WarStage {
        self.stage
    }

    /// Every draw made this round.
    #[must_use]
    pub fn deals(&self) -> &[WarDeal] {
        &self.deals
    }

    /// How the round ended, once it has.
    #[must_use]
    pub fn result(&self) -> Option<WarResult> {
        self.result
    }

    fn draw(&mut self) -> Card {
        match self.stacked.pop_front() {
            Some(card) => card,
            None => self.rng.draw_card(),
        }
    }

    fn draw_pair(&mut self) -> WarDeal {
        let deal = WarDeal {
            player: self.draw(),
            dealer: self.draw(),
        };
        debug!(player = %deal.player, dealer = %deal.dealer, "casino war draw");
        self.deals.push(deal);
        deal
    }

    fn finish(&mut self, result: WarResult) {
        self.stage = WarStage::Finished;
        self.result = Some(result);
    }

    fn deal(&mut self, ctx: &RoundContext) -> Result<Outcome> {
        match self.stage {
            WarStage::Ready => {}
            WarStage::Tie => {
                return Err(GameError::InvalidMove("deal while a tie is pending".to_string()))
            }
            WarStage::Finished => return Err(GameError::RoundComplete),
        }

        let deal = self.draw_pair();
        match deal.compare() {
            std::cmp::Ordering::Greater => {
                self.finish(WarResult::PlayerWins);
                Ok(Outcome::won(ctx, ctx.bet * 2).with_cue(Cue::Win).delayed())
            }
            std::cmp::Ordering::Less => {
                self.finish(WarResult::DealerWins);
                Ok(Outcome::lost().with_cue(Cue::Lose).delayed())
            }
            std::cmp::Ordering::Equal => {
                self.stage = WarStage::Tie;
                Ok(Outcome::awaiting_decision())
            }
        }
    }

    fn tie_stage(&self, action: &str) -> Result<()> {
        match self.stage {
            WarStage::Tie => Ok(()),
            WarStage::Ready => Err(GameError::InvalidMove(format!("{action} before a tie"))),
            WarStage::Finished => Err(GameError::RoundComplete),
        }
    }

    fn go_to_war(&mut self, ctx: &RoundContext) -> Result<Outcome> {
        self.tie_stage("go to war")?;

        if ctx.balance < ctx.bet {
            warn!(balance = ctx.balance, bet = ctx.bet, "not enough chips to go to war");
            return Err(GameError::InsufficientBalance {
                balance: ctx.balance,
                bet: ctx.bet,
            });
        }

        let staked = ctx.balance - ctx.bet;
        let deal = self.draw_pair();

        let (result, payout) = match deal.compare() {
            std::cmp::Ordering::Greater => (WarResult::WonWar, ctx.bet * 4),
            std::cmp::Ordering::Less => (WarResult::LostWar, 0),
            std::cmp::Ordering::Equal => (WarResult::TiedWar, ctx.bet * 3),
        };
        self.finish(result);

        let outcome = if payout > 0 {
            Outcome::won(ctx, payout).with_cue(Cue::Win)
        } else {
            Outcome::lost().with_cue(Cue::Lose)
        };
        Ok(outcome.with_balance(staked + payout, payout).delayed())
    }

    fn surrender(&mut self, ctx: &RoundContext) -> Result<Outcome> {
        self.tie_stage("surrender")?;

        let refund = ctx.bet / 2;
        self.finish(WarResult::Surrendered);
        Ok(Outcome::lost()
            .with_balance(ctx.balance + refund, refund)
            .with_cue(Cue::Lose))
    }
}

impl RoundEngine for CasinoWar {
    fn kind(&self) -> GameKind {
        GameKind::CasinoWar
    }

    fn resolve_round(&mut self, mv: &Move, ctx: &RoundContext) -> Result<Outcome> {
        match *mv {
            Move::Deal => self.deal(ctx),
            Move::GoToWar => self.go_to_war(ctx),
            Move::Surrender => self.surrender(ctx),
            other => Err(GameError::InvalidMove(format!("{other:?} in Casino War"))),
        }
    }

    fn multiplier(&self) -> Multiplier {
        match self.result {
            Some(WarResult::PlayerWins) => Multiplier::from_ratio(2, 1),
            Some(WarResult::WonWar) => Multiplier::from_ratio(4, 1),
            Some(WarResult::TiedWar) => Multiplier::from_ratio(3, 1),
            Some(WarResult::Surrendered) => Multiplier::from_ratio(1, 2),
            Some(WarResult::DealerWins | WarResult::LostWar) => Multiplier::from_ratio(0, 1),
            None => Multiplier::ONE,
        }
    }

    fn is_finished(&self) -> bool {
        self.stage == WarStage::Finished
    }

    fn can_cash_out(&self) -> bool {
        false
    }

    fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::CasinoWar(CasinoWarView {
            stage: self.stage,
            deal: self.deals.last().copied(),
            went_to_war: self.deals.len() > 1,
            result: self.result,
        })
    }
}
