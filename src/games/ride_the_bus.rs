//! Ride the Bus: five sequential card guesses with an escalating multiplier.
//!
//! All five cards are drawn face down when the round starts. Each round
//! asks a different question about the next card:
//!
//! | Round | Question        | Correct when                                        |
//! |-------|-----------------|-----------------------------------------------------|
//! | 0     | Red or Black    | card color matches                                  |
//! | 1     | High or Low     | strictly above/below card 0                         |
//! | 2     | Inside/Outside  | strictly inside/outside the range of cards 0 and 1  |
//! | 3     | Suit            | exact suit                                          |
//! | 4     | Number          | exact rank                                          |
//!
//! Ranks compare in ace-low order. Equal ranks in rounds 1 and 2 are wrong
//! for either guess.
//!
//! Every correct guess multiplies the multiplier by 1.5. Clearing round 4
//! pays `bet × multiplier × 1.5`. A wrong guess reveals every card and
//! loses the stake. From round 1 on the player may cash out for
//! `bet × multiplier`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Card, GameError, GameKind, GameRng, Multiplier, RankOrder, Result};
use crate::session::Cue;

use super::engine::{Guess, Move, Outcome, RoundContext, RoundEngine, RoundSnapshot};

/// Number of guessing rounds.
pub const ROUNDS: usize = 5;

const ORDER: RankOrder = RankOrder::AceLow;

/// High/Low guess for round 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLow {
    High,
    Low,
}

/// Inside/Outside guess for round 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsideOutside {
    Inside,
    Outside,
}

/// The five rounds, in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusRound {
    RedOrBlack,
    HighOrLow,
    InsideOrOutside,
    Suit,
    Number,
}

impl BusRound {
    /// All rounds in play order.
    pub const ALL: [BusRound; ROUNDS] = [
        BusRound::RedOrBlack,
        BusRound::HighOrLow,
        BusRound::InsideOrOutside,
        BusRound::Suit,
        BusRound::Number,
    ];

    /// Round title as shown above the cards.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            BusRound::RedOrBlack => "Red or Black",
            BusRound::HighOrLow => "High or Low",
            BusRound::InsideOrOutside => "Inside Or Outside",
            BusRound::Suit => "Suit",
            BusRound::Number => "Number",
        }
    }
}

/// A card on the table and whether it is face up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtCard {
    pub card: Card,
    pub revealed: bool,
}

/// Presentation view of a Ride the Bus round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RideTheBusView {
    /// The five cards; `None` while face down.
    pub cards: Vec<Option<Card>>,
    /// Round awaiting a guess, `None` once the round is over.
    pub round: Option<BusRound>,
    pub multiplier: f64,
    pub cash_out_available: bool,
    pub finished: bool,
}

/// Ride the Bus round state.
#[derive(Clone, Debug)]
pub struct RideTheBus {
    cards: SmallVec<[DealtCard; ROUNDS]>,
    cleared: usize,
    multiplier: Multiplier,
    finished: bool,
}

impl RideTheBus {
    /// Deal five face-down cards from `rng`.
    pub fn new(rng: &mut GameRng) -> Self {
        let cards = [
            rng.draw_card(),
            rng.draw_card(),
            rng.draw_card(),
            rng.draw_card(),
            rng.draw_card(),
        ];
        Self::with_cards(cards)
    }

    /// Start a round on a known set of cards.
    #[must_use]
    pub fn with_cards(cards: [Card; ROUNDS]) -> Self {
        debug!(?cards, "ride the bus dealt");
        Self {
            cards: cards
                .into_iter()
                .map(|card| DealtCard { card, revealed: false })
                .collect(),
            cleared: 0,
            multiplier: Multiplier::ONE,
            finished: false,
        }
    }

    /// Round awaiting a guess, `None` once the round is over.
    #[must_use]
    pub fn current_round(&self) -> Option<BusRound> {
        if self.finished {
            None
        } else {
            BusRound::ALL.get(self.cleared).copied()
        }
    }

    /// Number of correct guesses so far.
    #[must_use]
    pub fn rounds_cleared(&self) -> usize {
        self.cleared
    }

    /// Cards on the table.
    #[must_use]
    pub fn cards(&self) -> &[DealtCard] {
        &self.cards
    }

    fn position(&self, index: usize) -> u8 {
        self.cards[index].card.position(ORDER)
    }

    fn is_correct(&self, guess: Guess) -> Result<bool> {
        let card = self.cards[self.cleared].card;
        let round = BusRound::ALL[self.cleared];

        let correct = match (round, guess) {
            (BusRound::RedOrBlack, Guess::Color(color)) => card.color() == color,
            (BusRound::HighOrLow, Guess::HighLow(direction)) => {
                let previous = self.position(0);
                let current = self.position(1);
                match direction {
                    HighLow::High => current > previous,
                    HighLow::Low => current < previous,
                }
            }
            (BusRound::InsideOrOutside, Guess::InsideOutside(side)) => {
                let (a, b) = (self.position(0), self.position(1));
                let (low, high) = (a.min(b), a.max(b));
                let current = self.position(2);
                match side {
                    InsideOutside::Inside => current > low && current < high,
                    InsideOutside::Outside => current < low || current > high,
                }
            }
            (BusRound::Suit, Guess::Suit(suit)) => card.suit == suit,
            (BusRound::Number, Guess::Rank(rank)) => card.rank == rank,
            (round, guess) => {
                return Err(GameError::InvalidMove(format!(
                    "{guess:?} does not answer {}",
                    round.title()
                )))
            }
        };

        debug!(round = round.title(), %card, ?guess, correct, "ride the bus guess");
        Ok(correct)
    }

    fn guess(&mut self, guess: Guess, ctx: &RoundContext) -> Result<Outcome> {
        if self.finished {
            return Err(GameError::RoundComplete);
        }

        let correct = self.is_correct(guess)?;
        self.cards[self.cleared].revealed = true;

        if !correct {
            for card in &mut self.cards {
                card.revealed = true;
            }
            self.finished = true;
            return Ok(Outcome::lost().with_cue(Cue::Wrong).delayed());
        }

        self.multiplier = self.multiplier.scale(3, 2);
        self.cleared += 1;

        if self.cleared == ROUNDS {
            self.finished = true;
            let payout = self.multiplier.scale(3, 2).apply(ctx.bet);
            return Ok(Outcome::won(ctx, payout).with_cue(Cue::Correct).delayed());
        }

        Ok(Outcome::in_progress().with_cue(Cue::Correct))
    }

    fn cash_out(&mut self, ctx: &RoundContext) -> Result<Outcome> {
        if self.finished {
            return Err(GameError::RoundComplete);
        }
        if !self.can_cash_out() {
            return Err(GameError::CashOutUnavailable);
        }

        self.finished = true;
        let payout = self.multiplier.apply(ctx.bet);
        Ok(Outcome::won(ctx, payout).with_cue(Cue::CashOut))
    }
}

impl RoundEngine for RideTheBus {
    fn kind(&self) -> GameKind {
        GameKind::RideTheBus
    }

    fn resolve_round(&mut self, mv: &Move, ctx: &RoundContext) -> Result<Outcome> {
        match *mv {
            Move::Guess(guess) => self.guess(guess, ctx),
            Move::CashOut => self.cash_out(ctx),
            other => Err(GameError::InvalidMove(format!("{other:?} in Ride the Bus"))),
        }
    }

    fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cash-out opens once round 0 is cleared.
    fn can_cash_out(&self) -> bool {
        !self.finished && self.cleared >= 1
    }

    fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::RideTheBus(RideTheBusView {
            cards: self
                .cards
                .iter()
                .map(|c| c.revealed.then_some(c.card))
                .collect(),
            round: self.current_round(),
            multiplier: self.multiplier.as_f64(),
            cash_out_available: self.can_cash_out(),
            finished: self.finished,
        })
    }
}
