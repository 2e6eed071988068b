//! Playing cards: suits, ranks and the per-game rank orderings.
//!
//! Every game draws from the same 4 × 13 card space, but the games do not
//! agree on where the Ace sits:
//!
//! - Ride the Bus orders ranks `[A, 2..10, J, Q, K]` ([`RankOrder::AceLow`])
//! - Casino War orders ranks `[2..10, J, Q, K, A]` ([`RankOrder::AceHigh`])
//!
//! Comparisons always go through [`Rank::position`] with the ordering of the
//! game doing the comparing.
//!
//! ```
//! use blast_wars::core::{Card, Rank, RankOrder, Suit};
//!
//! let ace = Card::new(Suit::Spades, Rank::Ace);
//! let king = Card::new(Suit::Hearts, Rank::King);
//!
//! assert!(ace.position(RankOrder::AceLow) < king.position(RankOrder::AceLow));
//! assert!(ace.position(RankOrder::AceHigh) > king.position(RankOrder::AceHigh));
//! assert_eq!(king.to_string(), "K♥");
//! ```

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits in draw order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Suit color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Suit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card rank.
///
/// The enum carries no ordering of its own. Use [`Rank::position`] with the
/// game's [`RankOrder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, Ace first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position of this rank in the given ordering (0..=12).
    #[must_use]
    pub const fn position(self, order: RankOrder) -> u8 {
        let ace_low = self as u8;
        match order {
            RankOrder::AceLow => ace_low,
            // Rotate the Ace from the front to the back.
            RankOrder::AceHigh => (ace_low + 12) % 13,
        }
    }

    /// Short label as printed on the card face.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rank ordering used by a game for comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankOrder {
    /// `[A, 2..10, J, Q, K]`
    AceLow,
    /// `[2..10, J, Q, K, A]`
    AceHigh,
}

/// A drawn card. Immutable once drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Card color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Rank position in the given ordering.
    #[must_use]
    pub const fn position(self, order: RankOrder) -> u8 {
        self.rank.position(order)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
