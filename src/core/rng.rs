//! Deterministic random number generation with forking per round.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical draws
//! - **Forkable**: Each round runs on its own branch of the session stream
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use blast_wars::core::GameRng;
//!
//! let mut session_rng = GameRng::new(42);
//!
//! // Each round gets an independent stream
//! let mut round_rng = session_rng.fork();
//! let card = round_rng.draw_card();
//!
//! // Forks are deterministic - same seed, same fork counter, same cards
//! let mut again = GameRng::new(42).fork();
//! assert_eq!(again.draw_card(), card);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};

/// Deterministic RNG backing every draw in a session.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Draw one card from an infinite deck.
    ///
    /// Suit and rank are chosen independently and uniformly, so all 52
    /// cards are equally likely and no draw depends on earlier ones.
    pub fn draw_card(&mut self) -> Card {
        let suit = Suit::ALL[self.inner.gen_range(0..Suit::ALL.len())];
        let rank = Rank::ALL[self.inner.gen_range(0..Rank::ALL.len())];
        Card::new(suit, rank)
    }

    /// Sample `amount` distinct indices from `0..length` without replacement.
    ///
    /// `amount` is clamped to `length`.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(length);
        rand::seq::index::sample(&mut self.inner, length, amount).into_vec()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream was created from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.draw_card(), rng2.draw_card());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.draw_card()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.draw_card()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..20).map(|_| rng.draw_card()).collect();
        let seq2: Vec<_> = (0..20).map(|_| forked.draw_card()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
    }

    #[test]
    fn test_draw_covers_all_cards() {
        // Sampling with replacement: 5000 draws should hit all 52 cards.
        let mut rng = GameRng::new(7);
        let seen: FxHashSet<Card> = (0..5000).map(|_| rng.draw_card()).collect();
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = GameRng::new(42);
        let picked = rng.sample_distinct(25, 10);

        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|&i| i < 25));

        let unique: FxHashSet<usize> = picked.iter().copied().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_sample_distinct_clamps() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.sample_distinct(4, 9).len(), 4);
        assert!(rng.sample_distinct(0, 3).is_empty());
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            rng.draw_card();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.draw_card()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.draw_card()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
