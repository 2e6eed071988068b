//! Round-outcome engines for the three mini-games.
//!
//! - [`ride_the_bus`]: five sequential guesses, ×1.5 per correct guess
//! - [`tile_hunter`]: reveal safe tiles, +0.1 per safe tile
//! - [`casino_war`]: card-vs-card duel with a tie branch
//!
//! Every engine implements [`RoundEngine`]; [`ActiveRound`] is the tagged
//! union the session controller dispatches through.

pub mod casino_war;
pub mod engine;
pub mod ride_the_bus;
pub mod tile_hunter;

pub use casino_war::{CasinoWar, CasinoWarView, WarDeal, WarResult, WarStage};
pub use engine::{
    ActiveRound, Guess, Move, Outcome, RoundContext, RoundEngine, RoundSnapshot, RoundStatus,
};
pub use ride_the_bus::{BusRound, DealtCard, HighLow, InsideOutside, RideTheBus, RideTheBusView};
pub use tile_hunter::{TileHunter, TileHunterView, TileView};
