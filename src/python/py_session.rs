//! Session bindings for Python.

use std::time::Duration;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{Color, Rank, SessionConfig, Suit};
use crate::games::{Guess, HighLow, InsideOutside, Move, RoundEngine, RoundSnapshot};
use crate::session::{SessionController, SilentPlayer};

use super::py_core::{parse_difficulty, parse_game, to_py_err, PyCard};

/// Python wrapper for SessionController.
///
/// Drives a whole arcade session: pick a game, bet, play, read the result.
#[pyclass(name = "Session")]
pub struct PySession {
    inner: SessionController<SilentPlayer>,
}

#[pymethods]
impl PySession {
    /// Create a new session.
    ///
    /// # Arguments
    /// - starting_balance: Chips the session starts with
    /// - reveal_delay_ms: Pause before result screens (0 = immediate)
    /// - seed: RNG seed for deterministic sessions
    #[new]
    #[pyo3(signature = (starting_balance = 1000, reveal_delay_ms = 1000, seed = None))]
    fn new(starting_balance: i64, reveal_delay_ms: u64, seed: Option<u64>) -> PyResult<Self> {
        let mut config = SessionConfig::default()
            .with_starting_balance(starting_balance)
            .with_reveal_delay(Duration::from_millis(reveal_delay_ms));
        config.seed = seed;
        let inner = SessionController::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Current screen name.
    #[getter]
    fn screen(&self) -> String {
        format!("{:?}", self.inner.screen())
    }

    /// Chips available.
    #[getter]
    fn balance(&self) -> i64 {
        self.inner.session().balance
    }

    /// Highest balance seen.
    #[getter]
    fn high_score(&self) -> i64 {
        self.inner.session().high_score
    }

    /// Current bet.
    #[getter]
    fn bet(&self) -> i64 {
        self.inner.session().bet_amount
    }

    /// Current round multiplier, if a round exists.
    #[getter]
    fn multiplier(&self) -> Option<f64> {
        self.inner.round().map(|r| r.multiplier().as_f64())
    }

    /// Chips a cash-out would pay now, if one is offered.
    #[getter]
    fn cash_out_value(&self) -> Option<i64> {
        self.inner.cash_out_value()
    }

    fn select_game(&mut self, name: &str) -> PyResult<()> {
        self.inner.select_game(parse_game(name)?).map_err(to_py_err)
    }

    fn set_bet(&mut self, bet: i64) -> PyResult<()> {
        self.inner.set_bet(bet).map_err(to_py_err)
    }

    fn set_max_bet(&mut self) -> PyResult<()> {
        self.inner.set_max_bet().map_err(to_py_err)
    }

    fn set_difficulty(&mut self, name: &str) -> PyResult<()> {
        self.inner
            .set_difficulty(parse_difficulty(name)?)
            .map_err(to_py_err)
    }

    fn play(&mut self) -> PyResult<()> {
        self.inner.play().map_err(to_py_err)
    }

    /// Ride The Bus: "red" or "black".
    fn guess_color(&mut self, color: &str) -> PyResult<String> {
        let color = match color.to_ascii_lowercase().as_str() {
            "red" => Color::Red,
            "black" => Color::Black,
            _ => return Err(PyValueError::new_err(format!("unknown color: {color}"))),
        };
        self.act(Move::Guess(Guess::Color(color)))
    }

    /// Ride The Bus: "high" or "low".
    fn guess_high_low(&mut self, direction: &str) -> PyResult<String> {
        let direction = match direction.to_ascii_lowercase().as_str() {
            "high" => HighLow::High,
            "low" => HighLow::Low,
            _ => return Err(PyValueError::new_err(format!("unknown direction: {direction}"))),
        };
        self.act(Move::Guess(Guess::HighLow(direction)))
    }

    /// Ride The Bus: "inside" or "outside".
    fn guess_inside_outside(&mut self, side: &str) -> PyResult<String> {
        let side = match side.to_ascii_lowercase().as_str() {
            "inside" => InsideOutside::Inside,
            "outside" => InsideOutside::Outside,
            _ => return Err(PyValueError::new_err(format!("unknown side: {side}"))),
        };
        self.act(Move::Guess(Guess::InsideOutside(side)))
    }

    /// Ride The Bus: suit index (0 spades, 1 hearts, 2 diamonds, 3 clubs).
    fn guess_suit(&mut self, suit: usize) -> PyResult<String> {
        let suit = Suit::ALL
            .get(suit)
            .copied()
            .ok_or_else(|| PyValueError::new_err(format!("unknown suit: {suit}")))?;
        self.act(Move::Guess(Guess::Suit(suit)))
    }

    /// Ride The Bus: rank index (0 = ace .. 12 = king).
    fn guess_rank(&mut self, rank: usize) -> PyResult<String> {
        let rank = Rank::ALL
            .get(rank)
            .copied()
            .ok_or_else(|| PyValueError::new_err(format!("unknown rank: {rank}")))?;
        self.act(Move::Guess(Guess::Rank(rank)))
    }

    /// Tile Hunter: reveal a cell.
    fn reveal(&mut self, index: usize) -> PyResult<String> {
        self.act(Move::Reveal(index))
    }

    fn cash_out(&mut self) -> PyResult<String> {
        self.act(Move::CashOut)
    }

    /// Casino War: draw the opening cards.
    fn deal(&mut self) -> PyResult<String> {
        self.act(Move::Deal)
    }

    fn go_to_war(&mut self) -> PyResult<String> {
        self.act(Move::GoToWar)
    }

    fn surrender(&mut self) -> PyResult<String> {
        self.act(Move::Surrender)
    }

    /// Advance the reveal clock; returns the screen entered, if any.
    fn advance(&mut self, elapsed_ms: u64) -> Option<String> {
        self.inner
            .advance(Duration::from_millis(elapsed_ms))
            .map(|screen| format!("{screen:?}"))
    }

    fn acknowledge(&mut self) -> PyResult<()> {
        self.inner.acknowledge().map_err(to_py_err)
    }

    fn back(&mut self) -> PyResult<()> {
        self.inner.back().map_err(to_py_err)
    }

    fn go_home(&mut self) {
        self.inner.go_home();
    }

    fn toggle_sound(&mut self) -> bool {
        self.inner.toggle_sound()
    }

    /// Net result of the settled round while a result screen is shown.
    fn result_net(&self) -> Option<i64> {
        self.inner.result_summary().map(|s| s.net)
    }

    /// Most recent Casino War draw as (player, dealer).
    fn war_cards(&self) -> Option<(PyCard, PyCard)> {
        match self.inner.round().map(|r| r.snapshot()) {
            Some(RoundSnapshot::CasinoWar(view)) => view
                .deal
                .map(|d| (PyCard(d.player), PyCard(d.dealer))),
            _ => None,
        }
    }

    /// bincode-encoded session snapshot.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.inner.snapshot().to_bytes().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    fn __repr__(&self) -> String {
        format!(
            "Session(screen={:?}, balance={}, high_score={})",
            self.inner.screen(),
            self.inner.session().balance,
            self.inner.session().high_score
        )
    }
}

impl PySession {
    fn act(&mut self, mv: Move) -> PyResult<String> {
        let outcome = self.inner.act(mv).map_err(to_py_err)?;
        Ok(format!("{:?}", outcome.status))
    }
}
