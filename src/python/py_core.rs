//! Core type bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::{Card, Difficulty, GameError, GameKind, RankOrder};

/// Convert an engine error into a Python exception.
///
/// Player-facing refusals become `RuntimeError`; misuse becomes `ValueError`.
pub(crate) fn to_py_err(err: GameError) -> PyErr {
    if err.is_user_facing() {
        PyRuntimeError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

pub(crate) fn parse_game(name: &str) -> PyResult<GameKind> {
    match name.to_ascii_lowercase().replace([' ', '_', '-'], "").as_str() {
        "ridethebus" => Ok(GameKind::RideTheBus),
        "tilehunter" => Ok(GameKind::TileHunter),
        "casinowar" => Ok(GameKind::CasinoWar),
        _ => Err(PyValueError::new_err(format!("unknown game: {name}"))),
    }
}

pub(crate) fn parse_difficulty(name: &str) -> PyResult<Difficulty> {
    Difficulty::ALL
        .into_iter()
        .find(|d| d.to_string().eq_ignore_ascii_case(name))
        .ok_or_else(|| PyValueError::new_err(format!("unknown difficulty: {name}")))
}

/// Python wrapper for Card.
#[pyclass(name = "Card")]
#[derive(Clone, Debug)]
pub struct PyCard(pub Card);

#[pymethods]
impl PyCard {
    /// Rank label ("A", "2".."10", "J", "Q", "K").
    #[getter]
    fn rank(&self) -> &'static str {
        self.0.rank.label()
    }

    /// Suit symbol.
    #[getter]
    fn suit(&self) -> char {
        self.0.suit.symbol()
    }

    /// Position with aces high (0 = two, 12 = ace).
    fn position_ace_high(&self) -> u8 {
        self.0.position(RankOrder::AceHigh)
    }

    fn __repr__(&self) -> String {
        format!("Card({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
