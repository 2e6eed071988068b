//! Python bindings for the blast-wars engine.
//!
//! # Quick Start
//!
//! ```python
//! import blast_wars as bw
//!
//! session = bw.Session(starting_balance=1000, reveal_delay_ms=0, seed=42)
//! session.select_game("tile hunter")
//! session.set_bet(100)
//! session.play()
//! session.reveal(12)
//! session.cash_out()
//! print(session.screen, session.balance, session.result_net())
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_session;

pub use py_core::*;
pub use py_session::*;

/// blast-wars: three casino mini-games sharing one balance.
#[pymodule]
fn blast_wars(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCard>()?;
    m.add_class::<PySession>()?;

    Ok(())
}
