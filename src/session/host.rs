//! Host shell integration.
//!
//! An embedding container (a chat-app web view, for instance) expects a
//! ready/expand handshake at startup and reports its viewport height so the
//! page can size itself. None of it touches game state.

use serde::{Deserialize, Serialize};

/// Embedding container.
pub trait HostShell {
    /// Signal that the app is ready to be shown.
    fn ready(&mut self);

    /// Ask the container to expand to its full height.
    fn expand(&mut self);
}

/// Viewport sizing derived from the host's inner height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner height in CSS pixels.
    pub inner_height: f64,
    /// One percent of the inner height (the `--vh` unit).
    pub vh: f64,
}

impl Viewport {
    /// Compute the viewport unit for an inner height.
    #[must_use]
    pub fn from_inner_height(inner_height: f64) -> Self {
        Self {
            inner_height,
            vh: inner_height * 0.01,
        }
    }

    /// CSS custom property assignment for the unit.
    #[must_use]
    pub fn css_property(&self) -> String {
        format!("--vh: {}px", self.vh)
    }
}
