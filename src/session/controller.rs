//! The session state machine.
//!
//! ```text
//! launcher --select_game--> setup --play--> playing --terminal--> won | lost
//!                             ^                                      |
//!                             +------------- acknowledge ------------+
//! any --go_home--> launcher
//! ```
//!
//! The controller owns the [`Session`] and the engine of the round in play.
//! Engines see the session only through a [`RoundContext`] and hand back the
//! absolute balance to apply, which the controller feeds through
//! [`Session::update_balance`].
//!
//! ## Example
//!
//! ```
//! use blast_wars::core::{GameKind, SessionConfig};
//! use blast_wars::games::Move;
//! use blast_wars::session::{Screen, SessionController};
//!
//! let config = SessionConfig::default().with_seed(7);
//! let mut controller = SessionController::new(config).unwrap();
//!
//! controller.select_game(GameKind::TileHunter).unwrap();
//! controller.set_bet(100).unwrap();
//! controller.play().unwrap();
//! assert_eq!(controller.session().balance, 900);
//!
//! controller.act(Move::CashOut).unwrap();
//! assert_eq!(controller.screen(), Screen::Won);
//! assert_eq!(controller.session().balance, 1000);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{GameError, GameKind, GameRng, Result, SessionConfig};
use crate::games::{ActiveRound, Move, Outcome, RoundContext, RoundEngine, RoundSnapshot, RoundStatus};

use super::audio::{CuePlayer, SilentPlayer};
use super::host::{HostShell, Viewport};
use super::state::{RoundRecord, Screen, Session};
use super::timer::{PendingTransition, RevealTimer};

/// What the result screen shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub game: GameKind,
    pub won: bool,
    pub bet: i64,
    /// Chips credited during the round.
    pub payout: i64,
    /// Balance change over the whole round, stakes included.
    pub net: i64,
    pub balance: i64,
    pub high_score: i64,
    /// The round was won and pushed the high score up.
    pub new_high_score: bool,
}

/// Everything the presentation layer needs to draw the current screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub balance: i64,
    pub high_score: i64,
    pub active_game: Option<GameKind>,
    pub difficulty: crate::core::Difficulty,
    pub bet_amount: i64,
    pub sound_enabled: bool,
    pub round: Option<RoundSnapshot>,
    /// Chips a cash-out would pay right now.
    pub cash_out_value: Option<i64>,
    pub result: Option<ResultSummary>,
    pub pending: Option<PendingTransition>,
    pub rounds_played: usize,
}

impl SessionSnapshot {
    /// Encode with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    /// Decode bytes produced by [`SessionSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }
}

/// Round in play plus the bookkeeping needed to settle it.
#[derive(Clone, Debug)]
struct RoundInPlay {
    engine: ActiveRound,
    bet: i64,
    /// Balance before the opening stake.
    opening_balance: i64,
    /// High score once the opening stake was taken.
    opening_high_score: i64,
    payout: i64,
}

/// Session state machine.
pub struct SessionController<P: CuePlayer = SilentPlayer> {
    config: SessionConfig,
    session: Session,
    screen: Screen,
    rng: GameRng,
    round: Option<RoundInPlay>,
    round_id: u64,
    timer: RevealTimer,
    result: Option<ResultSummary>,
    sound_enabled: bool,
    player: P,
    viewport: Option<Viewport>,
}

impl SessionController<SilentPlayer> {
    /// Create a controller that plays no sound.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_player(config, SilentPlayer)
    }
}

impl<P: CuePlayer> SessionController<P> {
    /// Create a controller that sends cues to `player`.
    pub fn with_player(config: SessionConfig, player: P) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!(seed = rng.seed(), balance = config.starting_balance, "session created");

        Ok(Self {
            session: Session::new(&config),
            screen: Screen::Launcher,
            rng,
            round: None,
            round_id: 0,
            timer: RevealTimer::new(),
            result: None,
            sound_enabled: config.sound_enabled,
            player,
            viewport: None,
            config,
        })
    }

    // === Accessors ===

    /// Current screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Session data.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Engine of the round in play, if any.
    #[must_use]
    pub fn round(&self) -> Option<&ActiveRound> {
        self.round.as_ref().map(|r| &r.engine)
    }

    /// Result of the last settled round while a result screen is shown.
    #[must_use]
    pub fn result_summary(&self) -> Option<&ResultSummary> {
        if self.screen.is_result() {
            self.result.as_ref()
        } else {
            None
        }
    }

    /// Chips a cash-out would pay, while the round in play offers one.
    #[must_use]
    pub fn cash_out_value(&self) -> Option<i64> {
        let round = self.round.as_ref()?;
        round
            .engine
            .can_cash_out()
            .then(|| round.engine.multiplier().apply(round.bet))
    }

    /// Transition waiting for its reveal delay.
    #[must_use]
    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.timer.pending()
    }

    /// Whether cues are forwarded to the player.
    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Cue player.
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Mutable cue player.
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Last viewport reported by the host.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    // === Host ===

    /// Perform the ready/expand handshake with the embedding container.
    pub fn attach_host<H: HostShell + ?Sized>(&mut self, host: &mut H) {
        host.ready();
        host.expand();
        debug!("host handshake complete");
    }

    /// Record a viewport resize and return the derived sizing.
    pub fn resize_viewport(&mut self, inner_height: f64) -> Viewport {
        let viewport = Viewport::from_inner_height(inner_height);
        self.viewport = Some(viewport);
        viewport
    }

    /// Flip sound on or off; returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    // === Launcher / Setup ===

    /// Pick a game on the launcher.
    pub fn select_game(&mut self, game: GameKind) -> Result<()> {
        self.require(&[Screen::Launcher], "select a game")?;
        self.session.active_game = Some(game);
        self.enter(Screen::Setup);
        Ok(())
    }

    /// Pick the bet on the setup screen.
    pub fn set_bet(&mut self, bet: i64) -> Result<()> {
        self.require(&[Screen::Setup], "change the bet")?;
        if !self.config.is_valid_bet(bet) {
            return Err(GameError::InvalidBet {
                bet,
                min: self.config.min_bet,
                max: self.config.max_bet,
                step: self.config.bet_step,
            });
        }
        self.session.bet_amount = bet;
        Ok(())
    }

    /// Pick the largest accepted bet.
    pub fn set_max_bet(&mut self) -> Result<()> {
        self.set_bet(self.config.max_bet)
    }

    /// Pick the difficulty on the setup screen.
    pub fn set_difficulty(&mut self, difficulty: crate::core::Difficulty) -> Result<()> {
        self.require(&[Screen::Setup], "change the difficulty")?;
        self.session.difficulty = difficulty;
        Ok(())
    }

    /// Confirm the bet and start a round of the selected game.
    ///
    /// The bet is deducted before anything is drawn. With too few chips the
    /// screen stays on setup and nothing changes.
    pub fn play(&mut self) -> Result<()> {
        let game = self.check_play()?;
        let mut round_rng = self.rng.fork();
        let engine = ActiveRound::start(game, self.session.difficulty, &self.config, &mut round_rng);
        self.begin_round(engine);
        Ok(())
    }

    /// Like [`SessionController::play`], but on an engine the caller dealt.
    ///
    /// Used for replays and scripted tables. The engine must play the
    /// selected game.
    pub fn play_prepared(&mut self, engine: ActiveRound) -> Result<()> {
        let game = self.check_play()?;
        if engine.kind() != game {
            return Err(GameError::InvalidMove(format!(
                "{} engine prepared for a {} session",
                engine.kind(),
                game
            )));
        }
        self.begin_round(engine);
        Ok(())
    }

    fn check_play(&self) -> Result<GameKind> {
        self.require(&[Screen::Setup], "play")?;
        let game = self.session.active_game.ok_or(GameError::NoActiveGame)?;

        let bet = self.session.bet_amount;
        if self.session.balance < bet {
            warn!(balance = self.session.balance, bet, "insufficient balance to place this bet");
            return Err(GameError::InsufficientBalance {
                balance: self.session.balance,
                bet,
            });
        }
        Ok(game)
    }

    fn begin_round(&mut self, engine: ActiveRound) {
        let bet = self.session.bet_amount;
        let opening_balance = self.session.balance;

        self.session.update_balance(opening_balance - bet);
        let opening_high_score = self.session.high_score;
        self.timer.cancel();
        self.round_id += 1;
        self.result = None;
        self.round = Some(RoundInPlay {
            engine,
            bet,
            opening_balance,
            opening_high_score,
            payout: 0,
        });

        info!(round = self.round_id, game = ?self.session.active_game, bet, "round started");
        self.enter(Screen::Playing);
    }

    // === Playing ===

    /// Send a player move to the active engine.
    ///
    /// Applies the balance the engine reports, plays the cue and, on a
    /// terminal outcome, settles the round and moves to the result screen
    /// (now, or after the reveal delay).
    pub fn act(&mut self, mv: Move) -> Result<Outcome> {
        self.require(&[Screen::Playing], "make a move")?;
        let round = self.round.as_mut().ok_or(GameError::NoActiveGame)?;

        let ctx = RoundContext::new(round.bet, self.session.balance);
        let outcome = match round.engine.resolve_round(&mv, &ctx) {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.is_user_facing() {
                    warn!(%err, "move blocked");
                } else {
                    debug!(%err, ?mv, "move rejected");
                }
                return Err(err);
            }
        };

        round.payout += outcome.payout;
        if let Some(balance) = outcome.balance {
            self.session.update_balance(balance);
        }

        if let Some(cue) = outcome.cue {
            if self.sound_enabled {
                self.player.play(cue);
            }
        }

        if outcome.status.is_terminal() {
            self.settle(outcome.status);
            let target = if outcome.status == RoundStatus::Won {
                Screen::Won
            } else {
                Screen::Lost
            };

            let delay = self.config.reveal_delay();
            if outcome.delayed && delay > Duration::ZERO {
                debug!(?target, ?delay, "result screen scheduled");
                self.timer.schedule(target, delay, self.round_id);
            } else {
                self.enter(target);
            }
        }

        Ok(outcome)
    }

    /// Advance the reveal clock. Returns the screen entered, if a transition fired.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Screen> {
        let fired = self.timer.advance(elapsed, self.round_id)?;
        if self.screen != Screen::Playing {
            return None;
        }
        self.enter(fired.target);
        Some(fired.target)
    }

    fn settle(&mut self, status: RoundStatus) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let Some(game) = self.session.active_game else {
            return;
        };

        let won = status == RoundStatus::Won;
        let balance = self.session.balance;
        let net = balance - round.opening_balance;

        let record = RoundRecord {
            game,
            difficulty: self.session.difficulty,
            bet: round.bet,
            staked: round.payout - net,
            payout: round.payout,
            won,
            balance_after: balance,
        };
        info!(round = self.round_id, ?game, won, payout = round.payout, net, "round settled");

        self.result = Some(ResultSummary {
            game,
            won,
            bet: round.bet,
            payout: round.payout,
            net,
            balance,
            high_score: self.session.high_score,
            new_high_score: won && self.session.high_score > round.opening_high_score,
        });
        self.session.record(record);
    }

    // === Navigation ===

    /// Leave the result screen for another round's setup.
    pub fn acknowledge(&mut self) -> Result<()> {
        self.require(&[Screen::Won, Screen::Lost], "acknowledge a result")?;
        self.round = None;
        self.enter(Screen::Setup);
        Ok(())
    }

    /// Back to setup from a round or result.
    ///
    /// Backing out of an unfinished round forfeits its stake. Any pending
    /// reveal transition is cancelled.
    pub fn back(&mut self) -> Result<()> {
        self.require(&[Screen::Playing, Screen::Won, Screen::Lost], "go back")?;
        self.abandon_round();
        self.enter(Screen::Setup);
        Ok(())
    }

    /// Return to the launcher from anywhere.
    pub fn go_home(&mut self) {
        self.abandon_round();
        self.session.active_game = None;
        self.enter(Screen::Launcher);
    }

    fn abandon_round(&mut self) {
        if self.timer.cancel().is_some() {
            debug!(round = self.round_id, "pending transition cancelled");
        }
        if let Some(round) = self.round.take() {
            if !round.engine.is_finished() {
                info!(round = self.round_id, bet = round.bet, "round abandoned, stake forfeited");
            }
        }
        // Invalidate anything still tagged with the abandoned round.
        self.round_id += 1;
    }

    // === Snapshot ===

    /// Presentation snapshot of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            screen: self.screen,
            balance: self.session.balance,
            high_score: self.session.high_score,
            active_game: self.session.active_game,
            difficulty: self.session.difficulty,
            bet_amount: self.session.bet_amount,
            sound_enabled: self.sound_enabled,
            round: self.round.as_ref().map(|r| r.engine.snapshot()),
            cash_out_value: self.cash_out_value(),
            result: self.result_summary().cloned(),
            pending: self.timer.pending(),
            rounds_played: self.session.history.len(),
        }
    }

    // === Internals ===

    fn require(&self, allowed: &[Screen], action: &'static str) -> Result<()> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            warn!(screen = ?self.screen, action, "transition rejected");
            Err(GameError::InvalidTransition {
                from: self.screen,
                action,
            })
        }
    }

    fn enter(&mut self, screen: Screen) {
        if self.screen != screen {
            info!(from = ?self.screen, to = ?screen, "screen transition");
        }
        self.screen = screen;
    }
}
