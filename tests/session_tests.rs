//! Session state machine integration tests.
//!
//! These drive whole rounds through `SessionController` with scripted
//! tables, checking balances, screens, pacing and the round log.

use std::time::Duration;

use blast_wars::core::{Card, Color, Difficulty, GameError, GameKind, GameRng, Rank, SessionConfig, Suit};
use blast_wars::games::{
    CasinoWar, Guess, HighLow, InsideOutside, Move, RideTheBus, RoundEngine, RoundSnapshot,
    RoundStatus, TileHunter, TileView,
};
use blast_wars::session::{Cue, HostShell, RecordingPlayer, Screen, SessionController, SessionSnapshot};

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(suit, rank)
}

fn controller(config: SessionConfig) -> SessionController<RecordingPlayer> {
    SessionController::with_player(config, RecordingPlayer::new()).unwrap()
}

fn instant() -> SessionConfig {
    SessionConfig::default()
        .with_seed(7)
        .with_reveal_delay(Duration::ZERO)
}

/// 5♥ 9♠ 7♦ Q♣ K♥
fn bus_table() -> RideTheBus {
    RideTheBus::with_cards([
        card(Rank::Five, Suit::Hearts),
        card(Rank::Nine, Suit::Spades),
        card(Rank::Seven, Suit::Diamonds),
        card(Rank::Queen, Suit::Clubs),
        card(Rank::King, Suit::Hearts),
    ])
}

fn start(c: &mut SessionController<RecordingPlayer>, game: GameKind, bet: i64) {
    c.select_game(game).unwrap();
    c.set_bet(bet).unwrap();
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_full_navigation_cycle() {
    let mut c = controller(instant());
    assert_eq!(c.screen(), Screen::Launcher);

    c.select_game(GameKind::TileHunter).unwrap();
    assert_eq!(c.screen(), Screen::Setup);
    c.set_difficulty(Difficulty::Insane).unwrap();
    c.set_bet(500).unwrap();

    c.play().unwrap();
    assert_eq!(c.screen(), Screen::Playing);
    match c.round().map(|r| r.snapshot()) {
        Some(RoundSnapshot::TileHunter(view)) => {
            assert_eq!(view.tiles.len(), 64);
            assert_eq!(view.side, 8);
            assert_eq!(view.safe_total, 25);
            assert!(view.tiles.iter().all(|t| *t == TileView::Hidden));
        }
        other => panic!("expected a tile hunter round, got {other:?}"),
    }

    c.act(Move::CashOut).unwrap();
    assert_eq!(c.screen(), Screen::Won);

    c.acknowledge().unwrap();
    assert_eq!(c.screen(), Screen::Setup);
    assert_eq!(c.session().difficulty, Difficulty::Insane);
    assert_eq!(c.session().bet_amount, 500);

    c.go_home();
    assert_eq!(c.screen(), Screen::Launcher);
    assert_eq!(c.session().active_game, None);
    assert_eq!(c.session().balance, 1000);
}

#[test]
fn test_go_home_from_every_screen() {
    let mut c = controller(instant());
    c.go_home();
    assert_eq!(c.screen(), Screen::Launcher);

    start(&mut c, GameKind::CasinoWar, 100);
    c.go_home();
    assert_eq!(c.screen(), Screen::Launcher);

    start(&mut c, GameKind::CasinoWar, 100);
    c.play().unwrap();
    c.go_home();
    assert_eq!(c.screen(), Screen::Launcher);
    assert!(c.round().is_none());
    assert_eq!(c.session().balance, 900);
}

#[test]
fn test_back_from_result_keeps_settlement() {
    let mut c = controller(instant());
    start(&mut c, GameKind::TileHunter, 100);
    c.play_prepared(TileHunter::with_safe_tiles(Difficulty::Easy, 0..10).into())
        .unwrap();
    c.act(Move::Reveal(0)).unwrap();
    c.act(Move::CashOut).unwrap();
    assert_eq!(c.session().balance, 1010);

    c.back().unwrap();
    assert_eq!(c.screen(), Screen::Setup);
    assert_eq!(c.session().balance, 1010);
    assert_eq!(c.session().history.len(), 1);
}

#[test]
fn test_moves_outside_playing_rejected() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    let err = c.act(Move::CashOut).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidTransition {
            from: Screen::Setup,
            action: "make a move"
        }
    );
    assert!(c.acknowledge().is_err());
    assert!(c.back().is_err());
}

// =============================================================================
// Bets and balance
// =============================================================================

#[test]
fn test_bet_is_deducted_before_first_move() {
    for game in GameKind::ALL {
        let mut c = controller(instant());
        start(&mut c, game, 250);
        c.play().unwrap();
        assert_eq!(c.session().balance, 750, "{game}");
        assert_eq!(c.round().map(|r| r.kind()), Some(game));
    }
}

#[test]
fn test_insufficient_balance_leaves_session_untouched() {
    let mut c = controller(instant().with_starting_balance(240));
    start(&mut c, GameKind::RideTheBus, 250);

    let err = c.play().unwrap_err();
    assert!(err.is_user_facing());
    assert_eq!(c.screen(), Screen::Setup);
    assert_eq!(c.session().balance, 240);
    assert!(c.round().is_none());

    c.set_bet(240).unwrap();
    c.play().unwrap();
    assert_eq!(c.session().balance, 0);
}

#[test]
fn test_bet_rules() {
    let mut c = controller(instant());
    c.select_game(GameKind::CasinoWar).unwrap();

    assert!(matches!(c.set_bet(0), Err(GameError::InvalidBet { .. })));
    assert!(matches!(c.set_bet(1010), Err(GameError::InvalidBet { .. })));
    assert!(matches!(c.set_bet(55), Err(GameError::InvalidBet { .. })));
    c.set_bet(10).unwrap();
    c.set_max_bet().unwrap();
    assert_eq!(c.session().bet_amount, 1000);
}

#[test]
fn test_high_score_tracks_peak_balance() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);

    c.play_prepared(bus_table().into()).unwrap();
    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();
    c.act(Move::CashOut).unwrap();
    assert_eq!(c.session().balance, 1050);
    assert_eq!(c.session().high_score, 1050);
    assert!(c.result_summary().unwrap().new_high_score);

    c.acknowledge().unwrap();
    c.play_prepared(bus_table().into()).unwrap();
    c.act(Move::Guess(Guess::Color(Color::Black))).unwrap();
    assert_eq!(c.session().balance, 950);
    assert_eq!(c.session().high_score, 1050);
    assert!(!c.result_summary().unwrap().new_high_score);
}

#[test]
fn test_lost_first_round_is_not_a_new_high_score() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();
    c.act(Move::Guess(Guess::Color(Color::Black))).unwrap();

    let summary = c.result_summary().unwrap();
    assert!(!summary.won);
    assert_eq!(summary.balance, 900);
    assert!(!summary.new_high_score);
}

#[test]
fn test_win_below_peak_is_not_a_new_high_score() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();
    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();
    c.act(Move::CashOut).unwrap();
    assert_eq!(c.session().high_score, 1050);

    c.go_home();
    start(&mut c, GameKind::TileHunter, 100);
    c.play_prepared(TileHunter::with_safe_tiles(Difficulty::Easy, 0..10).into())
        .unwrap();
    c.act(Move::CashOut).unwrap();

    let summary = c.result_summary().unwrap();
    assert!(summary.won);
    assert_eq!(summary.balance, 1050);
    assert_eq!(summary.high_score, 1050);
    assert!(!summary.new_high_score);
}

// =============================================================================
// Cash-out value
// =============================================================================

#[test]
fn test_cash_out_value_follows_round() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();
    assert_eq!(c.cash_out_value(), None);

    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();
    assert_eq!(c.cash_out_value(), Some(150));
    c.act(Move::Guess(Guess::HighLow(HighLow::High))).unwrap();
    assert_eq!(c.cash_out_value(), Some(225));

    c.act(Move::CashOut).unwrap();
    assert_eq!(c.cash_out_value(), None);
    assert_eq!(c.snapshot().cash_out_value, None);
}

#[test]
fn test_cash_out_value_per_game() {
    let mut c = controller(instant());
    start(&mut c, GameKind::TileHunter, 200);
    c.play_prepared(TileHunter::with_safe_tiles(Difficulty::Easy, 0..10).into())
        .unwrap();
    assert_eq!(c.cash_out_value(), Some(200));
    c.act(Move::Reveal(0)).unwrap();
    assert_eq!(c.cash_out_value(), Some(220));

    c.go_home();
    start(&mut c, GameKind::CasinoWar, 100);
    c.play().unwrap();
    assert_eq!(c.cash_out_value(), None);
}

// =============================================================================
// Ride The Bus
// =============================================================================

#[test]
fn test_ride_the_bus_cash_out_after_three() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();

    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();
    c.act(Move::Guess(Guess::HighLow(HighLow::High))).unwrap();
    c.act(Move::Guess(Guess::InsideOutside(InsideOutside::Inside))).unwrap();
    let outcome = c.act(Move::CashOut).unwrap();

    assert_eq!(outcome.status, RoundStatus::Won);
    assert_eq!(outcome.payout, 337);
    assert_eq!(c.session().balance, 1237);
    assert_eq!(c.result_summary().unwrap().net, 237);
}

#[test]
fn test_ride_the_bus_full_run() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 640);
    c.play_prepared(bus_table().into()).unwrap();

    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();
    c.act(Move::Guess(Guess::HighLow(HighLow::High))).unwrap();
    c.act(Move::Guess(Guess::InsideOutside(InsideOutside::Inside))).unwrap();
    c.act(Move::Guess(Guess::Suit(Suit::Clubs))).unwrap();
    let outcome = c.act(Move::Guess(Guess::Rank(Rank::King))).unwrap();

    // 640 × 1.5^6
    assert_eq!(outcome.payout, 7290);
    assert_eq!(c.screen(), Screen::Won);
    assert_eq!(c.session().balance, 1000 - 640 + 7290);
}

#[test]
fn test_ride_the_bus_no_cash_out_before_first_guess() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();

    assert_eq!(c.act(Move::CashOut), Err(GameError::CashOutUnavailable));
    assert_eq!(c.screen(), Screen::Playing);
    assert_eq!(c.session().balance, 900);
}

#[test]
fn test_ride_the_bus_wrong_guess_cues() {
    let mut c = controller(instant());
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();

    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();
    c.act(Move::Guess(Guess::HighLow(HighLow::Low))).unwrap();
    assert_eq!(c.screen(), Screen::Lost);
    assert_eq!(c.player_mut().take(), vec![Cue::Correct, Cue::Wrong]);
}

// =============================================================================
// Tile Hunter
// =============================================================================

#[test]
fn test_tile_hunter_clear_board() {
    let mut c = controller(instant());
    start(&mut c, GameKind::TileHunter, 100);
    c.play_prepared(TileHunter::with_safe_tiles(Difficulty::Easy, 0..10).into())
        .unwrap();

    for index in 0..9 {
        let outcome = c.act(Move::Reveal(index)).unwrap();
        assert_eq!(outcome.status, RoundStatus::InProgress);
    }
    let outcome = c.act(Move::Reveal(9)).unwrap();
    assert_eq!(outcome.status, RoundStatus::Won);
    assert_eq!(outcome.payout, 200);
    assert_eq!(c.session().balance, 1100);
}

#[test]
fn test_tile_hunter_repeat_reveal_is_noop() {
    let mut c = controller(instant());
    start(&mut c, GameKind::TileHunter, 100);
    c.play_prepared(TileHunter::with_safe_tiles(Difficulty::Easy, 0..10).into())
        .unwrap();

    c.act(Move::Reveal(3)).unwrap();
    let before = c.snapshot();
    let outcome = c.act(Move::Reveal(3)).unwrap();
    assert_eq!(outcome.status, RoundStatus::InProgress);
    assert_eq!(c.snapshot(), before);
}

#[test]
fn test_tile_hunter_out_of_range() {
    let mut c = controller(instant());
    start(&mut c, GameKind::TileHunter, 100);
    c.play().unwrap();

    assert_eq!(
        c.act(Move::Reveal(25)),
        Err(GameError::InvalidTile { index: 25, grid_size: 25 })
    );
    assert_eq!(c.screen(), Screen::Playing);
}

// =============================================================================
// Casino War
// =============================================================================

fn war(cards: &[Card]) -> CasinoWar {
    CasinoWar::stacked(GameRng::new(3), cards.iter().copied())
}

#[test]
fn test_war_player_wins_doubles() {
    let mut c = controller(instant());
    start(&mut c, GameKind::CasinoWar, 100);
    c.play_prepared(war(&[card(Rank::Ace, Suit::Spades), card(Rank::King, Suit::Hearts)]).into())
        .unwrap();

    c.act(Move::Deal).unwrap();
    assert_eq!(c.screen(), Screen::Won);
    assert_eq!(c.session().balance, 1100);
}

#[test]
fn test_war_dealer_wins() {
    let mut c = controller(instant());
    start(&mut c, GameKind::CasinoWar, 100);
    c.play_prepared(war(&[card(Rank::Two, Suit::Spades), card(Rank::Three, Suit::Hearts)]).into())
        .unwrap();

    c.act(Move::Deal).unwrap();
    assert_eq!(c.screen(), Screen::Lost);
    assert_eq!(c.session().balance, 900);
}

#[test]
fn test_war_net_results() {
    let tie = [card(Rank::Eight, Suit::Spades), card(Rank::Eight, Suit::Hearts)];
    let cases = [
        // (war draw, final balance)
        ([card(Rank::Ace, Suit::Clubs), card(Rank::Two, Suit::Clubs)], 1200),
        ([card(Rank::Two, Suit::Clubs), card(Rank::Ace, Suit::Clubs)], 800),
        ([card(Rank::Nine, Suit::Clubs), card(Rank::Nine, Suit::Diamonds)], 1100),
    ];

    for (draw, expected) in cases {
        let mut c = controller(instant());
        start(&mut c, GameKind::CasinoWar, 100);
        let mut cards = tie.to_vec();
        cards.extend(draw);
        c.play_prepared(war(&cards).into()).unwrap();

        assert_eq!(c.act(Move::Deal).unwrap().status, RoundStatus::AwaitingDecision);
        c.act(Move::GoToWar).unwrap();
        assert!(c.screen().is_result());
        assert_eq!(c.session().balance, expected);

        let record = &c.session().history[0];
        assert_eq!(record.staked, 200);
        assert_eq!(record.net(), expected - 1000);
    }
}

#[test]
fn test_war_surrender_refunds_half() {
    let mut c = controller(instant());
    start(&mut c, GameKind::CasinoWar, 110);
    c.play_prepared(war(&[card(Rank::Jack, Suit::Spades), card(Rank::Jack, Suit::Hearts)]).into())
        .unwrap();

    c.act(Move::Deal).unwrap();
    c.act(Move::Surrender).unwrap();
    assert_eq!(c.screen(), Screen::Lost);
    assert_eq!(c.session().balance, 1000 - 110 + 55);
    assert_eq!(c.result_summary().unwrap().net, -55);
}

// =============================================================================
// Pacing
// =============================================================================

#[test]
fn test_war_result_is_paced_but_balance_is_immediate() {
    let mut c = controller(SessionConfig::default().with_seed(1));
    start(&mut c, GameKind::CasinoWar, 100);
    c.play_prepared(war(&[card(Rank::Ace, Suit::Spades), card(Rank::Two, Suit::Hearts)]).into())
        .unwrap();

    c.act(Move::Deal).unwrap();
    assert_eq!(c.screen(), Screen::Playing);
    assert_eq!(c.session().balance, 1100);

    assert_eq!(c.advance(Duration::from_millis(500)), None);
    assert_eq!(c.advance(Duration::from_millis(500)), Some(Screen::Won));
}

#[test]
fn test_cash_out_is_never_paced() {
    let mut c = controller(SessionConfig::default().with_seed(1));
    start(&mut c, GameKind::TileHunter, 100);
    c.play().unwrap();

    c.act(Move::CashOut).unwrap();
    assert_eq!(c.screen(), Screen::Won);
    assert!(c.pending_transition().is_none());
}

#[test]
fn test_back_cancels_pending_reveal() {
    let mut c = controller(SessionConfig::default().with_seed(1));
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();
    c.act(Move::Guess(Guess::Color(Color::Black))).unwrap();
    assert!(c.pending_transition().is_some());

    c.back().unwrap();
    c.play().unwrap();
    assert_eq!(c.advance(Duration::from_secs(2)), None);
    assert_eq!(c.screen(), Screen::Playing);
}

// =============================================================================
// Host, sound, snapshots
// =============================================================================

#[derive(Default)]
struct Shell {
    calls: Vec<&'static str>,
}

impl HostShell for Shell {
    fn ready(&mut self) {
        self.calls.push("ready");
    }

    fn expand(&mut self) {
        self.calls.push("expand");
    }
}

#[test]
fn test_host_handshake_order() {
    let mut c = controller(instant());
    let mut shell = Shell::default();
    c.attach_host(&mut shell);
    assert_eq!(shell.calls, vec!["ready", "expand"]);
}

#[test]
fn test_sound_disabled_at_startup() {
    let mut c = controller(instant().with_sound(false));
    assert!(!c.sound_enabled());
    start(&mut c, GameKind::CasinoWar, 100);
    c.play().unwrap();
    c.act(Move::Deal).unwrap();
    assert!(c.player().played.is_empty());

    assert!(c.toggle_sound());
}

#[test]
fn test_snapshot_round_trip() {
    let mut c = controller(SessionConfig::default().with_seed(9));
    start(&mut c, GameKind::RideTheBus, 100);
    c.play_prepared(bus_table().into()).unwrap();
    c.act(Move::Guess(Guess::Color(Color::Red))).unwrap();

    let snapshot = c.snapshot();
    assert_eq!(snapshot.screen, Screen::Playing);
    assert_eq!(snapshot.balance, 900);
    match &snapshot.round {
        Some(RoundSnapshot::RideTheBus(view)) => {
            assert_eq!(view.cards[0], Some(card(Rank::Five, Suit::Hearts)));
            assert_eq!(view.cards[1], None);
            assert!(view.cash_out_available);
        }
        other => panic!("expected a ride the bus round, got {other:?}"),
    }
    assert_eq!(snapshot.cash_out_value, Some(150));

    let bytes = snapshot.to_bytes().unwrap();
    assert_eq!(SessionSnapshot::from_bytes(&bytes).unwrap(), snapshot);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"Playing\""));
}

#[test]
fn test_seeded_sessions_replay() {
    let run = || {
        let mut c = controller(instant().with_seed(1234));
        c.select_game(GameKind::CasinoWar).unwrap();
        c.set_bet(10).unwrap();
        for _ in 0..20 {
            c.play().unwrap();
            c.act(Move::Deal).unwrap();
            if c.screen() == Screen::Playing {
                c.act(Move::Surrender).unwrap();
            }
            c.acknowledge().unwrap();
        }
        c.session().balance
    };
    assert_eq!(run(), run());
}
