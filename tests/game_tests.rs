//! Full-game integration tests.
//!
//! These drive the public `Game` API through complete games and mode
//! transitions, checking the board, events and views a frontend would
//! consume.

use tictactoe_engine::{
    BoardError, Game, GameEvent, GameView, Mark, Mode, ModeRequest, Outcome, Turn,
};

/// A defended attacker game runs to a tie.
///
/// Every engine answer along this line has a single candidate cell, so
/// the trace is seed-independent until the board is nearly full, and
/// the final position has no line for either side whichever of the
/// last two cells each side ends up with.
#[test]
fn test_attacker_game_defended_to_a_tie() {
    let mut game = Game::new(Mode::Attacker, 7);

    game.apply_move(1).unwrap();
    assert_eq!(game.cell(5), Ok(Mark::Cross)); // center answer

    game.apply_move(2).unwrap();
    assert_eq!(game.cell(3), Ok(Mark::Cross)); // blocks 1-2-3

    game.apply_move(7).unwrap(); // blocks the 3-5-7 diagonal
    assert_eq!(game.cell(4), Ok(Mark::Cross)); // blocks 1-4-7

    game.apply_move(6).unwrap(); // blocks 4-5-6
    assert_eq!(game.outcome(), Outcome::Open);
    assert_eq!(game.round(), 8);

    // One of the last two cells went to the engine; take the other.
    let last = if game.cell(8) == Ok(Mark::Empty) { 8 } else { 9 };
    game.apply_move(last).unwrap();

    assert_eq!(game.outcome(), Outcome::Tied);
    assert_eq!(game.turn(), Turn::Terminated);
    assert_eq!(game.round(), 9);
    assert_eq!(game.title(), "TicTacToe Attacker [ Tied ]");
}

#[test]
fn test_unguarded_lines_are_punished() {
    let mut game = Game::new(Mode::Attacker, 3);
    for cell in [1, 2, 4] {
        game.apply_move(cell).unwrap();
    }

    assert_eq!(game.outcome(), Outcome::Lost);
    assert_eq!(game.title(), "TicTacToe Attacker [ Lost ]");
    for cell in [3, 5, 7] {
        assert_eq!(game.cell(cell), Ok(Mark::Cross));
    }
}

/// Feeding every cell in order always drives a game to termination,
/// whatever the seed picked for the engine's tie-breaks.
#[test]
fn test_defender_games_always_terminate() {
    for seed in 0..16 {
        let mut game = Game::new(Mode::Defender, seed);
        for cell in 1..=9 {
            game.apply_move(cell).unwrap();
        }

        assert_ne!(game.outcome(), Outcome::Open, "seed {seed}");
        assert_eq!(game.turn(), Turn::Terminated, "seed {seed}");
        assert_eq!(game.round(), 9, "seed {seed}");
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut game = Game::new(Mode::Defender, seed);
        for cell in 1..=9 {
            game.apply_move(cell).unwrap();
        }
        game.view()
    };
    assert_eq!(play(11), play(11));
}

#[test]
fn test_invalid_index_reports_and_changes_nothing() {
    let mut game = Game::new(Mode::Attacker, 7);
    let before = *game.board();

    let err = game.apply_move(12).unwrap_err();
    assert_eq!(err, BoardError::InvalidIndex(12));
    assert_eq!(
        err.to_string(),
        "cell index 12 is outside the board (valid indices are 1..=9)"
    );
    assert_eq!(*game.board(), before);
}

#[test]
fn test_mode_round_trip_through_scenes() {
    let mut game = Game::new(Mode::Attacker, 7);

    game.request_mode(ModeRequest::Conjugate);
    assert_eq!(game.mode(), Mode::Defender);

    game.request_mode(ModeRequest::Bonus);
    assert_eq!(game.mode(), Mode::DebugAttacker);
    assert_eq!(game.outcome(), Outcome::Won);
    assert!(game.in_scene());

    game.request_mode(ModeRequest::Clumsy);
    assert_eq!(game.mode(), Mode::DebugDefender);
    assert_eq!(game.outcome(), Outcome::Lost);

    // Leaving the scene restores the pre-scene mode.
    game.request_mode(ModeRequest::Clumsy);
    assert_eq!(game.mode(), Mode::Defender);
    assert!(!game.in_scene());
    assert_eq!(game.outcome(), Outcome::Open);
}

#[test]
fn test_conjugate_inside_scene_drops_scene_memory() {
    let mut game = Game::new(Mode::Attacker, 7);
    game.request_mode(ModeRequest::Bonus);
    assert!(game.in_scene());

    game.request_mode(ModeRequest::Conjugate);
    assert!(!game.in_scene());
    assert_eq!(game.mode(), Mode::DebugDefender);
}

#[test]
fn test_view_matches_board() {
    let mut game = Game::new(Mode::Attacker, 7);
    game.apply_move(1).unwrap();

    let view = game.view();
    assert_eq!(view.cells[0], Mark::Nought);
    assert_eq!(view.cells[4], Mark::Cross);
    assert_eq!(view.mode, Mode::Attacker);
    assert_eq!(view.turn, Turn::User);
    assert_eq!(view.outcome, Outcome::Open);
    assert_eq!(view.round, 2);
    assert!(!view.debug);
    assert!(!view.scene);
    assert_eq!(view.title, "TicTacToe Attacker");
}

#[test]
fn test_view_serde_round_trip() {
    let mut game = Game::new(Mode::Attacker, 7);
    game.apply_move(1).unwrap();
    let view = game.view();

    let json = serde_json::to_string(&view).unwrap();
    let restored: GameView = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, view);
}

#[test]
fn test_events_cover_resets_and_results() {
    let mut game = Game::new(Mode::Attacker, 7);
    game.drain_events();

    game.request_mode(ModeRequest::Startup);
    assert_eq!(game.drain_events(), vec![GameEvent::BoardReset]);

    for cell in [1, 2, 4] {
        game.apply_move(cell).unwrap();
    }
    let events = game.drain_events();
    assert_eq!(
        events.last(),
        Some(&GameEvent::TurnChanged(Turn::Terminated))
    );
    assert!(events.contains(&GameEvent::OutcomeChanged(Outcome::Lost)));
}

#[test]
fn test_rng_checkpoint_is_replayable() {
    let mut game = Game::new(Mode::Defender, 42);
    game.apply_move(2).unwrap();
    let state = game.rng_state();
    assert_eq!(state.seed, 42);

    let json = serde_json::to_string(&state).unwrap();
    let restored = serde_json::from_str(&json).unwrap();
    assert_eq!(state, restored);
}
