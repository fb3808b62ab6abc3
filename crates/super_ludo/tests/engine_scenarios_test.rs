//! End-to-end turn scenarios driven through forced crystal ball events.

use super_ludo::{
    BoardTopology, Color, EngineError, Event, GameSetup, LinearPosition, MoveOutcome, PieceId,
    RING_SIZE, TurnEngine, TurnPhase,
};

fn red(n: u8) -> PieceId {
    PieceId::new(Color::Red, n)
}

fn green(n: u8) -> PieceId {
    PieceId::new(Color::Green, n)
}

fn pos(v: i16) -> LinearPosition {
    LinearPosition::new(v).expect("on board")
}

#[test]
fn test_six_brings_piece_out_of_base() {
    let mut engine = TurnEngine::seeded(2, 1).expect("Valid setup");

    engine.apply_event(Event::NormalRoll(6)).expect("Awaiting roll");
    assert_eq!(engine.phase(), TurnPhase::AwaitingPieceSelection);
    assert_eq!(engine.eligible_pieces(), &[red(1), red(2), red(3)]);

    let outcome = engine.select_piece(red(1)).expect("Eligible piece");
    assert_eq!(outcome, MoveOutcome::Entered { piece: red(1) });

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.position_of(red(1)), Some(LinearPosition::START));
    assert!(snapshot.status().contains("start"));
    assert_eq!(*snapshot.current_player(), 1);
}

#[test]
fn test_exact_roll_reaches_home_and_wins() {
    let mut engine = GameSetup::new(2)
        .place(red(1), 55)
        .place(red(2), 57)
        .place(red(3), 57)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::NormalRoll(2)).expect("Awaiting roll");
    // Home pieces are not eligible.
    assert_eq!(engine.eligible_pieces(), &[red(1)]);

    let outcome = engine.select_piece(red(1)).expect("Eligible piece");
    assert_eq!(
        outcome,
        MoveOutcome::ReachedHome {
            piece: red(1),
            from: pos(55)
        }
    );

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.position_of(red(1)), Some(LinearPosition::HOME));
    assert!(*snapshot.game_over());
    assert_eq!(*snapshot.winner(), Some(Color::Red));
    assert_eq!(*snapshot.phase(), TurnPhase::GameOver);
    assert_eq!(snapshot.status(), "Game Over! Player 1 wins!");
    assert_eq!(snapshot.players()[0].home_count(), &3);

    let err = engine.request_roll().expect_err("Game is over");
    assert!(matches!(err, EngineError::WrongPhase { .. }));
}

#[test]
fn test_reaching_home_without_win_passes_turn() {
    let mut engine = GameSetup::new(2)
        .place(red(1), 55)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::NormalRoll(2)).expect("Awaiting roll");
    engine.select_piece(red(1)).expect("Eligible piece");

    assert!(!engine.state().is_game_over());
    assert_eq!(engine.state().current_player_index(), 1);
}

#[test]
fn test_black_hole_forfeits_turn() {
    let mut engine = GameSetup::new(3)
        .place(red(1), 10)
        .start_seeded(1)
        .expect("Valid setup");
    let before = engine.snapshot();

    engine.apply_event(Event::BlackHole).expect("Awaiting roll");

    let after = engine.snapshot();
    assert_eq!(*after.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(*after.current_player(), 1);
    assert_eq!(after.players()[0].pieces(), before.players()[0].pieces());
    assert_eq!(*after.last_event(), Some(Event::BlackHole));
    assert_eq!(*after.pending_event(), None);
    assert!(after.status().starts_with("Black Hole!"));
}

#[test]
fn test_meteor_strike_sends_target_to_base() {
    let mut engine = GameSetup::new(2)
        .place(green(2), 5)
        // Start cell is safe, so this one cannot be targeted.
        .place(green(3), 0)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::MeteorStrike).expect("Awaiting roll");
    assert_eq!(engine.phase(), TurnPhase::AwaitingTargetSelection);
    assert_eq!(engine.eligible_pieces(), &[green(2)]);

    let err = engine.select_target(green(3)).expect_err("Protected piece");
    assert_eq!(err, EngineError::IneligibleSelection(green(3)));

    let outcome = engine.select_target(green(2)).expect("Eligible target");
    assert_eq!(
        outcome,
        MoveOutcome::SentToBase {
            piece: green(2),
            from: pos(5)
        }
    );
    assert_eq!(
        engine.snapshot().position_of(green(2)),
        Some(LinearPosition::BASE)
    );
    assert_eq!(engine.state().current_player_index(), 1);
}

#[test]
fn test_overshoot_keeps_piece_and_ends_turn() {
    let mut engine = GameSetup::new(2)
        .place(red(1), 53)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::NormalRoll(5)).expect("Awaiting roll");
    let outcome = engine.select_piece(red(1)).expect("Eligible piece");

    assert_eq!(
        outcome,
        MoveOutcome::Overshoot {
            piece: red(1),
            at: pos(53),
            rolled: 5,
            needed: 4
        }
    );
    assert!(outcome.is_rejected());
    assert_eq!(engine.snapshot().position_of(red(1)), Some(pos(53)));
    assert_eq!(engine.state().current_player_index(), 1);
    assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);
    assert!(engine.status().contains("exact count"));
}

#[test]
fn test_second_landing_captures_first() {
    // Red linear 5 and Green linear 44 share absolute cell 5.
    let mut engine = GameSetup::new(2)
        .place(red(1), 2)
        .place(green(1), 42)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::NormalRoll(3)).expect("Awaiting roll");
    engine.select_piece(red(1)).expect("Eligible piece");
    assert_eq!(engine.snapshot().position_of(red(1)), Some(pos(5)));

    engine.apply_event(Event::NormalRoll(2)).expect("Awaiting roll");
    let outcome = engine.select_piece(green(1)).expect("Eligible piece");

    assert_eq!(outcome.captured(), &[red(1)]);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.position_of(green(1)), Some(pos(44)));
    assert_eq!(snapshot.position_of(red(1)), Some(LinearPosition::BASE));
    assert!(snapshot.status().contains("sent back to base"));
}

#[test]
fn test_no_capture_on_safe_cell() {
    // Red linear 8 is absolute cell 8, a safe zone. Green linear 47 is cell 8 too.
    let mut engine = GameSetup::new(2)
        .place(red(1), 8)
        .place(green(1), 45)
        .starting_player(1)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::NormalRoll(2)).expect("Awaiting roll");
    let outcome = engine.select_piece(green(1)).expect("Eligible piece");

    assert!(outcome.captured().is_empty());
    assert_eq!(engine.snapshot().position_of(red(1)), Some(pos(8)));
}

#[test]
fn test_same_color_pieces_stack() {
    let mut engine = GameSetup::new(2)
        .place(red(1), 10)
        .place(red(2), 7)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::NormalRoll(3)).expect("Awaiting roll");
    let outcome = engine.select_piece(red(2)).expect("Eligible piece");

    assert!(outcome.captured().is_empty());
    assert_eq!(engine.snapshot().position_of(red(1)), Some(pos(10)));
    assert_eq!(engine.snapshot().position_of(red(2)), Some(pos(10)));
}

#[test]
fn test_wormhole_jumps_to_next_safe_zone() {
    // From Red linear 9 the next safe cell ahead is absolute 13 (Green's start).
    let mut engine = GameSetup::new(2)
        .place(red(1), 9)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::Wormhole).expect("Awaiting roll");
    assert_eq!(engine.eligible_pieces(), &[red(1)]);

    let outcome = engine.select_piece(red(1)).expect("Eligible piece");
    assert!(matches!(outcome, MoveOutcome::Warped { to, .. } if to == pos(13)));
    assert_eq!(engine.snapshot().position_of(red(1)), Some(pos(13)));
}

#[test]
fn test_wormhole_without_safe_zone_ahead_stays() {
    // Absolute cells 48-51 hold no safe zone for Red.
    let mut engine = GameSetup::new(2)
        .place(red(1), 48)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::Wormhole).expect("Awaiting roll");
    let outcome = engine.select_piece(red(1)).expect("Eligible piece");

    assert_eq!(outcome, MoveOutcome::NoSafeZoneAhead { piece: red(1) });
    assert_eq!(engine.snapshot().position_of(red(1)), Some(pos(48)));
    assert_eq!(engine.state().current_player_index(), 1);
}

#[test]
fn test_wormhole_without_ring_pieces_passes() {
    let mut engine = GameSetup::new(2)
        .place(red(1), 54)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::Wormhole).expect("Awaiting roll");

    assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(engine.state().current_player_index(), 1);
}

#[test]
fn test_alien_invasion_relocates_onto_ring() {
    let mut engine = GameSetup::new(2)
        .place(green(1), 0)
        .start_seeded(9)
        .expect("Valid setup");

    engine.apply_event(Event::AlienInvasion).expect("Awaiting roll");
    // Safe pieces are still valid targets.
    assert_eq!(engine.eligible_pieces(), &[green(1)]);

    let outcome = engine.select_target(green(1)).expect("Eligible target");
    let MoveOutcome::Relocated { to, .. } = outcome else {
        panic!("Expected relocation, got {:?}", outcome);
    };
    assert!(to.is_on_ring());
    assert_eq!(engine.snapshot().position_of(green(1)), Some(to));
}

/// Absolute cell an abducted Green#1 lands on for a given seed.
fn abduction_cell(seed: u64) -> u8 {
    let mut engine = GameSetup::new(3)
        .place(green(1), 20)
        .start_seeded(seed)
        .expect("Valid setup");
    engine.apply_event(Event::AlienInvasion).expect("Awaiting roll");
    let outcome = engine.select_target(green(1)).expect("Eligible target");
    let MoveOutcome::Relocated { to, .. } = outcome else {
        panic!("Expected relocation, got {:?}", outcome);
    };
    engine
        .board()
        .ring_cell(Color::Green, to)
        .expect("Relocated onto the ring")
}

#[test]
fn test_alien_invasion_captures_at_destination() {
    let board = BoardTopology::default();
    let (seed, cell) = (0..64)
        .map(|seed| (seed, abduction_cell(seed)))
        .find(|(_, cell)| !board.is_safe_cell(*cell))
        .expect("Some seed lands off the safe cells");

    // Same seed, same destination. Now a Red and a Yellow piece wait there.
    let linear_for = |color: Color| {
        (cell as i16 - board.start_offset(color) as i16).rem_euclid(RING_SIZE as i16)
    };
    let red_linear = linear_for(Color::Red);
    let yellow_linear = linear_for(Color::Yellow);
    let yellow = PieceId::new(Color::Yellow, 1);
    let mut engine = GameSetup::new(3)
        .place(green(1), 20)
        .place(red(1), red_linear)
        .place(yellow, yellow_linear)
        .start_seeded(seed)
        .expect("Valid setup");

    engine.apply_event(Event::AlienInvasion).expect("Awaiting roll");
    let outcome = engine.select_target(green(1)).expect("Eligible target");

    // The acting player's own piece is not spared.
    assert_eq!(outcome.captured(), &[red(1), yellow]);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.position_of(red(1)), Some(LinearPosition::BASE));
    assert_eq!(snapshot.position_of(yellow), Some(LinearPosition::BASE));
    let landed = snapshot.position_of(green(1)).expect("Seated piece");
    assert_eq!(engine.board().ring_cell(Color::Green, landed), Some(cell));
}

#[test]
fn test_alien_invasion_without_ring_opponents_passes() {
    let mut engine = GameSetup::new(2)
        .place(green(1), 56)
        .start_seeded(1)
        .expect("Valid setup");

    engine.apply_event(Event::AlienInvasion).expect("Awaiting roll");

    assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(engine.state().current_player_index(), 1);
    assert_eq!(*engine.snapshot().last_event(), Some(Event::AlienInvasion));
}

#[test]
fn test_super_boost_grants_extra_turn() {
    let mut engine = TurnEngine::seeded(3, 1).expect("Valid setup");

    engine.apply_event(Event::SuperBoost).expect("Awaiting roll");
    let snapshot = engine.snapshot();
    assert_eq!(*snapshot.current_player(), 0);
    assert!(!*snapshot.extra_turn_pending());
    assert_eq!(*snapshot.phase(), TurnPhase::AwaitingRoll);
    assert!(snapshot.status().ends_with("Player 1's turn."));
}

#[test]
fn test_reset_returns_to_start() {
    let mut engine = GameSetup::new(4)
        .place(red(1), 20)
        .place(green(2), 57)
        .starting_player(2)
        .start_seeded(1)
        .expect("Valid setup");
    engine.apply_event(Event::NormalRoll(6)).expect("Awaiting roll");

    let snapshot = engine.reset_game();

    assert_eq!(*snapshot.current_player(), 0);
    assert_eq!(*snapshot.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(*snapshot.last_event(), None);
    assert!(
        snapshot
            .players()
            .iter()
            .flat_map(|p| p.pieces())
            .all(|p| *p.position() == LinearPosition::BASE)
    );
    assert_eq!(snapshot.status(), "Game reset! Player 1's turn.");
}
