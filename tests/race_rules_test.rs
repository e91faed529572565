//! Tests for the race state machine.

use cosmic_race::{
    BOARD_SIZE, CharacterToken, Game, GameError, GamePhase, START_POSITION, advance_turn,
    initialize, phase_of, query, reset,
};

/// Builds a die that replays the given faces, then keeps rolling 1.
fn scripted(faces: &[u8]) -> impl FnMut() -> u8 {
    let mut faces = faces.to_vec().into_iter();
    move || faces.next().unwrap_or(1)
}

/// Plays the given rolls in order.
fn play(game: Game, faces: &[u8]) -> Game {
    let mut die = scripted(faces);
    faces.iter().fold(game, |game, _| {
        advance_turn(&game, &mut die).expect("Legal roll")
    })
}

#[test]
fn test_initialize_supported_player_counts() {
    let names = ["Ada", "Grace", "Linus", "Barbara"];
    for n in 2..=4 {
        let game = initialize(&names[..n]).expect("Valid setup");
        assert_eq!(game.players().len(), n);
        assert!(game.players().iter().all(|p| p.position() == START_POSITION));
        assert_eq!(game.turn_index(), 0);
        assert!(!game.is_over());
        assert!(game.last_turn().is_none());
    }
}

#[test]
fn test_initialize_rejects_bad_player_counts() {
    assert_eq!(initialize(&["Solo"]), Err(GameError::InvalidPlayerCount(1)));
    assert_eq!(
        initialize(&["A", "B", "C", "D", "E"]),
        Err(GameError::InvalidPlayerCount(5))
    );
    assert_eq!(
        initialize::<&str>(&[]),
        Err(GameError::InvalidPlayerCount(0))
    );
}

#[test]
fn test_tokens_alternate_by_seat() {
    let game = initialize(&["Ada", "Grace", "Linus", "Barbara"]).expect("Valid setup");
    let tokens: Vec<_> = game.players().iter().map(|p| p.token()).collect();
    assert_eq!(
        tokens,
        [
            CharacterToken::Alien,
            CharacterToken::Astronaut,
            CharacterToken::Alien,
            CharacterToken::Astronaut,
        ]
    );
}

#[test]
fn test_first_roll_from_start_moves_by_face_value() {
    let game = initialize(&["Ada", "Grace", "Linus"]).expect("Valid setup");
    let game = advance_turn(&game, &mut || 3u8).expect("Legal roll");

    // Off-board start is -1, so a three lands on square 2.
    assert_eq!(game.players()[0].position(), 2);
    assert_eq!(game.players()[1].position(), START_POSITION);
    assert_eq!(game.players()[2].position(), START_POSITION);
    assert_eq!(game.turn_index(), 1);
    assert!(!game.is_over());
}

#[test]
fn test_winning_roll_clamps_and_still_rotates_turn() {
    let game = initialize(&["A", "B"]).expect("Valid setup");
    // A climbs to 23 with four sixes while B crawls.
    let game = play(game, &[6, 1, 6, 1, 6, 1, 6, 1]);
    assert_eq!(game.players()[0].position(), 23);
    assert_eq!(game.turn_index(), 0);

    let game = advance_turn(&game, &mut || 5u8).expect("Legal roll");

    assert_eq!(game.players()[0].position(), BOARD_SIZE);
    assert!(game.is_over());
    assert_eq!(game.turn_index(), 1);
    assert_eq!(game.winner().map(|p| p.name()), Some("A"));
    assert_eq!(game.players()[1].position(), 3);
}

#[test]
fn test_winning_scenario_from_stored_record() {
    let record = serde_json::json!({
        "players": [
            { "name": "A", "position": 23, "token": "alien" },
            { "name": "B", "position": 10, "token": "astronaut" }
        ],
        "turn_index": 0,
        "is_over": false
    });
    let game: Game = serde_json::from_value(record).expect("Valid record");

    let game = advance_turn(&game, &mut || 5u8).expect("Legal roll");

    assert_eq!(game.players()[0].position(), 25);
    assert!(game.is_over());
    assert_eq!(game.turn_index(), 1);
}

#[test]
fn test_exact_landing_wins() {
    let record = serde_json::json!({
        "players": [
            { "name": "A", "position": 5, "token": "alien" },
            { "name": "B", "position": 19, "token": "astronaut" }
        ],
        "turn_index": 1,
        "is_over": false
    });
    let game: Game = serde_json::from_value(record).expect("Valid record");

    let game = advance_turn(&game, &mut || 6u8).expect("Legal roll");

    assert!(game.is_over());
    assert_eq!(game.players()[1].position(), BOARD_SIZE);
    assert_eq!(game.turn_index(), 0);
}

#[test]
fn test_roll_after_finish_is_rejected_consistently() {
    let game = initialize(&["A", "B"]).expect("Valid setup");
    let mut die = scripted(&[6, 1, 6, 1, 6, 1, 6, 1, 6]);
    let mut game = game;
    while !game.is_over() {
        game = advance_turn(&game, &mut die).expect("Legal roll");
    }

    for _ in 0..3 {
        assert_eq!(
            advance_turn(&game, &mut || 4u8),
            Err(GameError::GameAlreadyOver)
        );
    }
    assert_eq!(game.players()[0].position(), BOARD_SIZE);
}

#[test]
fn test_rejected_roll_does_not_draw_from_die() {
    let game = play(initialize(&["A", "B"]).expect("Valid setup"), &[6, 1, 6, 1, 6, 1, 6, 1, 6]);
    assert!(game.is_over());

    let mut draws = 0;
    let result = advance_turn(&game, &mut || {
        draws += 1;
        3u8
    });
    assert!(result.is_err());
    assert_eq!(draws, 0);
}

#[test]
fn test_invalid_die_values_are_rejected() {
    let game = initialize(&["A", "B"]).expect("Valid setup");
    assert_eq!(advance_turn(&game, &mut || 0u8), Err(GameError::InvalidRoll(0)));
    assert_eq!(advance_turn(&game, &mut || 7u8), Err(GameError::InvalidRoll(7)));
}

#[test]
fn test_query_and_reset() {
    let mut slot = Some(initialize(&["A", "B"]).expect("Valid setup"));
    assert!(query(slot.as_ref()).is_ok());
    assert_eq!(phase_of(slot.as_ref()), GamePhase::InProgress);

    reset(&mut slot);

    assert_eq!(query(slot.as_ref()), Err(GameError::NoActiveGame));
    assert_eq!(phase_of(slot.as_ref()), GamePhase::NotStarted);
}

#[test]
fn test_phase_transitions() {
    let game = initialize(&["A", "B"]).expect("Valid setup");
    assert_eq!(game.phase(), GamePhase::InProgress);

    let game = play(game, &[6, 1, 6, 1, 6, 1, 6, 1, 6]);
    assert_eq!(game.phase(), GamePhase::Over);
    assert_eq!(GamePhase::Over.to_string(), "over");
}

#[test]
fn test_stored_record_round_trips() {
    let game = play(initialize(&["A", "B", "C"]).expect("Valid setup"), &[2, 3, 4]);
    let json = serde_json::to_string(&game).expect("Serialize failed");
    let restored: Game = serde_json::from_str(&json).expect("Deserialize failed");
    assert_eq!(restored, game);
}

#[test]
fn test_corrupt_records_are_rejected() {
    let overshoot = serde_json::json!({
        "players": [
            { "name": "A", "position": 26, "token": "alien" },
            { "name": "B", "position": 0, "token": "astronaut" }
        ],
        "turn_index": 0,
        "is_over": true
    });
    assert!(serde_json::from_value::<Game>(overshoot).is_err());

    let bad_turn = serde_json::json!({
        "players": [
            { "name": "A", "position": 0, "token": "alien" },
            { "name": "B", "position": 0, "token": "astronaut" }
        ],
        "turn_index": 2,
        "is_over": false
    });
    assert!(serde_json::from_value::<Game>(bad_turn).is_err());

    let over_without_finisher = serde_json::json!({
        "players": [
            { "name": "A", "position": 3, "token": "alien" },
            { "name": "B", "position": 0, "token": "astronaut" }
        ],
        "turn_index": 0,
        "is_over": true
    });
    assert!(serde_json::from_value::<Game>(over_without_finisher).is_err());
}

#[test]
fn test_records_with_impossible_last_turn_are_rejected() {
    let players = serde_json::json!([
        { "name": "A", "position": 2, "token": "alien" },
        { "name": "B", "position": -1, "token": "astronaut" }
    ]);
    let with_turn = |turn: serde_json::Value| {
        serde_json::json!({
            "players": players,
            "turn_index": 1,
            "is_over": false,
            "last_turn": turn
        })
    };

    let legal = with_turn(serde_json::json!({ "player_index": 0, "roll": 3, "from": -1, "to": 2 }));
    assert!(serde_json::from_value::<Game>(legal).is_ok());

    let unknown_seat =
        with_turn(serde_json::json!({ "player_index": 5, "roll": 3, "from": -1, "to": 2 }));
    assert!(serde_json::from_value::<Game>(unknown_seat).is_err());

    let seven = with_turn(serde_json::json!({ "player_index": 0, "roll": 7, "from": -1, "to": 6 }));
    assert!(serde_json::from_value::<Game>(seven).is_err());

    let wrong_landing =
        with_turn(serde_json::json!({ "player_index": 0, "roll": 3, "from": -1, "to": 4 }));
    assert!(serde_json::from_value::<Game>(wrong_landing).is_err());
}
