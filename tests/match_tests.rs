use woodland_battleship::{
    IdentityKey, Layout, Match, MatchError, Outcome, PieceEntry, PieceSet, Phase,
    Role, ShotOutcome, StatusReport, Waiting, BOARD_HEIGHT, BOARD_WIDTH, PIECES,
};

const FOX: &str = "10.0.0.1";
const BADGER: &str = "1.2.3.4";

fn id(key: &str) -> IdentityKey {
    IdentityKey::from(key)
}

fn entries(f: impl Fn(usize, i64) -> PieceEntry) -> Vec<PieceEntry> {
    PIECES.iter().enumerate().map(|(i, &len)| f(i, len as i64)).collect()
}

fn good_layout() -> Layout {
    Layout::new(vec![], entries(|i, len| [len, i as i64, 0]))
}

fn overlapping_layout() -> Layout {
    Layout::new(entries(|i, len| [len, i as i64, 0]), vec![])
}

fn stacked_layout() -> Layout {
    Layout::new(vec![], entries(|i, len| [len, 0, i as i64]))
}

fn two_players() -> Match {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    game.register(id(BADGER)).unwrap();
    game
}

fn in_progress() -> Match {
    let mut game = two_players();
    game.submit_layout(&id(FOX), "fox", Some(&good_layout())).unwrap();
    game.submit_layout(&id(BADGER), "badger", Some(&good_layout()))
        .unwrap();
    game
}

#[test]
fn first_player_is_fox_second_is_badger() {
    let mut game = Match::new();
    let fox = game.register(id(FOX)).unwrap();
    assert_eq!(fox.role, Role::Fox);
    assert_eq!(game.phase(), Phase::AwaitingPlayers);

    let badger = game.register(id(BADGER)).unwrap();
    assert_eq!(badger.role, Role::Badger);
    assert_eq!(game.phase(), Phase::AwaitingLayouts);
}

#[test]
fn registration_reports_board_and_pieces() {
    let mut game = Match::new();
    let reg = game.register(id(FOX)).unwrap();
    assert_eq!(reg.board, (8, 8));
    assert_eq!(reg.board, (BOARD_WIDTH, BOARD_HEIGHT));
    assert_eq!(reg.pieces, vec![5, 4, 3, 2, 1]);
}

#[test]
fn third_player_is_too_late() {
    let mut game = two_players();
    let err = game.register(id("1.2.3.5")).unwrap_err();
    assert_eq!(err, MatchError::MatchFull);
    assert!(err.to_string().to_lowercase().contains("too late"));
    assert_eq!(game.participants().len(), 2);
}

#[test]
fn re_registering_is_idempotent() {
    let mut game = two_players();
    let first = game.register(id(BADGER)).unwrap();
    let again = game.register(id(BADGER)).unwrap();
    assert_eq!(first, again);
    assert_eq!(again.role, Role::Badger);
    assert_eq!(game.participants().len(), 2);
}

#[test]
fn status_for_unknown_identity_fails() {
    let game = two_players();
    assert_eq!(
        game.status(&id("9.9.9.9")).unwrap_err(),
        MatchError::UnknownParticipant
    );
}

#[test]
fn status_waits_for_other_players() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    let status = game.status(&id(FOX)).unwrap();
    assert_eq!(status, StatusReport::Waiting(Waiting::OtherPlayers));
    assert_eq!(status.waiting_for(), Some("other players"));
}

#[test]
fn status_waits_for_initial_positions() {
    let mut game = two_players();
    let status = game.status(&id(FOX)).unwrap();
    assert_eq!(status.waiting_for(), Some("initial positions"));

    game.submit_layout(&id(FOX), "fox", Some(&good_layout())).unwrap();
    assert_eq!(
        game.status(&id(FOX)).unwrap().waiting_for(),
        Some("initial positions")
    );
}

#[test]
fn layout_without_positions_is_rejected() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    let err = game.submit_layout(&id(FOX), "fox", None).unwrap_err();
    assert_eq!(err, MatchError::MissingPositions);
    assert!(err.to_string().to_lowercase().contains("missing positions"));

    let empty = Layout::default();
    assert_eq!(
        game.submit_layout(&id(FOX), "fox", Some(&empty)).unwrap_err(),
        MatchError::MissingPositions
    );
    assert!(game.participants()[0].layout().is_pending());
}

#[test]
fn layout_for_someone_elses_animal_is_rejected() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    let err = game.submit_layout(&id(FOX), "badger", None).unwrap_err();
    assert_eq!(err, MatchError::UnknownAnimal);
    assert!(err.to_string().to_lowercase().contains("no such animal"));

    assert_eq!(
        game.submit_layout(&id(FOX), "hedgehog", Some(&good_layout()))
            .unwrap_err(),
        MatchError::UnknownAnimal
    );
}

#[test]
fn animal_names_are_case_insensitive() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    assert!(game.submit_layout(&id(FOX), "Fox", Some(&good_layout())).is_ok());
}

#[test]
fn layout_with_incorrect_pieces_is_rejected() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    let extra = [5, 5, 4, 3, 2, 1]
        .iter()
        .enumerate()
        .map(|(i, &len)| [len, i as i64, 4])
        .collect();
    let err = game
        .submit_layout(&id(FOX), "fox", Some(&Layout::new(vec![], extra)))
        .unwrap_err();
    assert_eq!(err, MatchError::IncorrectPieces);
    assert!(err.to_string().to_lowercase().contains("incorrect pieces"));
}

#[test]
fn layout_with_missing_or_negative_piece_is_incorrect() {
    let short = Layout::new(vec![], vec![[5, 0, 0], [4, 1, 0]]);
    assert_eq!(
        short.validate(&PieceSet::standard()).unwrap_err(),
        MatchError::IncorrectPieces
    );
    let negative = Layout::new(vec![], entries(|i, len| [if i == 0 { -len } else { len }, i as i64, 0]));
    assert_eq!(
        negative.validate(&PieceSet::standard()).unwrap_err(),
        MatchError::IncorrectPieces
    );
}

#[test]
fn second_layout_is_repeated_setup() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    game.submit_layout(&id(FOX), "fox", Some(&good_layout())).unwrap();
    let err = game
        .submit_layout(&id(FOX), "fox", Some(&good_layout()))
        .unwrap_err();
    assert_eq!(err, MatchError::RepeatedSetup);
    assert!(err.to_string().to_lowercase().contains("repeated setup"));
}

#[test]
fn overlapping_layout_is_rejected() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    let err = game
        .submit_layout(&id(FOX), "fox", Some(&overlapping_layout()))
        .unwrap_err();
    assert_eq!(err, MatchError::Overlap);
    assert!(err.to_string().to_lowercase().contains("overlap"));
}

#[test]
fn pieces_outside_the_board_are_rejected() {
    let above = Layout::new(vec![], entries(|i, len| [len, i as i64, -1]));
    let below = Layout::new(vec![], entries(|i, len| [len, i as i64, 4]));
    let left = Layout::new(entries(|i, len| [len, -1, i as i64]), vec![]);
    let right = Layout::new(entries(|i, len| [len, 4, i as i64]), vec![]);

    for layout in [above, below, left, right] {
        let mut game = Match::new();
        game.register(id(FOX)).unwrap();
        let err = game
            .submit_layout(&id(FOX), "fox", Some(&layout))
            .unwrap_err();
        assert_eq!(err, MatchError::OutOfBounds, "{:?}", layout);
        assert!(err.to_string().to_lowercase().contains("out of bounds"));
    }
}

#[test]
fn invalid_layout_can_be_resubmitted() {
    let mut game = two_players();
    let right = Layout::new(entries(|i, len| [len, 4, i as i64]), vec![]);
    assert_eq!(
        game.submit_layout(&id(FOX), "fox", Some(&right)).unwrap_err(),
        MatchError::OutOfBounds
    );
    let fox = &game.participants()[0];
    assert!(fox.invalid_layout());
    assert!(!fox.has_lost());
    assert!(fox.layout().is_pending());
    assert_eq!(game.phase(), Phase::AwaitingLayouts);

    game.submit_layout(&id(FOX), "fox", Some(&Layout::columns(&PieceSet::standard())))
        .unwrap();
    assert!(!game.participants()[0].invalid_layout());
    assert_eq!(
        game.submit_layout(&id(FOX), "fox", Some(&good_layout()))
            .unwrap_err(),
        MatchError::RepeatedSetup
    );

    game.submit_layout(&id(BADGER), "badger", Some(&good_layout()))
        .unwrap();
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(
        game.submit_shot(&id(FOX), (0, 0)).unwrap().outcome,
        ShotOutcome::Hit
    );
}

#[test]
fn one_invalid_layout_is_not_a_loss() {
    let mut game = two_players();
    game.submit_layout(&id(FOX), "fox", Some(&overlapping_layout()))
        .unwrap_err();
    game.submit_layout(&id(BADGER), "badger", Some(&good_layout()))
        .unwrap();
    assert!(game.participants().iter().all(|p| !p.has_lost()));
    assert_eq!(
        game.status(&id(BADGER)).unwrap(),
        StatusReport::Waiting(Waiting::InitialPositions)
    );
    assert_eq!(
        game.submit_shot(&id(BADGER), (0, 0)).unwrap_err(),
        MatchError::LayoutNotComplete
    );
}

#[test]
fn only_validation_failures_mark_a_layout_invalid() {
    assert!(MatchError::Overlap.is_layout_rejection());
    assert!(MatchError::OutOfBounds.is_layout_rejection());
    assert!(MatchError::IncorrectPieces.is_layout_rejection());
    assert!(!MatchError::RepeatedSetup.is_layout_rejection());
    assert!(!MatchError::MissingPositions.is_layout_rejection());

    let mut game = two_players();
    game.submit_layout(&id(FOX), "fox", None).unwrap_err();
    game.submit_layout(&id(FOX), "badger", Some(&overlapping_layout()))
        .unwrap_err();
    assert!(!game.participants()[0].invalid_layout());
}

#[test]
fn both_invalid_layouts_means_both_teams_lost() {
    let mut game = Match::new();
    game.register(id(FOX)).unwrap();
    let right = Layout::new(entries(|i, len| [len, 4, i as i64]), vec![]);
    assert_eq!(
        game.submit_layout(&id(FOX), "fox", Some(&right)).unwrap_err(),
        MatchError::OutOfBounds
    );

    game.register(id(BADGER)).unwrap();
    assert_eq!(
        game.submit_layout(&id(BADGER), "badger", Some(&overlapping_layout()))
            .unwrap_err(),
        MatchError::Overlap
    );

    let status = game.status(&id(BADGER)).unwrap();
    assert_eq!(status, StatusReport::Finished(Outcome::BothLost));
    assert!(status.result().unwrap().contains("both teams lost"));
    assert_eq!(
        game.status(&id(FOX)).unwrap(),
        StatusReport::Finished(Outcome::BothLost)
    );
    assert_eq!(game.phase(), Phase::Finished);
    assert!(game.participants().iter().all(|p| p.has_lost()));

    // The result is final; a valid layout can no longer revive the match.
    assert_eq!(
        game.submit_layout(&id(FOX), "fox", Some(&good_layout()))
            .unwrap_err(),
        MatchError::MatchOver
    );
    assert_eq!(
        game.status(&id(FOX)).unwrap(),
        StatusReport::Finished(Outcome::BothLost)
    );
}

#[test]
fn shots_are_refused_after_bad_setup() {
    let mut game = two_players();
    for (key, animal) in [(FOX, "fox"), (BADGER, "badger")] {
        game.submit_layout(&id(key), animal, Some(&stacked_layout()))
            .unwrap_err();
    }
    let err = game.submit_shot(&id(BADGER), (0, 0)).unwrap_err();
    assert_eq!(err, MatchError::LayoutNotComplete);
    let text = err.to_string().to_lowercase();
    assert!(text.contains("win") || text.contains("lose"));
}

#[test]
fn shots_are_refused_before_both_layouts() {
    let mut game = two_players();
    assert_eq!(
        game.submit_shot(&id(FOX), (0, 0)).unwrap_err(),
        MatchError::LayoutNotComplete
    );
    game.submit_layout(&id(FOX), "fox", Some(&good_layout())).unwrap();
    assert_eq!(
        game.submit_shot(&id(FOX), (0, 0)).unwrap_err(),
        MatchError::LayoutNotComplete
    );
}

#[test]
fn concrete_scenario_hit_then_miss() {
    let mut game = in_progress();
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.status(&id(FOX)).unwrap().waiting_for(), None);
    assert_eq!(game.status(&id(BADGER)).unwrap().waiting_for(), None);

    let hit = game.submit_shot(&id(FOX), (0, 0)).unwrap();
    assert_eq!(hit.outcome, ShotOutcome::Hit);
    assert!(hit.to_string().to_lowercase().contains("hit"));

    let miss = game.submit_shot(&id(FOX), (7, 7)).unwrap();
    assert_eq!(miss.outcome, ShotOutcome::Miss);
    assert!(miss.to_string().to_lowercase().contains("miss"));
}

#[test]
fn badger_lays_out_first_and_fox_fires_first() {
    let mut game = two_players();
    game.submit_layout(&id(BADGER), "badger", Some(&good_layout()))
        .unwrap();
    assert_eq!(
        game.status(&id(BADGER)).unwrap().waiting_for(),
        Some("initial positions")
    );
    let accepted = game.submit_layout(&id(FOX), "fox", Some(&good_layout())).unwrap();
    assert_eq!(accepted.phase, Phase::InProgress);
    assert!(accepted.to_string().contains("open fire"));
    for key in [FOX, BADGER] {
        assert_eq!(game.status(&id(key)).unwrap().waiting_for(), None);
    }

    assert_eq!(
        game.submit_shot(&id(FOX), (0, 0)).unwrap().outcome,
        ShotOutcome::Hit
    );
    assert_eq!(
        game.submit_shot(&id(BADGER), (0, 0)).unwrap().outcome,
        ShotOutcome::Hit
    );
    assert_eq!(
        game.submit_shot(&id(BADGER), (7, 7)).unwrap().outcome,
        ShotOutcome::Miss
    );
    let StatusReport::Live(live) = game.status(&id(FOX)).unwrap() else {
        panic!("expected a live match");
    };
    assert_eq!(live.fired.len(), 1);
    assert_eq!(live.received.len(), 2);
}

#[test]
fn shots_outside_the_board_are_rejected() {
    let mut game = in_progress();
    for target in [(-1, 0), (0, -1), (8, 0), (0, 8)] {
        assert_eq!(
            game.submit_shot(&id(FOX), target).unwrap_err(),
            MatchError::OutOfBounds
        );
    }
    assert!(game.participants()[0].shots().is_empty());
}

#[test]
fn repeated_shot_reports_the_same_outcome() {
    let mut game = in_progress();
    let first = game.submit_shot(&id(BADGER), (1, 1)).unwrap();
    let again = game.submit_shot(&id(BADGER), (1, 1)).unwrap();
    assert_eq!(first.outcome, again.outcome);
    assert!(!first.repeated);
    assert!(again.repeated);
    assert_eq!(game.participants()[1].shots().len(), 1);
}

#[test]
fn sinking_a_piece_is_a_hit() {
    let mut game = in_progress();
    // The 1-piece sits alone at (4, 0).
    let shot = game.submit_shot(&id(FOX), (4, 0)).unwrap();
    assert_eq!(shot.outcome, ShotOutcome::Sunk { length: 1 });
    assert!(shot.outcome.is_hit());
    assert!(shot.to_string().contains("hit"));
}

#[test]
fn sinking_every_piece_wins() {
    let mut game = in_progress();
    let mut last = None;
    for (x, &len) in PIECES.iter().enumerate() {
        for y in 0..len {
            last = Some(game.submit_shot(&id(BADGER), (x as i64, y as i64)).unwrap());
        }
    }
    assert!(last.unwrap().victory);
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(
        game.status(&id(BADGER)).unwrap(),
        StatusReport::Finished(Outcome::Won)
    );
    assert_eq!(
        game.status(&id(FOX)).unwrap(),
        StatusReport::Finished(Outcome::Lost)
    );
    assert_eq!(
        game.submit_shot(&id(FOX), (0, 0)).unwrap_err(),
        MatchError::MatchOver
    );
}

#[test]
fn live_status_tracks_shot_history() {
    let mut game = in_progress();
    game.submit_shot(&id(FOX), (0, 0)).unwrap();
    game.submit_shot(&id(FOX), (7, 7)).unwrap();
    game.submit_shot(&id(BADGER), (6, 6)).unwrap();

    let StatusReport::Live(live) = game.status(&id(BADGER)).unwrap() else {
        panic!("expected a live match");
    };
    assert_eq!(live.next_to_fire, Role::Badger);
    assert_eq!(live.fired.len(), 1);
    assert_eq!(live.received.len(), 2);
    assert_eq!(live.received[0].outcome, ShotOutcome::Hit);
}

#[test]
fn failed_requests_leave_the_match_untouched() {
    let mut game = two_players();
    let before = game.clone();
    let _ = game.register(id("5.5.5.5"));
    let _ = game.submit_layout(&id(FOX), "badger", Some(&good_layout()));
    let _ = game.submit_layout(&id(FOX), "fox", None);
    let _ = game.submit_layout(&id("5.5.5.5"), "fox", Some(&good_layout()));
    let _ = game.submit_shot(&id(FOX), (0, 0));
    assert_eq!(game, before);
}

#[test]
fn reset_starts_a_new_match() {
    let mut game = in_progress();
    game.reset();
    assert_eq!(game.phase(), Phase::AwaitingPlayers);
    assert!(game.participants().is_empty());
    assert_eq!(
        game.status(&id(FOX)).unwrap_err(),
        MatchError::UnknownParticipant
    );
    assert_eq!(game.register(id(BADGER)).unwrap().role, Role::Fox);
}

#[test]
fn only_participants_may_reset() {
    let mut game = in_progress();
    assert_eq!(
        game.register(id("1.2.3.5")).unwrap_err(),
        MatchError::MatchFull
    );
    let before = game.clone();
    assert_eq!(
        game.reset_by(&id("1.2.3.5")).unwrap_err(),
        MatchError::UnknownParticipant
    );
    assert_eq!(game, before);

    game.reset_by(&id(BADGER)).unwrap();
    assert!(game.participants().is_empty());
    assert_eq!(game.phase(), Phase::AwaitingPlayers);
}

#[test]
fn role_parsing() {
    assert_eq!("fox".parse::<Role>().unwrap(), Role::Fox);
    assert_eq!(" BADGER ".parse::<Role>().unwrap(), Role::Badger);
    assert_eq!("owl".parse::<Role>().unwrap_err(), MatchError::UnknownAnimal);
}
