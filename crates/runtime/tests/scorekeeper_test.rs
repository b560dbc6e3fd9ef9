use std::sync::Arc;
use std::thread;

use cup_core::{
    AdjustAction, AdjustKind, GameError, GameId, GameSource, GameStatus, Phase, PlayerId,
    ResultType, ShotAction, TeamId, TurnKind,
};
use cup_runtime::{
    GameRepository, InMemoryGameRepo, RuntimeConfig, RuntimeError, Scorekeeper, StaticLineups,
    StepClock,
};

const HOME: TeamId = TeamId(1);
const AWAY: TeamId = TeamId(2);

fn players(ids: &[u64]) -> Vec<PlayerId> {
    ids.iter().copied().map(PlayerId).collect()
}

fn keeper_with(repository: Arc<dyn GameRepository>, retries: u32) -> Scorekeeper {
    let lineups = StaticLineups::new()
        .with_lineup(HOME, players(&[11, 12, 13]))
        .with_lineup(AWAY, players(&[21, 22, 23]));
    Scorekeeper::builder()
        .config(RuntimeConfig {
            commit_retries: retries,
            ..RuntimeConfig::default()
        })
        .repository(repository)
        .lineups(Arc::new(lineups))
        .clock(Arc::new(StepClock::default()))
        .build()
        .expect("scorekeeper builds")
}

fn keeper() -> Scorekeeper {
    keeper_with(Arc::new(InMemoryGameRepo::new()), 3)
}

fn started(keeper: &Scorekeeper) -> GameId {
    let game = keeper
        .create_game(HOME, AWAY, GameSource::Live)
        .expect("game created");
    keeper.start_game(game).expect("game started");
    game
}

fn shot(keeper: &Scorekeeper, game: GameId, team: TeamId, shooter: u64, result: ResultType) {
    keeper
        .append_event(game, &ShotAction::shot(team, PlayerId(shooter), result))
        .expect("shot accepted");
}

/// Home clears the away rack, away fails the comeback.
#[test]
fn full_game_through_redemption() {
    let keeper = keeper();
    let game = started(&keeper);

    let state = keeper.get_state(game).expect("state").state;
    assert_eq!(state.status, GameStatus::InProgress);
    assert_eq!(state.current_turn_number, 1);

    keeper
        .append_event(game, &ShotAction::pull(HOME, ResultType::PullAway, 99))
        .expect("pull accepted");
    shot(&keeper, game, HOME, 11, ResultType::TopIso);
    shot(&keeper, game, HOME, 12, ResultType::Miss);
    shot(&keeper, game, HOME, 13, ResultType::Miss);

    let record = keeper.get_state(game).expect("state");
    assert_eq!(record.state.phase, Phase::Redemption);
    assert_eq!(record.state.possession_team_id, AWAY);
    assert_eq!(
        record.last_turn().map(|turn| turn.kind),
        Some(TurnKind::Redemption { quota: 3 })
    );

    for shooter in [21, 22, 23] {
        shot(&keeper, game, AWAY, shooter, ResultType::Miss);
    }

    let record = keeper.get_state(game).expect("state");
    assert_eq!(record.game.status, GameStatus::Final);
    assert_eq!(record.game.winner_team_id, Some(HOME));

    // Timestamps come from the step clock and stay strictly increasing.
    let stamps: Vec<_> = record.events().iter().map(|e| e.timestamp).collect();
    assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));

    let err = keeper
        .append_event(game, &ShotAction::shot(AWAY, PlayerId(21), ResultType::Miss))
        .expect_err("final game rejects events");
    assert_eq!(err.error_code(), "GAME_NOT_IN_PROGRESS");
}

#[test]
fn rejected_operations_do_not_commit() {
    let keeper = keeper();
    let game = started(&keeper);
    shot(&keeper, game, HOME, 11, ResultType::Miss);
    let before = keeper.get_state(game).expect("state");

    let err = keeper
        .append_event(game, &ShotAction::shot(HOME, PlayerId(21), ResultType::TopIso))
        .expect_err("ineligible shooter");
    assert_eq!(err.error_code(), "SHOOTER_NOT_ELIGIBLE");

    let err = keeper
        .admin_adjust(
            game,
            &AdjustAction::new(PlayerId(11), ResultType::TopIso, AdjustKind::Add),
        )
        .expect_err("game still live");
    assert_eq!(err.error_code(), "GAME_NOT_FINAL");

    assert_eq!(keeper.get_state(game).expect("state"), before);
}

#[test]
fn undo_and_recompute_round_trip() {
    let keeper = keeper();
    let game = started(&keeper);
    shot(&keeper, game, HOME, 11, ResultType::TopRegular);
    shot(&keeper, game, HOME, 12, ResultType::BottomIso);
    let before_turn_end = keeper.get_state(game).expect("state");

    shot(&keeper, game, HOME, 13, ResultType::Miss);
    let bonus = keeper.get_state(game).expect("state");
    assert_eq!(bonus.turns().len(), 2);
    assert!(bonus.turns()[1].is_bonus());

    let report = keeper.recompute(game, false).expect("recompute");
    assert!(report.is_noop());
    assert_eq!(keeper.get_state(game).expect("state"), bonus);

    let removed = keeper.undo(game).expect("undo");
    assert_eq!(removed.shooter_id, Some(PlayerId(13)));
    let after = keeper.get_state(game).expect("state");
    assert_eq!(after.state, before_turn_end.state);
    assert_eq!(after.turns(), before_turn_end.turns());

    keeper.undo(game).expect("undo");
    keeper.undo(game).expect("undo");
    let err = keeper.undo(game).expect_err("log is empty");
    assert_eq!(err.error_code(), "NOTHING_TO_UNDO");
}

#[test]
fn finalize_and_adjust_a_finished_game() {
    let keeper = keeper();
    let game = started(&keeper);
    shot(&keeper, game, HOME, 11, ResultType::TopIso);

    assert_eq!(keeper.finalize(game, None).expect("finalize"), Some(HOME));
    let err = keeper.finalize(game, Some(AWAY)).expect_err("already decided");
    assert_eq!(err.error_code(), "GAME_ALREADY_DECIDED");

    keeper
        .admin_adjust(
            game,
            &AdjustAction::new(PlayerId(22), ResultType::BottomRegular, AdjustKind::Add),
        )
        .expect("add");
    let record = keeper.get_state(game).expect("state");
    assert_eq!(record.state.status, GameStatus::Final);
    assert_eq!(record.state.home_cups_remaining, 99);
    assert_eq!(record.game.winner_team_id, Some(HOME));
    assert!(record.events().latest().is_some_and(|e| e.out_of_band));

    keeper
        .admin_adjust(
            game,
            &AdjustAction::new(PlayerId(11), ResultType::TopIso, AdjustKind::Subtract),
        )
        .expect("subtract");
    let record = keeper.get_state(game).expect("state");
    assert_eq!(record.state.away_cups_remaining, 100);
    assert_eq!(record.events().len(), 1);
}

#[test]
fn finalize_with_level_cups_leaves_the_winner_open() {
    let keeper = keeper();
    let game = started(&keeper);

    assert_eq!(keeper.finalize(game, None).expect("finalize"), None);
    let record = keeper.get_state(game).expect("state");
    assert_eq!(record.game.status, GameStatus::Final);
    assert_eq!(record.game.winner_team_id, None);

    assert_eq!(
        keeper.finalize(game, Some(AWAY)).expect("winner declared"),
        Some(AWAY)
    );
}

#[test]
fn concurrent_pulls_are_serialized() {
    let repository: Arc<dyn GameRepository> = Arc::new(InMemoryGameRepo::new());
    let keeper = Arc::new(keeper_with(repository, 10_000));
    let game = started(&keeper);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let keeper = Arc::clone(&keeper);
            thread::spawn(move || {
                for _ in 0..5 {
                    keeper
                        .append_event(game, &ShotAction::pull(AWAY, ResultType::PullAway, 1))
                        .expect("pull accepted");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let record = keeper.get_state(game).expect("state");
    assert_eq!(record.events().len(), 40);
    assert_eq!(record.state.away_cups_remaining, 60);

    let afters: Vec<u32> = record
        .events()
        .iter()
        .map(|e| e.remaining_cups_after)
        .collect();
    assert_eq!(afters, (60..100).rev().collect::<Vec<u32>>());
}

#[test]
fn unknown_game_is_not_found() {
    let keeper = keeper();
    let err = keeper.get_state(GameId(404)).expect_err("missing");
    assert!(matches!(err, RuntimeError::GameNotFound(GameId(404))));
    assert_eq!(err.error_code(), "GAME_NOT_FOUND");
    assert!(keeper.list_games().expect("list").is_empty());
}
