use std::sync::Arc;

use cup_core::{GameSource, GameStatus, Phase, PlayerId, ResultType, ShotAction, TeamId};
use cup_runtime::{
    FileGameRepository, GameRepository, RuntimeConfig, Scenario, Scorekeeper, StepClock,
    StoreKind,
};
use tempfile::TempDir;

const SCENARIO: &str = r#"
    Scenario(
        name: "tie and manual winner",
        home: (team: 1, lineup: [11, 12]),
        away: (team: 2, lineup: [21, 22]),
        steps: [
            Pull(team: 1, result: "PULL_HOME", count: 100),
            Pull(team: 1, result: "PULL_AWAY", count: 99),
            Shot(team: 1, shooter: 12, result: "BOTTOM_ISO"),
            Finalize(winner: Some(2)),
            Recompute(preserve_final: true),
        ],
    )
"#;

fn file_keeper(dir: &TempDir, scenario: &Scenario) -> Scorekeeper {
    let config = RuntimeConfig {
        store: StoreKind::File,
        data_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    };
    Scorekeeper::builder()
        .config(config)
        .lineups(Arc::new(scenario.lineups()))
        .clock(Arc::new(StepClock::default()))
        .build()
        .expect("scorekeeper builds")
}

#[test]
fn scenario_replays_into_the_file_store() {
    let dir = TempDir::new().expect("temp dir");
    let scenario = Scenario::from_ron(SCENARIO).expect("scenario parses");

    let run = scenario
        .run(&file_keeper(&dir, &scenario))
        .expect("scenario runs");
    assert_eq!(run.steps_applied, 5);

    // A fresh service over the same directory sees the committed record.
    let keeper = file_keeper(&dir, &scenario);
    assert_eq!(keeper.list_games().expect("list"), vec![run.game]);

    let record = keeper.get_state(run.game).expect("state");
    assert_eq!(record.state.phase, Phase::Overtime);
    assert_eq!(record.state.status, GameStatus::Final);
    assert_eq!(
        (record.state.home_cups_remaining, record.state.away_cups_remaining),
        (0, 0)
    );
    assert_eq!(record.game.winner_team_id, Some(TeamId(2)));

    let report = keeper.recompute(run.game, true).expect("recompute");
    assert!(report.is_noop());
}

#[test]
fn drift_on_disk_is_repaired() {
    let dir = TempDir::new().expect("temp dir");
    let scenario = Scenario::from_ron(SCENARIO).expect("scenario parses");
    let keeper = file_keeper(&dir, &scenario);

    let game = keeper
        .create_game(TeamId(1), TeamId(2), GameSource::Live)
        .expect("create");
    keeper.start_game(game).expect("start");
    keeper
        .append_event(game, &ShotAction::shot(TeamId(1), PlayerId(11), ResultType::TopIso))
        .expect("shot");
    let expected = keeper.get_state(game).expect("state");

    // Corrupt the stored scoreboard behind the service's back.
    let repository = FileGameRepository::new(dir.path().join("games")).expect("repo");
    let mut stored = repository.load(game).expect("load").expect("stored");
    stored.record.state.away_cups_remaining = 3;
    repository
        .commit(&stored.record, stored.revision)
        .expect("commit");

    let report = keeper.recompute(game, false).expect("recompute");
    assert!(report.state_changed);
    assert_eq!(keeper.get_state(game).expect("state"), expected);
}

#[test]
fn imported_games_reject_adjustments() {
    let dir = TempDir::new().expect("temp dir");
    let mut scenario = Scenario::from_ron(SCENARIO).expect("scenario parses");
    scenario.imported = true;
    scenario.steps.push(cup_runtime::Step::Adjust {
        player: PlayerId(11),
        result: "TOP_ISO".to_owned(),
        action: "ADD".to_owned(),
    });

    let keeper = file_keeper(&dir, &scenario);
    let err = scenario.run(&keeper).expect_err("adjustment rejected");
    assert_eq!(cup_core::GameError::error_code(&err), "GAME_NOT_LIVE");
}
