use chrono::NaiveDate;
use mlbpred::data_fetcher::MlbClient;
use mlbpred::data_fetcher::api::create_http_client_with_timeout;
use mlbpred::ingest::{IngestOptions, Ingestor};
use mlbpred::storage::Database;
use serde_json::json;
use tempfile::tempdir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn side(team_id: i64, wins: i32, losses: i32) -> serde_json::Value {
    json!({
        "team": { "id": team_id, "name": format!("Team {team_id}") },
        "leagueRecord": { "wins": wins, "losses": losses, "pct": ".500" }
    })
}

fn game(pk: i64, away: i64, home: i64) -> serde_json::Value {
    json!({
        "gamePk": pk,
        "season": "2024",
        "gameType": "R",
        "doubleHeader": "N",
        "teams": { "away": side(away, 1, 1), "home": side(home, 1, 1) }
    })
}

/// Linescore of a finished nine inning game.
fn linescore(home: i64, away: i64) -> serde_json::Value {
    json!({
        "currentInning": 9,
        "scheduledInnings": 9,
        "inningState": "End",
        "outs": 3,
        "teams": { "home": { "runs": home, "hits": 8 }, "away": { "runs": away, "hits": 6 } }
    })
}

/// Mounts the seasons, teams and schedule endpoints for a single 2024 season.
async fn mount_season(server: &MockServer) {
    mount_seasons_and_teams(server).await;
    mount_schedule(
        server,
        json!([
            { "date": "2024-03-10", "games": [game(900, 147, 111)] },
            { "date": "2024-04-01", "games": [game(1001, 147, 111)] },
            { "date": "2024-04-02", "games": [game(1002, 111, 119), game(1004, 119, 147)] },
            { "date": "2024-04-03", "games": [game(1005, 119, 111)] },
            { "date": "2024-07-01", "games": [game(1003, 147, 119)] }
        ]),
    )
    .await;
}

async fn mount_schedule(server: &MockServer, dates: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/schedule"))
        .and(query_param("season", "2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dates": dates })))
        .mount(server)
        .await;
}

async fn mount_seasons_and_teams(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/seasons"))
        .and(query_param("all", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "seasons": [{
                "seasonId": "2024",
                "hasWildcard": true,
                "preSeasonStartDate": "2024-01-01",
                "seasonStartDate": "2024-02-22",
                "regularSeasonStartDate": "2024-03-28",
                "regularSeasonEndDate": "2024-09-30",
                "seasonEndDate": "2024-10-30",
                "offseasonStartDate": "2024-10-31",
                "offSeasonEndDate": "2024-12-31"
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/teams"))
        .and(query_param("season", "2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teams": [
                { "id": 111, "name": "Boston Red Sox", "abbreviation": "BOS", "season": 2024 },
                { "id": 119, "name": "Los Angeles Dodgers", "abbreviation": "LAD", "season": 2024 },
                { "id": 147, "name": "New York Yankees", "abbreviation": "NYY", "season": 2024 }
            ]
        })))
        .mount(server)
        .await;
}

async fn ingestor(server: &MockServer, db: &Database) -> Ingestor {
    let client = create_http_client_with_timeout(5).unwrap();
    let api = MlbClient::with_client(client, &server.uri());
    Ingestor::new(api, db.clone(), 2019)
}

#[tokio::test]
async fn test_full_ingest_is_incremental() {
    let server = MockServer::start().await;
    mount_season(&server).await;

    Mock::given(method("GET"))
        .and(path("/game/1001/linescore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(linescore(5, 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/game/1002/linescore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(linescore(2, 7)))
        .expect(1)
        .mount(&server)
        .await;
    // Postponed: no run totals yet
    Mock::given(method("GET"))
        .and(path("/game/1004/linescore"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "teams": { "home": {}, "away": {} } })),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/game/1005/linescore"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;
    // Spring training and future games are never requested
    Mock::given(method("GET"))
        .and(path("/game/900/linescore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(linescore(1, 0)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/game/1003/linescore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(linescore(1, 0)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("data").join("mlb.db");
    let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
    db.init_tables(false).await.unwrap();
    let ingestor = ingestor(&server, &db).await;

    let first = ingestor.run(&IngestOptions::new(today())).await.unwrap();
    assert_eq!(first.seasons_added, 1);
    assert_eq!(first.teams_added, 3);
    assert_eq!(first.schedule_added, 6);
    assert_eq!(first.scores_added, 2);
    assert_eq!(first.scores_pending, 1);
    assert_eq!(first.scores_failed, 1);
    assert_eq!(first.seasons_refreshed, vec!["2024".to_string()]);

    let second = ingestor.run(&IngestOptions::new(today())).await.unwrap();
    assert_eq!(second.seasons_added, 0);
    assert_eq!(second.teams_added, 0);
    assert_eq!(second.schedule_added, 0);
    assert_eq!(second.scores_added, 0);
    assert_eq!(second.scores_pending, 1);

    let counts = db.table_counts().await.unwrap();
    assert_eq!(counts.seasons, 1);
    assert_eq!(counts.teams, 3);
    assert_eq!(counts.schedule, 6);
    assert_eq!(counts.scores, 2);

    let games = db.season_games(2024).await.unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].home_team, 111);
    assert_eq!(games[0].home_runs, 5);
    assert_eq!(games[1].away_runs, 7);
}

#[tokio::test]
async fn test_game_in_progress_is_fetched_again() {
    let server = MockServer::start().await;
    mount_seasons_and_teams(&server).await;
    mount_schedule(
        &server,
        json!([{ "date": "2024-06-01", "games": [game(2001, 147, 111)] }]),
    )
    .await;

    // First request sees the fifth inning, the next one the final
    Mock::given(method("GET"))
        .and(path("/game/2001/linescore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "currentInning": 5,
            "scheduledInnings": 9,
            "inningState": "Middle",
            "teams": { "home": { "runs": 1 }, "away": { "runs": 0 } }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/game/2001/linescore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(linescore(2, 6)))
        .mount(&server)
        .await;

    let db = Database::open_in_memory().await.unwrap();
    db.init_tables(false).await.unwrap();
    let ingestor = ingestor(&server, &db).await;

    let live = ingestor.run(&IngestOptions::new(today())).await.unwrap();
    assert_eq!(live.scores_added, 0);
    assert_eq!(live.scores_pending, 1);
    assert!(db.stored_score_ids().await.unwrap().is_empty());

    let finished = ingestor.run(&IngestOptions::new(today())).await.unwrap();
    assert_eq!(finished.scores_added, 1);
    assert_eq!(finished.scores_pending, 0);

    let games = db.season_games(2024).await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].home_runs, 2);
    assert_eq!(games[0].away_runs, 6);
}

#[tokio::test]
async fn test_skip_scores_and_season_filter() {
    let server = MockServer::start().await;
    mount_season(&server).await;

    let db = Database::open_in_memory().await.unwrap();
    db.init_tables(false).await.unwrap();
    let ingestor = ingestor(&server, &db).await;

    let options = IngestOptions {
        skip_scores: true,
        seasons: Some(vec!["2024".to_string()]),
        ..IngestOptions::new(today())
    };
    let report = ingestor.run(&options).await.unwrap();

    assert_eq!(report.schedule_added, 6);
    assert_eq!(report.scores_added, 0);
    assert_eq!(db.table_counts().await.unwrap().scores, 0);
    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .all(|r| !r.url.path().contains("linescore"))
    );
}

#[tokio::test]
async fn test_schedule_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seasons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "seasons": [{ "seasonId": "2024", "hasWildcard": true }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "teams": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/schedule"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let db = Database::open_in_memory().await.unwrap();
    db.init_tables(false).await.unwrap();
    let ingestor = ingestor(&server, &db).await;

    let result = ingestor.run(&IngestOptions::new(today())).await;
    assert!(matches!(
        result,
        Err(mlbpred::AppError::ApiClientError { status: 400, .. })
    ));
}
