//! Single binary web server: JSON REST API over the playoff bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set TEAMS_CSV to a `name,ranking,eligible` file to preload a demo season.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use playoff_bracket_web::{
    commit_seeding, load_seeded, read_teams_csv, reassign_participants, submit_result,
    BracketError, BracketStore, InMemoryStore, MutationOutcome, Round, SeasonId, SeedDraft,
    StoreError, Team,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::RwLock;
use uuid::Uuid;

/// All seasons, teams, and brackets. Every mutation holds the write lock for its whole
/// transaction, so mutations on one bracket are applied one at a time.
type AppState = Data<RwLock<InMemoryStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSeasonBody {
    name: String,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    ranking: Option<u32>,
    #[serde(default = "default_eligible")]
    eligible: bool,
}

fn default_eligible() -> bool {
    true
}

/// Scores arrive as raw JSON so that fractional or non-numeric values are rejected as
/// `InvalidScore` rather than failing deserialization.
#[derive(Deserialize)]
struct GameResultBody {
    #[serde(default)]
    home_score: Option<Value>,
    #[serde(default)]
    away_score: Option<Value>,
    #[serde(default)]
    overtime: bool,
}

#[derive(Deserialize)]
struct ParticipantsBody {
    #[serde(default)]
    home: Option<Uuid>,
    #[serde(default)]
    away: Option<Uuid>,
}

/// Path segment: season id (e.g. /api/seasons/{id})
#[derive(Deserialize)]
struct SeasonPath {
    id: SeasonId,
}

/// Path segments: season id and game id (e.g. /api/seasons/{id}/games/{game_id}/result)
#[derive(Deserialize)]
struct SeasonGamePath {
    id: SeasonId,
    game_id: Uuid,
}

/// Path segments: season id, round key, position (e.g. /api/seasons/{id}/rounds/semifinals/0)
#[derive(Deserialize)]
struct SeasonRoundPath {
    id: SeasonId,
    round: String,
    position: usize,
}

#[derive(Serialize)]
struct SeedEntry {
    seed: usize,
    team_id: Uuid,
    name: Option<String>,
}

fn score_from_json(raw: Option<&Value>) -> Option<i64> {
    raw.and_then(Value::as_i64)
}

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::NotSeeded
        | BracketError::GameNotFound(_)
        | BracketError::Store(StoreError::SeasonNotFound(_))
        | BracketError::Store(StoreError::BracketNotFound(_))
        | BracketError::Store(StoreError::GameNotFound(_)) => HttpResponse::NotFound().json(body),
        BracketError::Store(StoreError::Unavailable(_)) => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn outcome_response(result: Result<MutationOutcome, BracketError>) -> HttpResponse {
    match result {
        Ok(outcome) => {
            let notice = outcome.stale_state().map(|e| e.to_string());
            HttpResponse::Ok().json(serde_json::json!({
                "bracket": outcome.bracket,
                "complete": outcome.bracket.is_complete(),
                "invalidated": outcome.invalidated,
                "notice": notice,
            }))
        }
        Err(e) => {
            log::warn!("Bracket mutation rejected: {}", e);
            error_response(&e)
        }
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "playoff-bracket-web",
    })
}

/// Create a season (returns it with id; client stores id for subsequent requests).
#[post("/api/seasons")]
async fn api_create_season(state: AppState, body: Json<CreateSeasonBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = g.create_season(body.name.trim());
    match g.season(id) {
        Some(season) => HttpResponse::Ok().json(season),
        None => HttpResponse::InternalServerError().finish(),
    }
}

/// Add a team to the season's roster.
#[post("/api/seasons/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<SeasonPath>, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Team name is empty" }));
    }
    let mut team = Team::new(name);
    team.ranking = body.ranking;
    team.eligible = body.eligible;
    match g.add_team(path.id, team.clone()) {
        Ok(()) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&BracketError::from(e)),
    }
}

/// Eligible teams, best ranking first.
#[get("/api/seasons/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_eligible_teams(path.id) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&BracketError::from(e)),
    }
}

/// Seed draft pre-populated in ranking order.
#[get("/api/seasons/{id}/seeding/draft")]
async fn api_seeding_draft(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_eligible_teams(path.id) {
        Ok(pool) => HttpResponse::Ok().json(SeedDraft::from_ranked(&pool)),
        Err(e) => error_response(&BracketError::from(e)),
    }
}

/// Commit seeding: builds the bracket, or reseeds and clears dependent results.
#[put("/api/seasons/{id}/seeding")]
async fn api_commit_seeding(state: AppState, path: Path<SeasonPath>, body: Json<SeedDraft>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    outcome_response(commit_seeding(&mut *g, path.id, &body))
}

/// Full bracket with completion status.
#[get("/api/seasons/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match load_seeded(&*g, path.id) {
        Ok(bracket) => HttpResponse::Ok().json(serde_json::json!({
            "complete": bracket.is_complete(),
            "champion": bracket.champion(),
            "bracket": bracket,
        })),
        Err(e) => error_response(&e),
    }
}

/// Teams by seed, with names resolved from the roster.
#[get("/api/seasons/{id}/seeds")]
async fn api_get_seeds(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let bracket = match load_seeded(&*g, path.id) {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };
    let roster = g.season(path.id).map(|s| s.teams.as_slice()).unwrap_or_default();
    let seeds: Vec<SeedEntry> = bracket
        .teams_by_seed()
        .into_iter()
        .map(|(seed, team_id)| SeedEntry {
            seed,
            team_id,
            name: roster.iter().find(|t| t.id == team_id).map(|t| t.name.clone()),
        })
        .collect();
    HttpResponse::Ok().json(seeds)
}

/// One game by round key and position.
#[get("/api/seasons/{id}/rounds/{round}/{position}")]
async fn api_get_game(state: AppState, path: Path<SeasonRoundPath>) -> HttpResponse {
    let round: Round = match path.round.parse() {
        Ok(r) => r,
        Err(msg) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": msg })),
    };
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let bracket = match load_seeded(&*g, path.id) {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };
    match bracket.game(round, path.position) {
        Some(game) => HttpResponse::Ok().json(game),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No such game" })),
    }
}

/// Record a game result and advance the winner.
#[put("/api/seasons/{id}/games/{game_id}/result")]
async fn api_submit_result(
    state: AppState,
    path: Path<SeasonGamePath>,
    body: Json<GameResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    outcome_response(submit_result(
        &mut *g,
        path.id,
        path.game_id,
        score_from_json(body.home_score.as_ref()),
        score_from_json(body.away_score.as_ref()),
        body.overtime,
    ))
}

/// Manually set a game's teams.
#[put("/api/seasons/{id}/games/{game_id}/participants")]
async fn api_reassign_participants(
    state: AppState,
    path: Path<SeasonGamePath>,
    body: Json<ParticipantsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    outcome_response(reassign_participants(&mut *g, path.id, path.game_id, body.home, body.away))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Create a season from the CSV at `path`. Errors are logged; the server still starts.
fn preload_season(store: &mut InMemoryStore, path: &str) {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::error!("Could not open TEAMS_CSV {}: {}", path, e);
            return;
        }
    };
    let teams = match read_teams_csv(file) {
        Ok(t) => t,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    let season = store.create_season("Demo season");
    let count = teams.len();
    for team in teams {
        if let Err(e) = store.add_team(season, team) {
            log::error!("{}", e);
            return;
        }
    }
    log::info!("Preloaded season {} with {} team(s) from {}", season, count, path);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let mut store = InMemoryStore::new();
    if let Ok(path) = std::env::var("TEAMS_CSV") {
        preload_season(&mut store, &path);
    }
    let state = Data::new(RwLock::new(store));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_season)
            .service(api_add_team)
            .service(api_list_teams)
            .service(api_seeding_draft)
            .service(api_commit_seeding)
            .service(api_get_bracket)
            .service(api_get_seeds)
            .service(api_get_game)
            .service(api_submit_result)
            .service(api_reassign_participants)
    })
    .bind(bind)?
    .run()
    .await
}
