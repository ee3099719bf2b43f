//! Game-related HTTP routes: public listing plus the score submission and
//! verification workflow.

use actix_web::{web, HttpRequest, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::db::txn::{with_txn, SharedTxn};
use crate::domain::lifecycle::{GameScores, TeamScore};
use crate::entities::games::GameStatus;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::game_id::GameId;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::games::{Game, GameSummary, RefereeRef};
use crate::repos::teams::TeamRef;
use crate::services::games as game_service;
use crate::services::games::CreateGameInput;
use crate::state::app_state::AppState;

/// Score sheet for one side on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct TeamScorePayload {
    sets: Vec<i32>,
    total: i32,
}

/// Both sides' score sheets; submission replaces this wholesale.
#[derive(Debug, Serialize, Deserialize)]
struct GameScoresPayload {
    team1: TeamScorePayload,
    team2: TeamScorePayload,
}

impl From<GameScoresPayload> for GameScores {
    fn from(payload: GameScoresPayload) -> Self {
        GameScores {
            team1: TeamScore {
                sets: payload.team1.sets,
                total: payload.team1.total,
            },
            team2: TeamScore {
                sets: payload.team2.sets,
                total: payload.team2.total,
            },
        }
    }
}

impl From<GameScores> for GameScoresPayload {
    fn from(scores: GameScores) -> Self {
        GameScoresPayload {
            team1: TeamScorePayload {
                sets: scores.team1.sets,
                total: scores.team1.total,
            },
            team2: TeamScorePayload {
                sets: scores.team2.sets,
                total: scores.team2.total,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct GameResponse {
    id: i64,
    tournament: i64,
    team1: i64,
    team2: i64,
    #[serde(with = "time::serde::rfc3339")]
    scheduled_time: OffsetDateTime,
    status: GameStatus,
    scores: GameScoresPayload,
    winner: Option<i64>,
    referee: Option<i64>,
    score_verified: bool,
    score_submitted_by: Option<i64>,
    score_verified_by: Option<i64>,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        GameResponse {
            id: game.id,
            tournament: game.tournament_id,
            team1: game.team1_id,
            team2: game.team2_id,
            scheduled_time: game.scheduled_time,
            status: game.status,
            scores: game.scores.into(),
            winner: game.winner_id,
            referee: game.referee_id,
            score_verified: game.score_verified,
            score_submitted_by: game.score_submitted_by,
            score_verified_by: game.score_verified_by,
        }
    }
}

/// Listing row with team and referee names resolved.
#[derive(Debug, Serialize)]
struct GameSummaryResponse {
    id: i64,
    tournament: i64,
    team1: TeamRef,
    team2: TeamRef,
    referee: Option<RefereeRef>,
    #[serde(with = "time::serde::rfc3339")]
    scheduled_time: OffsetDateTime,
    status: GameStatus,
    scores: GameScoresPayload,
    winner: Option<i64>,
    score_verified: bool,
}

impl From<GameSummary> for GameSummaryResponse {
    fn from(summary: GameSummary) -> Self {
        let game = summary.game;
        GameSummaryResponse {
            id: game.id,
            tournament: game.tournament_id,
            team1: summary.team1,
            team2: summary.team2,
            referee: summary.referee,
            scheduled_time: game.scheduled_time,
            status: game.status,
            scores: game.scores.into(),
            winner: game.winner_id,
            score_verified: game.score_verified,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListGamesQuery {
    tournament: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    tournament: i64,
    team1: i64,
    team2: i64,
    #[serde(with = "time::serde::rfc3339")]
    scheduled_time: OffsetDateTime,
    referee: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SubmitScoreRequest {
    scores: GameScoresPayload,
}

#[derive(Debug, Deserialize)]
struct ScheduleRequest {
    #[serde(with = "time::serde::rfc3339")]
    scheduled_time: OffsetDateTime,
    referee: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: GameStatus,
}

/// GET /api/games[?tournament=ID]
///
/// Public: every game ordered by scheduled time, with team and referee
/// display names resolved.
async fn list_games(
    http_req: HttpRequest,
    query: web::Query<ListGamesQuery>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<GameSummaryResponse>>, AppError> {
    let summaries = if let Some(shared) = SharedTxn::from_req(&http_req) {
        game_service::list_games(shared.transaction(), query.tournament).await?
    } else {
        let db = require_db(&app_state)?;
        game_service::list_games(db, query.tournament).await?
    };

    Ok(web::Json(
        summaries.into_iter().map(GameSummaryResponse::from).collect(),
    ))
}

/// POST /api/games
///
/// Authenticated: schedule a game between two distinct teams.
async fn create_game(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameResponse>, AppError> {
    let input = body.into_inner();
    let actor = user.actor();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let created = game_service::create_game(
                txn,
                CreateGameInput {
                    tournament_id: input.tournament,
                    team1_id: input.team1,
                    team2_id: input.team2,
                    scheduled_time: input.scheduled_time,
                    referee_id: input.referee,
                },
                &actor,
            )
            .await?;
            Ok(created)
        })
    })
    .await?;

    Ok(web::Json(GameResponse::from(game)))
}

/// PUT /api/games/{game_id}/score
///
/// Authenticated: record both sides' score sheets. Overwrites any previous
/// submission and invalidates any previous verification.
async fn submit_score(
    http_req: HttpRequest,
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<SubmitScoreRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameResponse>, AppError> {
    let scores: GameScores = body.into_inner().scores.into();
    let actor = user.actor();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(game_service::submit_score(txn, game_id.0, scores, &actor).await?)
        })
    })
    .await?;

    Ok(web::Json(GameResponse::from(game)))
}

/// PUT /api/games/{game_id}/verify
///
/// Admin or the assigned referee: finalize the submitted score, completing
/// the game and deriving the winner.
async fn verify_score(
    http_req: HttpRequest,
    game_id: GameId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameResponse>, AppError> {
    let actor = user.actor();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(game_service::verify_score(txn, game_id.0, &actor).await?) })
    })
    .await?;

    Ok(web::Json(GameResponse::from(game)))
}

/// PUT /api/games/{game_id}/schedule
///
/// Admin only: move the game and/or reassign the referee before play is
/// finalized.
async fn set_schedule(
    http_req: HttpRequest,
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<ScheduleRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameResponse>, AppError> {
    let input = body.into_inner();
    let actor = user.actor();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(game_service::reschedule(
                txn,
                game_id.0,
                input.scheduled_time,
                input.referee,
                &actor,
            )
            .await?)
        })
    })
    .await?;

    Ok(web::Json(GameResponse::from(game)))
}

/// PUT /api/games/{game_id}/status
///
/// Admin only: start or cancel a game. Completion happens exclusively
/// through verification.
async fn set_status(
    http_req: HttpRequest,
    game_id: GameId,
    user: CurrentUser,
    body: ValidatedJson<StatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameResponse>, AppError> {
    let status = body.into_inner().status;
    let actor = user.actor();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(game_service::set_status(txn, game_id.0, status, &actor).await?)
        })
    })
    .await?;

    Ok(web::Json(GameResponse::from(game)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_games))
            .route(web::post().to(create_game)),
    );
    cfg.service(web::resource("/{game_id}/score").route(web::put().to(submit_score)));
    cfg.service(web::resource("/{game_id}/verify").route(web::put().to(verify_score)));
    cfg.service(web::resource("/{game_id}/schedule").route(web::put().to(set_schedule)));
    cfg.service(web::resource("/{game_id}/status").route(web::put().to(set_status)));
}
