//! Team CRUD routes: public listing, admin-gated mutations.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::db::txn::{with_txn, SharedTxn};
use crate::entities::team_players::PlayerPosition;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::teams::{Player, Team, TeamUpsert};
use crate::services::teams as team_service;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
struct PlayerPayload {
    name: String,
    number: i32,
    position: PlayerPosition,
}

#[derive(Debug, Serialize)]
struct TeamResponse {
    id: i64,
    name: String,
    coach: String,
    wins: i32,
    losses: i32,
    points: i32,
    players: Vec<PlayerPayload>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        TeamResponse {
            id: team.id,
            name: team.name,
            coach: team.coach,
            wins: team.wins,
            losses: team.losses,
            points: team.points,
            players: team
                .players
                .into_iter()
                .map(|player| PlayerPayload {
                    name: player.name,
                    number: player.jersey_number,
                    position: player.position,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    coach: String,
    #[serde(default)]
    players: Vec<PlayerPayload>,
}

impl From<TeamBody> for TeamUpsert {
    fn from(body: TeamBody) -> Self {
        TeamUpsert {
            name: body.name,
            coach: body.coach,
            players: body
                .players
                .into_iter()
                .map(|player| Player {
                    name: player.name,
                    jersey_number: player.number,
                    position: player.position,
                })
                .collect(),
        }
    }
}

/// GET /api/teams — public, ordered by name.
async fn list_teams(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<TeamResponse>>, AppError> {
    let teams = if let Some(shared) = SharedTxn::from_req(&http_req) {
        team_service::list_teams(shared.transaction()).await?
    } else {
        let db = require_db(&app_state)?;
        team_service::list_teams(db).await?
    };

    Ok(web::Json(teams.into_iter().map(TeamResponse::from).collect()))
}

/// POST /api/teams — admin only.
async fn create_team(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<TeamBody>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamResponse>, AppError> {
    let dto = TeamUpsert::from(body.into_inner());
    let actor = user.actor();

    let team = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(team_service::create_team(txn, dto, &actor).await?) })
    })
    .await?;

    Ok(web::Json(TeamResponse::from(team)))
}

/// PUT /api/teams/{team_id} — admin only; replaces name, coach, and roster.
async fn update_team(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    body: ValidatedJson<TeamBody>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamResponse>, AppError> {
    let team_id = path.into_inner();
    let dto = TeamUpsert::from(body.into_inner());
    let actor = user.actor();

    let team = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(team_service::update_team(txn, team_id, dto, &actor).await?) })
    })
    .await?;

    Ok(web::Json(TeamResponse::from(team)))
}

/// DELETE /api/teams/{team_id} — admin only.
async fn delete_team(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = path.into_inner();
    let actor = user.actor();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(team_service::delete_team(txn, team_id, &actor).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_teams))
            .route(web::post().to(create_team)),
    );
    cfg.service(
        web::resource("/{team_id}")
            .route(web::put().to(update_team))
            .route(web::delete().to(delete_team)),
    );
}
