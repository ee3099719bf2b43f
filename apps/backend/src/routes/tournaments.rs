//! Tournament CRUD routes: public listing, admin-gated mutations.

use actix_web::{web, HttpRequest, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::db::txn::{with_txn, SharedTxn};
use crate::entities::tournaments::{TournamentFormat, TournamentStatus};
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::teams::TeamRef;
use crate::repos::tournaments::Tournament;
use crate::services::tournaments as tournament_service;
use crate::services::tournaments::CreateTournamentInput;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct TournamentResponse {
    id: i64,
    name: String,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    status: TournamentStatus,
    format: TournamentFormat,
    location: String,
    created_by: i64,
    teams: Vec<TeamRef>,
}

impl From<Tournament> for TournamentResponse {
    fn from(tournament: Tournament) -> Self {
        TournamentResponse {
            id: tournament.id,
            name: tournament.name,
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            status: tournament.status,
            format: tournament.format,
            location: tournament.location,
            created_by: tournament.created_by,
            teams: tournament.teams,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTournamentRequest {
    #[serde(default)]
    name: String,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    format: TournamentFormat,
    #[serde(default)]
    location: String,
}

#[derive(Debug, Deserialize)]
struct SetTeamsRequest {
    teams: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: TournamentStatus,
}

/// GET /api/tournaments — public, most recent start date first.
async fn list_tournaments(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<TournamentResponse>>, AppError> {
    let tournaments = if let Some(shared) = SharedTxn::from_req(&http_req) {
        tournament_service::list_tournaments(shared.transaction()).await?
    } else {
        let db = require_db(&app_state)?;
        tournament_service::list_tournaments(db).await?
    };

    Ok(web::Json(
        tournaments
            .into_iter()
            .map(TournamentResponse::from)
            .collect(),
    ))
}

/// POST /api/tournaments — admin only.
async fn create_tournament(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<CreateTournamentRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentResponse>, AppError> {
    let input = body.into_inner();
    let actor = user.actor();

    let tournament = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(tournament_service::create_tournament(
                txn,
                CreateTournamentInput {
                    name: input.name,
                    start_date: input.start_date,
                    end_date: input.end_date,
                    format: input.format,
                    location: input.location,
                },
                &actor,
            )
            .await?)
        })
    })
    .await?;

    Ok(web::Json(TournamentResponse::from(tournament)))
}

/// PUT /api/tournaments/{tournament_id}/teams — admin only; replaces the
/// participating-team set.
async fn set_teams(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    body: ValidatedJson<SetTeamsRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentResponse>, AppError> {
    let tournament_id = path.into_inner();
    let team_ids = body.into_inner().teams;
    let actor = user.actor();

    let tournament = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(tournament_service::set_teams(txn, tournament_id, team_ids, &actor).await?)
        })
    })
    .await?;

    Ok(web::Json(TournamentResponse::from(tournament)))
}

/// PUT /api/tournaments/{tournament_id}/status — admin only.
async fn set_status(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    body: ValidatedJson<SetStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TournamentResponse>, AppError> {
    let tournament_id = path.into_inner();
    let status = body.into_inner().status;
    let actor = user.actor();

    let tournament = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(tournament_service::set_status(txn, tournament_id, status, &actor).await?)
        })
    })
    .await?;

    Ok(web::Json(TournamentResponse::from(tournament)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_tournaments))
            .route(web::post().to(create_tournament)),
    );
    cfg.service(web::resource("/{tournament_id}/teams").route(web::put().to(set_teams)));
    cfg.service(web::resource("/{tournament_id}/status").route(web::put().to(set_status)));
}
