//! Tournament repository functions for domain layer (generic over ConnectionTrait).

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::{teams_sea, tournaments_sea};
use crate::entities::tournaments;
use crate::entities::tournaments::{TournamentFormat, TournamentStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::teams::TeamRef;

pub use crate::adapters::tournaments_sea::TournamentCreate;

/// Tournament domain model with participating teams resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub status: TournamentStatus,
    pub format: TournamentFormat,
    pub location: String,
    pub created_by: i64,
    pub teams: Vec<TeamRef>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// All tournaments, most recent start date first, with team names resolved
/// through batched lookups.
pub async fn list_tournaments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Tournament>, DomainError> {
    let models = tournaments_sea::find_all_ordered(conn).await?;
    let tournament_ids: Vec<i64> = models.iter().map(|tournament| tournament.id).collect();

    let links = tournaments_sea::find_team_links(conn, &tournament_ids).await?;
    let mut team_ids: Vec<i64> = links.iter().map(|link| link.team_id).collect();
    team_ids.sort_unstable();
    team_ids.dedup();

    let team_names: HashMap<i64, String> = teams_sea::find_by_ids(conn, &team_ids)
        .await?
        .into_iter()
        .map(|team| (team.id, team.name))
        .collect();

    let mut teams_by_tournament: HashMap<i64, Vec<TeamRef>> = HashMap::new();
    for link in links {
        if let Some(name) = team_names.get(&link.team_id) {
            teams_by_tournament
                .entry(link.tournament_id)
                .or_default()
                .push(TeamRef {
                    id: link.team_id,
                    name: name.clone(),
                });
        }
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let teams = teams_by_tournament.remove(&model.id).unwrap_or_default();
            Tournament::from_parts(model, teams)
        })
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Option<Tournament>, DomainError> {
    let Some(model) = tournaments_sea::find_by_id(conn, tournament_id).await? else {
        return Ok(None);
    };
    let links = tournaments_sea::find_team_links(conn, &[tournament_id]).await?;
    let team_ids: Vec<i64> = links.iter().map(|link| link.team_id).collect();
    let teams = teams_sea::find_by_ids(conn, &team_ids)
        .await?
        .into_iter()
        .map(|team| TeamRef {
            id: team.id,
            name: team.name,
        })
        .collect();
    Ok(Some(Tournament::from_parts(model, teams)))
}

pub async fn require_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Tournament, DomainError> {
    find_by_id(conn, tournament_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Tournament, "Tournament not found"))
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<bool, DomainError> {
    Ok(tournaments_sea::find_by_id(conn, tournament_id)
        .await?
        .is_some())
}

pub async fn create_tournament(
    txn: &DatabaseTransaction,
    dto: TournamentCreate,
) -> Result<Tournament, DomainError> {
    if tournaments_sea::find_by_name(txn, &dto.name).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueName,
            format!("A tournament named '{}' already exists", dto.name),
        ));
    }
    let model = tournaments_sea::insert_tournament(txn, dto).await?;
    let id = model.id;
    require_tournament(txn, id).await
}

/// Replace the participating-team set. Every referenced team must exist.
pub async fn set_teams(
    txn: &DatabaseTransaction,
    tournament_id: i64,
    team_ids: &[i64],
) -> Result<Tournament, DomainError> {
    if tournaments_sea::find_by_id(txn, tournament_id).await?.is_none() {
        return Err(DomainError::not_found(
            NotFoundKind::Tournament,
            "Tournament not found",
        ));
    }
    crate::repos::teams::ensure_teams_exist(txn, team_ids).await?;
    tournaments_sea::replace_teams(txn, tournament_id, team_ids).await?;
    require_tournament(txn, tournament_id).await
}

pub async fn set_status(
    txn: &DatabaseTransaction,
    tournament_id: i64,
    status: TournamentStatus,
) -> Result<Tournament, DomainError> {
    let model = tournaments_sea::find_by_id(txn, tournament_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Tournament, "Tournament not found")
        })?;
    tournaments_sea::update_status(txn, model, status).await?;
    require_tournament(txn, tournament_id).await
}

impl Tournament {
    fn from_parts(model: tournaments::Model, teams: Vec<TeamRef>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            status: model.status,
            format: model.format,
            location: model.location,
            created_by: model.created_by,
            teams,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
