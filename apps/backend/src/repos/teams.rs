//! Team repository functions for domain layer (generic over ConnectionTrait).

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::teams_sea;
use crate::entities::team_players::PlayerPosition;
use crate::entities::teams;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Lightweight team reference used wherever only the display name is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    pub id: i64,
    pub name: String,
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub jersey_number: i32,
    pub position: PlayerPosition,
}

/// Team domain model with its roster resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub coach: String,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
    pub players: Vec<Player>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Input for creating or replacing a team.
#[derive(Debug, Clone)]
pub struct TeamUpsert {
    pub name: String,
    pub coach: String,
    pub players: Vec<Player>,
}

/// All teams ordered by name, rosters batch-loaded.
pub async fn list_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Team>, DomainError> {
    let models = teams_sea::find_all_ordered(conn).await?;
    let team_ids: Vec<i64> = models.iter().map(|team| team.id).collect();

    let mut rosters: HashMap<i64, Vec<Player>> = HashMap::new();
    for row in teams_sea::find_players_for(conn, &team_ids).await? {
        rosters.entry(row.team_id).or_default().push(Player {
            name: row.name,
            jersey_number: row.jersey_number,
            position: row.position,
        });
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let players = rosters.remove(&model.id).unwrap_or_default();
            Team::from_parts(model, players)
        })
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    let Some(model) = teams_sea::find_by_id(conn, team_id).await? else {
        return Ok(None);
    };
    let players = teams_sea::find_players_for(conn, &[team_id])
        .await?
        .into_iter()
        .map(|row| Player {
            name: row.name,
            jersey_number: row.jersey_number,
            position: row.position,
        })
        .collect();
    Ok(Some(Team::from_parts(model, players)))
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    find_by_id(conn, team_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, "Team not found"))
}

/// Check that every id in `team_ids` names an existing team.
pub async fn ensure_teams_exist<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<(), DomainError> {
    let found = teams_sea::find_by_ids(conn, team_ids).await?;
    if found.len() == team_ids.len() {
        return Ok(());
    }
    let found_ids: Vec<i64> = found.iter().map(|team| team.id).collect();
    let missing: Vec<String> = team_ids
        .iter()
        .filter(|id| !found_ids.contains(id))
        .map(|id| id.to_string())
        .collect();
    Err(DomainError::not_found(
        NotFoundKind::Team,
        format!("Team(s) not found: {}", missing.join(", ")),
    ))
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    dto: TeamUpsert,
) -> Result<Team, DomainError> {
    if teams_sea::find_by_name(txn, &dto.name).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueName,
            format!("A team named '{}' already exists", dto.name),
        ));
    }

    let model = teams_sea::insert_team(txn, &dto.name, &dto.coach).await?;
    let team_id = model.id;
    teams_sea::replace_players(txn, team_id, to_rows(&dto.players)).await?;
    require_team(txn, team_id).await
}

/// Replace name, coach, and roster wholesale, mirroring the create shape.
pub async fn update_team(
    txn: &DatabaseTransaction,
    team_id: i64,
    dto: TeamUpsert,
) -> Result<Team, DomainError> {
    let existing = teams_sea::find_by_id(txn, team_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, "Team not found"))?;

    if let Some(same_name) = teams_sea::find_by_name(txn, &dto.name).await? {
        if same_name.id != team_id {
            return Err(DomainError::conflict(
                ConflictKind::UniqueName,
                format!("A team named '{}' already exists", dto.name),
            ));
        }
    }

    teams_sea::update_team(txn, existing, &dto.name, &dto.coach).await?;
    teams_sea::replace_players(txn, team_id, to_rows(&dto.players)).await?;
    require_team(txn, team_id).await
}

pub async fn delete_team(txn: &DatabaseTransaction, team_id: i64) -> Result<(), DomainError> {
    let rows = teams_sea::delete_team(txn, team_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(NotFoundKind::Team, "Team not found"));
    }
    Ok(())
}

fn to_rows(players: &[Player]) -> Vec<teams_sea::PlayerRow> {
    players
        .iter()
        .map(|player| teams_sea::PlayerRow {
            name: player.name.clone(),
            jersey_number: player.jersey_number,
            position: player.position,
        })
        .collect()
}

impl Team {
    fn from_parts(model: teams::Model, players: Vec<Player>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            coach: model.coach,
            wins: model.wins,
            losses: model.losses,
            points: model.points,
            players,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
