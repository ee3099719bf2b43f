//! Game repository functions for domain layer.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::{games_sea, teams_sea, users_sea};
use crate::domain::lifecycle::{GameLifecycleView, GameScores, Side, TeamScore};
use crate::entities::games;
use crate::entities::games::GameStatus;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::teams::TeamRef;

/// Game domain model
///
/// This represents a game in the domain layer, with all fields needed for
/// lifecycle decisions. It's converted from the database model
/// (games::Model) when loaded through repos functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub tournament_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub scheduled_time: OffsetDateTime,
    pub status: GameStatus,
    pub scores: GameScores,
    pub winner_id: Option<i64>,
    pub referee_id: Option<i64>,
    pub score_verified: bool,
    pub score_submitted_by: Option<i64>,
    pub score_verified_by: Option<i64>,
    pub lock_version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    /// Project this game into the slice the lifecycle rules operate on.
    pub fn lifecycle_view(&self) -> GameLifecycleView {
        GameLifecycleView {
            status: self.status,
            referee_id: self.referee_id,
            scores: self.scores.clone(),
            winner: self.winner_side(),
            score_verified: self.score_verified,
            score_submitted_by: self.score_submitted_by,
            score_verified_by: self.score_verified_by,
        }
    }

    /// Map the stored winner reference back to a matchup side.
    pub fn winner_side(&self) -> Option<Side> {
        match self.winner_id {
            Some(id) if id == self.team1_id => Some(Side::Team1),
            Some(id) if id == self.team2_id => Some(Side::Team2),
            _ => None,
        }
    }

    /// Resolve a matchup side to the concrete team id.
    pub fn side_team_id(&self, side: Side) -> i64 {
        match side {
            Side::Team1 => self.team1_id,
            Side::Team2 => self.team2_id,
        }
    }
}

// Free functions (generic) mirroring the adapter surface with domain types

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_sea::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return error if not found.
///
/// This is a convenience helper that converts `None` into a DomainError,
/// eliminating the repetitive `ok_or_else` pattern when a game must exist.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "Game not found"))
}

pub async fn create_game(
    txn: &DatabaseTransaction,
    dto: games_sea::GameCreate,
) -> Result<Game, DomainError> {
    let game = games_sea::create_game(txn, dto).await?;
    Ok(Game::from(game))
}

/// Apply an update guarded by the optimistic lock, then refetch.
///
/// The UPDATE filters on id and lock_version and bumps the version in the
/// same statement; a zero-row result is classified as NotFound (row gone) or
/// OptimisticLock (a concurrent writer got there first).
async fn optimistic_update_then_fetch(
    txn: &DatabaseTransaction,
    id: i64,
    expected_lock_version: i32,
    mut patch: games::ActiveModel,
) -> Result<games::Model, DomainError> {
    let now = time::OffsetDateTime::now_utc();
    patch.updated_at = Set(now);
    patch.lock_version = Set(expected_lock_version + 1);

    let result = games::Entity::update_many()
        .set(patch)
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::LockVersion.eq(expected_lock_version))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        let game = games_sea::find_by_id(txn, id).await?;
        return Err(match game {
            Some(game) => DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game lock version mismatch: expected {expected_lock_version}, but game has version {}",
                    game.lock_version
                ),
            ),
            None => DomainError::not_found(NotFoundKind::Game, "Game not found"),
        });
    }

    games_sea::find_by_id(txn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "Game not found"))
}

/// Persist the effect of a score submission: both score sheets, the
/// submitter, and the cleared verification flag in one write.
pub async fn apply_submission(
    txn: &DatabaseTransaction,
    game: &Game,
    after: &GameLifecycleView,
) -> Result<Game, DomainError> {
    let patch = games::ActiveModel {
        team1_sets: Set(serde_json::json!(after.scores.team1.sets)),
        team1_total: Set(after.scores.team1.total),
        team2_sets: Set(serde_json::json!(after.scores.team2.sets)),
        team2_total: Set(after.scores.team2.total),
        score_submitted_by: Set(after.score_submitted_by),
        score_verified: Set(after.score_verified),
        ..Default::default()
    };
    let updated = optimistic_update_then_fetch(txn, game.id, game.lock_version, patch).await?;
    Ok(Game::from(updated))
}

/// Persist the effect of a verification: verified flag, verifier, completed
/// status, and winner reference in one atomic write.
pub async fn apply_verification(
    txn: &DatabaseTransaction,
    game: &Game,
    after: &GameLifecycleView,
) -> Result<Game, DomainError> {
    let patch = games::ActiveModel {
        status: Set(after.status),
        score_verified: Set(after.score_verified),
        score_verified_by: Set(after.score_verified_by),
        winner_id: Set(after.winner.map(|side| game.side_team_id(side))),
        ..Default::default()
    };
    let updated = optimistic_update_then_fetch(txn, game.id, game.lock_version, patch).await?;
    Ok(Game::from(updated))
}

/// Persist an administrator's reschedule / referee reassignment.
pub async fn apply_schedule(
    txn: &DatabaseTransaction,
    game: &Game,
    scheduled_time: OffsetDateTime,
    referee_id: Option<i64>,
) -> Result<Game, DomainError> {
    let patch = games::ActiveModel {
        scheduled_time: Set(scheduled_time),
        referee_id: Set(referee_id),
        ..Default::default()
    };
    let updated = optimistic_update_then_fetch(txn, game.id, game.lock_version, patch).await?;
    Ok(Game::from(updated))
}

/// Persist an administrator's direct status change.
pub async fn apply_status(
    txn: &DatabaseTransaction,
    game: &Game,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let patch = games::ActiveModel {
        status: Set(status),
        ..Default::default()
    };
    let updated = optimistic_update_then_fetch(txn, game.id, game.lock_version, patch).await?;
    Ok(Game::from(updated))
}

/// Referee reference with the display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefereeRef {
    pub id: i64,
    pub username: Option<String>,
}

/// One row of the public games listing.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub game: Game,
    pub team1: TeamRef,
    pub team2: TeamRef,
    pub referee: Option<RefereeRef>,
}

/// All games (optionally tournament-scoped) ordered by scheduled time, with
/// team and referee names resolved through batched lookups.
pub async fn list_with_names<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: Option<i64>,
) -> Result<Vec<GameSummary>, DomainError> {
    let games = games_sea::find_all(conn, tournament_id).await?;

    let mut team_ids: Vec<i64> = games
        .iter()
        .flat_map(|game| [game.team1_id, game.team2_id])
        .collect();
    team_ids.sort_unstable();
    team_ids.dedup();

    let mut referee_ids: Vec<i64> = games.iter().filter_map(|game| game.referee_id).collect();
    referee_ids.sort_unstable();
    referee_ids.dedup();

    let teams: HashMap<i64, String> = teams_sea::find_by_ids(conn, &team_ids)
        .await?
        .into_iter()
        .map(|team| (team.id, team.name))
        .collect();
    let referees: HashMap<i64, Option<String>> = users_sea::find_by_ids(conn, &referee_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user.username))
        .collect();

    games
        .into_iter()
        .map(|model| {
            let team1 = resolve_team(&teams, model.team1_id, model.id)?;
            let team2 = resolve_team(&teams, model.team2_id, model.id)?;
            let referee = model.referee_id.map(|id| RefereeRef {
                id,
                username: referees.get(&id).cloned().flatten(),
            });
            Ok(GameSummary {
                game: Game::from(model),
                team1,
                team2,
                referee,
            })
        })
        .collect()
}

fn resolve_team(
    teams: &HashMap<i64, String>,
    team_id: i64,
    game_id: i64,
) -> Result<TeamRef, DomainError> {
    teams
        .get(&team_id)
        .map(|name| TeamRef {
            id: team_id,
            name: name.clone(),
        })
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Other("integrity".to_string()),
                format!("team {team_id} referenced by game {game_id} is missing"),
            )
        })
}

// Conversions between SeaORM models and domain models

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: model.tournament_id,
            team1_id: model.team1_id,
            team2_id: model.team2_id,
            scheduled_time: model.scheduled_time,
            status: model.status,
            scores: GameScores {
                // Deserialize the JSONB set arrays back into plain vectors.
                team1: TeamScore {
                    sets: serde_json::from_value(model.team1_sets)
                        .unwrap_or_else(|_| Vec::new()),
                    total: model.team1_total,
                },
                team2: TeamScore {
                    sets: serde_json::from_value(model.team2_sets)
                        .unwrap_or_else(|_| Vec::new()),
                    total: model.team2_total,
                },
            },
            winner_id: model.winner_id,
            referee_id: model.referee_id,
            score_verified: model.score_verified,
            score_submitted_by: model.score_submitted_by,
            score_verified_by: model.score_verified_by,
            lock_version: model.lock_version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
