//! Game lifecycle orchestration: load, decide in the domain layer, persist.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use tracing::info;

use crate::adapters::games_sea::GameCreate;
use crate::domain::lifecycle::{self, Actor, GameScores};
use crate::entities::games::GameStatus;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::games::{Game, GameSummary};
use crate::repos::{games, teams, tournaments, users};

/// Input for scheduling a new game.
#[derive(Debug, Clone)]
pub struct CreateGameInput {
    pub tournament_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub scheduled_time: OffsetDateTime,
    pub referee_id: Option<i64>,
}

/// Public listing, optionally scoped to one tournament.
pub async fn list_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: Option<i64>,
) -> Result<Vec<GameSummary>, DomainError> {
    games::list_with_names(conn, tournament_id).await
}

/// Schedule a game. Every referenced entity must exist and the two teams
/// must be distinct; the game starts in `scheduled` with an empty sheet.
pub async fn create_game(
    txn: &DatabaseTransaction,
    input: CreateGameInput,
    actor: &Actor,
) -> Result<Game, DomainError> {
    lifecycle::validate_matchup(input.team1_id, input.team2_id)?;

    if !tournaments::exists(txn, input.tournament_id).await? {
        return Err(DomainError::not_found(
            NotFoundKind::Tournament,
            "Tournament not found",
        ));
    }
    teams::ensure_teams_exist(txn, &[input.team1_id, input.team2_id]).await?;
    if let Some(referee_id) = input.referee_id {
        users::require_user(txn, referee_id).await?;
    }

    let mut dto = GameCreate::new(
        input.tournament_id,
        input.team1_id,
        input.team2_id,
        input.scheduled_time,
    );
    if let Some(referee_id) = input.referee_id {
        dto = dto.with_referee(referee_id);
    }

    let game = games::create_game(txn, dto).await?;
    info!(game_id = game.id, created_by = actor.id, "game scheduled");
    Ok(game)
}

/// Record a score sheet. Open to any authenticated caller; invalidates any
/// prior verification.
pub async fn submit_score(
    txn: &DatabaseTransaction,
    game_id: i64,
    scores: GameScores,
    actor: &Actor,
) -> Result<Game, DomainError> {
    let game = games::require_game(txn, game_id).await?;
    let after = lifecycle::submit_score(&game.lifecycle_view(), scores, actor.id)?;
    let updated = games::apply_submission(txn, &game, &after).await?;
    info!(game_id, submitted_by = actor.id, "score submitted");
    Ok(updated)
}

/// Finalize a submitted score: admin or assigned referee only. Completion,
/// the verified flag, and the winner land in one write.
pub async fn verify_score(
    txn: &DatabaseTransaction,
    game_id: i64,
    actor: &Actor,
) -> Result<Game, DomainError> {
    let game = games::require_game(txn, game_id).await?;
    let after = lifecycle::verify_score(&game.lifecycle_view(), actor)?;
    let updated = games::apply_verification(txn, &game, &after).await?;
    info!(
        game_id,
        verified_by = actor.id,
        winner_id = updated.winner_id,
        "score verified"
    );
    Ok(updated)
}

/// Administrator-only: move the game or reassign the referee before play is
/// finalized. `referee_id = None` clears the assignment.
pub async fn reschedule(
    txn: &DatabaseTransaction,
    game_id: i64,
    scheduled_time: OffsetDateTime,
    referee_id: Option<i64>,
    actor: &Actor,
) -> Result<Game, DomainError> {
    actor.require_admin("reschedule a game")?;

    let game = games::require_game(txn, game_id).await?;
    lifecycle::ensure_schedulable(game.status)?;
    if let Some(referee_id) = referee_id {
        users::require_user(txn, referee_id).await?;
    }

    let updated = games::apply_schedule(txn, &game, scheduled_time, referee_id).await?;
    info!(game_id, by = actor.id, "game rescheduled");
    Ok(updated)
}

/// Administrator-only direct status change (start or cancel a game).
/// `completed` is unreachable here; it is a side effect of verification.
pub async fn set_status(
    txn: &DatabaseTransaction,
    game_id: i64,
    status: GameStatus,
    actor: &Actor,
) -> Result<Game, DomainError> {
    actor.require_admin("change a game's status")?;

    let game = games::require_game(txn, game_id).await?;
    lifecycle::admin_transition(game.status, status)?;

    let updated = games::apply_status(txn, &game, status).await?;
    info!(game_id, by = actor.id, status = ?status, "game status changed");
    Ok(updated)
}
