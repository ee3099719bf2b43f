//! SeaORM adapter for the games table - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde_json::json;

use crate::entities::games;

pub mod dto;

pub use dto::GameCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .one(conn)
        .await
}

/// All games ordered by scheduled time, optionally scoped to one tournament.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: Option<i64>,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    let mut query = games::Entity::find().order_by_asc(games::Column::ScheduledTime);
    if let Some(tournament_id) = tournament_id {
        query = query.filter(games::Column::TournamentId.eq(tournament_id));
    }
    query.all(conn).await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        tournament_id: Set(dto.tournament_id),
        team1_id: Set(dto.team1_id),
        team2_id: Set(dto.team2_id),
        scheduled_time: Set(dto.scheduled_time),
        status: Set(games::GameStatus::Scheduled),
        team1_sets: Set(json!([])),
        team1_total: Set(0),
        team2_sets: Set(json!([])),
        team2_total: Set(0),
        winner_id: Set(None),
        referee_id: Set(dto.referee_id),
        score_verified: Set(false),
        score_submitted_by: Set(None),
        score_verified_by: Set(None),
        lock_version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}
