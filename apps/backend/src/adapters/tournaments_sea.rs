//! SeaORM adapter for tournaments and their team links - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::tournament_teams;
use crate::entities::tournaments;
use crate::entities::tournaments::{TournamentFormat, TournamentStatus};

/// DTO for creating a tournament.
#[derive(Debug, Clone)]
pub struct TournamentCreate {
    pub name: String,
    pub start_date: time::OffsetDateTime,
    pub end_date: time::OffsetDateTime,
    pub format: TournamentFormat,
    pub location: String,
    pub created_by: i64,
}

pub async fn find_all_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<tournaments::Model>, sea_orm::DbErr> {
    tournaments::Entity::find()
        .order_by_desc(tournaments::Column::StartDate)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Option<tournaments::Model>, sea_orm::DbErr> {
    tournaments::Entity::find_by_id(tournament_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<tournaments::Model>, sea_orm::DbErr> {
    tournaments::Entity::find()
        .filter(tournaments::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn insert_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TournamentCreate,
) -> Result<tournaments::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let tournament_active = tournaments::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        start_date: Set(dto.start_date),
        end_date: Set(dto.end_date),
        status: Set(TournamentStatus::Upcoming),
        format: Set(dto.format),
        location: Set(dto.location),
        created_by: Set(dto.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };
    tournament_active.insert(conn).await
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament: tournaments::Model,
    status: TournamentStatus,
) -> Result<tournaments::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut tournament_active: tournaments::ActiveModel = tournament.into();
    tournament_active.status = Set(status);
    tournament_active.updated_at = Set(now);
    tournament_active.update(conn).await
}

/// Team links for a set of tournaments.
pub async fn find_team_links<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_ids: &[i64],
) -> Result<Vec<tournament_teams::Model>, sea_orm::DbErr> {
    if tournament_ids.is_empty() {
        return Ok(Vec::new());
    }
    tournament_teams::Entity::find()
        .filter(tournament_teams::Column::TournamentId.is_in(tournament_ids.iter().copied()))
        .all(conn)
        .await
}

/// Replace a tournament's participating-team set wholesale.
pub async fn replace_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    team_ids: &[i64],
) -> Result<(), sea_orm::DbErr> {
    tournament_teams::Entity::delete_many()
        .filter(tournament_teams::Column::TournamentId.eq(tournament_id))
        .exec(conn)
        .await?;

    if team_ids.is_empty() {
        return Ok(());
    }

    let now = time::OffsetDateTime::now_utc();
    let rows = team_ids
        .iter()
        .map(|team_id| tournament_teams::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id),
            team_id: Set(*team_id),
            created_at: Set(now),
        });
    tournament_teams::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}
