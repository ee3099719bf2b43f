//! SeaORM adapter for teams and their rosters - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::team_players;
use crate::entities::team_players::PlayerPosition;
use crate::entities::teams;

/// DTO for one roster entry.
#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub name: String,
    pub jersey_number: i32,
    pub position: PlayerPosition,
}

pub async fn find_all_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .order_by_asc(teams::Column::Name)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    teams::Entity::find()
        .filter(teams::Column::Id.is_in(team_ids.iter().copied()))
        .all(conn)
        .await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .filter(teams::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn insert_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    coach: &str,
) -> Result<teams::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let team_active = teams::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        coach: Set(coach.to_string()),
        wins: Set(0),
        losses: Set(0),
        points: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    team_active.insert(conn).await
}

pub async fn update_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team: teams::Model,
    name: &str,
    coach: &str,
) -> Result<teams::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut team_active: teams::ActiveModel = team.into();
    team_active.name = Set(name.to_string());
    team_active.coach = Set(coach.to_string());
    team_active.updated_at = Set(now);
    team_active.update(conn).await
}

pub async fn delete_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = teams::Entity::delete_many()
        .filter(teams::Column::Id.eq(team_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Roster rows for a set of teams, ordered by jersey number.
pub async fn find_players_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<team_players::Model>, sea_orm::DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    team_players::Entity::find()
        .filter(team_players::Column::TeamId.is_in(team_ids.iter().copied()))
        .order_by_asc(team_players::Column::JerseyNumber)
        .all(conn)
        .await
}

/// Replace a team's roster wholesale.
pub async fn replace_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    players: Vec<PlayerRow>,
) -> Result<(), sea_orm::DbErr> {
    team_players::Entity::delete_many()
        .filter(team_players::Column::TeamId.eq(team_id))
        .exec(conn)
        .await?;

    if players.is_empty() {
        return Ok(());
    }

    let now = time::OffsetDateTime::now_utc();
    let rows = players.into_iter().map(|player| team_players::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        name: Set(player.name),
        jersey_number: Set(player.jersey_number),
        position: Set(player.position),
        created_at: Set(now),
        updated_at: Set(now),
    });
    team_players::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}
