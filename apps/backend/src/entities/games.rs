use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_status")]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl GameStatus {
    /// `completed` and `cancelled` admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Completed | GameStatus::Cancelled)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "tournament_id")]
    pub tournament_id: i64,
    #[sea_orm(column_name = "team1_id")]
    pub team1_id: i64,
    #[sea_orm(column_name = "team2_id")]
    pub team2_id: i64,
    #[sea_orm(column_name = "scheduled_time")]
    pub scheduled_time: OffsetDateTime,
    pub status: GameStatus,
    /// Per-set points, stored as a JSONB array of integers.
    #[sea_orm(column_name = "team1_sets")]
    pub team1_sets: Json,
    #[sea_orm(column_name = "team1_total")]
    pub team1_total: i32,
    #[sea_orm(column_name = "team2_sets")]
    pub team2_sets: Json,
    #[sea_orm(column_name = "team2_total")]
    pub team2_total: i32,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    #[sea_orm(column_name = "referee_id")]
    pub referee_id: Option<i64>,
    #[sea_orm(column_name = "score_verified")]
    pub score_verified: bool,
    #[sea_orm(column_name = "score_submitted_by")]
    pub score_submitted_by: Option<i64>,
    #[sea_orm(column_name = "score_verified_by")]
    pub score_verified_by: Option<i64>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournaments::Entity",
        from = "Column::TournamentId",
        to = "super::tournaments::Column::Id"
    )]
    Tournament,
}

impl Related<super::tournaments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
