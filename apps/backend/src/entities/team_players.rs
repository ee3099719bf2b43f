use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Roster positions for a volleyball squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "player_position")]
#[serde(rename_all = "snake_case")]
pub enum PlayerPosition {
    #[sea_orm(string_value = "setter")]
    Setter,
    #[sea_orm(string_value = "outside_hitter")]
    OutsideHitter,
    #[sea_orm(string_value = "middle_blocker")]
    MiddleBlocker,
    #[sea_orm(string_value = "opposite")]
    Opposite,
    #[sea_orm(string_value = "libero")]
    Libero,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "team_id")]
    pub team_id: i64,
    pub name: String,
    #[sea_orm(column_name = "jersey_number")]
    pub jersey_number: i32,
    pub position: PlayerPosition,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id"
    )]
    Team,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
