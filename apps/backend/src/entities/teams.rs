use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub coach: String,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_players::Entity")]
    TeamPlayers,
}

impl Related<super::team_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
