use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    Email,
    Role,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    Name,
    Coach,
    Wins,
    Losses,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TeamPlayers {
    Table,
    Id,
    TeamId,
    Name,
    JerseyNumber,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Tournaments {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    Status,
    Format,
    Location,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TournamentTeams {
    Table,
    Id,
    TournamentId,
    TeamId,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    TournamentId,
    Team1Id,
    Team2Id,
    ScheduledTime,
    Status,
    Team1Sets,
    Team1Total,
    Team2Sets,
    Team2Total,
    WinnerId,
    RefereeId,
    ScoreVerified,
    ScoreSubmittedBy,
    ScoreVerifiedBy,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserRoleEnum {
    #[iden = "user_role"]
    Type,
}

#[derive(Iden)]
enum PlayerPositionEnum {
    #[iden = "player_position"]
    Type,
}

#[derive(Iden)]
enum TournamentStatusEnum {
    #[iden = "tournament_status"]
    Type,
}

#[derive(Iden)]
enum TournamentFormatEnum {
    #[iden = "tournament_format"]
    Type,
}

#[derive(Iden)]
enum GameStatusEnum {
    #[iden = "game_status"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Postgres enums (PostgreSQL only)
        match manager.get_database_backend() {
            DatabaseBackend::Postgres => {
                // Helper function to check if enum exists
                async fn enum_exists(
                    manager: &SchemaManager<'_>,
                    enum_name: &str,
                ) -> Result<bool, DbErr> {
                    let result = manager
                        .get_connection()
                        .query_one(Statement::from_string(
                            DatabaseBackend::Postgres,
                            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                        ))
                        .await?;
                    Ok(result.is_some())
                }

                if !enum_exists(manager, "user_role").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(UserRoleEnum::Type)
                                .values(["admin", "referee", "user"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "player_position").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PlayerPositionEnum::Type)
                                .values([
                                    "setter",
                                    "outside_hitter",
                                    "middle_blocker",
                                    "opposite",
                                    "libero",
                                ])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "tournament_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(TournamentStatusEnum::Type)
                                .values(["upcoming", "ongoing", "completed", "cancelled"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "tournament_format").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(TournamentFormatEnum::Type)
                                .values([
                                    "single_elimination",
                                    "double_elimination",
                                    "round_robin",
                                ])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "game_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameStatusEnum::Type)
                                .values(["scheduled", "in_progress", "completed", "cancelled"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .custom(UserRoleEnum::Type)
                            .not_null()
                            .default("user"),
                    )
                    .col(
                        ColumnDef::new(Users::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email_unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::Coach).string().not_null())
                    .col(
                        ColumnDef::new(Teams::Wins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teams::Losses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teams::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teams_name_unique")
                    .table(Teams::Table)
                    .col(Teams::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // team_players
        manager
            .create_table(
                Table::create()
                    .table(TeamPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamPlayers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(TeamPlayers::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(TeamPlayers::Name).string().not_null())
                    .col(
                        ColumnDef::new(TeamPlayers::JerseyNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamPlayers::Position)
                            .custom(PlayerPositionEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamPlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamPlayers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_players_team")
                            .from(TeamPlayers::Table, TeamPlayers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_team_players_team_id")
                    .table(TeamPlayers::Table)
                    .col(TeamPlayers::TeamId)
                    .to_owned(),
            )
            .await?;

        // tournaments
        manager
            .create_table(
                Table::create()
                    .table(Tournaments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournaments::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Tournaments::Name).string().not_null())
                    .col(
                        ColumnDef::new(Tournaments::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::Status)
                            .custom(TournamentStatusEnum::Type)
                            .not_null()
                            .default("upcoming"),
                    )
                    .col(
                        ColumnDef::new(Tournaments::Format)
                            .custom(TournamentFormatEnum::Type)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tournaments::Location).string().not_null())
                    .col(
                        ColumnDef::new(Tournaments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournaments_created_by")
                            .from(Tournaments::Table, Tournaments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tournaments_name_unique")
                    .table(Tournaments::Table)
                    .col(Tournaments::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_tournaments_start_date")
                    .table(Tournaments::Table)
                    .col(Tournaments::StartDate)
                    .to_owned(),
            )
            .await?;

        // tournament_teams
        manager
            .create_table(
                Table::create()
                    .table(TournamentTeams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TournamentTeams::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(TournamentTeams::TournamentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentTeams::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentTeams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_teams_tournament")
                            .from(TournamentTeams::Table, TournamentTeams::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_teams_team")
                            .from(TournamentTeams::Table, TournamentTeams::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_tournament_teams_pair")
                    .table(TournamentTeams::Table)
                    .col(TournamentTeams::TournamentId)
                    .col(TournamentTeams::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::TournamentId).big_integer().not_null())
                    .col(ColumnDef::new(Games::Team1Id).big_integer().not_null())
                    .col(ColumnDef::new(Games::Team2Id).big_integer().not_null())
                    .col(
                        ColumnDef::new(Games::ScheduledTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::Status)
                            .custom(GameStatusEnum::Type)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(Games::Team1Sets)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Games::Team1Total)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::Team2Sets)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Games::Team2Total)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::WinnerId).big_integer().null())
                    .col(ColumnDef::new(Games::RefereeId).big_integer().null())
                    .col(
                        ColumnDef::new(Games::ScoreVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::ScoreSubmittedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Games::ScoreVerifiedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_tournament")
                            .from(Games::Table, Games::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_team1")
                            .from(Games::Table, Games::Team1Id)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_team2")
                            .from(Games::Table, Games::Team2Id)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_winner")
                            .from(Games::Table, Games::WinnerId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_referee")
                            .from(Games::Table, Games::RefereeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_score_submitted_by")
                            .from(Games::Table, Games::ScoreSubmittedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_score_verified_by")
                            .from(Games::Table, Games::ScoreVerifiedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_tournament_id")
                    .table(Games::Table)
                    .col(Games::TournamentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_scheduled_time")
                    .table(Games::Table)
                    .col(Games::ScheduledTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(TournamentTeams::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Tournaments::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(TeamPlayers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == DatabaseBackend::Postgres {
            manager
                .drop_type(PgType::drop().name(GameStatusEnum::Type).if_exists().to_owned())
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .name(TournamentFormatEnum::Type)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .name(TournamentStatusEnum::Type)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .name(PlayerPositionEnum::Type)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(PgType::drop().name(UserRoleEnum::Type).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
