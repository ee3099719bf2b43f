pub mod games_sea;
pub mod teams_sea;
pub mod tournaments_sea;
pub mod users_sea;
