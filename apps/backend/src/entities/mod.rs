pub mod games;
pub mod team_players;
pub mod teams;
pub mod tournament_teams;
pub mod tournaments;
pub mod users;
