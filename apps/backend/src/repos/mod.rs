pub mod games;
pub mod teams;
pub mod tournaments;
pub mod users;
