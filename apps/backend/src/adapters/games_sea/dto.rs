//! DTOs for the games_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new game. Games are always created in `scheduled`
/// status with an empty score sheet.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub tournament_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub scheduled_time: OffsetDateTime,
    pub referee_id: Option<i64>,
}

impl GameCreate {
    pub fn new(
        tournament_id: i64,
        team1_id: i64,
        team2_id: i64,
        scheduled_time: OffsetDateTime,
    ) -> Self {
        Self {
            tournament_id,
            team1_id,
            team2_id,
            scheduled_time,
            referee_id: None,
        }
    }

    pub fn with_referee(mut self, referee_id: i64) -> Self {
        self.referee_id = Some(referee_id);
        self
    }
}
