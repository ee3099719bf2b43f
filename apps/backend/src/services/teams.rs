//! Team CRUD services: admin-gated mutations over the teams repository.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;

use crate::domain::lifecycle::Actor;
use crate::errors::domain::{DomainError, FieldViolation};
use crate::repos::teams;
use crate::repos::teams::{Team, TeamUpsert};

pub async fn list_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Team>, DomainError> {
    teams::list_teams(conn).await
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    dto: TeamUpsert,
    actor: &Actor,
) -> Result<Team, DomainError> {
    actor.require_admin("create a team")?;
    validate_team_input(&dto)?;
    let team = teams::create_team(txn, dto).await?;
    info!(team_id = team.id, by = actor.id, "team created");
    Ok(team)
}

pub async fn update_team(
    txn: &DatabaseTransaction,
    team_id: i64,
    dto: TeamUpsert,
    actor: &Actor,
) -> Result<Team, DomainError> {
    actor.require_admin("update a team")?;
    validate_team_input(&dto)?;
    let team = teams::update_team(txn, team_id, dto).await?;
    info!(team_id, by = actor.id, "team updated");
    Ok(team)
}

pub async fn delete_team(
    txn: &DatabaseTransaction,
    team_id: i64,
    actor: &Actor,
) -> Result<(), DomainError> {
    actor.require_admin("delete a team")?;
    teams::delete_team(txn, team_id).await?;
    info!(team_id, by = actor.id, "team deleted");
    Ok(())
}

fn validate_team_input(dto: &TeamUpsert) -> Result<(), DomainError> {
    let mut violations = Vec::new();
    if dto.name.trim().is_empty() {
        violations.push(FieldViolation::new("name", "Name is required"));
    }
    if dto.coach.trim().is_empty() {
        violations.push(FieldViolation::new("coach", "Coach is required"));
    }
    if dto.players.is_empty() {
        violations.push(FieldViolation::new("players", "At least one player is required"));
    }
    for (index, player) in dto.players.iter().enumerate() {
        if player.name.trim().is_empty() {
            violations.push(FieldViolation::new(
                format!("players[{index}].name"),
                "Player name is required",
            ));
        }
        if player.jersey_number < 0 {
            violations.push(FieldViolation::new(
                format!("players[{index}].number"),
                "Jersey number cannot be negative",
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid_fields(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::validate_team_input;
    use crate::entities::team_players::PlayerPosition;
    use crate::errors::domain::DomainError;
    use crate::repos::teams::{Player, TeamUpsert};

    fn roster() -> Vec<Player> {
        vec![Player {
            name: "Dana Reyes".to_string(),
            jersey_number: 9,
            position: PlayerPosition::Setter,
        }]
    }

    #[test]
    fn accepts_complete_input() {
        let dto = TeamUpsert {
            name: "Harbor Hawks".to_string(),
            coach: "Sam Ortiz".to_string(),
            players: roster(),
        };
        assert!(validate_team_input(&dto).is_ok());
    }

    #[test]
    fn rejects_blank_fields_and_empty_roster() {
        let dto = TeamUpsert {
            name: "  ".to_string(),
            coach: String::new(),
            players: Vec::new(),
        };
        match validate_team_input(&dto).unwrap_err() {
            DomainError::InvalidFields(violations) => assert_eq!(violations.len(), 3),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_jersey_numbers() {
        let mut players = roster();
        players[0].jersey_number = -1;
        let dto = TeamUpsert {
            name: "Harbor Hawks".to_string(),
            coach: "Sam Ortiz".to_string(),
            players,
        };
        assert!(validate_team_input(&dto).is_err());
    }
}
