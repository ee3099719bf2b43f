//! Tournament CRUD services: admin-gated mutations over the tournaments repository.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use tracing::info;

use crate::domain::lifecycle::Actor;
use crate::entities::tournaments::{TournamentFormat, TournamentStatus};
use crate::errors::domain::{DomainError, FieldViolation};
use crate::repos::tournaments;
use crate::repos::tournaments::{Tournament, TournamentCreate};

/// Input for creating a tournament; the creator comes from the actor.
#[derive(Debug, Clone)]
pub struct CreateTournamentInput {
    pub name: String,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub format: TournamentFormat,
    pub location: String,
}

pub async fn list_tournaments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Tournament>, DomainError> {
    tournaments::list_tournaments(conn).await
}

pub async fn create_tournament(
    txn: &DatabaseTransaction,
    input: CreateTournamentInput,
    actor: &Actor,
) -> Result<Tournament, DomainError> {
    actor.require_admin("create a tournament")?;
    validate_tournament_input(&input)?;

    let tournament = tournaments::create_tournament(
        txn,
        TournamentCreate {
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            format: input.format,
            location: input.location,
            created_by: actor.id,
        },
    )
    .await?;
    info!(tournament_id = tournament.id, by = actor.id, "tournament created");
    Ok(tournament)
}

/// Replace the participating-team set wholesale.
pub async fn set_teams(
    txn: &DatabaseTransaction,
    tournament_id: i64,
    team_ids: Vec<i64>,
    actor: &Actor,
) -> Result<Tournament, DomainError> {
    actor.require_admin("assign teams to a tournament")?;

    let mut deduped = team_ids;
    deduped.sort_unstable();
    deduped.dedup();

    let tournament = tournaments::set_teams(txn, tournament_id, &deduped).await?;
    info!(
        tournament_id,
        teams = tournament.teams.len(),
        by = actor.id,
        "tournament teams replaced"
    );
    Ok(tournament)
}

/// Direct status set; tournaments carry no transition logic of their own.
pub async fn set_status(
    txn: &DatabaseTransaction,
    tournament_id: i64,
    status: TournamentStatus,
    actor: &Actor,
) -> Result<Tournament, DomainError> {
    actor.require_admin("change a tournament's status")?;
    let tournament = tournaments::set_status(txn, tournament_id, status).await?;
    info!(tournament_id, by = actor.id, status = ?status, "tournament status changed");
    Ok(tournament)
}

fn validate_tournament_input(input: &CreateTournamentInput) -> Result<(), DomainError> {
    let mut violations = Vec::new();
    if input.name.trim().is_empty() {
        violations.push(FieldViolation::new("name", "Name is required"));
    }
    if input.location.trim().is_empty() {
        violations.push(FieldViolation::new("location", "Location is required"));
    }
    if input.end_date < input.start_date {
        violations.push(FieldViolation::new(
            "end_date",
            "End date cannot precede the start date",
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid_fields(violations))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{validate_tournament_input, CreateTournamentInput};
    use crate::entities::tournaments::TournamentFormat;

    fn input() -> CreateTournamentInput {
        CreateTournamentInput {
            name: "Spring Invitational".to_string(),
            start_date: datetime!(2025-04-01 09:00 UTC),
            end_date: datetime!(2025-04-03 18:00 UTC),
            format: TournamentFormat::RoundRobin,
            location: "Bayside Arena".to_string(),
        }
    }

    #[test]
    fn accepts_complete_input() {
        assert!(validate_tournament_input(&input()).is_ok());
    }

    #[test]
    fn rejects_inverted_date_range() {
        let mut bad = input();
        bad.end_date = datetime!(2025-03-01 09:00 UTC);
        assert!(validate_tournament_input(&bad).is_err());
    }

    #[test]
    fn rejects_blank_name_and_location() {
        let mut bad = input();
        bad.name = String::new();
        bad.location = " ".to_string();
        assert!(validate_tournament_input(&bad).is_err());
    }
}
