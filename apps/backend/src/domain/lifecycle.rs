//! Game lifecycle rules: score submission, verification, and winner derivation.
//!
//! Everything in this module is pure. Callers load a game, derive a
//! [`GameLifecycleView`], run the decision here, and persist the delta
//! between before and after in a single optimistic-locked write.

use std::cmp::Ordering;

use crate::entities::games::GameStatus;
use crate::entities::users::UserRole;
use crate::errors::domain::{ConflictKind, DomainError, FieldViolation};

/// The authenticated caller, threaded explicitly into every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Gate for administrator-only operations. Matching is exhaustive so a
    /// new role variant forces a decision here.
    pub fn require_admin(&self, action: &str) -> Result<(), DomainError> {
        match self.role {
            UserRole::Admin => Ok(()),
            UserRole::Referee | UserRole::User => Err(DomainError::forbidden(format!(
                "Only an administrator can {action}"
            ))),
        }
    }
}

/// Set-by-set and total points for one side of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScore {
    pub sets: Vec<i32>,
    pub total: i32,
}

impl TeamScore {
    pub fn zero() -> Self {
        Self {
            sets: Vec::new(),
            total: 0,
        }
    }
}

/// Scores for both sides. Submission replaces this wholesale, never merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameScores {
    pub team1: TeamScore,
    pub team2: TeamScore,
}

impl GameScores {
    pub fn zero() -> Self {
        Self {
            team1: TeamScore::zero(),
            team2: TeamScore::zero(),
        }
    }
}

/// Which side of the matchup won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Team1,
    Team2,
}

/// The slice of a game the lifecycle rules read and write.
///
/// Identity and matchup references live outside this view; the service layer
/// maps [`Side`] back to a concrete team id when persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub status: GameStatus,
    pub referee_id: Option<i64>,
    pub scores: GameScores,
    pub winner: Option<Side>,
    pub score_verified: bool,
    pub score_submitted_by: Option<i64>,
    pub score_verified_by: Option<i64>,
}

/// Maximum number of sets in a volleyball match (best of five).
const MAX_SETS: usize = 5;

/// Validate a submitted score sheet, collecting every field problem.
pub fn validate_scores(scores: &GameScores) -> Result<(), DomainError> {
    let mut violations = Vec::new();
    check_side(&scores.team1, "scores.team1", &mut violations);
    check_side(&scores.team2, "scores.team2", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid_fields(violations))
    }
}

fn check_side(side: &TeamScore, field: &str, violations: &mut Vec<FieldViolation>) {
    if side.sets.is_empty() || side.sets.len() > MAX_SETS {
        violations.push(FieldViolation::new(
            format!("{field}.sets"),
            format!("a match has between 1 and {MAX_SETS} sets"),
        ));
    }
    if side.sets.iter().any(|points| *points < 0) {
        violations.push(FieldViolation::new(
            format!("{field}.sets"),
            "set scores cannot be negative",
        ));
    }
    let sum: i32 = side.sets.iter().sum();
    if side.total != sum {
        violations.push(FieldViolation::new(
            format!("{field}.total"),
            format!("total must equal the sum of set scores ({sum})"),
        ));
    }
}

/// Validate the matchup of a new game: a team cannot play itself.
pub fn validate_matchup(team1_id: i64, team2_id: i64) -> Result<(), DomainError> {
    if team1_id == team2_id {
        return Err(DomainError::invalid_fields(vec![FieldViolation::new(
            "team2",
            "team2 must differ from team1",
        )]));
    }
    Ok(())
}

/// Record a score sheet against a game.
///
/// Any authenticated caller may submit. The scores are overwritten wholesale,
/// the submitter is recorded, and any prior verification is invalidated.
/// Status and winner are never touched here.
pub fn submit_score(
    game: &GameLifecycleView,
    scores: GameScores,
    submitted_by: i64,
) -> Result<GameLifecycleView, DomainError> {
    if game.status == GameStatus::Cancelled {
        return Err(DomainError::conflict(
            ConflictKind::InvalidState,
            "Cannot submit a score for a cancelled game",
        ));
    }

    validate_scores(&scores)?;

    Ok(GameLifecycleView {
        scores,
        score_submitted_by: Some(submitted_by),
        score_verified: false,
        ..game.clone()
    })
}

/// Finalize a submitted score.
///
/// An admin may always verify; a referee only for the game they are assigned
/// to. Authorization is checked before any state inspection so an
/// unauthorized caller learns nothing about the game. The status change,
/// verified flag, and winner all land in the same returned state and must be
/// persisted as one write.
pub fn verify_score(
    game: &GameLifecycleView,
    verifier: &Actor,
) -> Result<GameLifecycleView, DomainError> {
    match verifier.role {
        UserRole::Admin => {}
        UserRole::Referee if game.referee_id == Some(verifier.id) => {}
        UserRole::Referee | UserRole::User => {
            return Err(DomainError::forbidden(
                "Only the assigned referee can verify this game",
            ));
        }
    }

    if game.status == GameStatus::Cancelled {
        return Err(DomainError::conflict(
            ConflictKind::InvalidState,
            "Cannot verify a cancelled game",
        ));
    }

    if game.score_submitted_by.is_none() {
        return Err(DomainError::conflict(
            ConflictKind::InvalidState,
            "No score has been submitted for this game",
        ));
    }

    Ok(GameLifecycleView {
        status: GameStatus::Completed,
        score_verified: true,
        score_verified_by: Some(verifier.id),
        winner: winner_side(&game.scores),
        ..game.clone()
    })
}

/// Winner derivation: strictly greater total wins; equal totals leave the
/// winner unset.
pub fn winner_side(scores: &GameScores) -> Option<Side> {
    match scores.team1.total.cmp(&scores.team2.total) {
        Ordering::Greater => Some(Side::Team1),
        Ordering::Less => Some(Side::Team2),
        Ordering::Equal => None,
    }
}

/// Guard for an administrator directly moving a game between statuses.
///
/// `completed` is reachable only through verification; terminal states admit
/// no further transitions.
pub fn admin_transition(current: GameStatus, requested: GameStatus) -> Result<(), DomainError> {
    if requested == GameStatus::Completed {
        return Err(DomainError::validation(
            "A game is completed by verifying its score, not by setting the status",
        ));
    }
    if current.is_terminal() {
        return Err(DomainError::conflict(
            ConflictKind::InvalidState,
            format!("Game status can no longer change (currently {current:?})"),
        ));
    }
    Ok(())
}

/// Guard for rescheduling / referee reassignment: only sensible before the
/// game has reached a terminal state.
pub fn ensure_schedulable(current: GameStatus) -> Result<(), DomainError> {
    if current.is_terminal() {
        return Err(DomainError::conflict(
            ConflictKind::InvalidState,
            format!("Cannot reschedule a game that is {current:?}"),
        ));
    }
    Ok(())
}
