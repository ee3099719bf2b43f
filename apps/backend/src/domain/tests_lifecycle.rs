use super::lifecycle::{
    admin_transition, ensure_schedulable, submit_score, validate_matchup, validate_scores,
    verify_score, winner_side, Actor, GameLifecycleView, GameScores, Side, TeamScore,
};
use crate::entities::games::GameStatus;
use crate::entities::users::UserRole;
use crate::errors::domain::{ConflictKind, DomainError};

const REFEREE_ID: i64 = 7;
const ADMIN_ID: i64 = 1;
const SUBMITTER_ID: i64 = 42;

fn scores(team1_sets: &[i32], team2_sets: &[i32]) -> GameScores {
    GameScores {
        team1: TeamScore {
            sets: team1_sets.to_vec(),
            total: team1_sets.iter().sum(),
        },
        team2: TeamScore {
            sets: team2_sets.to_vec(),
            total: team2_sets.iter().sum(),
        },
    }
}

fn unplayed(status: GameStatus) -> GameLifecycleView {
    GameLifecycleView {
        status,
        referee_id: Some(REFEREE_ID),
        scores: GameScores::zero(),
        winner: None,
        score_verified: false,
        score_submitted_by: None,
        score_verified_by: None,
    }
}

fn assigned_referee() -> Actor {
    Actor::new(REFEREE_ID, UserRole::Referee)
}

fn admin() -> Actor {
    Actor::new(ADMIN_ID, UserRole::Admin)
}

#[test]
fn submission_records_scores_and_submitter() {
    let game = unplayed(GameStatus::Scheduled);
    let sheet = scores(&[25, 23, 25], &[23, 25, 20]);

    let after = submit_score(&game, sheet.clone(), SUBMITTER_ID).unwrap();

    assert_eq!(after.scores, sheet);
    assert_eq!(after.scores.team1.total, 73);
    assert_eq!(after.scores.team2.total, 68);
    assert_eq!(after.score_submitted_by, Some(SUBMITTER_ID));
    assert!(!after.score_verified);
    // Submission never touches status or winner.
    assert_eq!(after.status, GameStatus::Scheduled);
    assert_eq!(after.winner, None);
}

#[test]
fn submission_clears_verification_regardless_of_prior_value() {
    // A verified, completed game gets a corrected score sheet.
    let mut game = unplayed(GameStatus::Completed);
    game.scores = scores(&[25, 25, 25], &[20, 20, 20]);
    game.winner = Some(Side::Team1);
    game.score_verified = true;
    game.score_submitted_by = Some(SUBMITTER_ID);
    game.score_verified_by = Some(REFEREE_ID);

    let after = submit_score(&game, scores(&[20, 20, 20], &[25, 25, 25]), 99).unwrap();

    assert!(!after.score_verified);
    assert_eq!(after.score_submitted_by, Some(99));
    // The stale winner stays until the next verification recomputes it.
    assert_eq!(after.status, GameStatus::Completed);
}

#[test]
fn resubmission_overwrites_wholesale() {
    let game = unplayed(GameStatus::InProgress);
    let first = submit_score(&game, scores(&[25, 25], &[20, 23]), 10).unwrap();
    let second = submit_score(&first, scores(&[25, 23, 25], &[23, 25, 20]), 11).unwrap();

    // Only the second caller and the second sheet remain.
    assert_eq!(second.score_submitted_by, Some(11));
    assert_eq!(second.scores, scores(&[25, 23, 25], &[23, 25, 20]));
}

#[test]
fn submission_rejected_for_cancelled_game() {
    let game = unplayed(GameStatus::Cancelled);
    let err = submit_score(&game, scores(&[25], &[20]), SUBMITTER_ID).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::InvalidState, _)
    ));
}

#[test]
fn submission_rejected_when_total_mismatches_sets() {
    let game = unplayed(GameStatus::Scheduled);
    let mut sheet = scores(&[25, 25], &[20, 20]);
    sheet.team1.total = 99;

    let err = submit_score(&game, sheet, SUBMITTER_ID).unwrap_err();
    match err {
        DomainError::InvalidFields(violations) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "scores.team1.total");
        }
        other => panic!("expected InvalidFields, got {other:?}"),
    }
}

#[test]
fn submission_rejected_for_empty_or_oversized_set_list() {
    assert!(validate_scores(&scores(&[], &[25])).is_err());
    assert!(validate_scores(&scores(&[25, 25, 25, 25, 25, 25], &[20])).is_err());
    assert!(validate_scores(&scores(&[25, 20, 25], &[18, 25, 23])).is_ok());
}

#[test]
fn submission_rejected_for_negative_set_scores() {
    let err = validate_scores(&scores(&[25, -3], &[20, 20])).unwrap_err();
    match err {
        DomainError::InvalidFields(violations) => {
            assert!(violations
                .iter()
                .any(|v| v.message.contains("negative")));
        }
        other => panic!("expected InvalidFields, got {other:?}"),
    }
}

#[test]
fn verification_completes_and_derives_winner_atomically() {
    let game = unplayed(GameStatus::InProgress);
    let submitted = submit_score(&game, scores(&[25, 23, 25], &[23, 25, 20]), SUBMITTER_ID).unwrap();

    let verified = verify_score(&submitted, &assigned_referee()).unwrap();

    // Status and verified flag flip in the same state change.
    assert_eq!(verified.status, GameStatus::Completed);
    assert!(verified.score_verified);
    assert_eq!(verified.score_verified_by, Some(REFEREE_ID));
    assert_eq!(verified.winner, Some(Side::Team1));
}

#[test]
fn verification_by_admin_bypasses_referee_assignment() {
    let game = unplayed(GameStatus::InProgress);
    let submitted = submit_score(&game, scores(&[20, 20], &[25, 25]), SUBMITTER_ID).unwrap();

    let verified = verify_score(&submitted, &admin()).unwrap();

    assert_eq!(verified.winner, Some(Side::Team2));
    assert_eq!(verified.score_verified_by, Some(ADMIN_ID));
}

#[test]
fn verification_forbidden_for_unassigned_referee_and_plain_user() {
    let game = unplayed(GameStatus::InProgress);
    let submitted = submit_score(&game, scores(&[25], &[20]), SUBMITTER_ID).unwrap();

    for actor in [
        Actor::new(REFEREE_ID + 1, UserRole::Referee),
        Actor::new(SUBMITTER_ID, UserRole::User),
    ] {
        let err = verify_score(&submitted, &actor).unwrap_err();
        match err {
            DomainError::Forbidden(msg) => {
                assert_eq!(msg, "Only the assigned referee can verify this game");
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}

#[test]
fn verification_forbidden_even_without_assigned_referee() {
    let mut game = unplayed(GameStatus::InProgress);
    game.referee_id = None;
    let submitted = submit_score(&game, scores(&[25], &[20]), SUBMITTER_ID).unwrap();

    // No referee assigned: only an admin can verify.
    assert!(verify_score(&submitted, &assigned_referee()).is_err());
    assert!(verify_score(&submitted, &admin()).is_ok());
}

#[test]
fn verification_requires_a_prior_submission() {
    let game = unplayed(GameStatus::Scheduled);
    let err = verify_score(&game, &assigned_referee()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::InvalidState, _)
    ));
}

#[test]
fn verification_rejected_for_cancelled_game() {
    let mut game = unplayed(GameStatus::Cancelled);
    game.score_submitted_by = Some(SUBMITTER_ID);
    let err = verify_score(&game, &admin()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::InvalidState, _)
    ));
}

#[test]
fn tied_totals_leave_winner_unset() {
    let game = unplayed(GameStatus::InProgress);
    let submitted = submit_score(&game, scores(&[25, 20], &[20, 25]), SUBMITTER_ID).unwrap();

    let verified = verify_score(&submitted, &assigned_referee()).unwrap();

    assert_eq!(verified.winner, None);
    assert!(verified.score_verified);
    assert_eq!(verified.status, GameStatus::Completed);
}

#[test]
fn full_scenario_submit_then_verify() {
    // Unplayed game, 0-0.
    let game = unplayed(GameStatus::Scheduled);
    assert_eq!(game.scores.team1.total, 0);
    assert_eq!(game.scores.team2.total, 0);

    let submitted = submit_score(
        &game,
        scores(&[25, 23, 25], &[23, 25, 20]),
        SUBMITTER_ID,
    )
    .unwrap();
    assert!(!submitted.score_verified);
    assert_eq!(submitted.status, GameStatus::Scheduled);

    let verified = verify_score(&submitted, &assigned_referee()).unwrap();
    assert_eq!(verified.status, GameStatus::Completed);
    assert!(verified.score_verified);
    assert_eq!(verified.winner, Some(Side::Team1));
}

#[test]
fn winner_side_prefers_strictly_greater_total() {
    assert_eq!(winner_side(&scores(&[25, 25], &[20, 20])), Some(Side::Team1));
    assert_eq!(winner_side(&scores(&[20, 20], &[25, 25])), Some(Side::Team2));
    assert_eq!(winner_side(&scores(&[25, 20], &[20, 25])), None);
}

#[test]
fn matchup_requires_distinct_teams() {
    assert!(validate_matchup(1, 2).is_ok());
    assert!(validate_matchup(3, 3).is_err());
}

#[test]
fn admin_cannot_set_completed_directly() {
    let err = admin_transition(GameStatus::Scheduled, GameStatus::Completed).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn admin_can_start_and_cancel_non_terminal_games() {
    assert!(admin_transition(GameStatus::Scheduled, GameStatus::InProgress).is_ok());
    assert!(admin_transition(GameStatus::Scheduled, GameStatus::Cancelled).is_ok());
    assert!(admin_transition(GameStatus::InProgress, GameStatus::Cancelled).is_ok());
}

#[test]
fn terminal_statuses_are_frozen() {
    for current in [GameStatus::Completed, GameStatus::Cancelled] {
        let err = admin_transition(current, GameStatus::InProgress).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::InvalidState, _)
        ));
    }
}

#[test]
fn reschedule_only_before_terminal_state() {
    assert!(ensure_schedulable(GameStatus::Scheduled).is_ok());
    assert!(ensure_schedulable(GameStatus::InProgress).is_ok());
    assert!(ensure_schedulable(GameStatus::Completed).is_err());
    assert!(ensure_schedulable(GameStatus::Cancelled).is_err());
}
