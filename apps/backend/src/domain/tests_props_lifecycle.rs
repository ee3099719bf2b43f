use proptest::prelude::*;

use super::lifecycle::{
    submit_score, validate_scores, verify_score, winner_side, Actor, GameLifecycleView,
    GameScores, Side, TeamScore,
};
use crate::entities::games::GameStatus;
use crate::entities::users::UserRole;

fn side_sets() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0..60i32, 1..=5)
}

fn sheet(team1: Vec<i32>, team2: Vec<i32>) -> GameScores {
    GameScores {
        team1: TeamScore {
            total: team1.iter().sum(),
            sets: team1,
        },
        team2: TeamScore {
            total: team2.iter().sum(),
            sets: team2,
        },
    }
}

fn fresh_game() -> GameLifecycleView {
    GameLifecycleView {
        status: GameStatus::InProgress,
        referee_id: Some(7),
        scores: GameScores::zero(),
        winner: None,
        score_verified: false,
        score_submitted_by: None,
        score_verified_by: None,
    }
}

proptest! {
    #[test]
    fn consistent_sheets_always_validate(team1 in side_sets(), team2 in side_sets()) {
        prop_assert!(validate_scores(&sheet(team1, team2)).is_ok());
    }

    #[test]
    fn inflated_totals_never_validate(team1 in side_sets(), team2 in side_sets(), delta in 1..100i32) {
        let mut scores = sheet(team1, team2);
        scores.team1.total += delta;
        prop_assert!(validate_scores(&scores).is_err());
    }

    #[test]
    fn winner_agrees_with_total_ordering(team1 in side_sets(), team2 in side_sets()) {
        let scores = sheet(team1, team2);
        let expected = match scores.team1.total.cmp(&scores.team2.total) {
            std::cmp::Ordering::Greater => Some(Side::Team1),
            std::cmp::Ordering::Less => Some(Side::Team2),
            std::cmp::Ordering::Equal => None,
        };
        prop_assert_eq!(winner_side(&scores), expected);
    }

    #[test]
    fn submit_then_verify_always_completes_consistently(team1 in side_sets(), team2 in side_sets()) {
        let scores = sheet(team1, team2);
        let submitted = submit_score(&fresh_game(), scores.clone(), 42).unwrap();
        prop_assert!(!submitted.score_verified);
        prop_assert_eq!(submitted.status, GameStatus::InProgress);

        let verified = verify_score(&submitted, &Actor::new(7, UserRole::Referee)).unwrap();
        // Completion and verification are never independently observable.
        prop_assert!(verified.score_verified);
        prop_assert_eq!(verified.status, GameStatus::Completed);
        prop_assert_eq!(verified.winner, winner_side(&scores));
        // Verification never rewrites the submitted sheet.
        prop_assert_eq!(verified.scores, scores);
    }
}
