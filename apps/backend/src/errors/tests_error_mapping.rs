use actix_web::http::StatusCode;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, FieldViolation, InfraErrorKind, NotFoundKind};

#[test]
fn validation_maps_to_400() {
    let err: AppError = DomainError::validation("bad input").into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn invalid_fields_maps_to_400_with_fields() {
    let fields = vec![
        FieldViolation::new("scores.team1.total", "total must equal the sum of sets"),
        FieldViolation::new("scores.team2.sets", "a game has at most 5 sets"),
    ];
    let err: AppError = DomainError::invalid_fields(fields).into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    match err {
        AppError::Validation { fields, .. } => {
            assert_eq!(fields.expect("field errors present").len(), 2);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn forbidden_maps_to_403_and_keeps_message() {
    let err: AppError =
        DomainError::forbidden("Only the assigned referee can verify this game").into();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    match err {
        AppError::Forbidden { detail } => {
            assert_eq!(detail, "Only the assigned referee can verify this game");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[test]
fn not_found_maps_to_404_with_entity_code() {
    let err: AppError = DomainError::not_found(NotFoundKind::Game, "Game not found").into();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    match err {
        AppError::NotFound { code, .. } => assert_eq!(code, "GAME_NOT_FOUND"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn optimistic_lock_maps_to_409() {
    let err: AppError = DomainError::conflict(
        ConflictKind::OptimisticLock,
        "Game lock version mismatch",
    )
    .into();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    match err {
        AppError::Conflict { code, .. } => assert_eq!(code, "OPTIMISTIC_LOCK"),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[test]
fn infra_maps_to_500() {
    let err: AppError =
        DomainError::infra(InfraErrorKind::DbUnavailable, "pool exhausted").into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
