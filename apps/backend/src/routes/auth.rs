use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::domain::FieldViolation;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub google_sub: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Handle OAuth login callback.
/// Creates or reuses a user based on email and returns a JWT token.
async fn login(
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut violations = Vec::new();
    if req.email.trim().is_empty() || !req.email.contains('@') {
        violations.push(FieldViolation::new("email", "A valid email is required"));
    }
    if req.google_sub.trim().is_empty() {
        violations.push(FieldViolation::new("google_sub", "Google sub cannot be empty"));
    }
    if !violations.is_empty() {
        return Err(AppError::invalid_fields("VALIDATION", violations));
    }

    let db = require_db(&app_state)?;
    let user = ensure_user(db, &req.email, req.name.as_deref(), &req.google_sub).await?;

    let token = mint_access_token(&user.sub, &user.email, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
