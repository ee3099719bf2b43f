use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::db::txn::SharedTxn;
use crate::domain::lifecycle::Actor;
use crate::entities::users::UserRole;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// Current user resolved from the request's Bearer token.
///
/// The token is verified against the configured secret, then the user row is
/// loaded by sub. Id and role come from the database, not the token, so role
/// changes take effect immediately without reissuing tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// The identity/role pair threaded into every service call.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = extract_bearer_from_header(req.headers().get(header::AUTHORIZATION))?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            let claims = verify_access_token(&token, &app_state.security)?;

            // Look up user by sub in database
            let user = if let Some(shared_txn) = SharedTxn::from_req(&req) {
                // Use shared transaction if present
                users::find_by_sub(shared_txn.transaction(), &claims.sub).await?
            } else {
                // Fall back to pooled connection
                let db = require_db(app_state)?;
                users::find_by_sub(db, &claims.sub).await?
            };

            let user = user.ok_or_else(AppError::forbidden_user_not_found)?;

            Ok(CurrentUser {
                id: user.id,
                sub: user.sub,
                role: user.role,
            })
        })
    }
}

fn extract_bearer_from_header(
    header_value: Option<&header::HeaderValue>,
) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::unauthorized_missing_bearer)?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::extract_bearer_from_header;
    use crate::error::AppError;

    #[test]
    fn accepts_well_formed_bearer() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_from_header(Some(&value)).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        for value in [
            None,
            Some(HeaderValue::from_static("Basic xyz")),
            Some(HeaderValue::from_static("Bearer")),
            Some(HeaderValue::from_static("Bearer  ")),
        ] {
            let result = extract_bearer_from_header(value.as_ref());
            assert!(matches!(result, Err(AppError::UnauthorizedMissingBearer)));
        }
    }
}
