use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Game ID extracted from the route path parameter.
///
/// Validates shape only; existence is checked by the service inside the
/// request transaction so there is a single NotFound path.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct GameId(pub i64);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(parse_game_id(req))
    }
}

fn parse_game_id(req: &HttpRequest) -> Result<GameId, AppError> {
    let game_id_str = req
        .match_info()
        .get("game_id")
        .ok_or_else(|| {
            AppError::bad_request("INVALID_GAME_ID", "Missing game_id parameter".to_string())
        })?;

    let game_id = game_id_str.parse::<i64>().map_err(|_| {
        AppError::bad_request("INVALID_GAME_ID", format!("Invalid game id: {game_id_str}"))
    })?;

    if game_id <= 0 {
        return Err(AppError::bad_request(
            "INVALID_GAME_ID",
            format!("Game id must be positive, got: {game_id}"),
        ));
    }

    Ok(GameId(game_id))
}
