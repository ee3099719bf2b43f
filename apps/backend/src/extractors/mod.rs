pub mod current_user;
pub mod game_id;
pub mod validated_json;
