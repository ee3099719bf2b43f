use actix_web::{test, web, App};
use backend::{routes, AppState, SecurityConfig};

fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::without_db(SecurityConfig::default()))
}

#[actix_web::test]
async fn verify_requires_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/games/1/verify")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["code"], "UNAUTHORIZED_MISSING_BEARER");
}

#[actix_web::test]
async fn verify_rejects_garbage_token() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/games/1/verify")
        .insert_header(("authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["code"], "UNAUTHORIZED_INVALID_JWT");
}

#[actix_web::test]
async fn score_submission_requires_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/games/1/score")
        .set_json(serde_json::json!({
            "scores": {
                "team1": { "sets": [25, 25], "total": 50 },
                "team2": { "sets": [20, 20], "total": 40 }
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn game_id_must_be_a_positive_integer() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    for uri in ["/api/games/abc/verify", "/api/games/0/verify", "/api/games/-4/verify"] {
        let req = test::TestRequest::put().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "uri: {uri}");

        let body = test::read_body(resp).await;
        let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem["code"], "INVALID_GAME_ID");
    }
}
