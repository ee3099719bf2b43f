use actix_web::{test, web, App};
use backend::{routes, AppState, SecurityConfig};

fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::without_db(SecurityConfig::default()))
}

#[actix_web::test]
async fn login_rejects_missing_fields_before_touching_storage() {
    // No database is wired up: validation must fail first.
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({ "email": "", "google_sub": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["code"], "VALIDATION");

    let errors = problem["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|violation| violation["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"google_sub"));
}

#[actix_web::test]
async fn login_rejects_email_without_at_sign() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({ "email": "not-an-email", "google_sub": "sub-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn login_rejects_malformed_json() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["code"], "BAD_REQUEST");
}
