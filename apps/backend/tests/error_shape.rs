use actix_web::{test, web, App, HttpResponse};
use backend::errors::domain::FieldViolation;
use backend::middleware::request_trace::RequestTrace;
use backend::AppError;

async fn test_error_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid_fields(
        "VALIDATION",
        vec![FieldViolation::new("example", "Example failure")],
    ))
}

#[actix_web::test]
async fn test_error_shape() {
    // Create a minimal test app with RequestTrace middleware
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/error", web::get().to(test_error_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/error").to_request();
    let resp = test::call_service(&app, req).await;

    // Assert status code is 400 (Bad Request)
    assert_eq!(resp.status().as_u16(), 400);

    // Extract headers before reading body to avoid borrowing issues
    let headers = resp.headers().clone();
    let request_id_header = headers.get("x-request-id");
    assert!(request_id_header.is_some());
    let request_id = request_id_header.unwrap().to_str().unwrap();
    assert!(!request_id.is_empty());

    // Assert Content-Type is application/problem+json
    let content_type = headers.get("content-type").unwrap().to_str().unwrap();
    assert_eq!(content_type, "application/problem+json");

    // Read and parse the response body
    let body = test::read_body(resp).await;
    let problem_details: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Assert all required keys are present
    assert!(problem_details.get("type").is_some());
    assert!(problem_details.get("title").is_some());
    assert!(problem_details.get("status").is_some());
    assert!(problem_details.get("detail").is_some());
    assert!(problem_details.get("code").is_some());
    assert!(problem_details.get("trace_id").is_some());

    // Assert specific values
    assert_eq!(problem_details["code"], "VALIDATION");
    assert_eq!(problem_details["status"], 400);

    // Structured field errors are carried through
    let errors = problem_details["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "example");
    assert_eq!(errors[0]["message"], "Example failure");

    // Assert trace_id in body equals the header value
    let trace_id_in_body = problem_details["trace_id"].as_str().unwrap();
    assert_eq!(trace_id_in_body, request_id);
}

#[actix_web::test]
async fn test_not_found_shape() {
    async fn handler() -> Result<HttpResponse, AppError> {
        Err(AppError::not_found("GAME_NOT_FOUND", "Game not found".to_string()))
    }

    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/missing", web::get().to(handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body = test::read_body(resp).await;
    let problem_details: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem_details["code"], "GAME_NOT_FOUND");
    assert_eq!(problem_details["detail"], "Game not found");
    // No field-error list on non-validation errors
    assert!(problem_details.get("errors").is_none());
}
