use actix_web::web;

pub mod auth;
pub mod games;
pub mod health;
pub mod teams;
pub mod tournaments;

/// Configure application routes.
///
/// In production, `main.rs` wires these behind CORS, request tracing, and
/// structured logging middleware. Tests register the same paths directly so
/// endpoint behavior can be exercised without those wrappers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Teams routes: /api/teams/**
    cfg.service(web::scope("/api/teams").configure(teams::configure_routes));

    // Tournaments routes: /api/tournaments/**
    cfg.service(web::scope("/api/tournaments").configure(tournaments::configure_routes));
}
