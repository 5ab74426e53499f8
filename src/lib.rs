pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    routing::{get, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::{
    interview_request_service::InterviewRequestService,
    notification_service::NotificationService, recruiter_service::RecruiterService,
};

/// Shared handler context, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub interview_request_service: InterviewRequestService,
    pub recruiter_service: RecruiterService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool, notification_service: NotificationService) -> Self {
        let interview_request_service = InterviewRequestService::new(pool.clone());
        let recruiter_service = RecruiterService::new(pool.clone());

        Self {
            pool,
            interview_request_service,
            recruiter_service,
            notification_service,
        }
    }
}

pub fn app(state: AppState, cors: CorsLayer) -> Router {
    let notifications = state.notification_service.clone();

    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/solicitudes",
            get(routes::interview_request::list_requests)
                .post(routes::interview_request::create_request),
        )
        .route(
            "/api/solicitudes/:id/confirmar",
            put(routes::interview_request::confirm_request),
        )
        .route(
            "/api/solicitudes/:id/rechazar",
            put(routes::interview_request::reject_request),
        )
        .route(
            "/api/reclutadores",
            get(routes::recruiter::list_recruiters),
        )
        .layer(axum::middleware::from_fn_with_state(
            notifications,
            middleware::notify::dispatch_after_response,
        ))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
