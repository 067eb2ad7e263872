pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route(
            "/api/v1/resumes/parse",
            post(handlers::handle_parse_resume),
        )
        .route(
            "/api/v1/resumes/upload",
            post(handlers::handle_upload_resume),
        )
        .route("/api/v1/jobs/analyze", post(handlers::handle_analyze_jd))
        .route("/api/v1/screen", post(handlers::handle_screen))
        .route("/api/v1/decide", post(handlers::handle_decide))
        .with_state(state)
}
