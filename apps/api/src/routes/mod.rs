pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::result_page::handle_result;
use crate::scoring::handlers::handle_evaluate_projects;
use crate::state::AppState;
use crate::wizard::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard API
        .route(
            "/api/v1/wizard/sessions",
            post(handlers::handle_create_session),
        )
        .route(
            "/api/v1/wizard/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_clear_session),
        )
        .route(
            "/api/v1/wizard/sessions/:id/step",
            put(handlers::handle_set_step),
        )
        .route(
            "/api/v1/wizard/sessions/:id/step-one",
            post(handlers::handle_step_one),
        )
        .route(
            "/api/v1/wizard/sessions/:id/step-two",
            post(handlers::handle_step_two),
        )
        .route(
            "/api/v1/wizard/sessions/:id/step-three",
            post(handlers::handle_step_three),
        )
        // Scoring endpoint
        .route("/api/evaluate-projects", post(handle_evaluate_projects))
        // Result display
        .route("/result", get(handle_result))
        .with_state(state)
}
